#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn cam(pan_x: f64, pan_y: f64, scale: f64) -> Camera {
    Camera { pan: Vec2::new(pan_x, pan_y), scale, ..Camera::default() }
}

// --- Defaults ---

#[test]
fn camera_default_pan_is_zero() {
    assert_eq!(Camera::default().pan(), Vec2::ZERO);
}

#[test]
fn camera_default_scale_is_initial_scale() {
    assert_eq!(Camera::default().scale(), 10.0);
}

#[test]
fn camera_starts_dirty() {
    assert!(Camera::default().is_dirty());
}

#[test]
fn initial_scale_is_clamped_into_range() {
    let config = CanvasConfig { initial_scale: 500.0, ..CanvasConfig::default() };
    assert_eq!(Camera::new(&config).scale(), 100.0);
}

// --- screen_to_world ---

#[test]
fn screen_to_world_with_scale() {
    let world = cam(0.0, 0.0, 4.0).screen_to_world(Point::new(40.0, 80.0));
    assert!(point_approx_eq(world, Point::new(10.0, 20.0)));
}

#[test]
fn screen_to_world_with_pan() {
    let world = cam(100.0, 50.0, 1.0).screen_to_world(Point::new(100.0, 50.0));
    assert!(point_approx_eq(world, Point::ORIGIN));
}

#[test]
fn screen_to_world_origin() {
    let world = cam(50.0, 30.0, 2.0).screen_to_world(Point::ORIGIN);
    assert!(point_approx_eq(world, Point::new(-25.0, -15.0)));
}

// --- world_to_screen ---

#[test]
fn world_to_screen_with_pan_and_scale() {
    let screen = cam(20.0, 10.0, 3.0).world_to_screen(Point::new(5.0, 5.0));
    // 5*3 + 20 = 35, 5*3 + 10 = 25
    assert!(point_approx_eq(screen, Point::new(35.0, 25.0)));
}

#[test]
fn affine_matches_world_to_screen() {
    let c = cam(13.7, -42.3, 7.5);
    let world = Point::new(3.25, 9.5);
    assert!(point_approx_eq(c.affine() * world, c.world_to_screen(world)));
    assert!(point_approx_eq(c.affine().inverse() * c.world_to_screen(world), world));
}

// --- Round trips ---

#[test]
fn round_trip_fractional_scale() {
    let c = cam(13.7, -42.3, 1.75);
    let world = Point::new(333.3, -999.9);
    assert!(point_approx_eq(c.screen_to_world(c.world_to_screen(world)), world));
}

#[test]
fn round_trip_screen_first() {
    let c = cam(10.0, 20.0, 1.5);
    let screen = Point::new(400.0, 300.0);
    assert!(point_approx_eq(c.world_to_screen(c.screen_to_world(screen)), screen));
}

// --- screen_dist_to_world ---

#[test]
fn screen_dist_to_world_ignores_pan() {
    assert!(approx_eq(cam(999.0, -999.0, 4.0).screen_dist_to_world(8.0), 2.0));
}

// --- Zoom clamp ---

#[test]
fn set_scale_clamps_low() {
    let mut c = Camera::default();
    c.set_scale(0.01);
    assert_eq!(c.scale(), 1.0);
}

#[test]
fn set_scale_clamps_high() {
    let mut c = Camera::default();
    c.set_scale(1e6);
    assert_eq!(c.scale(), 100.0);
}

#[test]
fn zoom_at_keeps_anchor_fixed() {
    let mut c = cam(30.0, 40.0, 10.0);
    let anchor = Point::new(250.0, 125.0);
    let before = c.screen_to_world(anchor);
    c.zoom_at(anchor, 1.5);
    assert_eq!(c.scale(), 15.0);
    assert!(point_approx_eq(c.screen_to_world(anchor), before));
}

#[test]
fn zoom_at_respects_clamp() {
    let mut c = cam(0.0, 0.0, 90.0);
    let anchor = Point::new(10.0, 10.0);
    let before = c.screen_to_world(anchor);
    c.zoom_at(anchor, 4.0);
    assert_eq!(c.scale(), 100.0);
    assert!(point_approx_eq(c.screen_to_world(anchor), before));
}

// --- Centering and bounds ---

#[test]
fn move_center_puts_world_point_mid_screen() {
    let mut c = Camera::default();
    c.resize(Size::new(800.0, 600.0));
    c.move_center(Point::new(5.0, 5.0));
    assert!(point_approx_eq(c.world_to_screen(Point::new(5.0, 5.0)), Point::new(400.0, 300.0)));
    assert!(point_approx_eq(c.center(), Point::new(5.0, 5.0)));
}

#[test]
fn resize_keeps_world_center() {
    let mut c = Camera::default();
    c.move_center(Point::new(5.0, 5.0));
    c.resize(Size::new(800.0, 600.0));
    assert!(point_approx_eq(c.center(), Point::new(5.0, 5.0)));
    assert!(point_approx_eq(c.world_to_screen(Point::new(5.0, 5.0)), Point::new(400.0, 300.0)));

    c.resize(Size::new(300.0, 100.0));
    assert!(point_approx_eq(c.center(), Point::new(5.0, 5.0)));
}

#[test]
fn visible_bounds_cover_screen() {
    let mut c = Camera::default();
    c.resize(Size::new(200.0, 100.0));
    c.move_center(Point::new(50.0, 50.0));
    let bounds = c.visible_bounds();
    assert!(approx_eq(bounds.x0, 40.0));
    assert!(approx_eq(bounds.y0, 45.0));
    assert!(approx_eq(bounds.width(), 20.0));
    assert!(approx_eq(bounds.height(), 10.0));
}

// --- Dirty flag ---

#[test]
fn every_change_sets_dirty() {
    let mut c = Camera::default();
    c.mark_clean();
    c.pan_by(Vec2::new(1.0, 0.0));
    assert!(c.is_dirty());

    c.mark_clean();
    c.zoom_at(Point::ORIGIN, 2.0);
    assert!(c.is_dirty());

    c.mark_clean();
    c.resize(Size::new(10.0, 10.0));
    assert!(c.is_dirty());

    c.mark_clean();
    c.move_center(Point::ORIGIN);
    assert!(c.is_dirty());
}

#[test]
fn queries_leave_dirty_flag_alone() {
    let mut c = Camera::default();
    c.mark_clean();
    let _bounds = c.visible_bounds();
    let _world = c.screen_to_world(Point::new(3.0, 4.0));
    assert!(!c.is_dirty());
}
