#![allow(clippy::float_cmp)]

use std::sync::{Arc, Mutex};

use kurbo::Vec2;
use schema::{
    FullStitch, FullStitchKind, LineStitch, LineStitchKind, NodeStitch, NodeStitchKind, Pattern, PatternProperties,
};
use serde_json::json;

use super::*;
use crate::index::StitchKey;
use crate::input::{AddStitchIntent, AddStitchStage};
use crate::scene::LayerKind;
use crate::template::Color;

// =============================================================
// Helpers
// =============================================================

const SCREEN: Size = Size::new(200.0, 200.0);

fn red() -> PaletteItem {
    PaletteItem::solid("DMC", "666", "Bright Red", "FF0000")
}

fn full(x: f32, y: f32) -> FullStitch {
    FullStitch { x, y, palindex: 0, kind: FullStitchKind::Full }
}

fn project(width: u16, height: u16, fullstitches: Vec<FullStitch>) -> PatternProject {
    PatternProject::new(Pattern {
        properties: PatternProperties { width, height },
        palette: vec![red()],
        fullstitches,
        ..Pattern::default()
    })
}

/// A 10x10 canvas on a 200x200 screen, drawn and centered.
fn canvas_10x10() -> PatternCanvas {
    let mut canvas = PatternCanvas::default();
    canvas.resize(SCREEN);
    canvas.draw_pattern(&project(10, 10, vec![full(2.0, 3.0)])).unwrap();
    canvas
}

fn at(canvas: &PatternCanvas, x: f64, y: f64) -> Point {
    canvas.camera().world_to_screen(Point::new(x, y))
}

fn no_mods() -> Modifiers {
    Modifiers::default()
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Modifiers::default() }
}

fn add_intents(intents: &[Intent]) -> Vec<AddStitchIntent> {
    intents
        .iter()
        .filter_map(|i| match i {
            Intent::AddStitch(add) => Some(*add),
            Intent::RemoveStitch(_) => None,
        })
        .collect()
}

fn recorder(canvas: &mut PatternCanvas) -> Arc<Mutex<Vec<Intent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    canvas.subscribe(move |intent| sink.lock().unwrap().push(*intent));
    seen
}

fn assert_point_eq(a: Point, b: Point) {
    assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
}

// =============================================================
// Full draw
// =============================================================

#[test]
fn draw_pattern_registers_tinted_stitch() {
    let canvas = canvas_10x10();
    assert_eq!(canvas.scene().index_len(), 1);
    let drawable = canvas.scene().lookup(&StitchKey::from(&full(2.0, 3.0))).unwrap();
    assert_eq!(drawable.tint, Color(0x00FF_0000));
}

#[test]
fn draw_pattern_centers_on_chart_midpoint() {
    let canvas = canvas_10x10();
    assert_point_eq(canvas.camera().center(), Point::new(5.0, 5.0));
    assert_eq!(canvas.camera().scale(), canvas.config().initial_scale);
}

#[test]
fn failed_draw_leaves_canvas_empty() {
    let mut canvas = canvas_10x10();
    let mut broken = project(10, 10, vec![full(1.0, 1.0)]);
    broken.pattern.fullstitches[0].palindex = 7;
    let err = canvas.draw_pattern(&broken).unwrap_err();
    assert_eq!(err, SceneError::PaletteIndex { index: 7, len: 1 });
    assert_eq!(canvas.scene().drawable_count(), 0);
    assert_eq!(canvas.scene().index_len(), 0);
}

#[test]
fn clear_empties_scene() {
    let mut canvas = canvas_10x10();
    canvas.clear();
    assert_eq!(canvas.scene().drawable_count(), 0);
    assert!(canvas.display_list().is_empty());
}

// =============================================================
// Incremental updates
// =============================================================

#[test]
fn add_then_remove_restores_drawable_count() {
    let mut canvas = canvas_10x10();
    let before = canvas.scene().drawable_count();
    let stitch = Stitch::Full(full(7.0, 7.0));
    canvas.add_stitch(&stitch, &red()).unwrap();
    assert_eq!(canvas.scene().drawable_count(), before + 1);
    assert!(canvas.remove_stitch(&stitch));
    assert_eq!(canvas.scene().drawable_count(), before);
    assert_eq!(canvas.scene().index_len(), 1);
}

#[test]
fn removing_absent_stitch_is_a_no_op() {
    let mut canvas = canvas_10x10();
    assert!(!canvas.remove_stitch(&Stitch::Full(full(9.0, 9.0))));
    assert_eq!(canvas.scene().drawable_count(), 1);
}

#[test]
fn repeated_add_does_not_duplicate() {
    let mut canvas = canvas_10x10();
    canvas.add_stitch(&Stitch::Full(full(2.0, 3.0)), &red()).unwrap();
    assert_eq!(canvas.scene().drawable_count(), 1);
}

#[test]
fn bundles_add_and_remove_together() {
    let mut canvas = canvas_10x10();
    let bundle = StitchBundle {
        fullstitches: vec![full(5.0, 5.0)],
        lines: vec![LineStitch { x: (1.0, 3.0), y: (1.0, 1.0), palindex: 0, kind: LineStitchKind::Back }],
        nodes: vec![NodeStitch { x: 4.5, y: 4.5, rotated: false, palindex: 0, kind: NodeStitchKind::FrenchKnot }],
        ..StitchBundle::default()
    };
    canvas.add_stitches(&bundle, &[red()]).unwrap();
    assert_eq!(canvas.scene().index_len(), 4);
    canvas.remove_stitches(&bundle);
    assert_eq!(canvas.scene().index_len(), 1);
}

#[test]
fn bundle_with_bad_palette_index_fails() {
    let mut canvas = canvas_10x10();
    let mut stitch = full(5.0, 5.0);
    stitch.palindex = 3;
    let bundle = StitchBundle { fullstitches: vec![stitch], ..StitchBundle::default() };
    assert!(matches!(canvas.add_stitches(&bundle, &[red()]), Err(SceneError::PaletteIndex { index: 3, .. })));
}

// =============================================================
// Gestures
// =============================================================

#[test]
fn same_cell_drag_emits_single_cell_end() {
    let mut canvas = canvas_10x10();
    let down = at(&canvas, 2.4, 2.6);
    let up = at(&canvas, 2.9, 2.1);
    let started = canvas.on_pointer_down(down, Button::Primary, no_mods());
    assert_eq!(add_intents(&started)[0].stage, AddStitchStage::Start);
    let ended = add_intents(&canvas.on_pointer_up(up, Button::Primary, no_mods()));
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].stage, AddStitchStage::End);
    assert_eq!(ended[0].start, ended[0].end);
    assert_eq!(canvas.gesture_state(), GestureState::Idle);
}

#[test]
fn pointer_down_outside_fabric_stays_idle() {
    let mut canvas = canvas_10x10();
    let outside = at(&canvas, -1.0, 5.0);
    assert!(canvas.on_pointer_down(outside, Button::Primary, no_mods()).is_empty());
    assert_eq!(canvas.gesture_state(), GestureState::Idle);
}

#[test]
fn drag_emits_start_continue_end() {
    let mut canvas = canvas_10x10();
    let mut stages = Vec::new();
    let down = at(&canvas, 1.5, 1.5);
    let mid = at(&canvas, 3.5, 1.5);
    let up = at(&canvas, 5.5, 1.5);
    stages.extend(add_intents(&canvas.on_pointer_down(down, Button::Primary, no_mods())));
    stages.extend(add_intents(&canvas.on_pointer_move(mid, no_mods())));
    stages.extend(add_intents(&canvas.on_pointer_up(up, Button::Primary, no_mods())));
    let stages: Vec<_> = stages.iter().map(|i| i.stage).collect();
    assert_eq!(stages, vec![AddStitchStage::Start, AddStitchStage::Continue, AddStitchStage::End]);
}

#[test]
fn commit_clears_hint() {
    let mut canvas = canvas_10x10();
    let down = at(&canvas, 1.5, 1.5);
    canvas.on_pointer_down(down, Button::Primary, no_mods());
    canvas.draw_hint(&Stitch::Full(full(1.0, 1.0)), &red()).unwrap();
    assert!(canvas.scene().layer(LayerKind::Hint).as_graphics().is_some_and(|g| !g.is_empty()));
    canvas.on_pointer_up(down, Button::Primary, no_mods());
    assert!(canvas.scene().layer(LayerKind::Hint).as_graphics().is_some_and(crate::scene::Graphics::is_empty));
}

#[test]
fn releasing_shift_cancels_gesture() {
    let mut canvas = canvas_10x10();
    let down = at(&canvas, 1.5, 1.5);
    canvas.on_pointer_down(down, Button::Primary, no_mods());
    assert!(matches!(canvas.gesture_state(), GestureState::Armed { .. }));
    assert!(canvas.on_key_up(&Key("Shift".into())).is_empty());
    assert_eq!(canvas.gesture_state(), GestureState::Idle);
}

#[test]
fn secondary_button_does_not_arm() {
    let mut canvas = canvas_10x10();
    let down = at(&canvas, 1.5, 1.5);
    assert!(canvas.on_pointer_down(down, Button::Secondary, no_mods()).is_empty());
    assert_eq!(canvas.gesture_state(), GestureState::Idle);
}

// =============================================================
// Observers
// =============================================================

#[test]
fn observers_see_intents_in_emission_order() {
    let mut canvas = canvas_10x10();
    let seen = recorder(&mut canvas);
    let down = at(&canvas, 1.5, 1.5);
    let up = at(&canvas, 4.5, 1.5);
    let mut returned = canvas.on_pointer_down(down, Button::Primary, no_mods());
    returned.extend(canvas.on_pointer_up(up, Button::Primary, no_mods()));
    assert_eq!(*seen.lock().unwrap(), returned);
    assert_eq!(returned.len(), 2);
}

#[test]
fn observers_run_in_registration_order() {
    let mut canvas = canvas_10x10();
    let log = Arc::new(Mutex::new(Vec::new()));
    for tag in ["first", "second"] {
        let log = Arc::clone(&log);
        canvas.subscribe(move |_| log.lock().unwrap().push(tag));
    }
    let down = at(&canvas, 1.5, 1.5);
    canvas.on_pointer_down(down, Button::Primary, no_mods());
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}

// =============================================================
// Alternate-click removal
// =============================================================

#[test]
fn secondary_click_on_stitch_emits_removal() {
    let mut canvas = canvas_10x10();
    let seen = recorder(&mut canvas);
    let over = at(&canvas, 2.5, 3.5);
    let intents = canvas.on_pointer_up(over, Button::Secondary, no_mods());
    let expected = Intent::RemoveStitch(RemoveStitchIntent { stitch: Stitch::Full(full(2.0, 3.0)) });
    assert_eq!(intents, vec![expected]);
    assert_eq!(*seen.lock().unwrap(), vec![expected]);
    // The canvas only reports; removal waits for confirmation.
    assert_eq!(canvas.scene().drawable_count(), 1);
}

#[test]
fn secondary_click_on_empty_cell_emits_nothing() {
    let mut canvas = canvas_10x10();
    let empty = at(&canvas, 8.5, 8.5);
    assert!(canvas.on_pointer_up(empty, Button::Secondary, no_mods()).is_empty());
}

// =============================================================
// Camera plumbing
// =============================================================

#[test]
fn tick_culls_only_when_dirty() {
    let mut canvas = canvas_10x10();
    assert_eq!(canvas.tick(), Some(CullStats { visible: 1, hidden: 0 }));
    assert_eq!(canvas.tick(), None);
    canvas.on_wheel(Point::new(100.0, 100.0), WheelDelta { dx: 0.0, dy: -100.0 });
    assert!(canvas.tick().is_some());
}

#[test]
fn tick_hides_offscreen_stitches() {
    let mut canvas = PatternCanvas::default();
    canvas.resize(SCREEN);
    canvas.draw_pattern(&project(400, 400, vec![full(200.0, 200.0), full(0.0, 0.0)])).unwrap();
    assert_eq!(canvas.tick(), Some(CullStats { visible: 1, hidden: 1 }));
    assert!(!canvas.scene().lookup(&StitchKey::from(&full(0.0, 0.0))).unwrap().visible);
}

#[test]
fn wheel_zoom_is_clamped() {
    let mut canvas = canvas_10x10();
    let cursor = Point::new(100.0, 100.0);
    for _ in 0..200 {
        canvas.on_wheel(cursor, WheelDelta { dx: 0.0, dy: -300.0 });
    }
    assert_eq!(canvas.camera().scale(), canvas.config().max_scale);
    for _ in 0..200 {
        canvas.on_wheel(cursor, WheelDelta { dx: 0.0, dy: 300.0 });
    }
    assert_eq!(canvas.camera().scale(), canvas.config().min_scale);
}

#[test]
fn wheel_zoom_keeps_cursor_anchored() {
    let mut canvas = canvas_10x10();
    let cursor = Point::new(30.0, 170.0);
    let anchor = canvas.camera().screen_to_world(cursor);
    canvas.on_wheel(cursor, WheelDelta { dx: 0.0, dy: -100.0 });
    assert!((canvas.camera().scale() - 11.0).abs() < 1e-9);
    assert_point_eq(canvas.camera().screen_to_world(cursor), anchor);
}

#[test]
fn shift_drag_pans_by_drag_factor() {
    let mut canvas = canvas_10x10();
    let before = canvas.camera().pan();
    canvas.on_pointer_down(Point::new(100.0, 100.0), Button::Primary, shift());
    assert_eq!(canvas.gesture_state(), GestureState::Idle);
    assert!(canvas.on_pointer_move(Point::new(110.0, 95.0), shift()).is_empty());
    assert_eq!(canvas.camera().pan(), before + Vec2::new(20.0, -10.0));
    canvas.on_pointer_up(Point::new(110.0, 95.0), Button::Primary, shift());
    canvas.on_pointer_move(Point::new(150.0, 150.0), shift());
    assert_eq!(canvas.camera().pan(), before + Vec2::new(20.0, -10.0));
}

// =============================================================
// Intent wire shape
// =============================================================

#[test]
fn add_intent_serializes_with_type_and_detail() {
    let intent = Intent::AddStitch(AddStitchIntent {
        stage: AddStitchStage::Start,
        start: Point::new(1.5, 2.5),
        end: Point::new(1.5, 2.5),
        alt: false,
        fixed: true,
    });
    assert_eq!(
        serde_json::to_value(intent).unwrap(),
        json!({
            "type": "add_stitch",
            "detail": {
                "stage": "start",
                "start": { "x": 1.5, "y": 2.5 },
                "end": { "x": 1.5, "y": 2.5 },
                "alt": false,
                "fixed": true,
            },
        })
    );
}

#[test]
fn remove_intent_carries_stitch_payload() {
    let intent = Intent::RemoveStitch(RemoveStitchIntent { stitch: Stitch::Full(full(2.0, 3.0)) });
    let value = serde_json::to_value(intent).unwrap();
    assert_eq!(value["type"], "remove_stitch");
    assert_eq!(value["detail"]["full"]["x"], json!(2.0));
    assert_eq!(value["detail"]["full"]["palindex"], json!(0));
}
