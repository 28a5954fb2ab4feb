//! Grid line placement.
//!
//! Minor lines sit on every interior cell boundary. Major lines start at the
//! fabric edge and repeat every `interval` cells; the last one is clamped to
//! the far edge so nothing is drawn past the fabric.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use kurbo::{BezPath, Stroke};
use schema::{Grid, GridLineStyle, PatternProperties};

use crate::scene::SceneError;
use crate::template::{Color, Outline, Paint, Primitive};

/// Interior cell boundaries `1..extent`.
pub fn minor_positions(extent: u16) -> impl Iterator<Item = f64> {
    (1..extent).map(f64::from)
}

/// Major line offsets `min(i * interval, extent)` for `i` in `0..=ceil(extent / interval)`.
///
/// An interval of zero yields no major lines.
#[must_use]
pub fn major_positions(extent: u16, interval: u16) -> Vec<f64> {
    if interval == 0 {
        return Vec::new();
    }
    let steps = u32::from(extent).div_ceil(u32::from(interval));
    (0..=steps).map(|i| f64::from((i * u32::from(interval)).min(u32::from(extent)))).collect()
}

/// Stroke primitives for the minor and major lines of a `width × height` chart.
///
/// # Errors
///
/// Returns [`SceneError::InvalidColor`] if a line style color is not a hex color.
pub fn grid_primitives(properties: PatternProperties, grid: &Grid) -> Result<Vec<Primitive>, SceneError> {
    let width = f64::from(properties.width);
    let height = f64::from(properties.height);

    let mut minor = BezPath::new();
    for x in minor_positions(properties.width) {
        minor.move_to((x, 0.0));
        minor.line_to((x, height));
    }
    for y in minor_positions(properties.height) {
        minor.move_to((0.0, y));
        minor.line_to((width, y));
    }

    let mut major = BezPath::new();
    for y in major_positions(properties.height, grid.major_line_every_stitches) {
        major.move_to((0.0, y));
        major.line_to((width, y));
    }
    for x in major_positions(properties.width, grid.major_line_every_stitches) {
        major.move_to((x, 0.0));
        major.line_to((x, height));
    }

    Ok(vec![stroked(minor, &grid.minor_screen_lines)?, stroked(major, &grid.major_screen_lines)?])
}

fn stroked(path: BezPath, style: &GridLineStyle) -> Result<Primitive, SceneError> {
    let paint = Paint::Stroke { color: Color::from_hex(&style.color)?, style: Stroke::new(f64::from(style.thickness)) };
    Ok(Primitive::new(Outline::Polyline(path), paint))
}
