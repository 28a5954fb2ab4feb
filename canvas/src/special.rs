//! Special stitch compiler.
//!
//! A [`SpecialStitchModel`] is compiled once per document load into a single
//! [`Template`]: curves first, then lines, then knots. Placements only apply a
//! transform and tint to the compiled template.

#[cfg(test)]
#[path = "special_test.rs"]
mod special_test;

use kurbo::{Affine, Circle, Point, Vec2};
use schema::{SpecialStitch, SpecialStitchModel};

use crate::consts::{LINE_FILL_WIDTH, LINE_OUTLINE_WIDTH, MODEL_KNOT_RADIUS};
use crate::template::{Color, Outline, Paint, Primitive, Template, TemplateKey};

/// Compile a model into one template tagged with its model index.
#[must_use]
pub fn compile(index: usize, model: &SpecialStitchModel) -> Template {
    let mut primitives = Vec::with_capacity(2 * (model.curves.len() + model.lines.len() + model.nodes.len()));

    for curve in &model.curves {
        let points: Vec<(f64, f64)> = curve.points.iter().map(|&(x, y)| (f64::from(x), f64::from(y))).collect();
        let outline = Outline::polyline(&points);
        primitives.push(Primitive::new(outline.clone(), Paint::curve(Color::BLACK, LINE_OUTLINE_WIDTH)));
        primitives.push(Primitive::new(outline, Paint::curve(Color::WHITE, LINE_FILL_WIDTH)));
    }

    for line in &model.lines {
        let (start, end) = (line.start(), line.end());
        let outline = Outline::polyline(&[
            (f64::from(start.0), f64::from(start.1)),
            (f64::from(end.0), f64::from(end.1)),
        ]);
        primitives.push(Primitive::new(outline.clone(), Paint::thread(Color::BLACK, LINE_OUTLINE_WIDTH)));
        primitives.push(Primitive::new(outline, Paint::thread(Color::WHITE, LINE_FILL_WIDTH)));
    }

    // Model nodes are always knots. Vector output needs no oversampling, so
    // they are built at their true radius.
    for node in &model.nodes {
        let circle = Circle::new((f64::from(node.x), f64::from(node.y)), MODEL_KNOT_RADIUS);
        primitives.push(Primitive::new(Outline::Circle(circle), Paint::Fill(Color::WHITE)));
        primitives.push(Primitive::new(Outline::Circle(circle), Paint::Hairline(Color::BLACK)));
    }

    tracing::trace!(
        index,
        model = %model.unique_name,
        primitives = primitives.len(),
        "special stitch model compiled"
    );
    Template::new(TemplateKey::Special(index), primitives)
}

/// World transform of one placement: translate, then rotate by degrees, then flip.
#[must_use]
pub fn placement_transform(stitch: &SpecialStitch) -> Affine {
    let flip = Vec2::new(
        if stitch.flip.0 { -1.0 } else { 1.0 },
        if stitch.flip.1 { -1.0 } else { 1.0 },
    );
    Affine::translate(Point::new(f64::from(stitch.x), f64::from(stitch.y)).to_vec2())
        * Affine::rotate(f64::from(stitch.rotation).to_radians())
        * Affine::scale_non_uniform(flip.x, flip.y)
}
