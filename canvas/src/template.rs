//! Reusable stitch geometry.
//!
//! Every stitch variant is built once as a colorless [`Template`] in unit
//! stitch space and instanced many times. Instances carry a tint that is
//! multiplied into every primitive color, so white areas take the palette
//! color and black outlines stay black.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use std::collections::HashMap;
use std::sync::Arc;

use kurbo::{BezPath, Cap, Circle, Join, ParamCurveNearest, Point, Rect, RoundedRect, Shape, Stroke};
use schema::{Bead, FullStitchKind, NodeStitchKind, PartStitchDirection, PartStitchKind};

use crate::consts::{
    BEAD_CORNER_RADIUS, BEAD_PX_TO_STITCH, KNOT_RADIUS, LINE_FILL_WIDTH, LINE_OUTLINE_WIDTH, MM_TO_PX,
};
use crate::scene::SceneError;

/// Tolerance used when flattening curves into paths.
const PATH_TOLERANCE: f64 = 1e-3;

/// A packed `0xRRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Self = Self(0x00FF_FFFF);
    pub const BLACK: Self = Self(0);

    /// Parse a six-digit hex color, with or without a leading `#`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidColor`] if the value is not six hex digits.
    pub fn from_hex(value: &str) -> Result<Self, SceneError> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SceneError::InvalidColor { value: value.to_owned() });
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| SceneError::InvalidColor { value: value.to_owned() })
    }

    #[must_use]
    pub fn channels(self) -> [u8; 3] {
        let [_, r, g, b] = self.0.to_be_bytes();
        [r, g, b]
    }

    /// Channel-wise multiply, as a renderer applies a tint.
    #[must_use]
    pub fn multiply(self, tint: Self) -> Self {
        let [r0, g0, b0] = self.channels();
        let [r1, g1, b1] = tint.channels();
        let mul = |a: u8, b: u8| (u32::from(a) * u32::from(b)) / 255;
        Self((mul(r0, r1) << 16) | (mul(g0, g1) << 8) | mul(b0, b1))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

/// Outline of a single primitive, in template-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    Rect(Rect),
    /// Closed polygon.
    Polygon(BezPath),
    /// Open polyline or single segment.
    Polyline(BezPath),
    Circle(Circle),
    RoundedRect(RoundedRect),
}

impl Outline {
    /// Closed polygon through `points`.
    #[must_use]
    pub fn polygon(points: &[(f64, f64)]) -> Self {
        let mut path = polyline_path(points);
        path.close_path();
        Self::Polygon(path)
    }

    /// Open polyline through `points`.
    #[must_use]
    pub fn polyline(points: &[(f64, f64)]) -> Self {
        Self::Polyline(polyline_path(points))
    }

    #[must_use]
    pub fn to_path(&self) -> BezPath {
        match self {
            Self::Rect(rect) => rect.to_path(PATH_TOLERANCE),
            Self::Polygon(path) | Self::Polyline(path) => path.clone(),
            Self::Circle(circle) => circle.to_path(PATH_TOLERANCE),
            Self::RoundedRect(rect) => rect.to_path(PATH_TOLERANCE),
        }
    }

    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Rect(rect) => *rect,
            Self::Polygon(path) | Self::Polyline(path) => path.bounding_box(),
            Self::Circle(circle) => circle.bounding_box(),
            Self::RoundedRect(rect) => rect.bounding_box(),
        }
    }

    fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Rect(rect) => rect.contains(pt),
            Self::Polygon(path) => path.contains(pt),
            Self::Polyline(_) => false,
            Self::Circle(circle) => circle.contains(pt),
            Self::RoundedRect(rect) => rect.contains(pt),
        }
    }

    fn distance_to_edge(&self, pt: Point) -> f64 {
        self.to_path()
            .segments()
            .map(|seg| seg.nearest(pt, PATH_TOLERANCE).distance_sq)
            .fold(f64::INFINITY, f64::min)
            .sqrt()
    }
}

fn polyline_path(points: &[(f64, f64)]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter().copied();
    if let Some(first) = iter.next() {
        path.move_to(first);
        for pt in iter {
            path.line_to(pt);
        }
    }
    path
}

/// How a primitive is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Fill(Color),
    /// Stroke whose width is in stitch units and scales with zoom.
    Stroke { color: Color, style: Stroke },
    /// One-device-pixel outline regardless of zoom.
    Hairline(Color),
}

impl Paint {
    /// Round-capped stroke, as used for thread lines.
    #[must_use]
    pub fn thread(color: Color, width: f64) -> Self {
        Self::Stroke { color, style: Stroke::new(width).with_caps(Cap::Round) }
    }

    /// Round-capped, round-joined stroke, as used for curves.
    #[must_use]
    pub fn curve(color: Color, width: f64) -> Self {
        Self::Stroke { color, style: Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round) }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::Fill(color) | Self::Stroke { color, .. } | Self::Hairline(color) => *color,
        }
    }

    fn half_width(&self) -> f64 {
        match self {
            Self::Stroke { style, .. } => style.width / 2.0,
            Self::Fill(_) | Self::Hairline(_) => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub outline: Outline,
    pub paint: Paint,
}

impl Primitive {
    #[must_use]
    pub fn new(outline: Outline, paint: Paint) -> Self {
        Self { outline, paint }
    }
}

/// Which variant a template was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKey {
    Full(FullStitchKind),
    Part(PartStitchKind, PartStitchDirection),
    FrenchKnot,
    /// Bead sized by the bit patterns of its length and diameter.
    Bead { length: u32, diameter: u32 },
    /// A single line segment, built per drawable.
    Line,
    /// A compiled special stitch model, by model index.
    Special(usize),
}

/// A colorless list of primitives drawn in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub key: TemplateKey,
    pub primitives: Vec<Primitive>,
    bounds: Rect,
}

impl Template {
    #[must_use]
    pub fn new(key: TemplateKey, primitives: Vec<Primitive>) -> Self {
        let bounds = primitives
            .iter()
            .map(|p| p.outline.bounding_box().inflate(p.paint.half_width(), p.paint.half_width()))
            .reduce(|acc, r| acc.union(r))
            .unwrap_or(Rect::ZERO);
        Self { key, primitives, bounds }
    }

    /// Local bounds including stroke widths.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether a local-space point lands on any primitive, widening edges by `slop`.
    #[must_use]
    pub fn hit(&self, local: Point, slop: f64) -> bool {
        self.primitives.iter().any(|p| match p.paint {
            Paint::Fill(_) => p.outline.contains(local),
            Paint::Stroke { .. } | Paint::Hairline(_) => {
                p.outline.contains(local) || p.outline.distance_to_edge(local) <= p.paint.half_width() + slop
            }
        })
    }
}

// ── Builders ────────────────────────────────────────────────────

fn outlined(key: TemplateKey, outline: Outline) -> Template {
    Template::new(
        key,
        vec![Primitive::new(outline.clone(), Paint::Fill(Color::WHITE)), Primitive::new(outline, Paint::Hairline(Color::BLACK))],
    )
}

fn full_template(kind: FullStitchKind) -> Template {
    let key = TemplateKey::Full(kind);
    match kind {
        FullStitchKind::Full => {
            Template::new(key, vec![Primitive::new(Outline::Rect(Rect::new(0.0, 0.0, 1.0, 1.0)), Paint::Fill(Color::WHITE))])
        }
        FullStitchKind::Petite => outlined(key, Outline::Rect(Rect::new(0.0, 0.0, 0.5, 0.5))),
    }
}

fn part_template(kind: PartStitchKind, direction: PartStitchDirection) -> Template {
    let points: &[(f64, f64)] = match (kind, direction) {
        (PartStitchKind::Half, PartStitchDirection::Forward) => {
            &[(1.0, 0.0), (1.0, 0.25), (0.25, 1.0), (0.0, 1.0), (0.0, 0.75), (0.75, 0.0)]
        }
        (PartStitchKind::Half, PartStitchDirection::Backward) => {
            &[(0.0, 0.0), (0.25, 0.0), (1.0, 0.75), (1.0, 1.0), (0.75, 1.0), (0.0, 0.25)]
        }
        (PartStitchKind::Quarter, PartStitchDirection::Forward) => {
            &[(0.5, 0.0), (0.5, 0.25), (0.25, 0.5), (0.0, 0.5), (0.0, 0.25), (0.25, 0.0)]
        }
        (PartStitchKind::Quarter, PartStitchDirection::Backward) => {
            &[(0.0, 0.0), (0.25, 0.0), (0.5, 0.25), (0.5, 0.5), (0.25, 0.5), (0.0, 0.25)]
        }
    };
    outlined(TemplateKey::Part(kind, direction), Outline::polygon(points))
}

fn knot_template() -> Template {
    outlined(TemplateKey::FrenchKnot, Outline::Circle(Circle::new(Point::ORIGIN, KNOT_RADIUS)))
}

fn bead_template(bead: Bead) -> Template {
    let width = f64::from(bead.length) * MM_TO_PX * BEAD_PX_TO_STITCH;
    let height = f64::from(bead.diameter) * MM_TO_PX * BEAD_PX_TO_STITCH;
    let rect = RoundedRect::new(-width / 2.0, -height / 2.0, width / 2.0, height / 2.0, BEAD_CORNER_RADIUS);
    outlined(bead_key(bead), Outline::RoundedRect(rect))
}

fn bead_key(bead: Bead) -> TemplateKey {
    TemplateKey::Bead { length: bead.length.to_bits(), diameter: bead.diameter.to_bits() }
}

/// Double-stroked segment from the origin to `end`: a dark outline under a
/// narrower stroke that takes the tint.
#[must_use]
pub fn line_template(end: Point) -> Template {
    let outline = Outline::Polyline(polyline_path(&[(0.0, 0.0), (end.x, end.y)]));
    Template::new(
        TemplateKey::Line,
        vec![
            Primitive::new(outline.clone(), Paint::thread(Color::BLACK, LINE_OUTLINE_WIDTH)),
            Primitive::new(outline, Paint::thread(Color::WHITE, LINE_FILL_WIDTH)),
        ],
    )
}

/// Shared stitch templates for one canvas.
#[derive(Debug)]
pub struct TemplateCache {
    full: Arc<Template>,
    petite: Arc<Template>,
    half_forward: Arc<Template>,
    half_backward: Arc<Template>,
    quarter_forward: Arc<Template>,
    quarter_backward: Arc<Template>,
    knot: Arc<Template>,
    beads: HashMap<TemplateKey, Arc<Template>>,
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            full: Arc::new(full_template(FullStitchKind::Full)),
            petite: Arc::new(full_template(FullStitchKind::Petite)),
            half_forward: Arc::new(part_template(PartStitchKind::Half, PartStitchDirection::Forward)),
            half_backward: Arc::new(part_template(PartStitchKind::Half, PartStitchDirection::Backward)),
            quarter_forward: Arc::new(part_template(PartStitchKind::Quarter, PartStitchDirection::Forward)),
            quarter_backward: Arc::new(part_template(PartStitchKind::Quarter, PartStitchDirection::Backward)),
            knot: Arc::new(knot_template()),
            beads: HashMap::new(),
        }
    }

    #[must_use]
    pub fn full(&self, kind: FullStitchKind) -> Arc<Template> {
        match kind {
            FullStitchKind::Full => Arc::clone(&self.full),
            FullStitchKind::Petite => Arc::clone(&self.petite),
        }
    }

    #[must_use]
    pub fn part(&self, kind: PartStitchKind, direction: PartStitchDirection) -> Arc<Template> {
        let template = match (kind, direction) {
            (PartStitchKind::Half, PartStitchDirection::Forward) => &self.half_forward,
            (PartStitchKind::Half, PartStitchDirection::Backward) => &self.half_backward,
            (PartStitchKind::Quarter, PartStitchDirection::Forward) => &self.quarter_forward,
            (PartStitchKind::Quarter, PartStitchDirection::Backward) => &self.quarter_backward,
        };
        Arc::clone(template)
    }

    /// Template for a node. Beads without a size on their palette item use the default bead.
    pub fn node(&mut self, kind: NodeStitchKind, bead: Option<Bead>) -> Arc<Template> {
        match kind {
            NodeStitchKind::FrenchKnot => Arc::clone(&self.knot),
            NodeStitchKind::Bead => {
                let bead = bead.unwrap_or_default();
                let template = self.beads.entry(bead_key(bead)).or_insert_with(|| Arc::new(bead_template(bead)));
                Arc::clone(template)
            }
        }
    }

    /// Number of distinct bead sizes built so far.
    #[must_use]
    pub fn bead_count(&self) -> usize {
        self.beads.len()
    }
}
