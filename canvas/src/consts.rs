//! Shared numeric constants for the canvas crate.

// ── Camera ──────────────────────────────────────────────────────

/// Screen pixels per stitch when a pattern is first shown.
pub const INITIAL_SCALE: f64 = 10.0;

/// Lower zoom clamp (screen pixels per stitch).
pub const MIN_SCALE: f64 = 1.0;

/// Upper zoom clamp (screen pixels per stitch).
pub const MAX_SCALE: f64 = 100.0;

/// Multiplier applied to pointer movement while drag-panning.
pub const DRAG_FACTOR: f64 = 2.0;

/// Relative zoom change per wheel notch.
pub const WHEEL_STEP: f64 = 0.1;

// ── Layers ──────────────────────────────────────────────────────

/// Opacity of the gesture preview layer.
pub const HINT_ALPHA: f64 = 0.5;

// ── Geometry ────────────────────────────────────────────────────

/// Width of the dark outline stroke under lines and curves, in stitches.
pub const LINE_OUTLINE_WIDTH: f64 = 0.225;

/// Width of the tinted stroke drawn over the outline, in stitches.
pub const LINE_FILL_WIDTH: f64 = 0.2;

/// French knot radius, in stitches.
pub const KNOT_RADIUS: f64 = 0.3;

/// Knot radius inside special stitch models, in model units.
pub const MODEL_KNOT_RADIUS: f64 = 0.5;

/// Corner radius of a bead's rounded rectangle, in stitches.
pub const BEAD_CORNER_RADIUS: f64 = 0.2;

/// Millimetres to CSS pixels (96 dpi).
pub const MM_TO_PX: f64 = 3.779_527_559_1;

/// Bead sizes are laid out in CSS pixels and shown at this fraction of a stitch per pixel.
pub const BEAD_PX_TO_STITCH: f64 = 0.1;

/// Pointer slop around thin drawables for alternate-click hit-testing, in stitches.
pub const HIT_SLOP: f64 = 0.05;

// ── Input ───────────────────────────────────────────────────────

/// Wheel delta, in pixels, that counts as one notch.
pub const WHEEL_NOTCH_PX: f64 = 100.0;
