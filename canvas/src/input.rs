//! Input model: modifier keys, mouse buttons, emitted intents, and the gesture state machine.
//!
//! A primary-button gesture arms on an in-bounds pointer-down, previews on
//! every move, and commits on pointer-up. Each sample is canonicalized so a
//! drag from A to B produces the same endpoints as a drag from B to A. Any
//! disqualifying event (pan modifier, leaving the fabric) cancels the gesture.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::cmp::Ordering;

use kurbo::{Point, Size};
use schema::Stitch;
use serde::Serialize;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held. Shift pans instead of stitching.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key as reported by the host (e.g. `"Shift"`, `"ShiftLeft"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this is the key that turns pointer drags into panning.
    #[must_use]
    pub fn is_pan_modifier(&self) -> bool {
        matches!(self.0.as_str(), "Shift" | "ShiftLeft" | "ShiftRight")
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Stage of an add-stitch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddStitchStage {
    Start,
    /// Preview only; carries no document mutation.
    Continue,
    End,
}

/// Request to add a stitch spanning `start..end`, in world coordinates.
///
/// Single-point stitches have `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AddStitchIntent {
    pub stage: AddStitchStage,
    pub start: Point,
    pub end: Point,
    /// Draw the stitch in its alternative form.
    pub alt: bool,
    /// Keep the direction of the previous stitch.
    pub fixed: bool,
}

/// Request to remove exactly the given stitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RemoveStitchIntent {
    pub stitch: Stitch,
}

/// Domain intents emitted to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum Intent {
    AddStitch(AddStitchIntent),
    RemoveStitch(RemoveStitchIntent),
}

/// State of the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A gesture started at `start` (world space) and has not been released.
    Armed { start: Point },
}

/// Side effects requested by the gesture machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    Emit(AddStitchIntent),
    ClearHint,
}

/// Whether `point` falls outside a fabric of `size`, exclusive of both edges.
#[must_use]
pub fn is_outside(point: Point, size: Size) -> bool {
    point.x <= 0.0 || point.y <= 0.0 || point.x >= size.width || point.y >= size.height
}

/// Order two gesture points independently of drag direction.
///
/// Points are compared by the cell they fall in: row first, then column.
/// Points in different cells keep their exact positions. Points in the same
/// cell collapse to whichever comes first in (y, x) order, so the result is a
/// single-cell placement with `start == end`.
#[must_use]
pub fn canonicalize(a: Point, b: Point) -> (Point, Point) {
    let by_cell = a.y.trunc().total_cmp(&b.y.trunc()).then(a.x.trunc().total_cmp(&b.x.trunc()));
    match by_cell {
        Ordering::Less => (a, b),
        Ordering::Greater => (b, a),
        Ordering::Equal => {
            let first = if a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)).is_le() { a } else { b };
            (first, first)
        }
    }
}

/// Pointer gesture state machine for adding stitches.
#[derive(Debug, Clone, Default)]
pub struct GestureMachine {
    state: GestureState,
}

impl GestureMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Primary pointer-down at a world point.
    pub fn on_pointer_down(&mut self, world: Point, fabric: Size, modifiers: Modifiers) -> Vec<GestureAction> {
        if modifiers.shift {
            return self.cancel();
        }
        if is_outside(world, fabric) {
            return self.cancel();
        }
        self.state = GestureState::Armed { start: world };
        vec![GestureAction::Emit(intent(AddStitchStage::Start, world, world, modifiers))]
    }

    /// Pointer-move at a world point.
    pub fn on_pointer_move(&mut self, world: Point, fabric: Size, modifiers: Modifiers) -> Vec<GestureAction> {
        match self.state {
            GestureState::Armed { start } if !modifiers.shift && !is_outside(world, fabric) => {
                vec![GestureAction::Emit(intent(AddStitchStage::Continue, start, world, modifiers))]
            }
            _ => self.cancel(),
        }
    }

    /// Primary pointer-up at a world point.
    pub fn on_pointer_up(&mut self, world: Point, fabric: Size, modifiers: Modifiers) -> Vec<GestureAction> {
        match self.state {
            GestureState::Armed { start } if !modifiers.shift && !is_outside(world, fabric) => {
                self.state = GestureState::Idle;
                vec![
                    GestureAction::Emit(intent(AddStitchStage::End, start, world, modifiers)),
                    GestureAction::ClearHint,
                ]
            }
            _ => self.cancel(),
        }
    }

    /// Key release. Releasing the pan modifier cancels any gesture.
    pub fn on_key_up(&mut self, key: &Key) -> Vec<GestureAction> {
        if key.is_pan_modifier() { self.cancel() } else { Vec::new() }
    }

    fn cancel(&mut self) -> Vec<GestureAction> {
        self.state = GestureState::Idle;
        vec![GestureAction::ClearHint]
    }
}

fn intent(stage: AddStitchStage, start: Point, end: Point, modifiers: Modifiers) -> AddStitchIntent {
    let (start, end) = canonicalize(start, end);
    AddStitchIntent { stage, start, end, alt: modifiers.ctrl, fixed: modifiers.ctrl }
}
