#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const FABRIC: Size = Size::new(10.0, 10.0);

fn no_mods() -> Modifiers {
    Modifiers::default()
}

fn shift() -> Modifiers {
    Modifiers { shift: true, ..Modifiers::default() }
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Modifiers::default() }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn emitted(actions: &[GestureAction]) -> Vec<AddStitchIntent> {
    actions
        .iter()
        .filter_map(|a| match a {
            GestureAction::Emit(intent) => Some(*intent),
            GestureAction::ClearHint => None,
        })
        .collect()
}

fn armed_at(start: Point) -> GestureMachine {
    let mut machine = GestureMachine::new();
    machine.on_pointer_down(start, FABRIC, no_mods());
    machine
}

// =============================================================
// Modifiers / Button / Key
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
}

#[test]
fn button_variants_distinct() {
    assert_ne!(Button::Primary, Button::Secondary);
    assert_ne!(Button::Primary, Button::Middle);
}

#[test]
fn shift_keys_are_pan_modifiers() {
    assert!(Key("Shift".into()).is_pan_modifier());
    assert!(Key("ShiftLeft".into()).is_pan_modifier());
    assert!(!Key("Control".into()).is_pan_modifier());
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn bounds_exclude_both_edges() {
    assert!(is_outside(pt(0.0, 5.0), FABRIC));
    assert!(is_outside(pt(5.0, 0.0), FABRIC));
    assert!(is_outside(pt(10.0, 5.0), FABRIC));
    assert!(is_outside(pt(5.0, 10.0), FABRIC));
    assert!(is_outside(pt(-1.0, 5.0), FABRIC));
    assert!(!is_outside(pt(0.01, 9.99), FABRIC));
}

// =============================================================
// Canonicalization
// =============================================================

#[test]
fn canonical_order_is_drag_direction_independent() {
    let samples = [
        (pt(1.5, 1.5), pt(4.2, 1.7)),
        (pt(1.5, 6.5), pt(4.2, 1.7)),
        (pt(3.9, 3.1), pt(3.2, 3.8)),
        (pt(7.0, 2.5), pt(2.0, 8.5)),
        (pt(2.4, 2.6), pt(2.9, 2.1)),
        (pt(5.5, 5.5), pt(5.5, 5.5)),
    ];
    for (a, b) in samples {
        assert_eq!(canonicalize(a, b), canonicalize(b, a), "{a:?} {b:?}");
    }
}

#[test]
fn same_row_orders_by_column() {
    let (start, end) = canonicalize(pt(6.2, 3.5), pt(2.8, 3.1));
    assert_eq!(start, pt(2.8, 3.1));
    assert_eq!(end, pt(6.2, 3.5));
}

#[test]
fn different_rows_order_by_row() {
    let (start, end) = canonicalize(pt(1.5, 8.5), pt(9.5, 2.5));
    assert_eq!(start, pt(9.5, 2.5));
    assert_eq!(end, pt(1.5, 8.5));
}

#[test]
fn same_cell_collapses_to_one_point() {
    let (start, end) = canonicalize(pt(2.4, 2.6), pt(2.9, 2.1));
    assert_eq!(start, end);
    assert_eq!((start.x.trunc(), start.y.trunc()), (2.0, 2.0));
}

// =============================================================
// Arming
// =============================================================

#[test]
fn pointer_down_in_bounds_arms_and_emits_start() {
    let mut machine = GestureMachine::new();
    let actions = machine.on_pointer_down(pt(3.5, 4.5), FABRIC, no_mods());
    assert_eq!(machine.state(), GestureState::Armed { start: pt(3.5, 4.5) });
    let intents = emitted(&actions);
    assert_eq!(intents.len(), 1);
    assert_eq!(intents[0].stage, AddStitchStage::Start);
    assert_eq!(intents[0].start, pt(3.5, 4.5));
    assert_eq!(intents[0].end, pt(3.5, 4.5));
}

#[test]
fn pointer_down_outside_stays_idle() {
    let mut machine = GestureMachine::new();
    let actions = machine.on_pointer_down(pt(-1.0, 5.0), FABRIC, no_mods());
    assert_eq!(machine.state(), GestureState::Idle);
    assert!(emitted(&actions).is_empty());
    assert_eq!(actions, vec![GestureAction::ClearHint]);
}

#[test]
fn pointer_down_with_shift_stays_idle() {
    let mut machine = GestureMachine::new();
    let actions = machine.on_pointer_down(pt(5.0, 5.0), FABRIC, shift());
    assert_eq!(machine.state(), GestureState::Idle);
    assert!(emitted(&actions).is_empty());
}

#[test]
fn ctrl_sets_alt_and_fixed() {
    let mut machine = GestureMachine::new();
    let intents = emitted(&machine.on_pointer_down(pt(5.0, 5.0), FABRIC, ctrl()));
    assert!(intents[0].alt);
    assert!(intents[0].fixed);

    let mut machine = GestureMachine::new();
    let intents = emitted(&machine.on_pointer_down(pt(5.0, 5.0), FABRIC, no_mods()));
    assert!(!intents[0].alt);
    assert!(!intents[0].fixed);
}

// =============================================================
// Moving
// =============================================================

#[test]
fn move_while_armed_emits_canonical_continue() {
    let mut machine = armed_at(pt(6.5, 6.5));
    let intents = emitted(&machine.on_pointer_move(pt(2.5, 6.5), FABRIC, no_mods()));
    assert_eq!(intents.len(), 1);
    assert_eq!(intents[0].stage, AddStitchStage::Continue);
    assert_eq!(intents[0].start, pt(2.5, 6.5));
    assert_eq!(intents[0].end, pt(6.5, 6.5));
    assert!(matches!(machine.state(), GestureState::Armed { .. }));
}

#[test]
fn move_while_idle_clears_hint() {
    let mut machine = GestureMachine::new();
    let actions = machine.on_pointer_move(pt(5.0, 5.0), FABRIC, no_mods());
    assert_eq!(actions, vec![GestureAction::ClearHint]);
    assert_eq!(machine.state(), GestureState::Idle);
}

#[test]
fn move_outside_cancels() {
    let mut machine = armed_at(pt(5.0, 5.0));
    let actions = machine.on_pointer_move(pt(12.0, 5.0), FABRIC, no_mods());
    assert_eq!(actions, vec![GestureAction::ClearHint]);
    assert_eq!(machine.state(), GestureState::Idle);
}

#[test]
fn move_with_shift_cancels() {
    let mut machine = armed_at(pt(5.0, 5.0));
    let actions = machine.on_pointer_move(pt(6.0, 5.0), FABRIC, shift());
    assert_eq!(actions, vec![GestureAction::ClearHint]);
    assert_eq!(machine.state(), GestureState::Idle);
}

// =============================================================
// Committing
// =============================================================

#[test]
fn pointer_up_emits_end_then_clears_hint() {
    let mut machine = armed_at(pt(1.5, 1.5));
    let actions = machine.on_pointer_up(pt(4.5, 1.5), FABRIC, no_mods());
    assert_eq!(actions.len(), 2);
    assert!(matches!(actions[0], GestureAction::Emit(AddStitchIntent { stage: AddStitchStage::End, .. })));
    assert_eq!(actions[1], GestureAction::ClearHint);
    assert_eq!(machine.state(), GestureState::Idle);
}

#[test]
fn same_cell_release_is_single_cell_placement() {
    let mut machine = armed_at(pt(2.4, 2.6));
    let intents = emitted(&machine.on_pointer_up(pt(2.9, 2.1), FABRIC, no_mods()));
    assert_eq!(intents.len(), 1);
    assert_eq!(intents[0].start, intents[0].end);
}

#[test]
fn reverse_drags_commit_identical_endpoints() {
    let mut forward = armed_at(pt(1.2, 3.4));
    let a = emitted(&forward.on_pointer_up(pt(7.8, 5.6), FABRIC, no_mods()));
    let mut backward = armed_at(pt(7.8, 5.6));
    let b = emitted(&backward.on_pointer_up(pt(1.2, 3.4), FABRIC, no_mods()));
    assert_eq!(a, b);
}

#[test]
fn pointer_up_while_idle_only_clears_hint() {
    let mut machine = GestureMachine::new();
    let actions = machine.on_pointer_up(pt(5.0, 5.0), FABRIC, no_mods());
    assert_eq!(actions, vec![GestureAction::ClearHint]);
}

#[test]
fn pointer_up_outside_cancels_without_emitting() {
    let mut machine = armed_at(pt(5.0, 5.0));
    let actions = machine.on_pointer_up(pt(5.0, 10.0), FABRIC, no_mods());
    assert!(emitted(&actions).is_empty());
    assert_eq!(machine.state(), GestureState::Idle);
}

#[test]
fn pointer_up_with_shift_cancels() {
    let mut machine = armed_at(pt(5.0, 5.0));
    let actions = machine.on_pointer_up(pt(6.0, 5.0), FABRIC, shift());
    assert!(emitted(&actions).is_empty());
    assert_eq!(machine.state(), GestureState::Idle);
}

// =============================================================
// Keys
// =============================================================

#[test]
fn releasing_shift_cancels() {
    let mut machine = armed_at(pt(5.0, 5.0));
    let actions = machine.on_key_up(&Key("Shift".into()));
    assert_eq!(actions, vec![GestureAction::ClearHint]);
    assert_eq!(machine.state(), GestureState::Idle);
}

#[test]
fn other_key_release_is_ignored() {
    let mut machine = armed_at(pt(5.0, 5.0));
    assert!(machine.on_key_up(&Key("a".into())).is_empty());
    assert!(matches!(machine.state(), GestureState::Armed { .. }));
}
