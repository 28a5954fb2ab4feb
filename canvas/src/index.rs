//! Identity index: structural stitch keys mapped to live drawables.

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;

use std::collections::HashMap;

use schema::{FullStitch, FullStitchKind, LineStitch, NodeStitch, PartStitch, PartStitchDirection, PartStitchKind, Stitch};

/// Deterministic key over the fields that distinguish coexisting stitches.
///
/// Coordinates are stored as `f32` bit patterns with `-0.0` folded into
/// `0.0`, so two stitches compare equal exactly when their coordinates do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StitchKey {
    Full { x: u32, y: u32, kind: FullStitchKind },
    Part { x: u32, y: u32, direction: PartStitchDirection, kind: PartStitchKind },
    /// Order-sensitive: endpoints must be canonical before keying.
    Line { x: (u32, u32), y: (u32, u32) },
    Node { x: u32, y: u32 },
}

fn bits(v: f32) -> u32 {
    // Adding positive zero turns -0.0 into 0.0 and leaves every other value alone.
    (v + 0.0).to_bits()
}

impl From<&FullStitch> for StitchKey {
    fn from(s: &FullStitch) -> Self {
        Self::Full { x: bits(s.x), y: bits(s.y), kind: s.kind }
    }
}

impl From<&PartStitch> for StitchKey {
    fn from(s: &PartStitch) -> Self {
        Self::Part { x: bits(s.x), y: bits(s.y), direction: s.direction, kind: s.kind }
    }
}

impl From<&LineStitch> for StitchKey {
    fn from(s: &LineStitch) -> Self {
        Self::Line { x: (bits(s.x.0), bits(s.x.1)), y: (bits(s.y.0), bits(s.y.1)) }
    }
}

impl From<&NodeStitch> for StitchKey {
    fn from(s: &NodeStitch) -> Self {
        Self::Node { x: bits(s.x), y: bits(s.y) }
    }
}

impl From<&Stitch> for StitchKey {
    fn from(stitch: &Stitch) -> Self {
        match stitch {
            Stitch::Full(s) => s.into(),
            Stitch::Part(s) => s.into(),
            Stitch::Line(s) => s.into(),
            Stitch::Node(s) => s.into(),
        }
    }
}

/// Map from [`StitchKey`] to a value, with removal of absent keys as a no-op.
#[derive(Debug, Clone)]
pub struct IdentityIndex<V> {
    entries: HashMap<StitchKey, V>,
}

impl<V> Default for IdentityIndex<V> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<V> IdentityIndex<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the one previously stored under `key`.
    pub fn insert(&mut self, key: StitchKey, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Remove and return the value under `key`. Absent keys are not an error.
    pub fn remove(&mut self, key: &StitchKey) -> Option<V> {
        let removed = self.entries.remove(key);
        if removed.is_none() {
            tracing::trace!(?key, "stale removal ignored");
        }
        removed
    }

    #[must_use]
    pub fn lookup(&self, key: &StitchKey) -> Option<&V> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &StitchKey) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &StitchKey> {
        self.entries.keys()
    }
}
