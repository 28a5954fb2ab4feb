//! Stitch records: the per-kind placements that make up a chart.
//!
//! All coordinates are in stitch space (one fabric cell = 1.0). Fractional
//! coordinates address sub-cell positions for petite, quarter and node stitches.

#[cfg(test)]
#[path = "stitches_test.rs"]
mod stitches_test;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A coordinate in stitch space.
pub type Coord = f32;

// =============================================================
// Full / petite
// =============================================================

/// A full cross or a petite (quarter-size) cross.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct FullStitch {
    pub x: Coord,
    pub y: Coord,
    pub palindex: u8,
    pub kind: FullStitchKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
pub enum FullStitchKind {
    Full = 0,
    Petite = 1,
}

// =============================================================
// Half / quarter
// =============================================================

/// A half or quarter stitch laid in one diagonal direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PartStitch {
    pub x: Coord,
    pub y: Coord,
    pub palindex: u8,
    pub direction: PartStitchDirection,
    pub kind: PartStitchKind,
}

/// Diagonal direction of a part stitch. `Forward` runs bottom-left to top-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
pub enum PartStitchDirection {
    Forward = 1,
    Backward = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
pub enum PartStitchKind {
    Half = 0,
    Quarter = 1,
}

// =============================================================
// Lines
// =============================================================

/// A back or straight stitch between two points.
///
/// `x` holds both endpoint x-coordinates and `y` both y-coordinates, so the
/// first endpoint is `(x.0, y.0)` and the second `(x.1, y.1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct LineStitch {
    pub x: (Coord, Coord),
    pub y: (Coord, Coord),
    pub palindex: u8,
    pub kind: LineStitchKind,
}

impl LineStitch {
    /// First endpoint.
    #[must_use]
    pub fn start(&self) -> (Coord, Coord) {
        (self.x.0, self.y.0)
    }

    /// Second endpoint.
    #[must_use]
    pub fn end(&self) -> (Coord, Coord) {
        (self.x.1, self.y.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
pub enum LineStitchKind {
    Back = 0,
    Straight = 1,
}

// =============================================================
// Nodes
// =============================================================

/// A French knot or a bead anchored at a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct NodeStitch {
    pub x: Coord,
    pub y: Coord,
    pub rotated: bool,
    pub palindex: u8,
    pub kind: NodeStitchKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
pub enum NodeStitchKind {
    FrenchKnot = 0,
    Bead = 1,
}

// =============================================================
// Special stitches
// =============================================================

/// One placement of a [`SpecialStitchModel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct SpecialStitch {
    pub x: Coord,
    pub y: Coord,
    /// Clockwise rotation in degrees.
    pub rotation: u16,
    /// Horizontal and vertical mirroring.
    pub flip: (bool, bool),
    pub palindex: u8,
    /// Index into [`crate::Pattern::special_stitch_models`].
    pub modindex: u8,
}

/// A named motif built from its own nodes, lines and curves, relative to a local origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct SpecialStitchModel {
    pub unique_name: String,
    pub name: String,
    pub nodes: Vec<NodeStitch>,
    pub lines: Vec<LineStitch>,
    pub curves: Vec<Curve>,
}

/// An open polyline inside a special stitch model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Curve {
    pub points: Vec<(Coord, Coord)>,
}

// =============================================================
// Unions
// =============================================================

/// Any single removable stitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stitch {
    Full(FullStitch),
    Part(PartStitch),
    Line(LineStitch),
    Node(NodeStitch),
}

impl Stitch {
    /// Palette index the stitch is drawn with.
    #[must_use]
    pub fn palindex(&self) -> u8 {
        match self {
            Self::Full(s) => s.palindex,
            Self::Part(s) => s.palindex,
            Self::Line(s) => s.palindex,
            Self::Node(s) => s.palindex,
        }
    }
}

impl From<FullStitch> for Stitch {
    fn from(stitch: FullStitch) -> Self {
        Self::Full(stitch)
    }
}

impl From<PartStitch> for Stitch {
    fn from(stitch: PartStitch) -> Self {
        Self::Part(stitch)
    }
}

impl From<LineStitch> for Stitch {
    fn from(stitch: LineStitch) -> Self {
        Self::Line(stitch)
    }
}

impl From<NodeStitch> for Stitch {
    fn from(stitch: NodeStitch) -> Self {
        Self::Node(stitch)
    }
}

/// A batch of stitches grouped by kind, as delivered by bulk add/remove confirmations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct StitchBundle {
    pub fullstitches: Vec<FullStitch>,
    pub partstitches: Vec<PartStitch>,
    pub lines: Vec<LineStitch>,
    pub nodes: Vec<NodeStitch>,
}

impl StitchBundle {
    /// Total number of stitches in the bundle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fullstitches.len() + self.partstitches.len() + self.lines.len() + self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate every stitch as a [`Stitch`], full stitches first.
    pub fn iter(&self) -> impl Iterator<Item = Stitch> + '_ {
        self.fullstitches
            .iter()
            .copied()
            .map(Stitch::from)
            .chain(self.partstitches.iter().copied().map(Stitch::from))
            .chain(self.lines.iter().copied().map(Stitch::from))
            .chain(self.nodes.iter().copied().map(Stitch::from))
    }
}
