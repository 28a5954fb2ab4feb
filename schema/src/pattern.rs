//! The pattern aggregate: chart extents, metadata, palette, fabric and stitches.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::stitches::{FullStitch, LineStitch, NodeStitch, PartStitch, SpecialStitch, SpecialStitchModel};

/// A counted-thread chart.
///
/// Field order is the wire order.
#[derive(Debug, Clone, Default, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct Pattern {
    pub properties: PatternProperties,
    pub info: PatternInfo,
    pub palette: Vec<PaletteItem>,
    pub fabric: Fabric,
    pub fullstitches: Vec<FullStitch>,
    pub partstitches: Vec<PartStitch>,
    pub nodes: Vec<NodeStitch>,
    pub lines: Vec<LineStitch>,
    pub specialstitches: Vec<SpecialStitch>,
    pub special_stitch_models: Vec<SpecialStitchModel>,
}

/// Grid extents in cells. Every stitch lies within `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PatternProperties {
    pub width: u16,
    pub height: u16,
}

impl Default for PatternProperties {
    fn default() -> Self {
        Self { width: 100, height: 100 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PatternInfo {
    pub title: String,
    pub author: String,
    pub company: String,
    pub copyright: String,
    pub description: String,
}

impl Default for PatternInfo {
    fn default() -> Self {
        Self {
            title: String::from("Untitled"),
            author: String::new(),
            company: String::new(),
            copyright: String::new(),
            description: String::new(),
        }
    }
}

/// A thread (or thread blend, or bead) the chart is stitched with.
///
/// Display identity is `(brand, number)`. A blend has no color of its own;
/// `color` on the parent item is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PaletteItem {
    pub brand: String,
    pub number: String,
    pub name: String,
    /// Hex RGB without a leading `#`, e.g. `"FF0000"`.
    pub color: String,
    pub blends: Option<Vec<Blend>>,
    pub bead: Option<Bead>,
    pub strands: Option<PaletteItemStrands>,
}

impl PaletteItem {
    /// A plain single-thread item with no blend, bead or strand overrides.
    #[must_use]
    pub fn solid(brand: &str, number: &str, name: &str, color: &str) -> Self {
        Self {
            brand: brand.to_owned(),
            number: number.to_owned(),
            name: name.to_owned(),
            color: color.to_owned(),
            blends: None,
            bead: None,
            strands: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Blend {
    pub brand: String,
    pub number: String,
    pub strands: u8,
}

/// Bead dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Bead {
    pub length: f32,
    pub diameter: f32,
}

impl Default for Bead {
    fn default() -> Self {
        Self { length: 1.5, diameter: 2.5 }
    }
}

/// Per-stitch-kind strand count overrides for one palette item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PaletteItemStrands {
    pub full: Option<u8>,
    pub petite: Option<u8>,
    pub half: Option<u8>,
    pub quarter: Option<u8>,
    pub back: Option<u8>,
    pub straight: Option<u8>,
    pub french_knot: Option<u8>,
    pub special: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Fabric {
    /// Stitches per inch, horizontal then vertical.
    pub spi: (u16, u16),
    pub kind: String,
    pub name: String,
    pub color: String,
}

impl Default for Fabric {
    fn default() -> Self {
        Self {
            spi: (14, 14),
            kind: String::from("Aida"),
            name: String::from("White"),
            color: String::from("FFFFFF"),
        }
    }
}
