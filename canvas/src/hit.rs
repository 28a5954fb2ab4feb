#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use kurbo::Point;
use schema::Stitch;

use crate::scene::{LayerKind, Scene};

/// Stitch layers that accept alternate-click removal, topmost first.
pub const REMOVABLE_LAYERS: [LayerKind; 4] =
    [LayerKind::Nodes, LayerKind::Lines, LayerKind::PartStitches, LayerKind::FullStitches];

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub layer: LayerKind,
    pub stitch: Stitch,
}

/// Find the topmost visible stitch drawable under `world_pt`.
///
/// Special stitches carry no payload and are never returned.
#[must_use]
pub fn hit_test(scene: &Scene, world_pt: Point, slop: f64) -> Option<Hit> {
    REMOVABLE_LAYERS.into_iter().find_map(|layer| {
        let container = scene.layer(layer).as_container()?;
        container
            .iter()
            .rev()
            .filter(|(_, d)| d.visible && d.hit(world_pt, slop))
            .find_map(|(_, d)| d.payload)
            .map(|stitch| Hit { layer, stitch })
    })
}
