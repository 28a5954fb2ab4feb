//! Display list for a host renderer.
//!
//! The engine does not rasterize. A host walks the display list bottom to
//! top and paints each item: fillable layers as world-space primitives,
//! container drawables as a shared template under a transform and tint.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::sync::Arc;

use kurbo::Affine;

use crate::scene::{Layer, LayerKind, Scene};
use crate::template::{Color, Primitive, Template};

/// One paint operation.
#[derive(Debug, Clone)]
pub enum DisplayItem<'a> {
    /// World-space primitives of a fillable layer.
    Graphics { layer: LayerKind, primitives: &'a [Primitive], alpha: f64 },
    /// A template instance. Colors in the template are multiplied by `tint`.
    Instance { layer: LayerKind, template: &'a Arc<Template>, transform: Affine, tint: Color, alpha: f64 },
}

impl DisplayItem<'_> {
    #[must_use]
    pub fn layer(&self) -> LayerKind {
        match self {
            Self::Graphics { layer, .. } | Self::Instance { layer, .. } => *layer,
        }
    }
}

/// Everything to paint, bottom to top. Empty graphics layers and culled
/// drawables are left out.
#[must_use]
pub fn display_list(scene: &Scene) -> Vec<DisplayItem<'_>> {
    let mut items = Vec::with_capacity(scene.drawable_count() + 3);
    for (layer, content) in scene.layers() {
        match content {
            Layer::Fillable(graphics) => {
                if !graphics.is_empty() {
                    items.push(DisplayItem::Graphics { layer, primitives: graphics.primitives(), alpha: graphics.alpha });
                }
            }
            Layer::Container(container) => {
                items.extend(container.iter().filter(|(_, d)| d.visible).map(|(_, d)| DisplayItem::Instance {
                    layer,
                    template: &d.template,
                    transform: d.transform,
                    tint: d.tint,
                    alpha: d.alpha,
                }));
            }
        }
    }
    items
}
