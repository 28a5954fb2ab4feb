//! Visibility culling for container layers.
//!
//! Culling only flips [`Drawable::visible`](crate::scene::Drawable); it never
//! adds, removes or re-keys anything.

#[cfg(test)]
#[path = "cull_test.rs"]
mod cull_test;

use kurbo::Rect;

use crate::scene::Scene;

/// Outcome of one culling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    pub visible: usize,
    pub hidden: usize,
}

/// Hide every container drawable whose world bounds miss `bounds`.
pub fn cull(scene: &mut Scene, bounds: Rect) -> CullStats {
    let mut stats = CullStats::default();
    for container in scene.containers_mut() {
        for drawable in container.iter_mut() {
            drawable.visible = overlaps(drawable.world_bounds(), bounds);
            if drawable.visible {
                stats.visible += 1;
            } else {
                stats.hidden += 1;
            }
        }
    }
    tracing::trace!(visible = stats.visible, hidden = stats.hidden, "culled");
    stats
}

/// Closed-interval overlap, so drawables touching the edge stay visible.
fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}
