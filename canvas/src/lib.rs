//! Pattern canvas engine for the cross-stitch editor.
//!
//! The crate keeps a renderable scene in step with a pattern's stitches,
//! owns the pan/zoom camera and its culling pass, and turns raw pointer input
//! into canonical add-stitch and remove-stitch intents. It never mutates the
//! document: a host forwards intents to the backend and feeds the confirmed
//! additions and removals back through [`engine::PatternCanvas`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::PatternCanvas`]: scene, camera, gestures and observers for one pattern |
//! | [`scene`] | Layer stack, drawables, full and incremental drawing |
//! | [`template`] | Shared per-kind stitch geometry and the template cache |
//! | [`special`] | Compiles special stitch models into templates |
//! | [`index`] | Stitch identity keys and the identity index |
//! | [`grid`] | Fabric grid line geometry |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`cull`] | Viewport culling |
//! | [`input`] | Input event types, intents and the gesture state machine |
//! | [`hit`] | Hit-testing for alternate-click removal |
//! | [`render`] | Display list for a host renderer |
//! | [`config`] | Environment configuration |
//! | [`consts`] | Shared numeric constants (zoom limits, stroke widths, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod cull;
pub mod engine;
pub mod grid;
pub mod hit;
pub mod index;
pub mod input;
pub mod render;
pub mod scene;
pub mod special;
pub mod template;

pub use config::{CanvasConfig, ConfigError};
pub use engine::PatternCanvas;
pub use input::Intent;
pub use scene::{LayerKind, SceneError};
