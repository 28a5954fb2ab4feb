//! Host layer of the cross-stitch editor.
//!
//! Holds the open documents of an editing session and keeps each one's
//! decoded mirror and drawn canvas in step as the backend confirms mutations.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | [`session::Workspace`]: open, snapshot, close, apply mutation events |
//! | [`document`] | Identity-keyed edits of the in-memory document mirror |

pub mod document;
pub mod session;

pub use session::{OpenPattern, PatternEvent, SessionError, Workspace};
