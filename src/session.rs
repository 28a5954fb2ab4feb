//! Open-document workspace.
//!
//! DESIGN
//! ======
//! Every open document is held twice: as the decoded [`PatternProject`]
//! mirror and as a drawn [`PatternCanvas`]. Both are keyed by the document's
//! [`PatternKey`]. Mutation confirmations from the backend are applied to the
//! mirror first and then to the canvas, in the order they arrive, so a later
//! snapshot always re-encodes exactly what is on screen.
//!
//! ERROR HANDLING
//! ==============
//! A confirmation naming a palette entry the document does not have, or a
//! palette append that is not the next index, is rejected before either copy
//! changes. Removing a stitch that is already
//! gone is not an error.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;

use canvas::{CanvasConfig, ConfigError, PatternCanvas, SceneError};
use schema::{AddedPaletteItem, CodecError, PaletteItem, PatternKey, PatternProject, Stitch, StitchBundle};
use tracing::{debug, info, trace};

use crate::document;

/// Backend event carrying one added stitch.
pub const EVENT_STITCH_CREATE: &str = "pattern:stitch:create";
/// Backend event carrying one removed stitch.
pub const EVENT_STITCH_REMOVE: &str = "pattern:stitch:remove";
/// Backend event carrying a batch of added stitches.
pub const EVENT_STITCHES_CREATE: &str = "pattern:stitches:create";
/// Backend event carrying a batch of removed stitches, e.g. conflicts of an add.
pub const EVENT_STITCHES_REMOVE: &str = "pattern:stitches:remove";
/// Backend event carrying an appended palette item with its symbols and formats.
pub const EVENT_PALETTE_ITEM_ADD: &str = "palette:add_palette_item";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("pattern not open: {0}")]
    UnknownPattern(PatternKey),
    #[error("unknown event: {0}")]
    UnknownEvent(String),
    #[error("palette item confirmed at index {index}, expected {expected}")]
    PaletteOrder { index: u32, expected: usize },
}

/// A confirmed mutation of one open document.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternEvent {
    StitchAdded(Stitch),
    StitchesAdded(StitchBundle),
    StitchRemoved(Stitch),
    StitchesRemoved(StitchBundle),
    PaletteItemAdded(AddedPaletteItem),
}

impl PatternEvent {
    /// Decode a named backend event into its target key and mutation.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownEvent`] for an unrecognized name and
    /// [`SessionError::Codec`] for a malformed payload.
    pub fn decode(name: &str, bytes: &[u8]) -> Result<(PatternKey, Self), SessionError> {
        let decoded = match name {
            EVENT_STITCH_CREATE => {
                let event = schema::decode_event::<Stitch>(bytes)?;
                (event.pattern_key, Self::StitchAdded(event.payload))
            }
            EVENT_STITCH_REMOVE => {
                let event = schema::decode_event::<Stitch>(bytes)?;
                (event.pattern_key, Self::StitchRemoved(event.payload))
            }
            EVENT_STITCHES_CREATE => {
                let event = schema::decode_event::<StitchBundle>(bytes)?;
                (event.pattern_key, Self::StitchesAdded(event.payload))
            }
            EVENT_STITCHES_REMOVE => {
                let event = schema::decode_event::<StitchBundle>(bytes)?;
                (event.pattern_key, Self::StitchesRemoved(event.payload))
            }
            EVENT_PALETTE_ITEM_ADD => {
                let event = schema::decode_event::<AddedPaletteItem>(bytes)?;
                (event.pattern_key, Self::PaletteItemAdded(event.payload))
            }
            other => return Err(SessionError::UnknownEvent(other.to_owned())),
        };
        Ok(decoded)
    }
}

/// One open document.
#[derive(Debug)]
pub struct OpenPattern {
    pub project: PatternProject,
    pub canvas: PatternCanvas,
}

// =============================================================================
// WORKSPACE
// =============================================================================

/// All open documents, keyed by their identity key.
#[derive(Debug, Default)]
pub struct Workspace {
    config: CanvasConfig,
    patterns: HashMap<PatternKey, OpenPattern>,
}

impl Workspace {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self { config, patterns: HashMap::new() }
    }

    /// Workspace whose canvases read their tuning from `STITCH_CANVAS_*`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] for invalid environment values.
    pub fn from_env() -> Result<Self, SessionError> {
        Ok(Self::new(CanvasConfig::from_env()?))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Keys of the open documents, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &PatternKey> {
        self.patterns.keys()
    }

    #[must_use]
    pub fn get(&self, key: &PatternKey) -> Option<&OpenPattern> {
        self.patterns.get(key)
    }

    /// Mutable access, e.g. to feed input or subscribe to a canvas.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownPattern`] if `key` is not open.
    pub fn get_mut(&mut self, key: &PatternKey) -> Result<&mut OpenPattern, SessionError> {
        self.patterns.get_mut(key).ok_or_else(|| SessionError::UnknownPattern(key.clone()))
    }

    // --- Lifecycle ---

    /// Open a document returned by the backend's load call.
    ///
    /// # Errors
    ///
    /// Returns a codec error for a malformed buffer or a scene error for a
    /// document that cannot be drawn. Nothing is opened in either case.
    pub fn load(&mut self, bytes: &[u8]) -> Result<PatternKey, SessionError> {
        self.open(bytes, "loaded")
    }

    /// Open a document returned by the backend's create call.
    ///
    /// # Errors
    ///
    /// Same as [`Workspace::load`].
    pub fn create(&mut self, bytes: &[u8]) -> Result<PatternKey, SessionError> {
        self.open(bytes, "created")
    }

    fn open(&mut self, bytes: &[u8], origin: &'static str) -> Result<PatternKey, SessionError> {
        let (key, project) = schema::decode_document(bytes)?;
        let mut canvas = PatternCanvas::new(self.config);
        canvas.draw_pattern(&project)?;
        info!(
            %key,
            origin,
            width = project.pattern.properties.width,
            height = project.pattern.properties.height,
            drawables = canvas.scene().drawable_count(),
            "pattern opened"
        );
        if self.patterns.insert(key.clone(), OpenPattern { project, canvas }).is_some() {
            debug!(%key, "reopened pattern replaced the previous copy");
        }
        Ok(key)
    }

    /// Encode the current state of an open document with its key prefix.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownPattern`] if `key` is not open.
    pub fn snapshot(&self, key: &PatternKey) -> Result<Vec<u8>, SessionError> {
        let open = self.patterns.get(key).ok_or_else(|| SessionError::UnknownPattern(key.clone()))?;
        Ok(schema::encode_document(key, &open.project)?)
    }

    /// Close a document, returning its final state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownPattern`] if `key` is not open.
    pub fn close(&mut self, key: &PatternKey) -> Result<PatternProject, SessionError> {
        let open = self.patterns.remove(key).ok_or_else(|| SessionError::UnknownPattern(key.clone()))?;
        info!(%key, "pattern closed");
        Ok(open.project)
    }

    // --- Mutations ---

    /// Apply a confirmed mutation to the mirror and the canvas.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownPattern`] if `key` is not open,
    /// [`SessionError::Scene`] if the mutation names a missing palette entry, or
    /// [`SessionError::PaletteOrder`] if a palette item is not the next index.
    pub fn apply(&mut self, key: &PatternKey, event: PatternEvent) -> Result<(), SessionError> {
        let open = self.get_mut(key)?;
        let pattern = &mut open.project.pattern;
        match event {
            PatternEvent::StitchAdded(stitch) => {
                let palitem = palette_item(&pattern.palette, stitch.palindex())?.clone();
                document::insert_stitch(pattern, stitch);
                open.canvas.add_stitch(&stitch, &palitem)?;
            }
            PatternEvent::StitchesAdded(bundle) => {
                for stitch in bundle.iter() {
                    palette_item(&pattern.palette, stitch.palindex())?;
                }
                document::insert_stitches(pattern, &bundle);
                open.canvas.add_stitches(&bundle, &pattern.palette)?;
            }
            PatternEvent::StitchRemoved(stitch) => {
                if document::remove_stitch(pattern, &stitch).is_none() {
                    trace!(%key, ?stitch, "removed stitch was not in the document");
                }
                open.canvas.remove_stitch(&stitch);
            }
            PatternEvent::StitchesRemoved(bundle) => {
                let present = document::remove_stitches(pattern, &bundle);
                trace!(%key, requested = bundle.len(), present, "stitches removed");
                open.canvas.remove_stitches(&bundle);
            }
            PatternEvent::PaletteItemAdded(added) => {
                let expected = pattern.palette.len();
                if usize::try_from(added.palindex) != Ok(expected) {
                    return Err(SessionError::PaletteOrder { index: added.palindex, expected });
                }
                let index = document::push_palette_item(&mut open.project, added);
                debug!(%key, index, "palette item added");
            }
        }
        Ok(())
    }

    /// Decode a named backend event and apply it to the document it names.
    ///
    /// # Errors
    ///
    /// Any error of [`PatternEvent::decode`] or [`Workspace::apply`].
    pub fn apply_encoded(&mut self, name: &str, bytes: &[u8]) -> Result<PatternKey, SessionError> {
        let (key, event) = PatternEvent::decode(name, bytes)?;
        self.apply(&key, event)?;
        Ok(key)
    }
}

fn palette_item(palette: &[PaletteItem], index: u8) -> Result<&PaletteItem, SceneError> {
    palette.get(usize::from(index)).ok_or(SceneError::PaletteIndex { index, len: palette.len() })
}
