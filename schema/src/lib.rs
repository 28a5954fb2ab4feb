//! Pattern document model and its deterministic binary codec.
//!
//! This crate owns the wire representation shared with the document backend.
//! The layout is versionless: little-endian fixed-width integers, strings and
//! vectors with a 4-byte length prefix, a 1-byte presence flag for optional
//! values, fixed arrays without a prefix, and a single discriminant byte for
//! enums. That is exactly Borsh, so every type derives the Borsh traits.
//!
//! A loaded or created document arrives as the opaque [`PatternKey`] followed by
//! the [`PatternProject`] bytes. [`decode_document`] peels the key first and only
//! then decodes the remaining suffix as the project.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`stitches`] | Stitch records, the [`Stitch`] union and [`StitchBundle`] batches |
//! | [`pattern`] | [`Pattern`] aggregate, palette, fabric, chart extents |
//! | [`display`] | Screen presentation settings (grid, symbols, formats) |
//! | [`print`] | Print layout settings |
//! | [`project`] | [`PatternProject`] and the [`PatternKey`] handle |

pub mod display;
pub mod pattern;
pub mod print;
pub mod project;
pub mod stitches;

use borsh::{BorshDeserialize, BorshSerialize};

pub use display::{DisplaySettings, Grid, GridLineStyle};
pub use pattern::{Bead, Blend, Fabric, PaletteItem, PaletteItemStrands, Pattern, PatternInfo, PatternProperties};
pub use print::PrintSettings;
pub use project::{PatternKey, PatternProject};
pub use stitches::{
    Coord, Curve, FullStitch, FullStitchKind, LineStitch, LineStitchKind, NodeStitch, NodeStitchKind, PartStitch,
    PartStitchDirection, PartStitchKind, SpecialStitch, SpecialStitchModel, Stitch, StitchBundle,
};

/// Error returned by the encode and decode functions.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A value could not be written (Borsh refuses NaN floats).
    #[error("failed to encode: {0}")]
    Encode(#[source] std::io::Error),
    /// The length-prefixed pattern key at the start of the buffer is malformed.
    #[error("failed to decode pattern key: {source}")]
    IdentityKey {
        #[source]
        source: std::io::Error,
    },
    /// The project suffix starting at `offset` is malformed or has trailing bytes.
    #[error("failed to decode pattern project at byte {offset}: {source}")]
    Project {
        offset: usize,
        #[source]
        source: std::io::Error,
    },
    /// A mutation event payload is malformed.
    #[error("failed to decode event payload: {source}")]
    Payload {
        #[source]
        source: std::io::Error,
    },
}

/// Encode a project on its own, without the key prefix.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if any float in the project is NaN.
pub fn encode_project(project: &PatternProject) -> Result<Vec<u8>, CodecError> {
    borsh::to_vec(project).map_err(CodecError::Encode)
}

/// Decode a project that has no key prefix. The whole buffer must be consumed.
///
/// # Errors
///
/// Returns [`CodecError::Project`] with offset 0 for malformed bytes.
pub fn decode_project(bytes: &[u8]) -> Result<PatternProject, CodecError> {
    borsh::from_slice(bytes).map_err(|source| CodecError::Project { offset: 0, source })
}

/// Encode `key` followed by `project`, the layout returned by load and create.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if any float in the project is NaN.
pub fn encode_document(key: &PatternKey, project: &PatternProject) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    key.serialize(&mut out).map_err(CodecError::Encode)?;
    project.serialize(&mut out).map_err(CodecError::Encode)?;
    Ok(out)
}

/// Read only the key prefix, returning it with its encoded byte length.
///
/// The project bytes start at the returned length.
///
/// # Errors
///
/// Returns [`CodecError::IdentityKey`] if the length prefix or the UTF-8 body is truncated or invalid.
pub fn split_key(bytes: &[u8]) -> Result<(PatternKey, usize), CodecError> {
    let mut rest = bytes;
    let key = PatternKey::deserialize(&mut rest).map_err(|source| {
        tracing::warn!(error = %source, len = bytes.len(), "pattern key prefix is malformed");
        CodecError::IdentityKey { source }
    })?;
    Ok((key, bytes.len() - rest.len()))
}

/// Decode a key-prefixed document buffer.
///
/// # Errors
///
/// Returns [`CodecError::IdentityKey`] if the prefix is malformed and
/// [`CodecError::Project`] if the suffix is malformed or not fully consumed.
pub fn decode_document(bytes: &[u8]) -> Result<(PatternKey, PatternProject), CodecError> {
    let (key, offset) = split_key(bytes)?;
    let project = borsh::from_slice::<PatternProject>(&bytes[offset..]).map_err(|source| {
        tracing::warn!(%key, offset, error = %source, "pattern project is malformed");
        CodecError::Project { offset, source }
    })?;
    tracing::debug!(
        %key,
        bytes = bytes.len(),
        width = project.pattern.properties.width,
        height = project.pattern.properties.height,
        "document decoded"
    );
    Ok((key, project))
}

/// A mutation confirmation addressed to one open document.
#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct StitchEvent<T> {
    pub pattern_key: PatternKey,
    pub payload: T,
}

/// Payload of a palette append: the item, the index the backend gave it, and
/// the symbols and formats stored alongside it.
#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct AddedPaletteItem {
    pub palitem: PaletteItem,
    pub palindex: u32,
    pub symbols: display::Symbols,
    pub formats: display::Formats,
}

/// Encode a mutation event.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if the payload contains a NaN coordinate.
pub fn encode_event<T: BorshSerialize>(event: &StitchEvent<T>) -> Result<Vec<u8>, CodecError> {
    borsh::to_vec(event).map_err(CodecError::Encode)
}

/// Decode a mutation event.
///
/// # Errors
///
/// Returns [`CodecError::Payload`] for malformed bytes or trailing data.
pub fn decode_event<T: BorshDeserialize>(bytes: &[u8]) -> Result<StitchEvent<T>, CodecError> {
    borsh::from_slice(bytes).map_err(|source| CodecError::Payload { source })
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
