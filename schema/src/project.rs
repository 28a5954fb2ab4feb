use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::display::DisplaySettings;
use crate::pattern::Pattern;
use crate::print::PrintSettings;

/// Opaque handle of an open document, typically its backing file path.
///
/// Not part of [`PatternProject`]; on the wire it is a length-prefixed string
/// written in front of the project bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(transparent)]
pub struct PatternKey(pub String);

impl PatternKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatternKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for PatternKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A pattern together with its display and print settings.
#[derive(Debug, Clone, Default, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct PatternProject {
    pub pattern: Pattern,
    pub display_settings: DisplaySettings,
    pub print_settings: PrintSettings,
}

impl PatternProject {
    /// A project around `pattern` with default settings sized to its palette.
    #[must_use]
    pub fn new(pattern: Pattern) -> Self {
        let display_settings = DisplaySettings::new(pattern.palette.len());
        Self { pattern, display_settings, print_settings: PrintSettings::default() }
    }
}
