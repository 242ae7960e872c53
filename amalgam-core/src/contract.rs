//! # contract: shared types and the unit-source seam
//!
//! This module defines the data every other module works on and the single
//! trait ([`UnitSource`]) through which units enter an amalgamation run.
//!
//! ## Interface & Extensibility
//! - Implement [`UnitSource`] to feed units from somewhere other than a
//!   directory (an in-memory list, an archive, a test fixture).
//! - The source decides the order of units. The assembler never reorders.
//! - All fallible operations return [`AmalgamError`].
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`, so consumers can build
//!   deterministic mocks (`MockUnitSource`) with the `test-export-mocks`
//!   feature (on by default).

use std::path::PathBuf;

use mockall::automock;
use serde::{Deserialize, Serialize};

/// One input file being amalgamated, read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// File name, used for include lines and diagnostics.
    pub name: String,
    /// Lines in file order, each keeping its own terminator (`\n`, `\r\n` or none for a final line).
    pub lines: Vec<String>,
}

impl Unit {
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }

    /// Builds a unit from raw file text, splitting after every `\n`.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, text.split_inclusive('\n').map(str::to_owned).collect())
    }
}

/// Which artifact to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Inline every unit body, deduplicating preambles.
    Full,
    /// Emit one include line per unit, never reading unit content.
    Reference,
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildMode::Full => write!(f, "full"),
            BuildMode::Reference => write!(f, "reference"),
        }
    }
}

/// Static metadata rendered into the artifact's comment header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryMetadata {
    pub title: String,
    pub version: String,
    pub author: String,
}

/// Per-unit outcome of a full-mode split, collected into the build report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSummary {
    pub name: String,
    /// Preamble candidates scanned (first line excluded).
    pub preamble_lines: usize,
    /// Preamble candidates that made it into the artifact.
    pub emitted_preamble_lines: usize,
    /// Lines copied verbatim from the boundary marker onward.
    pub body_lines: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AmalgamError {
    /// A unit has no boundary marker after its first line.
    #[error("malformed unit `{unit}`: no line starting with `{keyword}` found after the first line")]
    MalformedUnit { unit: String, keyword: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AmalgamError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AmalgamError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Supplies units to the assembler in a caller-defined order.
///
/// Implemented by [`crate::source::DirectorySource`] and by mocks in testing.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait UnitSource {
    /// Names of every unit, in the order they must appear in the artifact.
    fn list_units(&self) -> Result<Vec<String>, AmalgamError>;

    /// Read a unit fully. Only called in full mode.
    fn read_unit(&self, name: &str) -> Result<Unit, AmalgamError>;

    /// Path text used inside a reference-mode include line.
    fn include_path(&self, name: &str) -> String;
}
