#![doc = "amalgam-core: merges a directory of header units into one distributable header."]

//! This crate holds all amalgamation logic: preamble deduplication, unit
//! splitting, artifact assembly for both build modes, and the run pipeline
//! that writes the result.
//!
//! # Usage
//! Build an [`config::AmalgamConfig`], pick a [`contract::UnitSource`]
//! (usually [`source::DirectorySource`]) and call [`amalgamate::amalgamate`].

pub mod amalgamate;
pub mod assemble;
pub mod config;
pub mod contract;
pub mod header;
pub mod ledger;
pub mod source;
pub mod splitter;

pub use amalgamate::{amalgamate, build_artifact, BuildReport};
pub use config::{AmalgamConfig, UnitOrder};
pub use contract::{AmalgamError, BuildMode, LibraryMetadata, Unit, UnitSource, UnitSummary};
pub use ledger::PreambleLedger;
pub use source::DirectorySource;
