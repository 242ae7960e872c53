//! Preamble deduplication.
//!
//! A [`PreambleLedger`] remembers every preamble line seen during one
//! amalgamation run and decides whether a line still belongs in the shared
//! preamble block. Create a fresh ledger per run; never share one across runs.

use std::collections::HashSet;

use tracing::debug;

/// Quoted includes point at sibling units whose content is inlined elsewhere.
const LOCAL_REFERENCE_QUOTE: char = '"';

#[derive(Debug, Default)]
pub struct PreambleLedger {
    seen: HashSet<String>,
}

impl PreambleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `line` should be emitted, and records it either way.
    ///
    /// A line is suppressed when it was already seen in this run, or when it
    /// contains a `"` (a local reference). Comparison is exact, so indentation
    /// and trailing whitespace make lines distinct.
    pub fn consider(&mut self, line: &str) -> bool {
        let is_local = line.contains(LOCAL_REFERENCE_QUOTE);
        let is_new = self.seen.insert(line.to_owned());
        let emit = is_new && !is_local;
        debug!(line, emit, is_local, "Considered preamble line");
        emit
    }

    pub fn contains(&self, line: &str) -> bool {
        self.seen.contains(line)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
