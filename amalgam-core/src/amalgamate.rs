//! High-level pipeline: one amalgamation run, from unit source to output file.
//!
//! A run:
//!   - starts a fresh [`PreambleLedger`] (never reused between runs)
//!   - renders the header for the configured library and date
//!   - assembles the artifact in memory in the configured [`BuildMode`]
//!   - writes the rendered text to a temporary file next to the output and
//!     renames it into place, so a failed run never leaves a truncated file
//!
//! # Error Handling
//! The run is all-or-nothing. A malformed or unreadable unit aborts before
//! the output path is touched. An empty source is not an error: the artifact
//! then holds only the header.
//!
//! # Navigation
//! - Main entrypoint: [`amalgamate`]
//! - In-memory only: [`build_artifact`]

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::assemble::{assemble_full, assemble_reference, Artifact};
use crate::config::AmalgamConfig;
use crate::contract::{AmalgamError, BuildMode, UnitSource, UnitSummary};
use crate::header::render_header;
use crate::ledger::PreambleLedger;

/// What a run produced.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub mode: BuildMode,
    pub output: PathBuf,
    /// Per-unit split results; empty in reference mode.
    pub units: Vec<UnitSummary>,
    pub unit_count: usize,
    pub preamble_lines_emitted: usize,
    pub bytes_written: usize,
}

/// Assemble the artifact without writing anything.
///
/// The returned report has `bytes_written == 0`.
pub fn build_artifact<S>(
    config: &AmalgamConfig,
    source: &S,
    date: NaiveDate,
) -> Result<(Artifact, BuildReport), AmalgamError>
where
    S: UnitSource + ?Sized,
{
    let header = render_header(&config.library, date);
    let mut artifact = Artifact::new(config.mode, header);

    let (units, unit_count) = match config.mode {
        BuildMode::Full => {
            let mut ledger = PreambleLedger::new();
            let units = assemble_full(source, &mut ledger, &config.boundary_keyword, &mut artifact)?;
            let count = units.len();
            (units, count)
        }
        BuildMode::Reference => {
            let count = assemble_reference(source, &mut artifact)?;
            (Vec::new(), count)
        }
    };

    if unit_count == 0 {
        warn!(dir = %config.source_dir.display(), "No units found, artifact holds only the header");
    }

    let report = BuildReport {
        mode: artifact.mode(),
        output: config.output.clone(),
        units,
        unit_count,
        preamble_lines_emitted: artifact.preamble().len(),
        bytes_written: 0,
    };
    Ok((artifact, report))
}

/// Run one amalgamation and write the artifact to `config.output`.
pub fn amalgamate<S>(
    config: &AmalgamConfig,
    source: &S,
    date: NaiveDate,
) -> Result<BuildReport, AmalgamError>
where
    S: UnitSource + ?Sized,
{
    info!(
        mode = %config.mode,
        source_dir = %config.source_dir.display(),
        output = %config.output.display(),
        "Starting amalgamation"
    );

    let (artifact, mut report) = match build_artifact(config, source, date) {
        Ok(built) => built,
        Err(e) => {
            error!(error = %e, "Amalgamation aborted, output left untouched");
            return Err(e);
        }
    };

    let text = artifact.render();
    write_atomically(&config.output, text.as_bytes())?;
    report.bytes_written = text.len();

    info!(
        units = report.unit_count,
        preamble_lines = report.preamble_lines_emitted,
        bytes = report.bytes_written,
        output = %report.output.display(),
        "Amalgamation complete"
    );
    Ok(report)
}

fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), AmalgamError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| AmalgamError::io(parent, e))?;
    let tmp_path = tmp.path().to_path_buf();
    tmp.write_all(contents)
        .map_err(|e| AmalgamError::io(&tmp_path, e))?;
    tmp.flush().map_err(|e| AmalgamError::io(&tmp_path, e))?;
    tmp.persist(path)
        .map_err(|e| AmalgamError::io(path, e.error))?;
    Ok(())
}
