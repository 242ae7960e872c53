//! Artifact assembly for both build modes.
//!
//! - [`assemble_full`] runs every unit through the splitter, sharing one
//!   [`PreambleLedger`] across the whole run.
//! - [`assemble_reference`] emits one include line per unit and never reads
//!   unit content.
//!
//! Both build into an in-memory [`Artifact`]; nothing touches the output file
//! until the caller renders and writes it.

use tracing::{debug, info};

use crate::contract::{AmalgamError, BuildMode, UnitSource, UnitSummary};
use crate::ledger::PreambleLedger;
use crate::splitter::split_and_render;

/// Marker that keeps include-what-you-use from flagging the include as unused.
pub const KEEP_PRAGMA: &str = "// IWYU pragma: keep";

/// The output text under construction.
#[derive(Debug, Clone)]
pub struct Artifact {
    mode: BuildMode,
    header: String,
    preamble: Vec<String>,
    body: Vec<String>,
}

impl Artifact {
    /// `header` is emitted as-is and is expected to end with a blank line.
    pub fn new(mode: BuildMode, header: String) -> Self {
        Self {
            mode,
            header,
            preamble: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn push_preamble(&mut self, line: &str) {
        self.preamble.push(line.to_owned());
    }

    pub fn push_body(&mut self, line: &str) {
        self.body.push(line.to_owned());
    }

    /// Deduplicated preamble block (always empty in reference mode).
    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }

    /// Unit bodies (full mode) or include lines (reference mode).
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Header, then the preamble block, then the body region.
    ///
    /// Lines carry their own terminators and are concatenated unchanged.
    pub fn render(&self) -> String {
        let capacity = self.header.len()
            + self
                .preamble
                .iter()
                .chain(self.body.iter())
                .map(String::len)
                .sum::<usize>();
        let mut out = String::with_capacity(capacity);
        out.push_str(&self.header);
        for line in self.preamble.iter().chain(self.body.iter()) {
            out.push_str(line);
        }
        out
    }
}

/// Inline every unit from `source`, in the order it lists them.
///
/// Stops at the first malformed unit; the partially filled artifact must then
/// be discarded by the caller.
pub fn assemble_full<S>(
    source: &S,
    ledger: &mut PreambleLedger,
    keyword: &str,
    artifact: &mut Artifact,
) -> Result<Vec<UnitSummary>, AmalgamError>
where
    S: UnitSource + ?Sized,
{
    let names = source.list_units()?;
    info!(units = names.len(), keyword, "Assembling full artifact");

    let mut summaries = Vec::with_capacity(names.len());
    for name in &names {
        let unit = source.read_unit(name)?;
        let summary = split_and_render(&unit, ledger, keyword, artifact)?;
        debug!(
            unit = %summary.name,
            preamble = summary.preamble_lines,
            emitted = summary.emitted_preamble_lines,
            body = summary.body_lines,
            "Folded unit into artifact"
        );
        summaries.push(summary);
    }

    info!(
        units = summaries.len(),
        preamble_lines = artifact.preamble().len(),
        ledger_size = ledger.len(),
        "Full artifact assembled"
    );
    Ok(summaries)
}

/// Emit one include line per unit listed by `source`. Returns the unit count.
pub fn assemble_reference<S>(source: &S, artifact: &mut Artifact) -> Result<usize, AmalgamError>
where
    S: UnitSource + ?Sized,
{
    let names = source.list_units()?;
    info!(units = names.len(), "Assembling reference artifact");

    for name in &names {
        let line = format!("#include \"{}\" {KEEP_PRAGMA}\n", source.include_path(name));
        debug!(unit = %name, include = %line.trim_end(), "Referenced unit");
        artifact.push_body(&line);
    }
    Ok(names.len())
}
