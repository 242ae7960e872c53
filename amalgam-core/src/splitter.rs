use tracing::{error, trace};

use crate::assemble::Artifact;
use crate::contract::{AmalgamError, Unit, UnitSummary};
use crate::ledger::PreambleLedger;

/// Default keyword that opens a unit's body.
pub const DEFAULT_BOUNDARY_KEYWORD: &str = "namespace";

/// Blank line written before each unit body.
pub const BODY_SEPARATOR: &str = "\n";

/// True when `line` is a boundary marker for `keyword`.
pub fn is_boundary(line: &str, keyword: &str) -> bool {
    line.trim().starts_with(keyword)
}

/// Split `unit` into preamble and body and fold both into `artifact`.
///
/// The first line is always dropped and never reaches the ledger. Lines up to
/// the boundary marker go through `ledger`; accepted ones join the shared
/// preamble block. A blank separator and then the marker and every following
/// line are appended to the body region untouched, terminators included.
pub fn split_and_render(
    unit: &Unit,
    ledger: &mut PreambleLedger,
    keyword: &str,
    artifact: &mut Artifact,
) -> Result<UnitSummary, AmalgamError> {
    let mut lines = unit.lines.iter().skip(1);
    let mut preamble_lines = 0;
    let mut emitted_preamble_lines = 0;

    let marker = loop {
        match lines.next() {
            Some(line) if is_boundary(line, keyword) => break line,
            Some(line) => {
                preamble_lines += 1;
                if ledger.consider(line) {
                    artifact.push_preamble(line);
                    emitted_preamble_lines += 1;
                }
            }
            None => {
                error!(unit = %unit.name, keyword, "Unit has no boundary marker");
                return Err(AmalgamError::MalformedUnit {
                    unit: unit.name.clone(),
                    keyword: keyword.to_owned(),
                });
            }
        }
    };
    trace!(unit = %unit.name, marker = %marker.trim_end(), "Found boundary marker");

    artifact.push_body(BODY_SEPARATOR);
    artifact.push_body(marker);
    let mut body_lines = 1;
    for line in lines {
        artifact.push_body(line);
        body_lines += 1;
    }

    Ok(UnitSummary {
        name: unit.name.clone(),
        preamble_lines,
        emitted_preamble_lines,
        body_lines,
    })
}
