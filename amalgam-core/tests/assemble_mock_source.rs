use chrono::NaiveDate;

use amalgam_core::assemble::{assemble_full, assemble_reference, Artifact};
use amalgam_core::contract::{AmalgamError, BuildMode, LibraryMetadata, MockUnitSource, Unit};
use amalgam_core::{build_artifact, AmalgamConfig, PreambleLedger};

fn unit_named(name: &str) -> Unit {
    let lines: &[&str] = match name {
        "a.hpp" => &["x", "#include <v>", "#include \"b.h\"", "namespace a{}"],
        "b.hpp" => &["y", "#include <v>", "namespace b{}"],
        "c.hpp" => &["z", "#include <v>", "#include <w>", "#include \"a.h\"", "namespace c{}"],
        other => panic!("Unexpected unit {other}"),
    };
    Unit::new(name, lines.iter().map(|l| format!("{l}\n")).collect())
}

fn mock_listing(names: &[&str]) -> MockUnitSource {
    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    let mut source = MockUnitSource::new();
    source.expect_list_units().return_once(move || Ok(names));
    source
        .expect_read_unit()
        .returning(|name: &str| Ok(unit_named(name)));
    source
}

fn full_artifact() -> Artifact {
    Artifact::new(BuildMode::Full, String::new())
}

#[test]
fn test_example_units_produce_single_preamble_line() {
    let source = mock_listing(&["a.hpp", "b.hpp"]);
    let mut ledger = PreambleLedger::new();
    let mut artifact = full_artifact();

    let summaries = assemble_full(&source, &mut ledger, "namespace", &mut artifact).unwrap();

    assert_eq!(artifact.preamble(), &["#include <v>\n"]);
    assert_eq!(artifact.body(), &["\n", "namespace a{}\n", "\n", "namespace b{}\n"]);
    assert_eq!(summaries.len(), 2);
    // First lines are never recorded.
    assert!(!ledger.contains("x\n"));
    assert!(!ledger.contains("y\n"));
    // Quoted lines are recorded though never emitted.
    assert!(ledger.contains("#include \"b.h\"\n"));
}

#[test]
fn test_repeated_include_appears_once_across_many_units() {
    let source = mock_listing(&["a.hpp", "b.hpp", "c.hpp"]);
    let mut ledger = PreambleLedger::new();
    let mut artifact = full_artifact();

    assemble_full(&source, &mut ledger, "namespace", &mut artifact).unwrap();

    let count = artifact
        .preamble()
        .iter()
        .filter(|l| l.as_str() == "#include <v>\n")
        .count();
    assert_eq!(count, 1);
    assert_eq!(artifact.preamble(), &["#include <v>\n", "#include <w>\n"]);
    assert!(!artifact.preamble().iter().any(|l| l.contains('"')));
}

#[test]
fn test_body_order_follows_source_order() {
    let mut forward = full_artifact();
    assemble_full(
        &mock_listing(&["a.hpp", "b.hpp"]),
        &mut PreambleLedger::new(),
        "namespace",
        &mut forward,
    )
    .unwrap();

    let mut reversed = full_artifact();
    assemble_full(
        &mock_listing(&["b.hpp", "a.hpp"]),
        &mut PreambleLedger::new(),
        "namespace",
        &mut reversed,
    )
    .unwrap();

    assert_eq!(forward.body(), &["\n", "namespace a{}\n", "\n", "namespace b{}\n"]);
    assert_eq!(reversed.body(), &["\n", "namespace b{}\n", "\n", "namespace a{}\n"]);
}

#[test]
fn test_reference_mode_never_reads_units() {
    let mut source = MockUnitSource::new();
    source
        .expect_list_units()
        .return_once(|| Ok(vec!["trace.hpp".to_string(), "log.hpp".to_string()]));
    source.expect_read_unit().never();
    source
        .expect_include_path()
        .returning(|name: &str| format!("zlog/{name}"));

    let mut artifact = Artifact::new(BuildMode::Reference, String::new());
    let count = assemble_reference(&source, &mut artifact).unwrap();

    assert_eq!(count, 2);
    assert!(artifact.preamble().is_empty());
    assert_eq!(
        artifact.render(),
        "#include \"zlog/trace.hpp\" // IWYU pragma: keep\n#include \"zlog/log.hpp\" // IWYU pragma: keep\n"
    );
}

#[test]
fn test_read_failure_aborts_full_build() {
    let mut source = MockUnitSource::new();
    source
        .expect_list_units()
        .return_once(|| Ok(vec!["a.hpp".to_string(), "gone.hpp".to_string()]));
    source.expect_read_unit().returning(|name: &str| {
        if name == "gone.hpp" {
            Err(AmalgamError::io(
                name,
                std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            ))
        } else {
            Ok(unit_named(name))
        }
    });

    let mut artifact = full_artifact();
    let err = assemble_full(&source, &mut PreambleLedger::new(), "namespace", &mut artifact)
        .unwrap_err();
    assert!(matches!(err, AmalgamError::Io { .. }));
}

#[test]
fn test_build_artifact_renders_header_then_regions() {
    let source = mock_listing(&["a.hpp", "b.hpp"]);
    let metadata = LibraryMetadata {
        title: "ZLOG".to_string(),
        version: "2".to_string(),
        author: "me".to_string(),
    };
    let config = AmalgamConfig::new(BuildMode::Full, metadata, "zlog");
    let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();

    let (artifact, report) = build_artifact(&config, &source, date).unwrap();
    let text = artifact.render();

    assert!(text.starts_with("#pragma once\n\n/*\n\n=== ZLOG ===\n"));
    assert!(text.contains("date:    02-01-2026\n"));
    assert!(text.ends_with("*/\n\n#include <v>\n\nnamespace a{}\n\nnamespace b{}\n"));
    assert_eq!(report.bytes_written, 0);
    assert_eq!(report.unit_count, 2);
}

#[test]
fn test_build_artifact_with_empty_listing_is_header_only() {
    let mut source = MockUnitSource::new();
    source.expect_list_units().return_once(|| Ok(Vec::new()));

    let metadata = LibraryMetadata {
        title: "EMPTY".to_string(),
        version: "1".to_string(),
        author: String::new(),
    };
    let config = AmalgamConfig::new(BuildMode::Reference, metadata, "empty");
    let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();

    let (artifact, report) = build_artifact(&config, &source, date).unwrap();

    assert_eq!(report.unit_count, 0);
    assert_eq!(report.mode, BuildMode::Reference);
    assert!(artifact.body().is_empty());
    assert!(artifact.render().ends_with("*/\n\n"));
}
