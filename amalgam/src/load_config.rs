/// `load_config` module: Loads a YAML build config into CLI-side types.
///
/// This module is the only place where user-supplied YAML is parsed. The result
/// is merged with command-line flags in [`crate::cli`] before anything reaches
/// `amalgam-core`.
///
/// # Errors
/// All errors in this module use `anyhow::Error` for context-rich diagnostics, and are surfaced at the CLI boundary.
///
/// Accepted schema:
///
/// ```yaml
/// library:
///   title: "ZLOG -> C++ 23 LOGGING LIBRARY"
///   version: "2.0"
///   author: "https://www.github.com/SelvamKrishna"
/// source_dir: zlog
/// output: zlog_v2.hpp
/// boundary_keyword: namespace
/// order: sorted
/// include_root: zlog
/// ```
use amalgam_core::UnitOrder;
use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub library: LibrarySection,
    pub source_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub boundary_keyword: Option<String>,
    pub order: Option<UnitOrder>,
    pub include_root: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibrarySection {
    pub title: Option<String>,
    pub version: Option<VersionField>,
    pub author: Option<String>,
}

/// Versions are often written bare (`version: 2`), so integers are accepted too.
/// Dotted versions must be quoted; a bare `1.10` would read as the float `1.1`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VersionField {
    Text(String),
    Integer(i64),
}

impl std::fmt::Display for VersionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionField::Text(s) => write!(f, "{s}"),
            VersionField::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// Loads a YAML build config file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    // An empty file is a valid, all-defaults config.
    if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty, using defaults");
        return Ok(CliConfig::default());
    }

    match serde_yaml::from_str::<CliConfig>(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}
