use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::contract::{BuildMode, LibraryMetadata};
use crate::splitter::DEFAULT_BOUNDARY_KEYWORD;

/// Order in which directory entries become units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitOrder {
    /// Lexicographic by file name; reproducible across filesystems.
    #[default]
    Sorted,
    /// Whatever the directory listing yields.
    Filesystem,
}

/// Everything one amalgamation run needs.
#[derive(Debug, Clone)]
pub struct AmalgamConfig {
    pub mode: BuildMode,
    pub library: LibraryMetadata,
    pub source_dir: PathBuf,
    pub output: PathBuf,
    pub boundary_keyword: String,
    pub order: UnitOrder,
    /// Prefix for reference-mode include lines. `None` means `source_dir` as given.
    pub include_root: Option<String>,
}

impl AmalgamConfig {
    /// A config with every optional setting at its default.
    pub fn new(mode: BuildMode, library: LibraryMetadata, source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        let output = default_output_path(&source_dir, &library.version);
        Self {
            mode,
            library,
            source_dir,
            output,
            boundary_keyword: DEFAULT_BOUNDARY_KEYWORD.to_string(),
            order: UnitOrder::default(),
            include_root: None,
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            mode = %self.mode,
            source_dir = %self.source_dir.display(),
            output = %self.output.display(),
            keyword = %self.boundary_keyword,
            order = ?self.order,
            "Loaded AmalgamConfig"
        );
        debug!(?self, "AmalgamConfig loaded (full debug)");
    }
}

/// Last path component of the source directory, e.g. `zlog` for `./lib/zlog`.
pub fn library_stem(source_dir: &Path) -> String {
    source_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "library".to_string())
}

/// `<stem>_v<version>.hpp`, next to the working directory.
pub fn default_output_path(source_dir: &Path, version: &str) -> PathBuf {
    PathBuf::from(format!("{}_v{}.hpp", library_stem(source_dir), version))
}

/// Metadata used when neither config nor flags provide any.
pub fn default_metadata(source_dir: &Path) -> LibraryMetadata {
    LibraryMetadata {
        title: format!("{} LIBRARY", library_stem(source_dir).to_uppercase()),
        version: "1".to_string(),
        author: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_follows_stem_and_version() {
        assert_eq!(
            default_output_path(Path::new("src/zlog"), "2"),
            PathBuf::from("zlog_v2.hpp")
        );
        assert_eq!(
            default_output_path(Path::new("zutils/"), "1.3"),
            PathBuf::from("zutils_v1.3.hpp")
        );
    }

    #[test]
    fn stem_falls_back_for_bare_roots() {
        assert_eq!(library_stem(Path::new("/")), "library");
        assert_eq!(library_stem(Path::new("..")), "library");
    }

    #[test]
    fn new_config_uses_defaults() {
        let config = AmalgamConfig::new(
            BuildMode::Full,
            default_metadata(Path::new("zlog")),
            "zlog",
        );
        assert_eq!(config.library.title, "ZLOG LIBRARY");
        assert_eq!(config.output, PathBuf::from("zlog_v1.hpp"));
        assert_eq!(config.boundary_keyword, "namespace");
        assert_eq!(config.order, UnitOrder::Sorted);
        assert!(config.include_root.is_none());
    }
}
