use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::{AmalgamConfig, UnitOrder};
use crate::contract::{AmalgamError, Unit, UnitSource};

/// Units are the regular files directly inside one directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    order: UnitOrder,
    include_root: String,
}

impl DirectorySource {
    /// The include root for reference mode defaults to `dir` as given.
    pub fn new(dir: impl Into<PathBuf>, order: UnitOrder) -> Self {
        let dir = dir.into();
        let include_root = dir.to_string_lossy().into_owned();
        Self {
            dir,
            order,
            include_root,
        }
    }

    /// Source for `config.source_dir`, honouring its order and include root.
    pub fn from_config(config: &AmalgamConfig) -> Self {
        let source = Self::new(&config.source_dir, config.order);
        match &config.include_root {
            Some(root) => source.with_include_root(root.clone()),
            None => source,
        }
    }

    pub fn with_include_root(mut self, include_root: impl Into<String>) -> Self {
        self.include_root = include_root.into();
        self
    }
}

impl UnitSource for DirectorySource {
    fn list_units(&self) -> Result<Vec<String>, AmalgamError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| AmalgamError::io(&self.dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AmalgamError::io(&self.dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                debug!(path = %path.display(), "Skipping non-file entry");
                continue;
            }
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        if self.order == UnitOrder::Sorted {
            names.sort();
        }
        info!(dir = %self.dir.display(), count = names.len(), order = ?self.order, "Listed units");
        Ok(names)
    }

    fn read_unit(&self, name: &str) -> Result<Unit, AmalgamError> {
        let path = self.dir.join(name);
        let text = fs::read_to_string(&path).map_err(|e| AmalgamError::io(&path, e))?;
        debug!(path = %path.display(), bytes = text.len(), "Read unit");
        Ok(Unit::from_text(name, &text))
    }

    fn include_path(&self, name: &str) -> String {
        let root = self.include_root.trim_end_matches('/');
        if root.is_empty() {
            name.to_owned()
        } else {
            format!("{root}/{name}")
        }
    }
}
