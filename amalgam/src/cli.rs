///
/// This module implements the CLI interface for amalgam: command parsing,
/// merging flags with the optional YAML config, and invoking the core run.
///
/// All amalgamation logic lives in the [`amalgam-core`] crate.
/// This module is strictly for CLI glue and user-visible output.
///
/// ## How To Use
/// - For command-line users: `amalgam full --source-dir zlog` or
///   `amalgam reference --config amalgam.yaml`; see `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`amalgam-core`]: ../../amalgam-core/
/// [`Cli`]: struct.Cli.html
/// [`run`]: fn.run.html
use crate::load_config::{load_config, CliConfig};
use amalgam_core::config::default_metadata;
use amalgam_core::{amalgamate, AmalgamConfig, BuildMode, DirectorySource, UnitOrder};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI for amalgam: combine a header library into one distributable header.
#[derive(Parser)]
#[clap(
    name = "amalgam",
    version,
    about = "Combine a directory of header units into a single distributable header",
    arg_required_else_help = true
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inline every unit into one header, deduplicating their includes
    Full(BuildArgs),
    /// Emit a header that includes every unit by name
    Reference(BuildArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Path to a YAML build config
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Directory whose files are the units (not searched recursively)
    #[clap(long)]
    pub source_dir: Option<PathBuf>,
    /// Output header path [default: <dir name>_v<version>.hpp]
    #[clap(long)]
    pub output: Option<PathBuf>,
    /// Order in which units are combined
    #[clap(long, value_enum)]
    pub order: Option<OrderArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Sort units by file name
    Sorted,
    /// Keep the order the filesystem lists them in
    Filesystem,
}

impl From<OrderArg> for UnitOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Sorted => UnitOrder::Sorted,
            OrderArg::Filesystem => UnitOrder::Filesystem,
        }
    }
}

/// Merge flags over the config file (flags win) into a core config.
pub fn resolve_config(mode: BuildMode, args: BuildArgs) -> Result<AmalgamConfig> {
    let file = match &args.config {
        Some(path) => load_config(path)?,
        None => CliConfig::default(),
    };

    let source_dir = args
        .source_dir
        .or(file.source_dir)
        .context("no source directory: pass --source-dir or set `source_dir` in the config")?;

    let defaults = default_metadata(&source_dir);
    let library = amalgam_core::LibraryMetadata {
        title: file.library.title.unwrap_or(defaults.title),
        version: file
            .library
            .version
            .map(|v| v.to_string())
            .unwrap_or(defaults.version),
        author: file.library.author.unwrap_or(defaults.author),
    };

    let mut config = AmalgamConfig::new(mode, library, source_dir);
    if let Some(output) = args.output.or(file.output) {
        config.output = output;
    }
    if let Some(keyword) = file.boundary_keyword {
        // Lines are trimmed before matching, so the keyword must be too.
        let keyword = keyword.trim();
        if keyword.is_empty() {
            anyhow::bail!("boundary_keyword must not be empty");
        }
        config.boundary_keyword = keyword.to_string();
    }
    config.order = args
        .order
        .map(UnitOrder::from)
        .or(file.order)
        .unwrap_or_default();
    config.include_root = file.include_root;

    config.trace_loaded();
    Ok(config)
}

/// Extracted CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    let (mode, args) = match cli.command {
        Commands::Full(args) => (BuildMode::Full, args),
        Commands::Reference(args) => (BuildMode::Reference, args),
    };
    tracing::info!(command = %mode, "Starting amalgamation");

    let config = resolve_config(mode, args)?;
    let source = DirectorySource::from_config(&config);
    let today = chrono::Local::now().date_naive();

    match amalgamate(&config, &source, today) {
        Ok(report) => {
            tracing::debug!(?report, "Build report");
            println!(
                "Amalgamation complete: {} mode, {} units, {} bytes -> {}",
                report.mode,
                report.unit_count,
                report.bytes_written,
                report.output.display()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(command = %mode, error = %e, "Amalgamation failed");
            Err(anyhow::Error::new(e).context(format!("{mode} build failed")))
        }
    }
}
