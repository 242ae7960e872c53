pub mod cli;
pub mod load_config;

pub use cli::{resolve_config, run, BuildArgs, Cli, Commands};
