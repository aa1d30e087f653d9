//! Module describing all possible commands and sub-commands to the `harvestctl` main driver
//!
//! Datasets are described in `datasets.hcl` (see `init`).  For each one we have three stages:
//!
//! - `fetch` retrieves the data from its URL and stores it as the dataset artifact,
//! - `summarize` reads the artifact back and writes the report next to it,
//! - `run` does both, for one, several or all datasets.
//!
//! `list` displays the configured datasets or the supported formats.
//!
//! `completion` is here just to configure the various shells completion system.
//!

use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, Parser, Subcommand, ValueEnum,
};
use clap_complete::shells::Shell;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Root of the dataset folders.
    #[clap(short = 'd', long, default_value = ".")]
    pub datadir: PathBuf,
    /// Log into this directory too.
    #[clap(long)]
    pub log_dir: Option<String>,
    /// Quiet mode, no banner.
    #[clap(short = 'q', long)]
    pub quiet: bool,
    /// Hierarchical log output.
    #[clap(long)]
    pub tree: bool,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `fetch NAME`
/// `init`
/// `list (datasets|formats)`
/// `run [NAME...]`
/// `summarize NAME`
/// `version`
///
#[derive(Debug, Subcommand)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Fetch one dataset and store it
    Fetch(NameOpts),
    /// Install the default configuration file
    Init,
    /// List datasets or formats
    List(ListOpts),
    /// Fetch and summarize datasets, all of them by default
    Run(RunOpts),
    /// Summarize an already fetched dataset
    Summarize(NameOpts),
    /// List all package versions
    Version,
}

// ------

/// Options for commands working on a single dataset.
///
#[derive(Debug, Parser)]
pub struct NameOpts {
    /// Dataset name
    pub name: String,
}

/// Options for `run`.
///
#[derive(Debug, Parser)]
pub struct RunOpts {
    /// Dataset names, in the order they will be processed.
    pub names: Vec<String>,
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

// ------

/// All `list` sub-commands:
///
/// `list datasets`
/// `list formats`
///
#[derive(Debug, Parser)]
pub struct ListOpts {
    #[clap(value_parser)]
    pub cmd: ListSubCommand,
}

/// These are the sub-commands for `list`
///
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, ValueEnum)]
pub enum ListSubCommand {
    /// List all datasets from `datasets.hcl`
    Datasets,
    /// List all supported formats
    Formats,
}
