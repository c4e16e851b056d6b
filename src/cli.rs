// src/cli.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutputMode;

/// Map execution status reports onto display-model field errors.
///
/// `statusmap.yaml` is the primary source of truth.
/// CLI flags only override config values.
#[derive(Parser, Debug)]
#[command(
    name = "statusmap",
    version,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// All supported CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Map one or more status reports into a single error dictionary.
    ///
    /// Reports are merged in the order given; messages accumulate.
    Map {
        /// Status report files (JSON or YAML)
        #[arg(required = true)]
        reports: Vec<PathBuf>,

        /// Path to config file
        ///
        /// Defaults to ./statusmap.yaml (optional)
        #[arg(short, long, default_value = "statusmap.yaml")]
        config: PathBuf,

        /// Display model to attribute errors to
        ///
        /// Without it every error goes to the summary.
        #[arg(short, long)]
        model: Option<String>,

        /// Key prefix for attributed fields
        ///
        /// Example:
        /// --prefix Input  ->  Input.Email
        #[arg(long)]
        prefix: Option<String>,

        /// Override output mode
        #[arg(long, value_enum)]
        output: Option<OutputMode>,

        /// Override output file (implies --output file)
        #[arg(long)]
        output_file: Option<PathBuf>,

        /// Exit non-zero when any report carries errors
        #[arg(long)]
        fail_on_errors: bool,
    },

    /// Check that report files are well formed.
    ///
    /// Directories are searched recursively for .json / .yaml / .yml files.
    Check {
        /// Report files or directories
        #[arg(default_value = "reports")]
        paths: Vec<PathBuf>,
    },

    /// Initialise a project scaffold.
    ///
    /// Creates:
    /// - statusmap.yaml
    /// - reports/example.json
    Init,
}
