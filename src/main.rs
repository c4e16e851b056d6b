// src/main.rs

//! statusmap
//!
//! Entry point for the statusmap CLI.
//!
//! Reads execution status reports, maps their errors onto a display model's
//! fields and prints the resulting error dictionary. All real work lives in
//! the library; this file only parses arguments, installs logging and hands
//! off to the runner.

use anyhow::Result;
use clap::Parser;

use statusmap::{cli, logging, runner};

fn main() -> Result<()> {
    logging::init();

    // Parse CLI arguments (map / check / init)
    let cli = cli::Cli::parse();

    runner::run(cli)
}
