//! Binary crate for the `wttr` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive city prompt
//! - Wiring the core fetch/report pipeline to stdout, stderr and the exit code

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run()
}
