//! PocketNote terminal front end.
//!
//! # Responsibility
//! - Collect input and render engine output in a terminal.
//! - Delegate every state change to `pocketnote_core::NoteEngine`.

mod cli;
mod shell;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
