//! Compliance tracker CLI (`anu`).
//!
//! Tracks statutory deadlines, loan repayments and vehicle renewals for a
//! small Nepali business, stored in a local data directory.

mod cli;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
