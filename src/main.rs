use anyhow::Context;
use clap::Parser;
use quake_explorer::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).context("quake-explorer failed")
}
