use std::fs;
use std::io::{self, Read, Write};

use anyhow::Context;
use clap::Parser;
use crossterm::tty::IsTty;
use tracing_subscriber::EnvFilter;

use tarjan_scc::cli::{self, Args, Settings};
use tarjan_scc::input::parse_adjacency;

fn read_source(settings: &Settings) -> anyhow::Result<String> {
    match &settings.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let settings = Settings::from_args(&args, io::stdout().is_tty());

    let source = read_source(&settings)?;
    let graph = parse_adjacency(&source).context("failed to parse graph")?;
    tracing::info!(vertices = graph.len(), edges = graph.edge_count(), "graph loaded");

    let mut out = io::stdout().lock();
    cli::run(&graph, &settings, &mut out)?;
    out.flush()?;
    Ok(())
}
