use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::Context;
use bloom_bench::{benchmarks::synthetic_trace, trace::write_trace};
use clap::Parser;
use log::info;

/// Write a reproducible random trace that `bloom_benchmark` can replay.
#[derive(Parser)]
#[command(name = "generate_trace")]
struct Cli {
    /// Distinct keys to insert
    #[arg(long, default_value_t = 1_000_000)]
    inserts: usize,

    /// Queries following the inserts
    #[arg(long, default_value_t = 1_000_000)]
    queries: usize,

    /// Share of queries that ask for an inserted key
    #[arg(long, default_value_t = 0.5)]
    member_ratio: f64,

    #[arg(long, default_value_t = 1337)]
    seed: u64,

    #[arg(long, default_value = "input.txt")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let operations = synthetic_trace(cli.inserts, cli.queries, cli.member_ratio, cli.seed)?;
    let output = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    write_trace(BufWriter::new(output), &operations)?;
    info!(
        "wrote {} inserts and {} queries to {}",
        cli.inserts,
        cli.queries,
        cli.output.display()
    );
    Ok(())
}
