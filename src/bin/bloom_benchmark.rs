use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::Context;
use bloom_bench::{
    benchmarks::{result_csv_header, result_csv_line, run_benchmark},
    params::FilterParams,
    trace::{read_trace, write_answers},
};
use clap::Parser;
use log::info;

/// Replay a trace through a bloom filter and an exact set, write the bloom
/// filter's answers and report timings and the false positive rate.
#[derive(Parser)]
#[command(name = "bloom_benchmark")]
#[command(version)]
struct Cli {
    /// Trace of `+ key`, `? key` lines, terminated by `#`
    #[arg(long, default_value = "input.txt")]
    input: PathBuf,

    /// Receives one `Y`/`N` per query
    #[arg(long, default_value = "output.txt")]
    output: PathBuf,

    /// Number of elements the filter is sized for
    #[arg(long, short = 'n', default_value_t = 1_000_000)]
    expected_elements: u64,

    /// Target false positive probability
    #[arg(long, short = 'p', default_value_t = 0.01)]
    false_positive_rate: f64,

    /// Bit array size, overrides the derived value
    #[arg(long, requires = "probes")]
    bits: Option<u64>,

    /// Probes per key, overrides the derived value
    #[arg(long, requires = "bits")]
    probes: Option<u64>,

    /// Also print a CSV header and result line to stdout
    #[arg(long, default_value = "false")]
    csv: bool,

    /// Also print the result summary as JSON to stdout
    #[arg(long, default_value = "false")]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let params = match (cli.bits, cli.probes) {
        (Some(bits), Some(probes)) => FilterParams::new(bits, probes)?,
        _ => FilterParams::optimal(cli.expected_elements, cli.false_positive_rate)?,
    };
    info!("m: {}, k: {}", params.bits, params.probes);

    let operations = read_trace(&cli.input)
        .with_context(|| format!("reading trace from {}", cli.input.display()))?;
    let result = run_benchmark(&operations, params)?;

    let output = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    write_answers(BufWriter::new(output), &result.bloom_answers)?;

    for line in result.to_string().lines() {
        info!("{}", line);
    }
    if cli.csv {
        println!("{}", result_csv_header());
        println!("{}", result_csv_line(&result));
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}
