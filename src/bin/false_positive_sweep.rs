use bloom_bench::{
    benchmarks::{result_csv_header, result_csv_line, run_benchmark, synthetic_trace},
    params::FilterParams,
};
use clap::Parser;
use log::info;

/// Measure false positive rates over a grid of filter sizes and target rates.
#[derive(Parser)]
#[command(name = "false_positive_sweep")]
struct Cli {
    /// Keys inserted per run, the filter is sized for exactly this many
    #[arg(long, value_delimiter = ',', default_values_t = vec![10_000, 100_000, 1_000_000])]
    elements: Vec<u64>,

    /// Target false positive probabilities
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.1, 0.01, 0.001])]
    rates: Vec<f64>,

    /// Share of queries that ask for an inserted key
    #[arg(long, default_value_t = 0.5)]
    member_ratio: f64,

    #[arg(long, default_value_t = 1337)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut benchmark_results = vec![];
    for n in cli.elements.iter() {
        // same trace for every rate, only the filter size changes
        let operations = synthetic_trace(*n as usize, *n as usize, cli.member_ratio, cli.seed)?;
        for p in cli.rates.iter() {
            let params = FilterParams::optimal(*n, *p)?;
            info!(
                "[sweep]: n = {}, p = {} -> m = {}, k = {}",
                n, p, params.bits, params.probes
            );
            benchmark_results.push(run_benchmark(&operations, params)?);
        }
    }
    println!("{}", result_csv_header());
    benchmark_results
        .iter()
        .for_each(|result| println!("{}", result_csv_line(result)));
    Ok(())
}
