use anyhow::Context;
use clap::Parser;
use guardchannel::utils::logging;
use simulator::save_results::hms;
use simulator::{ResultWriter, SimulatorConfig, SweepRunner};
use std::path::PathBuf;

// ------------------------------------------------------------------------------------------------
// Command Line
// ------------------------------------------------------------------------------------------------

/// Minimum URLLC guard channels versus eMBB load, by Monte Carlo simulation.
#[derive(Parser, Debug)]
#[command(name = "simulator", version)]
struct Args {
    /// Total capacity units S of the slice
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    capacity: u32,

    /// TOML file overriding the built-in run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving S(<capacity>).csv and S(<capacity>).json
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Base seed of the worker random streams
    #[arg(long)]
    seed: Option<u64>,

    /// Number of sweep workers
    #[arg(long)]
    workers: Option<usize>,

    /// Do not draw the progress bar
    #[arg(long)]
    no_progress: bool,
}

// ------------------------------------------------------------------------------------------------
// Main
// ------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_logging().context("failed to initialize logging")?;

    let config = load_config(&args)?;
    let runner = SweepRunner::new(args.capacity, config)
        .context("invalid sweep configuration")?
        .with_progress(!args.no_progress);

    // Fail on an unwritable destination before simulating anything.
    let writer = ResultWriter::create(&args.output_dir, args.capacity).context("cannot open output files")?;

    print_header(&runner, args.capacity);

    let results = runner.run().await.context("sweep failed")?;
    writer.write(&results, runner.config()).context("failed to save results")?;

    let (h, m, s) = hms(results.elapsed);
    println!();
    println!("Time: {} hrs {} mins {} s", h, m, s);
    if results.infeasible_points() > 0 {
        println!("{} load point(s) have no feasible guard below S", results.infeasible_points());
    }
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<SimulatorConfig> {
    let mut config = match &args.config {
        Some(path) => SimulatorConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SimulatorConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.sweep.seed = Some(seed);
    }
    if let Some(workers) = args.workers {
        config.sweep.num_workers = workers;
    }
    Ok(config)
}

fn print_header(runner: &SweepRunner, capacity: u32) {
    let config = runner.config();
    println!("lambda_u: {}", config.model.lambda_u);
    println!("mu: {:.2}", config.model.mu);
    println!("S: {}", capacity);
    println!("Number of iterations: {:.2}", config.model.nb_iter);
    println!("Loss limit: {:.5}", config.search.threshold);
    println!("Seed: {}", runner.base_seed());
}
