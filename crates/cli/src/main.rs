//! Set-associative cache simulator CLI.
//!
//! This binary runs one benchmark kernel against one cache configuration. It performs:
//! 1. **Configuration:** Built-in defaults, optionally a JSON file, then command-line overrides.
//! 2. **Banner:** Prints the cache geometry, policy, and workload.
//! 3. **Run:** Seeds memory, replays the kernel through the cache, and prints hit/miss results.

use clap::{Parser, ValueEnum};
use std::process;

use cachesim_core::config::{Config, Kernel, ReplacementPolicy};
use cachesim_core::sim::Simulator;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Set-associative cache simulator",
    long_about = "Replay a numeric kernel through a single-level set-associative cache.\n\nExamples:\n  cachesim -a daxpy -d 1000 -r FIFO\n  cachesim -c 65536 -b 32 -n 4 -a mxm -d 64\n  cachesim --config run.json -r random --seed 7"
)]
struct Cli {
    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<String>,

    /// Cache size in bytes.
    #[arg(short = 'c', long)]
    cache_size: Option<usize>,

    /// Block size in bytes.
    #[arg(short = 'b', long)]
    block_size: Option<usize>,

    /// Associativity (lines per set).
    #[arg(short = 'n', long)]
    associativity: Option<usize>,

    /// Replacement policy.
    #[arg(short = 'r', long, value_enum, ignore_case = true)]
    replacement: Option<PolicyArg>,

    /// Benchmark kernel.
    #[arg(short = 'a', long, value_enum)]
    algorithm: Option<KernelArg>,

    /// Vector length or matrix dimension.
    #[arg(short = 'd', long)]
    dimension: Option<usize>,

    /// Blocking factor for `mxm_block`.
    #[arg(short = 'f', long)]
    blocking_factor: Option<usize>,

    /// Print the results report.
    #[arg(short = 'p', long)]
    print: bool,

    /// Seed for random replacement.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Random,
    Fifo,
    Lru,
}

impl From<PolicyArg> for ReplacementPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Random => Self::Random,
            PolicyArg::Fifo => Self::Fifo,
            PolicyArg::Lru => Self::Lru,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KernelArg {
    Daxpy,
    Mxm,
    #[value(name = "mxm_block")]
    MxmBlock,
}

impl From<KernelArg> for Kernel {
    fn from(arg: KernelArg) -> Self {
        match arg {
            KernelArg::Daxpy => Self::Daxpy,
            KernelArg::Mxm => Self::Mxm,
            KernelArg::MxmBlock => Self::MxmBlock,
        }
    }
}

impl Cli {
    /// Resolves the run configuration: file (or defaults), then flag overrides.
    fn resolve(&self) -> Result<Config, String> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path).map_err(|e| e.to_string())?,
            None => Config::default(),
        };

        if let Some(size) = self.cache_size {
            config.cache.size_bytes = size;
        }
        if let Some(block) = self.block_size {
            config.cache.block_bytes = block;
        }
        if let Some(ways) = self.associativity {
            config.cache.associativity = ways;
        }
        if let Some(policy) = self.replacement {
            config.cache.policy = policy.into();
        }
        if let Some(seed) = self.seed {
            config.cache.seed = Some(seed);
        }
        if let Some(kernel) = self.algorithm {
            config.workload.kernel = kernel.into();
        }
        if let Some(dimension) = self.dimension {
            config.workload.dimension = dimension;
        }
        if let Some(factor) = self.blocking_factor {
            config.workload.blocking_factor = factor;
        }
        if self.print {
            config.workload.print_stats = true;
        }
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Builds the simulator, prints the banner, runs the kernel, and prints results.
fn run(cli: &Cli) -> Result<(), String> {
    let config = cli.resolve()?;
    debug!(?config, "resolved configuration");
    let mut sim = Simulator::new(&config).map_err(|e| e.to_string())?;

    print!("{}", sim.inputs_report());
    let summary = sim.run().map_err(|e| e.to_string())?;
    let workload = &sim.config().workload;
    println!("{} finished.", workload.kernel);

    if workload.print_stats {
        print!("{}", sim.results_report(&summary));
    }
    Ok(())
}
