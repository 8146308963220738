use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use pmc::{InfluenceMaximizer, Network, PmcConfig};

/// Reads `from to probability` edges from stdin and prints the selected seeds, one per line.
#[derive(Parser, Debug)]
#[command(name = "pmc", version, about = "Influence maximization with the PMC heuristic")]
struct Args {
    /// Number of seeds to select.
    #[arg(short = 'k', long = "seeds", default_value_t = 1)]
    k: usize,

    /// Number of sampled live-edge graphs.
    #[arg(short = 'r', long, default_value_t = 200)]
    trials: usize,

    /// Seed of the random source.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Also print `node gain` for every node of the last round.
    #[arg(long)]
    scores: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pmc=info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let g = match Network::new_from_stdin() {
        Ok(g) => g,
        Err(e) => {
            error!("failed to read the network: {}", e);
            std::process::exit(1);
        }
    };
    let config = PmcConfig { k: args.k, trials: args.trials, seed: args.seed };
    let mut im = match InfluenceMaximizer::new(&g, config) {
        Ok(im) => im,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    for u in im.run() {
        println!("{}", u);
    }
    if args.scores {
        for (u, gain) in im.influence() {
            println!("{} {}", u, gain);
        }
    }
}
