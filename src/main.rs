use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flags
    let filter = if cli.quiet {
        EnvFilter::new("set_solver=warn")
    } else if cli.debug {
        EnvFilter::new("set_solver=debug")
    } else {
        EnvFilter::new("set_solver=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Solve(args) => {
            cli::solve::run(args, cli.format)?;
        }
        cli::Commands::Check(args) => {
            cli::check::run(args, cli.format)?;
        }
    }

    Ok(())
}
