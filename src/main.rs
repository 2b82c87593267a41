use clap::Parser;
use tracing_subscriber::EnvFilter;

use workout_log::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // --debug on a filtering command surfaces match candidates
    let debug = match &cli.command {
        cli::Commands::Filter(args) => args.filter.debug,
        cli::Commands::Stats(args) => args.filter.debug,
        _ => false,
    };

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("workout_log=debug,info")
    } else if debug {
        EnvFilter::new("workout_log=info")
    } else {
        EnvFilter::new("workout_log=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Filter(args) => {
            cli::filter::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Score(args) => {
            cli::score::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Stats(args) => {
            cli::stats::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Log(args) => {
            cli::log::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
