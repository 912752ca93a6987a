use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod order;
mod parsing;
mod template;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("oligo_order=debug,info")
    } else {
        EnvFilter::new("oligo_order=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Parse(args) => {
            cli::parse::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Fill(args) => {
            cli::fill::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Layout(args) => {
            cli::layout::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
    }

    Ok(())
}
