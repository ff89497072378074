// dagtrace/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug dagtrace run ... pour voir les détails
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            catalog,
            pipeline_root,
            execution_times,
            mapping_output,
            output,
            summary,
        } => commands::run::execute(
            config,
            commands::run::PathArgs {
                catalog,
                pipeline_root,
                execution_times,
                mapping_output,
                output,
                summary,
            },
        ),

        Commands::Enrich {
            mapping,
            pipeline_root,
            execution_times,
            output,
            no_follow_links,
        } => commands::enrich::execute(
            mapping,
            pipeline_root,
            execution_times,
            output,
            !no_follow_links,
        ),

        Commands::Inspect { report, table } => {
            // miette::Report n'implémente pas std::error::Error
            commands::inspect::execute(report, table).map_err(|e| anyhow::anyhow!("{:?}", e))
        }
    }
}
