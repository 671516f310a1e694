// assessa/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing::Level;

use cli::{Cli, Commands};
use commands::configure::ConfigureArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Setup Logging (Tracing)
    // stdout is reserved for command output; logs go to stderr.
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let project_dir = cli.project_dir;

    match cli.command {
        // --- USE CASE: SHOW ---
        Commands::Show { framework, json } => {
            commands::show::execute(&project_dir, &framework, json).await?;
        }

        // --- USE CASE: DOMAINS ---
        Commands::Domains { framework } => {
            commands::domains::execute(&project_dir, &framework).await?;
        }

        // --- USE CASE: CONFIGURE (WIZARD) ---
        Commands::Configure {
            framework,
            criteria_type,
            levels,
            weights,
            even,
        } => {
            let args = ConfigureArgs {
                framework,
                criteria_type,
                levels,
                weights,
                even,
            };
            commands::configure::execute(&project_dir, args).await?;
        }

        // --- USE CASE: DELETE ---
        Commands::Delete { framework, yes } => {
            commands::delete::execute(&project_dir, &framework, yes).await?;
        }
    }

    Ok(())
}
