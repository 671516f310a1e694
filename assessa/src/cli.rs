// assessa/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use assessa_core::domain::criteria::CriteriaType;

#[derive(Parser)]
#[command(name = "assessa")]
#[command(about = "Assessment criteria configuration for compliance frameworks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project directory (holds assessa.yaml and the default store)
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Log debug details to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📋 Shows the saved assessment criteria of a framework
    Show {
        #[arg(long, short)]
        framework: String,

        /// Print the stored document as JSON
        #[arg(long)]
        json: bool,
    },

    /// 🗂️ Lists the domains of a framework
    Domains {
        #[arg(long, short)]
        framework: String,
    },

    /// 🧭 Runs the criteria wizard non-interactively and saves the result
    Configure {
        #[arg(long, short)]
        framework: String,

        /// percentage | maturity | compliance
        #[arg(long = "type", short = 't', default_value = "percentage")]
        criteria_type: CriteriaType,

        /// Capability level as VALUE[:LABEL], in ascending order (repeatable)
        #[arg(long = "level", short = 'l')]
        levels: Vec<String>,

        /// Domain weight as ID=WEIGHT (repeatable). Omitted domains keep their seeded weight.
        #[arg(long = "weight", short = 'w')]
        weights: Vec<String>,

        /// Reset every domain to an equal share before applying --weight
        #[arg(long)]
        even: bool,
    },

    /// 🗑️ Deletes the saved assessment criteria of a framework
    Delete {
        #[arg(long, short)]
        framework: String,

        /// Skip the confirmation notice
        #[arg(long, short)]
        yes: bool,
    },
}
