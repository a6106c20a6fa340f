//! Modkit CLI - package content projects into distributable mod archives

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{asset, build, init};

#[derive(Parser)]
#[command(name = "modkit")]
#[command(about = "Package content projects into distributable mod archives", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new project with a starter manifest
    Init {
        /// Project identifier
        project_id: String,

        /// Display name written to the manifest
        #[arg(long)]
        name: Option<String>,
    },

    /// Asset management operations
    #[command(subcommand)]
    Asset(asset::AssetCommands),

    /// Build one or more projects and wait for the results
    Build {
        /// Project identifiers
        #[arg(required = true)]
        project_ids: Vec<String>,

        /// Print final job records as JSON
        #[arg(long)]
        json: bool,

        /// Copy completed artifacts into the workshop directory
        #[arg(long)]
        publish: bool,

        /// Visibility recorded alongside published artifacts
        #[arg(long, default_value = modkit_build::DEFAULT_VISIBILITY)]
        visibility: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Init { project_id, name } => init::run(&project_id, name.as_deref()),
        Commands::Asset(cmd) => asset::run(cmd),
        Commands::Build {
            project_ids,
            json,
            publish,
            visibility,
        } => build::run(&project_ids, json, publish.then_some(visibility.as_str())),
    }
}
