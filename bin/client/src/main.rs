//! Inspection command-line client

mod browse;
mod config;
mod logger;
mod notifier;
mod submit;

use clap::{Parser, Subcommand};
use inspection_form::HttpInspectionApi;
use notifier::ConsoleNotifier;
use std::path::PathBuf;
use std::sync::Arc;
use submit::InspectionSubmitter;

#[derive(Parser)]
#[command(name = "inspection")]
#[command(about = "Submit and browse image inspections")]
struct Cli {
    /// Backend URL (default: INSPECTION_API_BASE_URL or http://localhost:3001)
    #[arg(short, long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new inspection
    Submit {
        /// Images, in the order they should appear
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Description for each image, paired by position
        #[arg(short, long = "description")]
        descriptions: Vec<String>,
        /// Maximum size of a single image in bytes (default: 5 MiB)
        #[arg(long)]
        max_file_size: Option<u64>,
    },
    /// List submitted inspections
    List,
    /// Show one inspection
    Show {
        /// Inspection ID
        id: String,
    },
    /// Delete an inspection
    Delete {
        /// Inspection ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    let cli = Cli::parse();
    let max_file_size = match &cli.command {
        Commands::Submit { max_file_size, .. } => *max_file_size,
        _ => None,
    };
    let config = config::load(cli.server, max_file_size)?;
    let api = HttpInspectionApi::new(config.api_base_url.clone());
    let notifier = Arc::new(ConsoleNotifier);

    match cli.command {
        Commands::Submit {
            images,
            descriptions,
            ..
        } => {
            let mut submitter = InspectionSubmitter::new(&config, notifier);
            submitter.compose(&images, &descriptions)?;
            let inspection = submitter.submit(&api).await?;
            submit::print_inspection(&inspection);
        }
        Commands::List => browse::list(&api).await?,
        Commands::Show { id } => browse::show(&api, &id).await?,
        Commands::Delete { id, yes } => {
            browse::delete(&api, notifier.as_ref(), &id, yes).await?
        }
    }

    Ok(())
}
