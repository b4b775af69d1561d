use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod console;

#[derive(Debug, Parser)]
#[command(name = "storefinder")]
#[command(about = "Find stores near a postal code")]
struct Cli {
    /// Location records file (JSON or YAML).
    #[arg(long, global = true, env = "STOREFINDER_RECORDS_PATH")]
    records: Option<PathBuf>,

    /// HTML page with an embedded records array. Takes precedence over `--records`.
    #[arg(long, global = true)]
    page: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Geocode a postal code and list stores within the radius.
    Search {
        postal_code: String,
        /// Radius in miles; defaults to the configured radius.
        #[arg(long)]
        radius: Option<f64>,
        /// Select a store by id after the search, as a click would.
        #[arg(long)]
        select: Option<String>,
    },
    /// List stores near a coordinate without geocoding.
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        #[arg(long, default_value_t = 50.0)]
        radius: f64,
    },
    /// Print every store in the records source.
    List,
    /// Check whether a postal code is a 5-digit or ZIP+4 code.
    Check { postal_code: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let source = commands::RecordSource::from_args(cli.records, cli.page);

    match cli.command {
        Commands::Search {
            postal_code,
            radius,
            select,
        } => {
            let config = storefinder_core::load_app_config()?;
            console::init_tracing(&config.log_level)?;
            commands::run_search(&config, &source, &postal_code, radius, select.as_deref())
                .await?;
        }
        Commands::Nearby { lat, lng, radius } => {
            console::init_tracing("warn")?;
            commands::run_nearby(&source, lat, lng, radius)?;
        }
        Commands::List => {
            console::init_tracing("warn")?;
            commands::run_list(&source)?;
        }
        Commands::Check { postal_code } => commands::run_check(&postal_code)?,
    }

    Ok(())
}
