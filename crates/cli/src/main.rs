use anyhow::Result;
use catalog_search_core::{LanguageCode, ProductId, SearchConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "catalog-search")]
#[command(about = "Multilingual product search cache with relevance ranking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the database schema
    Migrate,
    /// Print the effective configuration as JSON
    Config,
    /// Create a product from one or more translated names
    Create {
        /// Translated name as LANG=NAME, e.g. `fr_FR="Chemise Bleue"`
        #[arg(short, long = "name", value_parser = parse_name, required = true)]
        names: Vec<(LanguageCode, String)>,
    },
    /// Set or replace translated names of a product
    Rename {
        id: ProductId,
        #[arg(short, long = "name", value_parser = parse_name, required = true)]
        names: Vec<(LanguageCode, String)>,
    },
    /// Delete a product and its search document
    Delete { id: ProductId },
    /// Show a product's names and search document
    Show { id: ProductId },
    /// Recompute one product's search document
    Rebuild { id: ProductId },
    /// Recompute every search document in batches
    RebuildAll {
        #[arg(short, long)]
        batch_size: Option<usize>,
    },
    /// Ranked product search
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Run the periodic full rebuild until interrupted
    Schedule {
        #[arg(short, long)]
        interval_secs: Option<u64>,
    },
}

fn parse_name(raw: &str) -> Result<(LanguageCode, String), String> {
    let (code, name) =
        raw.split_once('=').ok_or_else(|| format!("expected LANG=NAME, got {raw:?}"))?;
    let code = LanguageCode::parse(code.trim()).map_err(|e| e.to_string())?;
    Ok((code, name.to_owned()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = SearchConfig::from_env();

    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Config => println!("{}", serde_json::to_string_pretty(&config)?),
        Commands::Create { names } => commands::products::run_create(config, names).await?,
        Commands::Rename { id, names } => commands::products::run_rename(config, id, names).await?,
        Commands::Delete { id } => commands::products::run_delete(config, id).await?,
        Commands::Show { id } => commands::products::run_show(config, id).await?,
        Commands::Rebuild { id } => commands::rebuild::run_rebuild(config, id).await?,
        Commands::RebuildAll { batch_size } => {
            commands::rebuild::run_rebuild_all(config, batch_size).await?;
        },
        Commands::Search { query, limit } => {
            if let Some(limit) = limit {
                config.result_cap = limit;
            }
            commands::search::run_search(config.clamped(), &query).await?;
        },
        Commands::Schedule { interval_secs } => {
            if let Some(interval_secs) = interval_secs {
                config.rebuild_interval_secs = interval_secs;
            }
            commands::rebuild::run_schedule(config.clamped()).await?;
        },
    }

    Ok(())
}
