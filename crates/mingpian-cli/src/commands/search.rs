//! Search command - find stored records by company or name.

use std::path::Path;

use clap::Args;
use console::style;

use mingpian_store::{AirtableStore, RecordStore, StoredRecord};

use super::StoreArgs;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for in company names and person names
    #[arg(required = true)]
    query: String,

    #[command(flatten)]
    store: StoreArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: SearchFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum SearchFormat {
    /// JSON array of `{id, record}` objects
    Json,
    /// One line per record
    Text,
}

pub async fn run(args: SearchArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = super::config::load(config_path)?;
    args.store.apply(&mut config.store)?;
    let credentials = args.store.credentials()?;

    let store = AirtableStore::new(credentials, &config.store)?;
    let found = store.search(&args.query).await?;

    match args.format {
        SearchFormat::Json => println!("{}", serde_json::to_string_pretty(&found)?),
        SearchFormat::Text => print_text(&args.query, &found),
    }

    Ok(())
}

fn print_text(query: &str, found: &[StoredRecord]) {
    if found.is_empty() {
        println!("{} No records match \"{}\"", style("ℹ").blue(), query);
        return;
    }

    println!(
        "{} {} records match \"{}\"",
        style("✓").green(),
        found.len(),
        query
    );
    for stored in found {
        let record = &stored.record;
        println!(
            "  {}  {}  {}  {}  {}  {}",
            style(&stored.id).dim(),
            record.company,
            record.name,
            record.title,
            record.mobile,
            record.email
        );
    }
}
