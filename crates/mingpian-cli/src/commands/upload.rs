//! Upload command - parse a text file and write the records to Airtable.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use mingpian_core::{CardParser, StandardCardParser};
use mingpian_store::{AirtableStore, BatchWriter, MemoryStore, RecordStore, WriteSummary};

use super::parse::read_input;
use super::StoreArgs;

/// Arguments for the upload command.
#[derive(Args)]
pub struct UploadArgs {
    /// Input text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    #[command(flatten)]
    store: StoreArgs,

    /// Parse and batch without contacting Airtable
    #[arg(long)]
    dry_run: bool,
}

pub async fn run(args: UploadArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut config = super::config::load(config_path)?;
    args.store.apply(&mut config.store)?;

    // Credentials are checked before any input is read
    let credentials = if args.dry_run {
        None
    } else {
        Some(args.store.credentials()?)
    };

    let text = read_input(&args.input)?;
    let result = StandardCardParser::from_config(&config.extraction).parse(&text);

    for warning in &result.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    if result.records.is_empty() {
        anyhow::bail!(
            "No records found in {} ({} cards, {} skipped)",
            args.input.display(),
            result.cards_found,
            result.cards_skipped
        );
    }

    info!(
        "Uploading {} records to table {}",
        result.records.len(),
        config.store.table_name
    );

    let summary = match credentials {
        Some(credentials) => {
            let store = AirtableStore::new(credentials, &config.store)?;
            let writer = BatchWriter::from_config(store, &config.store)?;
            write_with_bar(&writer, &result.records).await?
        }
        None => {
            let writer = BatchWriter::from_config(MemoryStore::new(), &config.store)?;
            let summary = write_with_bar(&writer, &result.records).await?;
            println!(
                "{} Dry run: {} records in {} batches would be written to {}",
                style("ℹ").blue(),
                summary.records_written,
                summary.batches,
                config.store.table_name
            );
            println!("{}", serde_json::to_string_pretty(&result.records)?);
            return Ok(());
        }
    };

    println!(
        "{} Wrote {} records to {} in {} batches",
        style("✓").green(),
        summary.records_written,
        config.store.table_name,
        summary.batches
    );

    Ok(())
}

async fn write_with_bar<S: RecordStore>(
    writer: &BatchWriter<S>,
    records: &[mingpian_core::PersonRecord],
) -> anyhow::Result<WriteSummary> {
    let pb = ProgressBar::new(writer.batch_count(records.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches")?
            .progress_chars("=>-"),
    );

    let outcome = writer
        .write_with_progress(records, |summary| pb.set_position(summary.batches as u64))
        .await;

    match outcome {
        Ok(summary) => {
            pb.finish_and_clear();
            Ok(summary)
        }
        Err(e) => {
            pb.abandon();
            Err(e.into())
        }
    }
}
