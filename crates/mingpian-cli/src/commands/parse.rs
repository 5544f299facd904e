//! Parse command - extract person records from a single text file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use mingpian_core::{CardParser, FieldName, PersonRecord, StandardCardParser};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print card counts and warnings
    #[arg(long)]
    stats: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of records
    Json,
    /// CSV with card labels as header
    Csv,
    /// Plain text listing
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;
    let text = read_input(&args.input)?;

    info!("Parsing {}", args.input.display());

    let parser = StandardCardParser::from_config(&config.extraction);
    let result = parser.parse(&text);

    let output = format_records(&result.records, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.stats {
        eprintln!();
        eprintln!(
            "{} {} cards, {} records, {} skipped in {}ms",
            style("ℹ").blue(),
            result.cards_found,
            result.records.len(),
            result.cards_skipped,
            result.processing_time_ms
        );
        for warning in &result.warnings {
            eprintln!("  {} {}", style("!").yellow(), warning);
        }
    }

    Ok(())
}

/// Read a text file, or stdin for `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(fs::read_to_string(path)?)
}

pub fn format_records(records: &[PersonRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

fn format_csv(records: &[PersonRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(FieldName::ALL.iter().map(|f| f.label()))?;
    for record in records {
        wtr.write_record(record.iter().map(|(_, value)| value))?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[PersonRecord]) -> String {
    if records.is_empty() {
        return "No records found.".to_string();
    }

    let mut output = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("Record {}: {}\n", i + 1, record.name));
        for (field, value) in record.iter() {
            if field != FieldName::Name && !value.is_empty() {
                output.push_str(&format!("  {}: {}\n", field.label(), value));
            }
        }
    }
    output
}
