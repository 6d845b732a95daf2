//! # exchange-cli
//!
//! Command-line frontend for the exchange codecs: parse inbound EDIFACT
//! ORDERS, generate outbound DESADV/INVOIC messages, convert fixed-width
//! flat files, and apply field mappings offline.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use exchange_edifact::{
    generate_desadv, generate_invoic, parse_orders_with_warnings, parse_segments, DesadvData,
    InvoicData,
};
use exchange_flatfile::FlatFileSchema;
use exchange_mapping::apply_mappings_with_warnings;
use exchange_model::{FieldRule, Record};

#[derive(Parser)]
#[command(name = "edix")]
#[command(about = "EDI exchange core CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Parse an EDIFACT ORDERS file into JSON
    ParseOrders {
        /// Input file path
        input: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Generate an outbound EDIFACT message
    #[command(subcommand)]
    Generate(GenerateCommands),

    /// Fixed-width flat-file conversions
    #[command(subcommand)]
    Flat(FlatCommands),

    /// Apply field-mapping rules to a JSON record
    Map {
        /// Input record (JSON object)
        input: PathBuf,

        /// Rules file (JSON or YAML array of rules)
        #[arg(short, long)]
        rules: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Parser)]
enum GenerateCommands {
    /// Dispatch advice (DESADV) from a JSON data file
    Desadv {
        /// Shipment data file (JSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Invoice (INVOIC) from a JSON data file
    Invoic {
        /// Invoice data file (JSON)
        #[arg(short, long)]
        data: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Parser)]
enum FlatCommands {
    /// Parse a fixed-width file into JSON records
    Parse {
        /// Input file path
        input: PathBuf,

        /// Schema definition file (YAML or JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Render a JSON array of records as fixed-width lines
    Generate {
        /// Input records file (JSON array of objects)
        input: PathBuf,

        /// Schema definition file (YAML or JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ParseOrders { input, pretty } => parse_orders_command(&input, pretty),
        Commands::Generate(command) => match command {
            GenerateCommands::Desadv { data, output } => {
                let data: DesadvData = load_json(&data)?;
                emit(&generate_desadv(&data), output.as_deref())
            }
            GenerateCommands::Invoic { data, output } => {
                let data: InvoicData = load_json(&data)?;
                emit(&generate_invoic(&data), output.as_deref())
            }
        },
        Commands::Flat(command) => match command {
            FlatCommands::Parse {
                input,
                schema,
                pretty,
            } => {
                let schema = load_schema(&schema)?;
                let content = read_input(&input)?;
                let records = exchange_flatfile::parse_content(&content, &schema.fields);
                print_json(&serde_json::to_value(records)?, pretty)
            }
            FlatCommands::Generate {
                input,
                schema,
                output,
            } => {
                let schema = load_schema(&schema)?;
                let records: Vec<Record> = load_json(&input)?;
                emit(
                    &exchange_flatfile::generate_content(&records, &schema.fields),
                    output.as_deref(),
                )
            }
        },
        Commands::Map {
            input,
            rules,
            pretty,
        } => {
            let record: Record = load_json(&input)?;
            let rules: Vec<FieldRule> = load_rules(&rules)?;
            let outcome = apply_mappings_with_warnings(&record, &rules);
            for warning in &outcome.warnings {
                tracing::warn!("{warning}");
            }
            print_json(&serde_json::to_value(outcome.record)?, pretty)
        }
    }
}

fn parse_orders_command(input: &Path, pretty: bool) -> anyhow::Result<()> {
    let content = read_input(input)?;
    let segments = parse_segments(&content);
    let outcome = parse_orders_with_warnings(&segments);
    for warning in &outcome.warnings {
        tracing::warn!("{warning}");
    }
    let Some(order) = outcome.order else {
        bail!("no BGM segment found in {}", input.display());
    };
    print_json(&serde_json::to_value(order)?, pretty)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = read_input(path)?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn load_schema(path: &Path) -> anyhow::Result<FlatFileSchema> {
    let content = read_input(path)?;
    let schema = if is_yaml(path) {
        FlatFileSchema::from_yaml(&content)
    } else {
        FlatFileSchema::from_json(&content)
    };
    schema.with_context(|| format!("invalid schema in {}", path.display()))
}

fn load_rules(path: &Path) -> anyhow::Result<Vec<FieldRule>> {
    let content = read_input(path)?;
    if is_yaml(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid rules in {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid rules in {}", path.display()))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn print_json(value: &serde_json::Value, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_json::to_string(value)?);
    }
    Ok(())
}

fn emit(text: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("could not write {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}
