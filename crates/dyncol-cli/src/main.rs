//! `dyncol` CLI: turn JSON documents into MariaDB dynamic-column expressions.
//!
//! ## Usage
//!
//! ```sh
//! # COLUMN_CREATE expression (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | dyncol create
//!
//! # COLUMN_ADD expression updating the `attrs` column, file to file
//! dyncol update --column attrs -i patch.json -o patch.sql
//!
//! # Positional placeholders; parameters follow as a JSON array
//! dyncol create --params -i data.json
//!
//! # Expression and parameters as one JSON object
//! dyncol create --params --format json -i data.json
//! ```
//!
//! Set `RUST_LOG=debug` to see encoder diagnostics on stderr.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dyncol_core::{Expression, Params, Value};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dyncol",
    version,
    about = "Encode JSON documents as MariaDB dynamic-column expressions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a COLUMN_CREATE expression for the whole document
    Create {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Build a COLUMN_ADD expression that layers the document onto an existing column
    Update {
        /// Dynamic column to update
        #[arg(short, long)]
        column: String,
        #[command(flatten)]
        io: IoArgs,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Replace keys and text values with `?` placeholders
    #[arg(long)]
    params: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Sql)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// The expression, followed by a JSON array of parameters when `--params` is set
    Sql,
    /// A JSON object `{"sql": ..., "params": [...]}`
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let (column, args) = match cli.command {
        Commands::Create { io } => (None, io),
        Commands::Update { column, io } => (Some(column), io),
    };

    let json = read_input(args.input.as_deref())?;
    let document: serde_json::Value =
        serde_json::from_str(&json).context("Failed to parse input as JSON")?;
    let value = Value::from_json(&document);
    let params = if args.params {
        Params::Positional
    } else {
        Params::Inline
    };

    let expression = match column.as_deref() {
        None => dyncol_core::create_expression(&value, params)
            .context("Failed to build COLUMN_CREATE expression")?,
        Some(column) => dyncol_core::update_expression(column, &value, params)
            .context("Failed to build COLUMN_ADD expression")?,
    };
    tracing::info!(
        bytes = expression.sql.len(),
        params = expression.params.len(),
        "expression built"
    );

    let rendered = render(&expression, args.format, args.params)?;
    write_output(args.output.as_deref(), &rendered)
}

fn render(expression: &Expression, format: Format, with_params: bool) -> Result<String> {
    match format {
        Format::Sql if with_params => {
            let params = serde_json::to_string(&expression.params)?;
            Ok(format!("{}\n{}", expression.sql, params))
        }
        Format::Sql => Ok(expression.sql.clone()),
        Format::Json => Ok(serde_json::to_string_pretty(expression)?),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
