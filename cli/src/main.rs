//! Command-line front end for the jsonloom projection engine.
//!
//! Reads a JSON document from a file or stdin, applies a schema of path
//! patterns, and streams one record per line to stdout as JSON objects.
//! Logs go to stderr so stdout stays clean for records.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use jsonloom::{ProjectError, Projector, Scanner, Schema};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

/// Exit status for input that could not be opened or read.
const EXIT_INPUT: u8 = 1;
/// Exit status for a schema that could not be loaded or compiled.
const EXIT_SCHEMA: u8 = 2;
/// Exit status for streaming correctness failures.
const EXIT_STREAM: u8 = 3;

#[derive(Parser)]
#[command(name = "jsonloom")]
#[command(about = "Stream flat records out of huge JSON documents")]
#[command(version)]
struct Cli {
    /// Input file, or `-` for standard input
    #[arg(default_value = "-")]
    input: String,

    /// Schema file: a JSON object mapping destination keys to source paths
    #[arg(short, long)]
    schema: PathBuf,

    /// Pretty-print records instead of one compact object per line
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .init();

    let schema = match load_schema(&cli.schema) {
        Ok(schema) => schema,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::from(EXIT_SCHEMA);
        }
    };

    let reader = match open_input(&cli.input) {
        Ok(reader) => reader,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::from(EXIT_INPUT);
        }
    };

    match stream_records(schema, reader, cli.pretty) {
        Ok(count) => {
            debug!(records = count, "stream complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err:#}");
            let code = match err.downcast_ref::<ProjectError>() {
                Some(ProjectError::Read(_)) | None => EXIT_INPUT,
                Some(_) => EXIT_STREAM,
            };
            ExitCode::from(code)
        }
    }
}

/// Loads and compiles the schema file. Entry order in the file is kept, so
/// earlier entries win when two patterns match the same path.
fn load_schema(path: &Path) -> Result<Schema> {
    let file =
        File::open(path).with_context(|| format!("failed to open schema: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse schema: {}", path.display()))?;
    let Some(object) = value.as_object() else {
        bail!("schema must be a JSON object mapping destination keys to source paths");
    };

    let mut pairs = Vec::with_capacity(object.len());
    for (destination, source) in object {
        let Some(source) = source.as_str() else {
            bail!("schema entry {destination:?} must be a string source path");
        };
        pairs.push((destination.clone(), source.to_string()));
    }

    let schema = Schema::compile(pairs)
        .with_context(|| format!("invalid schema: {}", path.display()))?;
    debug!(entries = schema.len(), "schema loaded");
    Ok(schema)
}

fn open_input(input: &str) -> Result<Box<dyn BufRead>> {
    if input == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file =
        File::open(input).with_context(|| format!("failed to open input: {input}"))?;
    Ok(Box::new(BufReader::new(file)))
}

fn stream_records(schema: Schema, reader: Box<dyn BufRead>, pretty: bool) -> Result<usize> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut projector = Projector::new(schema, Scanner::new(reader));
    let mut count = 0usize;

    while let Some(record) = projector.next_record()? {
        if pretty {
            serde_json::to_writer_pretty(&mut out, &record).context("failed to write record")?;
        } else {
            serde_json::to_writer(&mut out, &record).context("failed to write record")?;
        }
        out.write_all(b"\n").context("failed to write record")?;
        count += 1;
    }
    out.flush().context("failed to flush output")?;
    Ok(count)
}
