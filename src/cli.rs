use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use crate::data::{Query, Record, RecordFilter};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "csvfilter", version, about = "Look up people in a CSV file")]
pub struct Args {
    /// CSV file with a `first_name,last_name,dob` header (any order).
    #[arg(default_value = "example_input.csv")]
    pub file: PathBuf,

    /// Field to filter on: first_name, last_name or year. Prompted for when omitted.
    #[arg(long)]
    pub field: Option<Query>,

    /// Value to match. Prompted for when omitted.
    #[arg(long)]
    pub value: Option<String>,

    /// Output format for the matching records.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

/// Ask for whatever `args` leaves open, run the query and write the result.
///
/// Prompts go to `prompt`, results to `out`, so `out` carries nothing but
/// the rendered records.
pub fn run<R, P, W>(
    args: &Args,
    filter: &RecordFilter,
    input: &mut R,
    prompt: &mut P,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    P: Write,
    W: Write,
{
    let query = match args.field {
        Some(query) => query,
        None => {
            writeln!(prompt, "Enter filter parameter [first_name, last_name, year]: ")?;
            prompt.flush()?;
            let key = read_line(input).context("reading filter parameter")?;
            key.parse::<Query>()?
        }
    };

    let value = match &args.value {
        Some(value) => value.clone(),
        None => {
            write!(prompt, "Enter a {query} value: ")?;
            prompt.flush()?;
            read_line(input).context("reading filter value")?
        }
    };

    log::debug!("running {query} query for {value:?}");
    let records = query
        .run(filter, &value)
        .context("getting result set for query")?;
    log::info!("{} of {} records matched", records.len(), filter.dataset().len());

    write_records(out, &records, args.format)
}

/// Render `records` in the chosen format.
pub fn write_records<W: Write>(out: &mut W, records: &[Record], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", Record::header())?;
            for record in records {
                writeln!(out, "{record}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records).context("writing json output")?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("unexpected end of input");
    }
    Ok(line.trim().to_string())
}
