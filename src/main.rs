//! ABO Generator CLI
//!
//! Reads payment orders from a CSV file and writes the ABO document.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --origin 19-2000145399/0800 --due-date 2024-03-20 payments.csv > batch.abo
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use abo_generator::{
    load_csv, Clock, Document, DocumentConfig, FixedClock, Result, SystemClock, TransactionType,
};
use chrono::NaiveDate;
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input payments CSV file
    input: PathBuf,

    /// Origin account, `[prefix-]number/bank`
    #[arg(long)]
    origin: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due_date: NaiveDate,

    #[arg(long, default_value = "")]
    client_name: String,

    #[arg(long, default_value_t = 0)]
    client_number: u64,

    #[arg(long, default_value_t = 1)]
    interval_start: u16,

    #[arg(long, default_value_t = 999)]
    interval_end: u16,

    #[arg(long, default_value_t = 0)]
    code: u32,

    #[arg(long, default_value_t = 0)]
    secret_code: u32,

    /// Generate a collection file (1502) instead of payments (1501)
    #[arg(long)]
    collection: bool,

    /// Generation date for the header (YYYY-MM-DD), defaults to today
    #[arg(long)]
    created: Option<NaiveDate>,

    /// Output file, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let transaction_type = if cli.collection {
        TransactionType::Collection
    } else {
        TransactionType::Payment
    };

    let config = DocumentConfig::default()
        .with_client_name(cli.client_name)
        .with_client_number(cli.client_number)
        .with_interval(cli.interval_start, cli.interval_end)
        .with_code(cli.code)
        .with_secret_code(cli.secret_code)
        .with_transaction_type(transaction_type);

    let mut document = Document::new(&cli.origin, cli.due_date, config)?;

    let file = File::open(&cli.input)?;
    let count = load_csv(&mut document, BufReader::new(file))?;
    info!("Read {} payments from {}", count, cli.input.display());

    let clock: Box<dyn Clock> = match cli.created {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    };

    // Render before touching the destination so a failed batch leaves it intact.
    let content = document.render_with(clock.as_ref())?;

    match cli.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(&path)?);
            writer.write_all(content.as_bytes())?;
            writer.flush()?;
            info!("Wrote ABO document to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
