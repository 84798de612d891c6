use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rust_decimal::Decimal;
use tracing::{debug, error, info, trace};

use timesheet_summary::calculation::TimesheetAggregator;
use timesheet_summary::config::{ConfigLoader, SummaryConfig};
use timesheet_summary::table::{OutputFormat, read_entries, write_summary};

#[derive(Debug, Parser)]
#[command(
    name = "timesheet-summary",
    version,
    about = "Summarize a timesheet export into Overtime and Regular billing lines."
)]
struct Cli {
    /// Timesheet export to summarize (.csv, .xlsx, .xlsm, .xlsb, .xls or .ods)
    input: PathBuf,

    /// YAML file with run settings; flags below take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Invoice number stamped on every summary row
    #[arg(short, long)]
    invoice: Option<String>,

    /// Where to write the summary (.xlsx, .csv or .json) [default: timesheet_summary.xlsx]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format; inferred from the output extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Worksheet to read from spreadsheet input [default: first sheet]
    #[arg(long)]
    sheet: Option<String>,

    /// Overtime rate multiplier for groups without overtime entries [default: 1.5]
    #[arg(long = "overtime-multiplier")]
    overtime_multiplier: Option<Decimal>,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            info!("Timesheet summary exported to {}", output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Error processing timesheet: {err:#}");
            debug!("Full error details:\n{err:?}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(verbose >= 2)
        .with_writer(std::io::stderr)
        .init();

    debug!("timesheet-summary started with verbosity level: {}", verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}

fn run(cli: &Cli) -> Result<PathBuf> {
    let config = resolve_config(cli)?;
    let output = config.output_path.clone();
    let format = match cli.format {
        Some(format) => format,
        None => OutputFormat::from_path(&output)?,
    };

    info!("Processing file: {}", cli.input.display());
    let entries = read_entries(&cli.input, config.sheet.as_deref())
        .with_context(|| format!("Failed to load timesheet {}", cli.input.display()))?;

    let aggregator = TimesheetAggregator::new(config);
    let records = aggregator
        .summarize(&entries)
        .with_context(|| format!("Failed to summarize timesheet {}", cli.input.display()))?;

    write_summary(&records, &output, format)?;
    Ok(output)
}

/// Merges the optional configuration file with command line flags.
fn resolve_config(cli: &Cli) -> Result<SummaryConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SummaryConfig::new(String::new()),
    };

    if let Some(invoice) = &cli.invoice {
        config.invoice_id = invoice.clone();
    }
    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }
    if let Some(sheet) = &cli.sheet {
        config.sheet = Some(sheet.clone());
    }
    if let Some(multiplier) = cli.overtime_multiplier {
        config.overtime_fallback_multiplier = multiplier;
    }

    config
        .validate()
        .context("Invalid run configuration")?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<SummaryConfig> {
    ConfigLoader::load(path)
        .with_context(|| format!("Failed to load configuration {}", path.display()))
}
