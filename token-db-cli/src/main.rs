//! token-db CLI
//!
//! Builds the token database JSON from the Cockatrice token list.

mod error;
mod report;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use token_db_core::OutputSchema;
use token_db_source::{DEFAULT_CUSTOM_TOKENS_PATH, TOKENS_XML_URL};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "token-db")]
#[command(about = "Build the token database from the Cockatrice token list", long_about = None)]
struct Cli {
    /// URL of the token XML
    #[arg(long, default_value = TOKENS_XML_URL)]
    url: String,

    /// Read the token XML from this file instead of downloading it
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Custom token overrides (JSON array)
    #[arg(long, default_value = DEFAULT_CUSTOM_TOKENS_PATH)]
    custom: PathBuf,

    /// Database file to write (default depends on --schema)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output layout: popularity or legacy
    #[arg(long, default_value_t = OutputSchema::Popularity)]
    schema: OutputSchema,

    /// Run the pipeline and report without writing the database
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Skip the popularity distribution report
    #[arg(long)]
    no_stats: bool,

    /// Show debug output
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only show warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        log::error!("{} {e}", "\u{2718}".if_supports_color(Stdout, |t| t.red()));
        std::process::exit(1);
    }
}

/// Install the console logger. `RUST_LOG` overrides the flag-derived level.
fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        log::LevelFilter::Warn
    } else if cli.verbose > 0 {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Error | log::Level::Info => writeln!(buf, "{}", record.args()),
            log::Level::Warn => writeln!(
                buf,
                "{} {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                record.args()
            ),
            log::Level::Debug | log::Level::Trace => writeln!(
                buf,
                "{}",
                record.args().if_supports_color(Stdout, |t| t.dimmed())
            ),
        })
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let xml = match &cli.input {
        Some(path) => read_input(path)?,
        None => download(&cli.url, cli.quiet)?,
    };

    log::info!("Parsing XML content...");
    let raw = token_db_source::parse_tokens_str(&xml).map_err(CliError::Parse)?;
    log::info!("Found {} raw token entries", raw.len());

    let custom = token_db_source::load_custom_tokens(&cli.custom);
    let merged = token_db_lib::merge_custom(raw, custom);

    log::info!("Cleaning and normalizing token data...");
    let normalized = token_db_lib::normalize(&merged, cli.schema);
    log::info!(
        "Processed {} unique tokens after cleaning and deduplication",
        normalized.tokens.len()
    );
    if normalized.unnamed > 0 {
        log::debug!("Dropped {} records with no name", normalized.unnamed);
    }

    if cli.schema == OutputSchema::Popularity && !cli.no_stats {
        report::print_popularity_report(&normalized.tokens);
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(cli.schema.default_output_path()));
    if cli.dry_run {
        log::info!("");
        log::info!(
            "{} Dry run: {} tokens not written to {}",
            "\u{2139}".if_supports_color(Stdout, |t| t.cyan()),
            normalized.tokens.len(),
            output.display(),
        );
    } else {
        log::info!("");
        log::info!(
            "Saving {} tokens to {}",
            normalized.tokens.len(),
            output.display()
        );
        token_db_lib::write_database(&output, &normalized.tokens, cli.schema)?;
        log::info!(
            "{} Saved {} ({} schema, {} tokens)",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            output.display(),
            cli.schema,
            normalized.tokens.len(),
        );
    }

    report::print_summary(&normalized.tokens, cli.schema);
    Ok(())
}

fn read_input(path: &Path) -> Result<String, CliError> {
    log::info!("Reading XML data from: {}", path.display());
    fs::read_to_string(path).map_err(|e| CliError::input(path, e))
}

/// Fetch the token XML behind a spinner.
fn download(url: &str, quiet: bool) -> Result<String, CliError> {
    log::info!("Fetching XML data from: {url}");

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    spinner.set_message("Downloading token list...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = token_db_source::fetch_xml(url);
    spinner.finish_and_clear();
    result.map_err(CliError::Fetch)
}
