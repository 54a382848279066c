// src/main.rs
//
// bodytext — print the main readable text of an HTML file
//
// - Reads the file as UTF-8, drops head/script/style, tokenizes, and prints
//   the best-scoring tag/word span as text, one line per block element.
// - Logs go to stderr; RUST_LOG overrides the -v level.
//
// CLI flags:
//   --full-text     : print every word of the document instead of the main text
//   -v, --verbose   : more logging (repeatable)

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

use bodytext::{load_document, Config, Extractor};

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Print the full text of the document instead of the main text
    #[arg(long = "full-text", action = ArgAction::SetTrue)]
    full_text: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Input HTML file
    input: PathBuf,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let html = match load_document(&cli.input) {
        Ok(html) => html,
        Err(err) => {
            error!(error = %err, "cannot load document");
            return ExitCode::FAILURE;
        }
    };

    let mut extractor = Extractor::new(Config::default());
    extractor.feed(&html);
    let mut extraction = extractor.close();

    let text = if cli.full_text {
        extraction.full_text()
    } else {
        extraction.body_text()
    };
    println!("{text}");
    ExitCode::SUCCESS
}
