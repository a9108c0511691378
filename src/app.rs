// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod filename;
pub mod formatter;
pub mod line_parser;
pub mod location;
pub mod models;
pub mod parser;
pub mod scanner;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::env;
use std::path::Path;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::line_parser::{EchoParser, LineParser, NullParser};
use self::models::RuntimeConfig;
use self::parser::FileParser;
use self::scanner::Scanner;

/// Reads the command line, parses every requested file and reports the
/// errors. Fails if any file produced an error.
pub fn run() -> Result<()> {
    let args = Cli::parse();

    let config = resolve_config(&args)?;

    let mut files = args.files.clone();
    if let Some(patterns) = &args.glob {
        let current_dir = env::current_dir().context("Failed to get current directory")?;
        let exclude = args.exclude.clone().unwrap_or_default();
        let scanner = Scanner::new(current_dir, patterns, &exclude)?;
        files.extend(scanner.scan());
    }

    if files.is_empty() {
        log::warn!("No files given; nothing to parse.");
        return Ok(());
    }

    let mut failed = 0;
    for file in &files {
        let error_count = if config.check_only {
            parse_one(file, &config, NullParser)
        } else {
            parse_one(file, &config, EchoParser::stdout())
        };
        if error_count > 0 {
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} files had errors", failed, files.len());
    }
    Ok(())
}

fn parse_one<P: LineParser>(file: &Path, config: &RuntimeConfig, line_parser: P) -> usize {
    let mut fp = FileParser::with_config(config, line_parser);
    let (stats, errors) = fp.parse(file);

    if !errors.is_empty() {
        eprintln!("{}", OutputGenerator::generate_errors(&errors));
    }
    if config.show_stats {
        eprintln!("{}", OutputGenerator::generate_summary(file, &stats));
    }
    errors.len()
}
