//! Squid Log Parser CLI - Parse and analyze Squid proxy access logs.

use anyhow::{Context, Result};
use clap::Parser;
use squid_log_parser::{
    config::Config,
    engine::LogParser,
    record::LogFormat,
    stats::ParseStats,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Squid Log Parser - Parse and analyze Squid proxy access logs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log files to parse; reads stdin when none are given
    files: Vec<PathBuf>,

    /// Log format (squid, common, combined, referrer, useragent)
    #[arg(short, long, env = "SQUID_LOG_FORMAT")]
    format: Option<String>,

    /// Print each parsed record as JSON (verbose)
    #[arg(short, long)]
    verbose: bool,

    /// Suppress the final statistics summary
    #[arg(long)]
    no_stats: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = Config::load()?;
    let format_name = args.format.clone().unwrap_or_else(|| config.format.clone());
    let format: LogFormat = format_name.parse().unwrap_or(LogFormat::Unknown);
    if format == LogFormat::Unknown {
        anyhow::bail!(
            "unknown log format '{}' (expected squid, common, combined, referrer, or useragent)",
            format_name
        );
    }

    info!("Squid Log Parser starting...");
    info!("Format: {}", format);

    let mut parser = LogParser::new(format);
    let stats = ParseStats::new();
    let show_records = args.verbose || config.show_records;

    if args.files.is_empty() {
        info!("Reading from stdin");
        process_reader(io::stdin().lock(), &mut parser, &stats, show_records)?;
    } else {
        for path in &args.files {
            info!("Reading {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            process_reader(BufReader::new(file), &mut parser, &stats, show_records)?;
        }
    }

    info!("Accumulated {} records", parser.size());

    if !args.no_stats && config.show_stats {
        println!("{}", stats.summary());
    }

    Ok(())
}

/// Feed every line of a reader through the parser.
fn process_reader<R: BufRead>(
    reader: R,
    parser: &mut LogParser,
    stats: &ParseStats,
    show_records: bool,
) -> Result<()> {
    for line in reader.lines() {
        let line = line.context("Failed to read input line")?;
        process_line(&line, parser, stats, show_records);
    }
    Ok(())
}

/// Process a single log line.
fn process_line(line: &str, parser: &mut LogParser, stats: &ParseStats, show_records: bool) {
    stats.record_bytes(line.len() as u64);

    if line.trim().is_empty() {
        debug!("Skipping blank line");
        return;
    }

    parser.append(line);
    if parser.error_num() == 0 {
        stats.record(parser.record());

        if show_records
            && let Ok(json) = serde_json::to_string(parser.record())
        {
            println!("{}", json);
        }
    } else {
        stats.record_parse_failure();
        warn!("Parse error for '{}': {}", line, parser.error_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    const SQUID_LINE: &str = "1157689312.587 320 65.65.65.65 TCP_MISS/200 16938 GET \
                              http://example.com/ - DIRECT/10.0.0.1 text/html";

    #[test]
    fn test_process_line_valid() {
        let mut parser = LogParser::new(LogFormat::Squid);
        let stats = ParseStats::new();

        process_line(SQUID_LINE, &mut parser, &stats, false);

        assert_eq!(stats.total_records.load(Ordering::Relaxed), 1);
        assert_eq!(parser.size(), 1);
    }

    #[test]
    fn test_process_line_failure_counted() {
        let mut parser = LogParser::new(LogFormat::Squid);
        let stats = ParseStats::new();

        process_line("not a log line", &mut parser, &stats, false);

        assert_eq!(stats.parse_failures.load(Ordering::Relaxed), 1);
        assert_eq!(parser.size(), 0);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let mut parser = LogParser::new(LogFormat::Squid);
        let stats = ParseStats::new();

        process_line("   ", &mut parser, &stats, false);

        assert_eq!(stats.total_lines.load(Ordering::Relaxed), 0);
        assert_eq!(stats.parse_failures.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_process_reader() {
        let mut parser = LogParser::new(LogFormat::Squid);
        let stats = ParseStats::new();
        let input = format!("{SQUID_LINE}\ngarbage\n{SQUID_LINE}\n");

        process_reader(input.as_bytes(), &mut parser, &stats, false).unwrap();

        assert_eq!(stats.total_records.load(Ordering::Relaxed), 2);
        assert_eq!(stats.parse_failures.load(Ordering::Relaxed), 1);
        assert_eq!(parser.size(), 2);
    }
}
