use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::sync::Once;
use std::time::Duration;
use stitcher::render::{write_json_report, write_text_report, Report};
use stitcher::source::{self, DefaultReader, FetchOptions, DEFAULT_MAX_RESPONSE_BYTES, DEFAULT_TIMEOUT_SECS};

fn init_parallelism() {
    static START: Once = Once::new();
    START.call_once(|| {
        let n = num_cpus::get();
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    });
}

#[derive(Parser, Debug)]
#[command(name = "stitcher", version, about = "Collect test suites from many files into one tree")]
struct Cli {
    /// Source files or http(s) URLs to scan.
    #[arg(required = true)]
    sources: Vec<String>,

    /// Print the tree and statistics as JSON
    #[arg(long = "json", default_value_t = false)]
    json: bool,

    /// Maximum size of a fetched URL body, in bytes
    #[arg(long = "max-bytes", default_value_t = DEFAULT_MAX_RESPONSE_BYTES)]
    max_bytes: usize,

    /// Per-request timeout for URLs, in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Report progress on stderr
    #[arg(long = "verbose", short = 'v', default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    init_parallelism();
    let cli = Cli::parse();

    let options = FetchOptions {
        max_response_bytes: cli.max_bytes,
        timeout: Duration::from_secs(cli.timeout_secs),
        ..Default::default()
    };
    let reader = DefaultReader::new(options).context("could not set up source reader")?;

    // Nothing is printed unless every source loads.
    let suites = source::load_all(&reader, &cli.sources).context("ERROR reading file")?;
    if cli.verbose {
        for suite in &suites {
            eprintln!(
                "[stitcher] {} suites={} tests={}",
                suite.origin,
                suite.suites.len(),
                suite.tests.len()
            );
        }
    }

    let report = Report::from_suites(&suites);
    if cli.verbose {
        eprintln!(
            "[stitcher] sources={} suites={} tests={}",
            suites.len(),
            report.stats.counts.suites,
            report.stats.counts.tests
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        write_json_report(&mut out, &report)?;
    } else {
        write_text_report(&mut out, &report)?;
    }
    out.flush()?;
    Ok(())
}
