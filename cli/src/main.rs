//! handsim CLI - handwriting similarity tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use handsim::pipeline::{API_KEY_ENV, CACHE_DIR_ENV};
use handsim::render::{self, JsonFormat};
use handsim::{diagnose, Comparator, CompareOptions, SimilarityResult};

#[derive(Parser)]
#[command(name = "handsim")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Compare handwriting across scanned documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two documents and report similarity and anomalies
    Compare {
        /// First PDF document
        #[arg(value_name = "DOC1")]
        first: PathBuf,

        /// Second PDF document
        #[arg(value_name = "DOC2")]
        second: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON (implies --json)
        #[arg(long)]
        compact: bool,

        /// Result cache directory
        #[arg(long, value_name = "DIR", env = CACHE_DIR_ENV)]
        cache_dir: Option<PathBuf>,

        /// Do not read or write the result cache
        #[arg(long)]
        no_cache: bool,

        #[command(flatten)]
        extraction: ExtractionArgs,
    },

    /// Extract and print one document's features and diagnostics as JSON
    Features {
        /// PDF document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        extraction: ExtractionArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct ExtractionArgs {
    /// Recognition service API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Rasterization DPI
    #[arg(long, default_value = "200")]
    dpi: u32,

    /// Concurrent page extraction workers
    #[arg(long, default_value = "4")]
    workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

impl ExtractionArgs {
    fn options(&self) -> CompareOptions {
        let mut options = CompareOptions::new()
            .with_dpi(self.dpi)
            .with_workers(self.workers)
            .with_request_timeout(Duration::from_secs(self.timeout));
        if let Some(ref key) = self.api_key {
            options = options.with_api_key(key.clone());
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare {
            first,
            second,
            output,
            json,
            compact,
            cache_dir,
            no_cache,
            extraction,
        } => {
            let mut options = extraction.options();
            if let Some(dir) = cache_dir {
                options = options.with_cache_dir(dir);
            }
            if no_cache {
                options = options.without_cache();
            }
            let format = match (json, compact) {
                (_, true) => Some(JsonFormat::Compact),
                (true, false) => Some(JsonFormat::Pretty),
                _ => None,
            };
            cmd_compare(&first, &second, output.as_deref(), format, &options)
        }
        Commands::Features {
            input,
            output,
            compact,
            extraction,
        } => cmd_features(&input, output.as_deref(), compact, &extraction.options()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    pb
}

fn cmd_compare(
    first: &Path,
    second: &Path,
    output: Option<&Path>,
    format: Option<JsonFormat>,
    options: &CompareOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!(
        "comparing {} and {} with {} workers",
        first.display(),
        second.display(),
        options.workers
    );
    let comparator = Comparator::from_options(options)?;

    let pb = spinner("Comparing handwriting...");
    let result = comparator.compare_files(first, second);
    pb.finish_and_clear();
    let result = result?;

    let rendered = match format {
        Some(format) => render::to_json(&result, format)?,
        None => render::to_text(&result),
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
        print_verdict(&result);
    } else if format.is_some() {
        println!("{}", rendered);
    } else {
        println!("{}", rendered);
        println!();
        print_verdict(&result);
    }

    Ok(())
}

fn print_verdict(result: &SimilarityResult) {
    let percent = format!("{:.1}%", result.similarity * 100.0);
    let score = if result.similarity >= 0.8 {
        percent.green().bold()
    } else if result.similarity >= 0.5 {
        percent.yellow().bold()
    } else {
        percent.red().bold()
    };

    println!(
        "{}: {} ({} anomalies, {} page variations)",
        "Similarity".bold(),
        score,
        result.anomaly_count(),
        result.variation_count()
    );
}

fn cmd_features(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: &CompareOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let comparator = Comparator::from_options(options)?;

    let pb = spinner("Extracting features...");
    let features = comparator.extract_features(&data);
    pb.finish_and_clear();
    let features = features?;

    let diagnostics = diagnose(&features);
    let report = serde_json::json!({
        "file": input.display().to_string(),
        "page_count": features.page_count(),
        "paragraph_count": features.paragraph_count(),
        "pages": features.pages,
        "page_summaries": diagnostics.page_summaries,
        "anomalies": diagnostics.anomalies,
        "variations": diagnostics.variations,
    });

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = render::value_to_json(&report, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "handsim".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Handwriting similarity tool");
    println!();
    println!("License: MIT");
}
