//! CLI entry point for `vnt2txt`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use vnt2txt::config::Config;
use vnt2txt::convert::{ConversionReport, ConvertOptions, Converter};
use vnt2txt::error::VntError;
use vnt2txt::export::text::CollisionPolicy;

/// Convert .vnt notes into plain UTF-8 text files, one file per note.
#[derive(Parser)]
#[command(name = "vnt2txt", version, about)]
struct Cli {
    /// Directory containing .vnt files
    #[arg(value_name = "INPUT_DIR")]
    input: Option<PathBuf>,

    /// Directory to write .txt files into (created if missing)
    #[arg(value_name = "OUTPUT_DIR")]
    output: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Stop at the first note that fails to convert
    #[arg(long)]
    fail_fast: bool,

    /// What to do when two notes share a modification time
    #[arg(long, value_enum, value_name = "POLICY")]
    on_collision: Option<CollisionPolicy>,

    /// Only look at files directly inside INPUT_DIR
    #[arg(long)]
    no_recursive: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = vnt2txt::config::load_config();

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    let (Some(input), Some(output)) = (cli.input.as_deref(), cli.output.as_deref()) else {
        println!("{}", VntError::MissingArguments);
        println!();
        Cli::command().print_help()?;
        return Ok(());
    };

    let mut options = ConvertOptions::from(config.convert.clone());
    if cli.fail_fast {
        options.fail_fast = true;
    }
    if let Some(policy) = cli.on_collision {
        options.on_collision = policy;
    }
    if cli.no_recursive {
        options.recursive = false;
    }

    cmd_convert(input, output, options, cli.json)
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_dir = vnt2txt::config::cache_dir(config);
    let log_file = vnt2txt::config::log_file_path(config);
    let log_name = log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "vnt2txt.log".into());
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, log_name);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Convert every note under `input` into `output`.
fn cmd_convert(
    input: &Path,
    output: &Path,
    options: ConvertOptions,
    json: bool,
) -> anyhow::Result<()> {
    if !input.is_dir() {
        return Err(VntError::InputDirectoryNotFound(input.to_path_buf()).into());
    }

    let mut converter = Converter::new(output, options)?;
    let paths = converter.find_notes(input)?;

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Converting [{bar:40.cyan/blue}] {pos}/{len} notes ({eta})")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let result = converter.convert_all(&paths, &|current, _total| {
        pb.set_position(current as u64);
    });
    pb.finish_and_clear();
    let report = result?;
    let elapsed = start.elapsed();

    if json {
        print_report_json(output, &report, elapsed)?;
    } else {
        print_report_table(output, &report, elapsed);
    }

    if !report.is_success() {
        anyhow::bail!("{} note(s) failed to convert", report.failures.len());
    }

    Ok(())
}

/// Print the run summary in a human-readable form.
fn print_report_table(output: &Path, report: &ConversionReport, elapsed: std::time::Duration) {
    println!();
    println!("  {:<20} {}", "Notes found", report.candidates);
    println!("  {:<20} {}", "Converted", report.converted.len());
    println!("  {:<20} {}", "Output directory", output.display());
    println!("  {:<20} {:.2?}", "Time", elapsed);

    if !report.failures.is_empty() {
        println!();
        println!("  Failed ({}):", report.failures.len());
        for failure in &report.failures {
            println!("    {}: {}", failure.path.display(), failure.error);
        }
    }
    println!();
}

/// Print the run summary as JSON.
fn print_report_json(
    output: &Path,
    report: &ConversionReport,
    elapsed: std::time::Duration,
) -> anyhow::Result<()> {
    let converted: Vec<serde_json::Value> = report
        .converted
        .iter()
        .map(|(input, written)| {
            serde_json::json!({
                "input": input.to_string_lossy(),
                "output": written.to_string_lossy(),
            })
        })
        .collect();

    let summary = serde_json::json!({
        "output_dir": output.to_string_lossy(),
        "candidates": report.candidates,
        "converted_count": report.converted.len(),
        "converted": converted,
        "failures": report.failures,
        "elapsed_ms": elapsed.as_millis(),
    });

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
