use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};

use manusplit::{DocumentSplitter, ProcessingResult, ProgressStage, Settings};

#[derive(Parser)]
#[command(
    name = "manusplit",
    version,
    about = "Split large .docx and .txt documents into smaller parts by word count"
)]
struct Cli {
    /// Files to split
    #[arg(required_unless_present = "init_config")]
    files: Vec<PathBuf>,

    /// Maximum words per output part (overrides the saved setting)
    #[arg(long)]
    max_words: Option<usize>,

    /// Folder the parts are written into (overrides the saved setting)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Rebuild bold/italic/underline runs in .docx parts
    #[arg(long)]
    preserve_formatting: bool,

    /// Leave files alone when they are already within the word limit
    #[arg(long)]
    skip_under_limit: bool,

    /// Emit per-file results as JSON on stdout; logs go to stderr
    #[arg(long)]
    json: bool,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,
}

/// Initialize tracing/logging according to RUST_LOG.
/// Defaults to `info` if `RUST_LOG` is unset; logs go to stderr so stdout
/// stays clean for --json output.
fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    if cli.init_config {
        Settings::init_default()?;
        if let Some(path) = Settings::get_config_path() {
            println!("Wrote default config to {}", path.display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut settings = Settings::load();
    if let Some(max_words) = cli.max_words {
        settings.max_words = max_words;
    }
    if let Some(output) = cli.output {
        settings.output_folder = output;
    }
    if cli.preserve_formatting {
        settings.preserve_formatting = true;
    }
    if cli.skip_under_limit {
        settings.skip_under_limit = true;
    }

    let policy = settings.policy()?;
    info!(
        "splitting {} file(s) at {} words per part",
        cli.files.len(),
        policy.max_words
    );

    // One blocking task per document. Results come back in input order and
    // one file's failure never stops its siblings.
    let mut handles = Vec::with_capacity(cli.files.len());
    for file in &cli.files {
        let splitter = DocumentSplitter::new(policy.clone(), settings.output_folder.clone());
        let file = file.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let label = file.display().to_string();
            let mut progress = move |stage: ProgressStage, percent: u8, message: &str| {
                debug!("{label}: [{stage} {percent}%] {message}");
            };
            splitter.process_file_with_progress(&file, &mut progress)
        }));
    }

    let mut results: Vec<ProcessingResult> = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await?);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            println!("{}: {}", result.source.display(), result.message);
        }
    }

    let failures = results.iter().filter(|result| !result.success).count();
    if failures > 0 {
        warn!("{failures} of {} file(s) failed", results.len());
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
