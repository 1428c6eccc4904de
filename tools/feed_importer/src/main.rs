use anyhow::Context;
use clap::Parser;
use optfi_core::importer::{import_draft_file, ImportRequest};
use optfi_core::reporting::{DEFAULT_FEED_PATH, FEED_PATH_ENV};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "feed_importer",
    version,
    about = "Merge a public update draft into public-reporting.json"
)]
struct Cli {
    /// Draft JSON file (draftVersion 1)
    draft: PathBuf,
    #[arg(long, help = "Publish timestamp override (ISO 8601), defaults to now")]
    publish_at: Option<String>,
    #[arg(long, env = FEED_PATH_ENV, default_value = DEFAULT_FEED_PATH)]
    feed: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let draft_path = absolute(&cli.draft)?;
    let feed_path = absolute(&cli.feed)?;
    let report = import_draft_file(&ImportRequest {
        draft_path: draft_path.clone(),
        feed_path,
        publish_at: cli.publish_at,
    })
    .with_context(|| format!("importing {}", draft_path.display()))?;

    println!("{}", report.feed_path.display());
    println!("Imported draft as {}", report.id);
    Ok(())
}

fn absolute(path: &std::path::Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("resolving working directory")?;
    Ok(cwd.join(path))
}
