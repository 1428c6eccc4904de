use clap::Parser;
use optfi_core::context::ReportingContext;
use optfi_core::reporting::{Severity, DEFAULT_FEED_PATH, FEED_PATH_ENV};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "feed_validator",
    version,
    about = "Validate public-reporting.json the way the site does at start-up"
)]
struct Cli {
    #[arg(long, env = FEED_PATH_ENV, default_value = DEFAULT_FEED_PATH)]
    feed: PathBuf,
    #[arg(long, help = "Output machine-readable JSON")]
    json: bool,
}

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Serialize)]
struct FeedSummary {
    feed: String,
    version: u32,
    updated_at: String,
    card_state: String,
    card_variant: String,
    updates: usize,
    info: usize,
    attention: usize,
    warning: usize,
    latest_id: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = match ReportingContext::load(&cli.feed) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("validator error: {}: {}", cli.feed.display(), e);
            std::process::exit(1);
        }
    };

    let summary = summarize(&cli.feed, &ctx);
    if cli.json {
        match serde_json::to_string_pretty(&JsonOut {
            ok: true,
            data: &summary,
        }) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("validator error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!(
            "feed valid version={} updates={} updated_at={}",
            summary.version, summary.updates, summary.updated_at
        );
    }
}

fn summarize(path: &std::path::Path, ctx: &ReportingContext) -> FeedSummary {
    let card = ctx.method_validation_card();
    FeedSummary {
        feed: path.display().to_string(),
        version: ctx.feed().version,
        updated_at: ctx.updated_at().to_string(),
        card_state: card.state.clone(),
        card_variant: card.variant.as_str().to_string(),
        updates: ctx.updates().len(),
        info: ctx.updates_with_severity(Severity::Info).count(),
        attention: ctx.updates_with_severity(Severity::Attention).count(),
        warning: ctx.updates_with_severity(Severity::Warning).count(),
        latest_id: ctx.latest_update().map(|u| u.id.clone()),
    }
}
