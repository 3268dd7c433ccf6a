//! Temporal planning tool for composite weather maps.
//!
//! Resolves an operator-entered time for a set of map factors and prints the
//! aligned timestamps as JSON:
//! - Cadence boundaries for observations, model runs and satellite
//! - Issuance times for convective outlooks
//! - Display stamps and the map title

mod config;
mod factors;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde_json::json;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use wx_time::{
    classify, instant::from_iso8601, AlignmentMode, OutlookPolicy, RawInstant, TemporalEngine,
};

#[derive(Parser, Debug)]
#[command(name = "timeplan")]
#[command(about = "Align a requested time to the products of a weather map")]
struct Args {
    /// Requested time: `recent`, `today, H[, M]`, `Y, M, D, H[, M]` or ISO 8601
    #[arg(short, long, default_value = "recent")]
    time: RawInstant,

    /// Map factors, comma separated (e.g. temperature,temp_contours,day1)
    #[arg(short, long, value_delimiter = ',', required = true)]
    factors: Vec<String>,

    /// Alignment mode (raw, sync, near, async); overrides the config file
    #[arg(short, long)]
    mode: Option<AlignmentMode>,

    /// Outlook policy (recent, latest); overrides the config file
    #[arg(long)]
    outlook_policy: Option<OutlookPolicy>,

    /// Alignment config file (YAML)
    #[arg(long, env = "TIMEPLAN_CONFIG")]
    config: Option<PathBuf>,

    /// Pin the current time (ISO 8601), for replaying past requests
    #[arg(long, env = "TIMEPLAN_NOW")]
    now: Option<String>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr so stdout stays clean JSON
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = config::load_config(args.config.as_deref())?;
    let mode = args.mode.unwrap_or(config.mode);
    let policy = args.outlook_policy.unwrap_or(config.outlook_policy);

    let now: DateTime<Utc> = match &args.now {
        Some(s) => from_iso8601(s).with_context(|| format!("Invalid --now value '{s}'"))?,
        None => Utc::now(),
    };

    let codes = factors::codes_for(&args.factors)?;

    // Outlook and warning only maps have nothing to synchronize
    let mode = if mode != AlignmentMode::Raw && classify(codes.iter().copied()).primary().is_none() {
        warn!(requested = %mode, "No cadence-based factor requested, using raw alignment");
        AlignmentMode::Raw
    } else {
        mode
    };

    info!(time = %args.time, mode = %mode, policy = %policy, "Planning map time");

    let engine = TemporalEngine::new(&config).context("Invalid alignment config")?;
    let descriptor = engine
        .build_raw(&args.time, now, mode, policy, codes)
        .with_context(|| format!("Failed to align '{}'", args.time))?;

    let parts: Vec<&str> = args.factors.iter().map(String::as_str).collect();
    let output = json!({
        "title": descriptor.title(&parts),
        "partition_path": descriptor.stamps().partition_path(),
        "descriptor": descriptor,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
