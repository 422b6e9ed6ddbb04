//! Scouting core CLI
//!
//! Replays recorded input scripts through the match-entry core, prints
//! action timelines and derived clock states. Useful for debugging scouted
//! sessions away from the tablet UI.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scout_core::{
    default_schedule, derive_clock, replay_script_json, SessionSnapshot, SCHEMA_VERSION,
};

#[derive(Parser)]
#[command(name = "scout_cli")]
#[command(about = "Replay and inspect scouted match-entry sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an input script and write the resulting snapshot
    Replay {
        /// Input script JSON file
        #[arg(long)]
        r#in: PathBuf,

        /// Output snapshot JSON file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Print a per-action timeline from a snapshot file
    Timeline {
        /// Snapshot JSON file (as written by `replay` or the app sink)
        #[arg(long)]
        r#in: PathBuf,
    },

    /// Print the derived clock state at a given elapsed time
    Clock {
        /// Elapsed match time in milliseconds
        #[arg(long)]
        elapsed_ms: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Replay { r#in, out, pretty } => run_replay(&r#in, out.as_deref(), pretty),
        Commands::Timeline { r#in } => run_timeline(&r#in),
        Commands::Clock { elapsed_ms } => run_clock(elapsed_ms),
    }
}

fn run_replay(input: &std::path::Path, out: Option<&std::path::Path>, pretty: bool) -> Result<()> {
    let script = fs::read_to_string(input)
        .with_context(|| format!("reading script {}", input.display()))?;
    let output = replay_script_json(&script).context("replaying script")?;

    let rendered = if pretty {
        let value: serde_json::Value = serde_json::from_str(&output)?;
        serde_json::to_string_pretty(&value)?
    } else {
        output
    };

    match out {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("writing snapshot {}", path.display()))?;
            tracing::info!(path = %path.display(), "snapshot written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn run_timeline(input: &std::path::Path) -> Result<()> {
    let raw = fs::read_to_string(input)
        .with_context(|| format!("reading snapshot {}", input.display()))?;
    // accept both a bare snapshot and a full replay response
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let snapshot_value = value.get("snapshot").cloned().unwrap_or(value);
    let snapshot: SessionSnapshot =
        serde_json::from_value(snapshot_value).context("parsing snapshot")?;

    if let Some(pos) = snapshot.start_position {
        println!("start position: ({:.2}, {:.2})", pos.x, pos.y);
    }
    for line in timeline_lines(&snapshot) {
        println!("{}", line);
    }
    Ok(())
}

fn timeline_lines(snapshot: &SessionSnapshot) -> Vec<String> {
    snapshot
        .actions
        .iter()
        .map(|action| match action.base() {
            Some(base) => {
                let sub = base.sub_phase.map(|s| format!("/{}", s.name())).unwrap_or_default();
                format!(
                    "{:>8}ms  {:<9} {}",
                    base.timestamp_ms,
                    format!("{:?}{}", base.phase, sub).to_lowercase(),
                    action.kind().name()
                )
            }
            None => format!("{:>8}  {:<9} {}", "-", "prestart", action.kind().name()),
        })
        .collect()
}

fn run_clock(elapsed_ms: u64) -> Result<()> {
    // anchor at 1 so elapsed == now - anchor with the 0 sentinel avoided
    let clock = derive_clock(default_schedule(), 1, 1 + elapsed_ms);
    println!("{}", serde_json::to_string_pretty(&clock)?);
    Ok(())
}
