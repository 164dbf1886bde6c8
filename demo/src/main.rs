//! Flowline — Demo CLI
//!
//! Renders a JSON capture file, or replays one of the recorded protocol
//! runs poll-by-poll, printing the reconstructed timeline after each
//! snapshot the way the live viewer would display it.
//!
//! Usage:
//!   cargo run -p demo -- render capture.json
//!   cargo run -p demo -- replay single-auth
//!   cargo run -p demo -- replay interleaved --json
//!   cargo run -p demo -- run-all

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use flowline_contracts::{FlowlineError, FlowlineResult, TimelineEntry};
use flowline_engine::reconstruct;
use flowline_feed::{decode_endpoint_label, decode_snapshot, ReplaySource, SnapshotSource};
use flowline_replay::Scenario;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Flowline — protocol message-flow timeline reconstruction demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Flowline timeline reconstruction demo",
    long_about = "Reconstructs a causally- and session-coherent timeline from an\n\
                  unordered stream of authentication-protocol log events, and\n\
                  prints it the way the live viewer renders it."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Emit the timeline as JSON instead of the text rendering.
    #[arg(long, global = true)]
    json: bool,

    /// Hide the per-message detail rows.
    #[arg(long, global = true)]
    no_details: bool,

    /// Print endpoint labels exactly as logged (no sensor-label decoding).
    #[arg(long, global = true)]
    raw_labels: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Reconstruct and print the timeline of a JSON capture file.
    Render {
        /// Path to a capture file: one JSON array of log records.
        file: PathBuf,
    },
    /// Replay a recorded protocol run, reprinting the timeline per poll.
    Replay {
        #[arg(value_enum)]
        scenario: ScenarioArg,
    },
    /// Replay all three recorded runs in sequence.
    RunAll,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScenarioArg {
    SingleAuth,
    Interleaved,
    Legacy,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::SingleAuth => Scenario::SingleAuth,
            ScenarioArg::Interleaved => Scenario::Interleaved,
            ScenarioArg::Legacy => Scenario::Legacy,
        }
    }
}

/// Rendering switches shared by every subcommand.
#[derive(Clone, Copy)]
struct RenderOpts {
    json: bool,
    show_details: bool,
    decode_labels: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let opts = RenderOpts {
        json: cli.json,
        show_details: !cli.no_details,
        decode_labels: !cli.raw_labels,
    };

    let result = match cli.command {
        Command::Render { file } => render_capture(&file, opts),
        Command::Replay { scenario } => replay(scenario.into(), opts),
        Command::RunAll => run_all(opts),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn render_capture(path: &Path, opts: RenderOpts) -> FlowlineResult<()> {
    let raw = std::fs::read_to_string(path).map_err(|e| FlowlineError::Source {
        reason: format!("failed to read '{}': {}", path.display(), e),
    })?;
    let events = decode_snapshot(&raw)?;
    let timeline = reconstruct(&events);

    println!("Capture: {} ({} record(s))", path.display(), events.len());
    println!();
    print_timeline(&timeline, opts)?;
    Ok(())
}

fn replay(scenario: Scenario, opts: RenderOpts) -> FlowlineResult<()> {
    println!("=== Replay: {} ===", scenario.name());
    println!("    {}", scenario.about());
    println!();

    let script = scenario.script();
    let mut source = ReplaySource::new(script.polls);
    let mut tick = 0usize;

    // Drive the source the way the live viewer does: one poll per tick,
    // each snapshot wholly replacing the previous one.
    while let Some(snapshot) = source.poll()? {
        tick += 1;
        let timeline = reconstruct(&snapshot);
        println!(
            "── poll {} — {} record(s), {} timeline row(s) ──",
            tick,
            snapshot.len(),
            timeline.len()
        );
        print_timeline(&timeline, opts)?;
        println!();
    }

    println!("Replay complete after {} poll(s).", tick);
    println!();
    Ok(())
}

fn run_all(opts: RenderOpts) -> FlowlineResult<()> {
    replay(Scenario::SingleAuth, opts)?;
    replay(Scenario::Interleaved, opts)?;
    replay(Scenario::Legacy, opts)?;
    Ok(())
}

// ── Timeline rendering ────────────────────────────────────────────────────────

fn print_timeline(timeline: &[TimelineEntry], opts: RenderOpts) -> FlowlineResult<()> {
    if opts.json {
        let rendered =
            serde_json::to_string_pretty(timeline).map_err(|e| FlowlineError::Decode {
                reason: format!("failed to serialize timeline: {}", e),
            })?;
        println!("{}", rendered);
        return Ok(());
    }

    if timeline.is_empty() {
        println!("  (no log entries)");
        return Ok(());
    }

    for entry in timeline {
        match entry {
            TimelineEntry::Session(marker) => {
                println!(
                    "  ● session {}  {}",
                    marker.session,
                    format_ts(marker.ts)
                );
            }
            TimelineEntry::Message(message) => {
                let event = &message.event;
                let src = display_label(&event.src, opts);
                let dst = display_label(&event.dst, opts);
                println!(
                    "  {:<28} --[{:^4}]--> {:<28} {}",
                    src,
                    event.phase.tag(),
                    dst,
                    format_ts(event.ts)
                );

                if opts.show_details {
                    if let Some(details) = &event.details {
                        for (key, value) in details {
                            println!("      {:<10} {}", key, display_value(value));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn display_label(label: &str, opts: RenderOpts) -> String {
    if opts.decode_labels {
        decode_endpoint_label(label)
    } else {
        label.to_string()
    }
}

/// Detail values print bare for strings, JSON-encoded otherwise.
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fractional epoch seconds → "HH:MM:SS" (UTC), or a placeholder when unset.
fn format_ts(ts: Option<f64>) -> String {
    let Some(ts) = ts else {
        return "--:--:--".to_string();
    };
    let secs = ts.trunc() as i64;
    let nanos = ((ts - ts.trunc()) * 1e9) as u32;
    chrono::DateTime::from_timestamp(secs, nanos)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}
