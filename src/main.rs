//! widget-mover - Headless replay of controller drag gestures
//!
//! Loads a gesture script, replays it against a single floating panel and
//! writes the panel's placement after every frame as JSON lines.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use config::{MoverConfig, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;
use tracing::info;
use widget_mover_testkit::{replay_gesture, DragTraceSink, GestureScript};
use widget_mover_ui3d::PolicyKind;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay controller drag gestures against a floating panel", long_about = None)]
struct Args {
    /// Gesture script (JSON)
    #[arg(short, long)]
    script: PathBuf,

    /// Mover configuration (TOML)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Output trace path (JSON lines, one record per step)
    #[arg(long, default_value = "target/drag_trace.jsonl")]
    trace: PathBuf,

    /// Override the placement policy from the configuration
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Also write the effective configuration to this path
    #[arg(long)]
    write_config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Constrained,
    FreeForm,
}

impl From<PolicyArg> for PolicyKind {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Constrained => PolicyKind::Constrained,
            PolicyArg::FreeForm => PolicyKind::FreeForm,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting widget-mover v{}", env!("CARGO_PKG_VERSION"));
    widget_mover_ui3d::init()?;

    let args = Args::parse();
    let mut config = MoverConfig::load_from_path(&args.config);
    if let Some(policy) = args.policy {
        config.policy = policy.into();
    }

    if let Some(path) = &args.write_config {
        config
            .save_to_path(path)
            .with_context(|| format!("failed to write config {}", path.display()))?;
    }

    let script = GestureScript::from_path(&args.script)?;
    let scale = config.scale()?;
    let mut sink = DragTraceSink::create(&args.trace)
        .with_context(|| format!("failed to create trace {}", args.trace.display()))?;

    let report = replay_gesture(&script, config.placement_policy(), scale, Some(&mut sink))?;

    let placement = report.final_placement;
    println!(
        "{} frames, {} moves, {} misses; final translation ({:.3}, {:.3}, {:.3}), tilt {:.2} deg",
        report.frames.len(),
        report.moves,
        report.misses,
        placement.translation.x,
        placement.translation.y,
        placement.translation.z,
        placement.rotation.to_degrees(),
    );
    info!("Trace written to {}", args.trace.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_policy_override() {
        let args = Args::try_parse_from([
            "widget-mover",
            "--script",
            "gesture.json",
            "--policy",
            "free-form",
        ])
        .expect("valid args");

        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(
            args.policy.map(PolicyKind::from),
            Some(PolicyKind::FreeForm)
        );
    }

    #[test]
    fn script_is_required() {
        assert!(Args::try_parse_from(["widget-mover"]).is_err());
    }
}
