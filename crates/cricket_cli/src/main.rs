//! Cricket scoring CLI
//!
//! Replays a JSON command script against a match setup, prints scorecards,
//! and reads or writes binary match snapshots.

mod render;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use cricket_core::api::{apply_command, command_schema};
use cricket_core::config::SETUP_PATH_ENV;
use cricket_core::{MatchCommand, MatchSetup, MatchSnapshot, ScoringEngine};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "cricket")]
#[command(about = "Limited-overs cricket scoring engine", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a command script to a new match
    Replay {
        /// Match setup JSON (defaults to $CRICKET_SETUP_PATH)
        #[arg(long)]
        setup: Option<PathBuf>,

        /// JSON array of commands
        #[arg(long)]
        script: PathBuf,

        /// Write the final binary snapshot here
        #[arg(long)]
        snapshot_out: Option<PathBuf>,

        /// Print the snapshot as JSON instead of a scorecard
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print the scorecard stored in a binary snapshot
    Inspect {
        #[arg(long)]
        snapshot: PathBuf,

        /// Print the snapshot as JSON instead of a scorecard
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print a JSON schema
    Schema {
        /// Schema of the snapshot instead of the command
        #[arg(long, default_value = "false")]
        snapshot: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .init();

    match cli.command {
        Commands::Replay { setup, script, snapshot_out, json } => {
            let setup = load_setup(setup.as_deref())?;
            let commands = load_script(&script)?;
            let engine = replay(&setup, commands)?;
            let snapshot = engine.snapshot();

            if let Some(path) = snapshot_out {
                write_snapshot(&path, &snapshot)?;
            }
            print_snapshot(&snapshot, json)?;
        }

        Commands::Inspect { snapshot, json } => {
            let snapshot = read_snapshot(&snapshot)?;
            print_snapshot(&snapshot, json)?;
        }

        Commands::Schema { snapshot } => {
            let schema = if snapshot {
                serde_json::to_string_pretty(&MatchSnapshot::json_schema())?
            } else {
                serde_json::to_string_pretty(&command_schema())?
            };
            println!("{}", schema);
        }
    }

    Ok(())
}

fn load_setup(path: Option<&Path>) -> Result<MatchSetup> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read setup {}", path.display()))?;
            MatchSetup::from_json(&json)
                .with_context(|| format!("Invalid setup {}", path.display()))
        }
        None => MatchSetup::from_env()?
            .ok_or_else(|| anyhow!("No setup given: pass --setup or set {}", SETUP_PATH_ENV)),
    }
}

fn load_script(path: &Path) -> Result<Vec<MatchCommand>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid script {}", path.display()))
}

/// Run every command in order, stopping at the first rejection.
fn replay(setup: &MatchSetup, commands: Vec<MatchCommand>) -> Result<ScoringEngine> {
    let mut engine = ScoringEngine::new(setup)?;
    info!(match_id = %engine.match_id(), commands = commands.len(), "replaying script");

    for (i, command) in commands.into_iter().enumerate() {
        let name = command.name();
        apply_command(&mut engine, command)
            .with_context(|| format!("Command #{} ({}) rejected", i + 1, name))?;
        for event in engine.drain_events() {
            if event.is_wicket() {
                info!(?event, "wicket");
            } else {
                debug!(?event, "match event");
            }
        }
    }
    Ok(engine)
}

fn write_snapshot(path: &Path, snapshot: &MatchSnapshot) -> Result<()> {
    let bytes = snapshot.encode()?;
    fs::write(path, &bytes)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "snapshot written");
    Ok(())
}

fn read_snapshot(path: &Path) -> Result<MatchSnapshot> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    MatchSnapshot::decode(&bytes).with_context(|| format!("Invalid snapshot {}", path.display()))
}

fn print_snapshot(snapshot: &MatchSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", snapshot.to_json_pretty()?);
    } else {
        print!("{}", render::scorecard(snapshot)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup_json() -> serde_json::Value {
        json!({
            "team_one": {"name": "Lions", "players": ["Asha", "Bilal", "Chen"]},
            "team_two": {"name": "Tigers", "players": ["Xavi", "Yuki", "Zane"]},
            "total_overs": 1,
            "toss": {"winner": "Lions", "decision": "bat"}
        })
    }

    fn script_json() -> serde_json::Value {
        let mut script = vec![
            json!({"command": "select_striker", "player": "Asha"}),
            json!({"command": "select_non_striker", "player": "Bilal"}),
            json!({"command": "select_bowler", "player": "Zane"}),
            json!({"command": "record_delivery", "runs": 4}),
            json!({"command": "record_delivery", "runs": 0, "dismissal": {"kind": "caught"}}),
            json!({"command": "select_batsman", "player": "Chen"}),
        ];
        script.extend((0..4).map(|_| json!({"command": "record_delivery", "runs": 1})));
        script.push(json!({"command": "start_second_innings"}));
        serde_json::Value::Array(script)
    }

    fn write(dir: &TempDir, name: &str, value: &serde_json::Value) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[test]
    fn test_replay_and_snapshot_file() {
        let dir = TempDir::new().unwrap();
        let setup_path = write(&dir, "setup.json", &setup_json());
        let script_path = write(&dir, "script.json", &script_json());

        let setup = load_setup(Some(&setup_path)).unwrap();
        let engine = replay(&setup, load_script(&script_path).unwrap()).unwrap();
        assert_eq!(engine.target(), Some(8));

        let out = dir.path().join("match.bin");
        write_snapshot(&out, &engine.snapshot()).unwrap();
        let snapshot = read_snapshot(&out).unwrap();
        assert_eq!(snapshot.target, Some(8));
        assert_eq!(snapshot.innings.number, 2);

        let text = render::scorecard(&snapshot).unwrap();
        assert!(text.contains("Lions innings: 8/1 (1.0 ov)"));
        assert!(text.contains("Fall of wickets: 1-4 (Asha, 0.2 ov)"));
        assert!(text.contains("Tigers innings: 0/0 (0.0 ov)"));
    }

    #[test]
    fn test_replay_stops_at_first_rejection() {
        let setup: MatchSetup = serde_json::from_value(setup_json()).unwrap();
        let commands: Vec<MatchCommand> = serde_json::from_value(json!([
            {"command": "select_striker", "player": "Asha"},
            {"command": "record_delivery", "runs": 1}
        ]))
        .unwrap();
        let err = replay(&setup, commands).unwrap_err();
        assert!(err.to_string().contains("Command #2 (record_delivery) rejected"));
    }

    #[test]
    fn test_bad_inputs_are_reported() {
        let dir = TempDir::new().unwrap();
        let garbage = dir.path().join("garbage.bin");
        fs::write(&garbage, [1u8, 2, 3]).unwrap();
        assert!(read_snapshot(&garbage).is_err());

        let script = write(&dir, "script.json", &json!({"command": "undo_last"}));
        assert!(load_script(&script).is_err());

        assert!(load_setup(Some(&dir.path().join("missing.json"))).is_err());
    }
}
