//! JSON command surface.
//!
//! Front ends talk to the engine by sending one `MatchCommand` at a time as
//! JSON and reading back a `CommandResponse`: whether it applied, why not,
//! the live score, and the events it produced.
//!
//! ```text
//! {"command":"select_striker","player":"Asha"}
//! {"command":"record_delivery","runs":1,"extra":"wide"}
//! {"command":"record_delivery","runs":1,"dismissal":{"kind":"run_out","end":"non_striker"}}
//! {"command":"undo_last"}
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::ScoreSummary;
use crate::config::MatchSetup;
use crate::engine::ScoringEngine;
use crate::error::{ScoringError, SetupError};
use crate::models::{DeliveryInput, Dismissal, End, ExtraKind, MatchEvent};
use crate::snapshot::SnapshotError;

/// Schema version of the command/response JSON.
pub const API_VERSION: &str = "v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MatchCommand {
    RecordDelivery {
        runs: u32,
        #[serde(default)]
        extra: ExtraKind,
        #[serde(default)]
        dismissal: Option<Dismissal>,
    },
    UndoLast,
    SelectStriker {
        player: String,
    },
    SelectNonStriker {
        player: String,
    },
    /// Fill the end vacated by a wicket or retirement.
    SelectBatsman {
        player: String,
    },
    SelectBowler {
        player: String,
    },
    SwapBatsmen,
    RetireHurt {
        end: End,
    },
    ReplacePlayer {
        old: String,
        new: String,
    },
    StartSecondInnings,
    StartNewMatch {
        setup: MatchSetup,
    },
    ReviseSecondInningsOvers {
        overs: u32,
    },
}

impl MatchCommand {
    pub fn name(&self) -> &'static str {
        match self {
            MatchCommand::RecordDelivery { .. } => "record_delivery",
            MatchCommand::UndoLast => "undo_last",
            MatchCommand::SelectStriker { .. } => "select_striker",
            MatchCommand::SelectNonStriker { .. } => "select_non_striker",
            MatchCommand::SelectBatsman { .. } => "select_batsman",
            MatchCommand::SelectBowler { .. } => "select_bowler",
            MatchCommand::SwapBatsmen => "swap_batsmen",
            MatchCommand::RetireHurt { .. } => "retire_hurt",
            MatchCommand::ReplacePlayer { .. } => "replace_player",
            MatchCommand::StartSecondInnings => "start_second_innings",
            MatchCommand::StartNewMatch { .. } => "start_new_match",
            MatchCommand::ReviseSecondInningsOvers { .. } => "revise_second_innings_overs",
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Stable tag for the response's `error.kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Scoring(e) => e.kind(),
            ApiError::Setup(_) => "invalid_setup",
            ApiError::Snapshot(_) => "snapshot",
            ApiError::Json(_) => "malformed_json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self { kind: err.kind().to_string(), message: err.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CommandResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub summary: ScoreSummary,
    pub events: Vec<MatchEvent>,
    pub schema_version: String,
}

/// Apply one typed command.
pub fn apply_command(engine: &mut ScoringEngine, command: MatchCommand) -> Result<(), ApiError> {
    debug!(command = command.name(), "applying command");
    match command {
        MatchCommand::RecordDelivery { runs, extra, dismissal } => {
            engine.record_delivery(DeliveryInput { runs, extra, dismissal })?
        }
        MatchCommand::UndoLast => engine.undo_last()?,
        MatchCommand::SelectStriker { player } => engine.select_striker(&player)?,
        MatchCommand::SelectNonStriker { player } => engine.select_non_striker(&player)?,
        MatchCommand::SelectBatsman { player } => engine.select_batsman(&player)?,
        MatchCommand::SelectBowler { player } => engine.select_bowler(&player)?,
        MatchCommand::SwapBatsmen => engine.swap_batsmen()?,
        MatchCommand::RetireHurt { end } => engine.retire_hurt(end)?,
        MatchCommand::ReplacePlayer { old, new } => engine.replace_player(&old, &new)?,
        MatchCommand::StartSecondInnings => engine.start_second_innings()?,
        MatchCommand::StartNewMatch { setup } => {
            engine.start_new_match(&setup)?;
            info!(match_id = %engine.match_id(), "new match started");
        }
        MatchCommand::ReviseSecondInningsOvers { overs } => {
            engine.revise_second_innings_overs(overs)?
        }
    }
    Ok(())
}

/// Parse, apply, and report. Never fails: every problem becomes an
/// `ok: false` response carrying the unchanged score.
pub fn apply_command_json(engine: &mut ScoringEngine, command_json: &str) -> String {
    let outcome = serde_json::from_str::<MatchCommand>(command_json)
        .map_err(ApiError::from)
        .and_then(|command| apply_command(engine, command));

    if let Err(err) = &outcome {
        warn!(kind = err.kind(), "command rejected: {}", err);
    }
    let response = CommandResponse {
        ok: outcome.is_ok(),
        error: outcome.as_ref().err().map(ErrorBody::from),
        summary: engine.summary(),
        events: engine.drain_events(),
        schema_version: API_VERSION.to_string(),
    };
    to_json(&response)
}

/// Current `ScoreSummary` as JSON.
pub fn summary_json(engine: &ScoringEngine) -> String {
    to_json(&engine.summary())
}

/// Full snapshot as pretty JSON.
pub fn snapshot_json(engine: &ScoringEngine) -> Result<String, ApiError> {
    Ok(engine.snapshot().to_json_pretty()?)
}

pub fn command_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(MatchCommand)
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        format!(
            r#"{{"ok":false,"error":{{"kind":"serialization","message":"{}"}}}}"#,
            e.to_string().replace('"', "'")
        )
    })
}
