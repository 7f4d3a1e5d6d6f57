//! Immutable match snapshots.
//!
//! A `MatchSnapshot` is an owned copy of everything an export or
//! persistence collaborator needs: both rosters with figures, both innings'
//! ledgers and over indexes, target, result, and phase. The engine only
//! produces snapshots; storing them is the caller's business.
//!
//! Two encodings are provided:
//! - binary (`encode`/`decode`): MessagePack, LZ4-compressed, SHA-256 checked
//! - JSON (`to_json_pretty`/`from_json`), with `json_schema()` for consumers

pub mod error;
pub mod format;

pub use error::SnapshotError;
pub use format::{current_timestamp, decode, encode};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::InningsCard;
use crate::engine::{Crease, InningsPhase, ScoringEngine};
use crate::models::{Innings, MatchResult, Team};

/// Bumped whenever the snapshot layout changes incompatibly.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchSnapshot {
    pub version: u32,
    pub match_id: String,
    pub started_at_ms: u64,
    pub captured_at_ms: u64,
    pub teams: [Team; 2],
    pub total_overs: u32,
    #[serde(default)]
    pub first_innings: Option<Innings>,
    pub innings: Innings,
    pub phase: InningsPhase,
    #[serde(default)]
    pub target: Option<u32>,
    #[serde(default)]
    pub result: Option<MatchResult>,
    pub crease: Crease,
}

impl MatchSnapshot {
    pub fn from_engine(engine: &ScoringEngine) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            match_id: engine.match_id().to_string(),
            started_at_ms: engine.started_at_ms(),
            captured_at_ms: current_timestamp(),
            teams: engine.teams().clone(),
            total_overs: engine.total_overs(),
            first_innings: engine.first_innings().cloned(),
            innings: engine.innings().clone(),
            phase: engine.phase(),
            target: engine.target(),
            result: engine.result().cloned(),
            crease: engine.crease().clone(),
        }
    }

    /// Innings in playing order: the archived first innings, then the
    /// current one.
    pub fn innings_played(&self) -> impl Iterator<Item = &Innings> {
        self.first_innings.iter().chain(std::iter::once(&self.innings))
    }

    /// One scorecard per innings played.
    pub fn scorecards(&self) -> Vec<InningsCard> {
        self.innings_played()
            .map(|innings| {
                InningsCard::build(
                    innings,
                    &self.teams[innings.batting.index()],
                    &self.teams[innings.bowling.index()],
                )
            })
            .collect()
    }

    pub fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        encode(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        decode(bytes)
    }

    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(MatchSnapshot)
    }
}
