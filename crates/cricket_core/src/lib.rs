//! # cricket_core - Limited-Overs Cricket Scoring Engine
//!
//! Turns a stream of deliveries into authoritative match state for a
//! two-innings limited-overs match: score, wickets, overs, strike rotation,
//! innings transitions, and the result.
//!
//! ## Features
//! - Single-owner `ScoringEngine` with a narrow command API
//! - Typed, fail-fast command errors that leave state untouched
//! - Single-step undo (arithmetic for ordinary balls, snapshot for wickets)
//! - Pure derived views: rates, partnerships, fall of wickets, scorecards
//! - JSON command surface and compact binary match snapshots
//!
//! ## Usage
//!
//! ```rust
//! use cricket_core::{DeliveryInput, MatchSetup, ScoringEngine};
//!
//! let setup = MatchSetup::from_json(r#"{
//!     "team_one": {"name": "Lions", "players": ["Asha", "Bilal", "Chen"]},
//!     "team_two": {"name": "Tigers", "players": ["Xavi", "Yuki", "Zane"]},
//!     "total_overs": 2,
//!     "toss": {"winner": "Lions", "decision": "bat"}
//! }"#).unwrap();
//!
//! let mut engine = ScoringEngine::new(&setup).unwrap();
//! engine.select_striker("Asha").unwrap();
//! engine.select_non_striker("Bilal").unwrap();
//! engine.select_bowler("Zane").unwrap();
//! engine.record_delivery(DeliveryInput::runs(4)).unwrap();
//!
//! assert_eq!(engine.summary().runs, 4);
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod snapshot;

pub use analysis::{InningsCard, ScoreSummary};
pub use api::{apply_command, apply_command_json, summary_json, MatchCommand};
pub use config::MatchSetup;
pub use engine::{InningsPhase, ScoringEngine};
pub use error::{Result, ScoringError, SetupError};
pub use models::{DeliveryInput, Dismissal, End, ExtraKind, MatchEvent, MatchResult};
pub use snapshot::{MatchSnapshot, SnapshotError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
