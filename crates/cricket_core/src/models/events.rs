use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::delivery::{Dismissal, End};
use super::result::MatchResult;

/// Notifications queued by the engine for collaborators to drain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    WicketFell {
        innings: u8,
        batter: String,
        dismissal: Dismissal,
        /// Team score when the wicket fell.
        score: u32,
        wicket_number: u32,
    },
    BatterRetiredHurt {
        innings: u8,
        batter: String,
        end: End,
    },
    OverCompleted {
        innings: u8,
        /// Zero-based over number.
        over: u32,
        bowler: String,
        runs: u32,
    },
    /// Innings one is done; the target is the first-innings total.
    InningsOverReady {
        target: u32,
    },
    SecondInningsStarted {
        batting_team: String,
        target: u32,
    },
    MatchCompleted {
        result: MatchResult,
    },
}

impl MatchEvent {
    pub fn is_wicket(&self) -> bool {
        matches!(self, MatchEvent::WicketFell { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event = MatchEvent::InningsOverReady { target: 140 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "innings_over_ready");
        assert_eq!(json["target"], 140);
        assert!(!event.is_wicket());
    }

    #[test]
    fn test_wicket_events() {
        let wicket = MatchEvent::WicketFell {
            innings: 1,
            batter: "L1".into(),
            dismissal: Dismissal::Bowled,
            score: 12,
            wicket_number: 1,
        };
        assert!(wicket.is_wicket());
        let retired =
            MatchEvent::BatterRetiredHurt { innings: 1, batter: "L2".into(), end: End::Striker };
        assert!(!retired.is_wicket());
    }
}
