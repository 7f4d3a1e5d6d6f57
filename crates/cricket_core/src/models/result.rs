use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a completed match was decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchResult {
    /// The chasing side passed the target with wickets in hand.
    WonByWickets { winner: String, wickets: u32 },
    /// The defending side kept the chase short.
    WonByRuns { winner: String, runs: u32 },
    Tie,
}

impl MatchResult {
    pub fn winner(&self) -> Option<&str> {
        match self {
            MatchResult::WonByWickets { winner, .. } | MatchResult::WonByRuns { winner, .. } => {
                Some(winner)
            }
            MatchResult::Tie => None,
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchResult::WonByWickets { winner, wickets } => {
                write!(f, "{} wins by {} wicket(s)", winner, wickets)
            }
            MatchResult::WonByRuns { winner, runs } => {
                write!(f, "{} wins by {} run(s)", winner, runs)
            }
            MatchResult::Tie => write!(f, "The match is tied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let r = MatchResult::WonByWickets { winner: "Lions".into(), wickets: 3 };
        assert_eq!(r.to_string(), "Lions wins by 3 wicket(s)");
        assert_eq!(r.winner(), Some("Lions"));
        let r = MatchResult::WonByRuns { winner: "Tigers".into(), runs: 12 };
        assert_eq!(r.to_string(), "Tigers wins by 12 run(s)");
        assert_eq!(MatchResult::Tie.winner(), None);
    }
}
