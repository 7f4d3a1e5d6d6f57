use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::over::OversCount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// In the dressing room, can still come out to bat.
    #[default]
    Available,
    /// At the crease (striker or non-striker end).
    Batting,
    Out,
    RetiredHurt,
}

impl PlayerStatus {
    /// Whether a player with this status may be sent out to bat.
    pub fn can_bat(self) -> bool {
        matches!(self, PlayerStatus::Available | PlayerStatus::Batting)
    }
}

/// Cumulative batting figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct BattingFigures {
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
}

impl BattingFigures {
    /// Runs per hundred balls faced, 0.0 before the first ball.
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        self.runs as f64 * 100.0 / self.balls as f64
    }
}

/// Cumulative bowling figures. `balls` counts legal deliveries only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct BowlingFigures {
    pub balls: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
}

impl BowlingFigures {
    pub fn overs(&self) -> OversCount {
        OversCount::from_legal_balls(self.balls)
    }

    /// Runs conceded per six legal balls, 0.0 before the first legal ball.
    pub fn economy(&self) -> f64 {
        if self.balls == 0 {
            return 0.0;
        }
        self.runs_conceded as f64 / (self.balls as f64 / 6.0)
    }

    pub fn has_bowled(&self) -> bool {
        self.balls > 0 || self.runs_conceded > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    pub name: String,
    pub batting: BattingFigures,
    pub bowling: BowlingFigures,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            batting: BattingFigures::default(),
            bowling: BowlingFigures::default(),
            status: PlayerStatus::Available,
        }
    }
}
