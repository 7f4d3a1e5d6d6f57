//! Ball ledger entries.
//!
//! A delivery is a closed combination of extra kind and optional dismissal.
//! A run-out always names the end that was run out, and the runs completed
//! before it live in the delivery's `runs` field.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Balls per over.
pub const BALLS_PER_OVER: u32 = 6;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum ExtraKind {
    #[default]
    None,
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl ExtraKind {
    pub fn is_extra(self) -> bool {
        self != ExtraKind::None
    }

    /// Wides and no-balls are re-bowled and never count toward the over.
    pub fn is_legal(self) -> bool {
        !matches!(self, ExtraKind::Wide | ExtraKind::NoBall)
    }

    /// The one-run penalty for a wide or no-ball.
    pub fn penalty_runs(self) -> u32 {
        if self.is_legal() {
            0
        } else {
            1
        }
    }
}

/// One of the two batting ends.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum End {
    #[default]
    Striker,
    NonStriker,
}

impl End {
    pub fn other(self) -> Self {
        match self {
            End::Striker => End::NonStriker,
            End::NonStriker => End::Striker,
        }
    }
}

impl fmt::Display for End {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            End::Striker => write!(f, "striker"),
            End::NonStriker => write!(f, "non-striker"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dismissal {
    Bowled,
    Caught,
    Stumped,
    Lbw,
    HitWicket,
    RunOut { end: End },
}

impl Dismissal {
    /// Run-outs are not credited to the bowler.
    pub fn credited_to_bowler(self) -> bool {
        !matches!(self, Dismissal::RunOut { .. })
    }

    /// The end left empty by this dismissal.
    pub fn vacated_end(self) -> End {
        match self {
            Dismissal::RunOut { end } => end,
            _ => End::Striker,
        }
    }

    /// Whether this mode of dismissal can happen on the given delivery.
    pub fn allowed_with(self, extra: ExtraKind) -> bool {
        match extra {
            ExtraKind::None => true,
            ExtraKind::Wide => {
                matches!(self, Dismissal::Stumped | Dismissal::HitWicket | Dismissal::RunOut { .. })
            }
            ExtraKind::NoBall | ExtraKind::Bye | ExtraKind::LegBye => {
                matches!(self, Dismissal::RunOut { .. })
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dismissal::Bowled => "bowled",
            Dismissal::Caught => "caught",
            Dismissal::Stumped => "stumped",
            Dismissal::Lbw => "lbw",
            Dismissal::HitWicket => "hit wicket",
            Dismissal::RunOut { .. } => "run out",
        }
    }
}

/// What the scorer enters for one ball; the engine fills in who was involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct DeliveryInput {
    /// Runs off the bat, or the extra runs run/awarded (not counting the
    /// wide/no-ball penalty). For a run-out: runs completed before it.
    pub runs: u32,
    #[serde(default)]
    pub extra: ExtraKind,
    #[serde(default)]
    pub dismissal: Option<Dismissal>,
}

impl DeliveryInput {
    pub fn runs(runs: u32) -> Self {
        Self { runs, ..Default::default() }
    }

    pub fn wide(runs: u32) -> Self {
        Self { runs, extra: ExtraKind::Wide, dismissal: None }
    }

    pub fn no_ball(runs: u32) -> Self {
        Self { runs, extra: ExtraKind::NoBall, dismissal: None }
    }

    pub fn bye(runs: u32) -> Self {
        Self { runs, extra: ExtraKind::Bye, dismissal: None }
    }

    pub fn leg_bye(runs: u32) -> Self {
        Self { runs, extra: ExtraKind::LegBye, dismissal: None }
    }

    pub fn wicket(dismissal: Dismissal) -> Self {
        Self { runs: 0, extra: ExtraKind::None, dismissal: Some(dismissal) }
    }

    pub fn run_out(end: End, runs_completed: u32) -> Self {
        Self {
            runs: runs_completed,
            extra: ExtraKind::None,
            dismissal: Some(Dismissal::RunOut { end }),
        }
    }

    pub fn with_dismissal(mut self, dismissal: Dismissal) -> Self {
        self.dismissal = Some(dismissal);
        self
    }
}

/// An immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Delivery {
    pub runs: u32,
    pub extra: ExtraKind,
    pub striker: String,
    pub non_striker: String,
    pub bowler: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissal: Option<Dismissal>,
}

impl Delivery {
    pub fn is_legal(&self) -> bool {
        self.extra.is_legal()
    }

    pub fn is_wicket(&self) -> bool {
        self.dismissal.is_some()
    }

    /// Everything this ball adds to the team total.
    pub fn total_runs(&self) -> u32 {
        self.runs + self.extra.penalty_runs()
    }

    /// Runs credited to the striker: off the bat, including off a no-ball.
    pub fn batter_runs(&self) -> u32 {
        match self.extra {
            ExtraKind::None | ExtraKind::NoBall => self.runs,
            ExtraKind::Wide | ExtraKind::Bye | ExtraKind::LegBye => 0,
        }
    }

    /// Runs not credited to the batter, penalty included.
    pub fn extra_runs(&self) -> u32 {
        match self.extra {
            ExtraKind::None => 0,
            ExtraKind::NoBall => self.extra.penalty_runs(),
            ExtraKind::Wide | ExtraKind::Bye | ExtraKind::LegBye => self.total_runs(),
        }
    }

    pub fn counts_as_ball_faced(&self) -> bool {
        self.extra != ExtraKind::Wide
    }

    pub fn is_four(&self) -> bool {
        self.batter_runs() == 4
    }

    pub fn is_six(&self) -> bool {
        self.batter_runs() == 6
    }

    /// Name of the batter dismissed on this ball, if any.
    pub fn dismissed_batter(&self) -> Option<&str> {
        self.dismissal.map(|d| match d.vacated_end() {
            End::Striker => self.striker.as_str(),
            End::NonStriker => self.non_striker.as_str(),
        })
    }

    /// Compact ball-by-ball notation: `0`, `4`, `W`, `wd`, `2wd`, `nb+4`, `1b`, `2lb`.
    pub fn notation(&self) -> String {
        if self.is_wicket() {
            return if self.runs > 0 { format!("W+{}", self.runs) } else { "W".to_string() };
        }
        match self.extra {
            ExtraKind::None => self.runs.to_string(),
            ExtraKind::Wide if self.runs == 0 => "wd".to_string(),
            ExtraKind::Wide => format!("{}wd", self.total_runs()),
            ExtraKind::NoBall if self.runs == 0 => "nb".to_string(),
            ExtraKind::NoBall => format!("nb+{}", self.runs),
            ExtraKind::Bye => format!("{}b", self.runs),
            ExtraKind::LegBye => format!("{}lb", self.runs),
        }
    }
}
