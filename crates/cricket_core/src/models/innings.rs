use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::delivery::{Delivery, BALLS_PER_OVER};
use super::over::{OverIndex, OversCount};

/// Append-only record of every delivery in an innings. Truncation from the
/// tail (undo) is the only other mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct BallLedger {
    deliveries: Vec<Delivery>,
}

impl BallLedger {
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    pub fn last(&self) -> Option<&Delivery> {
        self.deliveries.last()
    }

    pub fn legal_balls(&self) -> u32 {
        self.deliveries.iter().filter(|d| d.is_legal()).count() as u32
    }

    pub fn total_runs(&self) -> u32 {
        self.deliveries.iter().map(Delivery::total_runs).sum()
    }

    pub fn wickets(&self) -> u32 {
        self.deliveries.iter().filter(|d| d.is_wicket()).count() as u32
    }

    pub(crate) fn push(&mut self, delivery: Delivery) {
        self.deliveries.push(delivery);
    }

    pub(crate) fn pop(&mut self) -> Option<Delivery> {
        self.deliveries.pop()
    }
}

/// Which of the match's two teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    One,
    Two,
}

impl TeamSide {
    pub fn index(self) -> usize {
        match self {
            TeamSide::One => 0,
            TeamSide::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            TeamSide::One => TeamSide::Two,
            TeamSide::Two => TeamSide::One,
        }
    }
}

/// One team's batting turn with its own ledger and over index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Innings {
    /// 1 or 2.
    pub number: u8,
    pub batting: TeamSide,
    pub bowling: TeamSide,
    pub over_limit: u32,
    /// First-innings total the chase must exceed (innings 2 only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    pub ledger: BallLedger,
    pub overs: OverIndex,
}

impl Innings {
    pub fn first(batting: TeamSide, over_limit: u32) -> Self {
        Self {
            number: 1,
            batting,
            bowling: batting.opponent(),
            over_limit,
            target: None,
            ledger: BallLedger::default(),
            overs: OverIndex::default(),
        }
    }

    pub fn second(batting: TeamSide, over_limit: u32, target: u32) -> Self {
        Self {
            number: 2,
            batting,
            bowling: batting.opponent(),
            over_limit,
            target: Some(target),
            ledger: BallLedger::default(),
            overs: OverIndex::default(),
        }
    }

    /// Append to the ledger and file into the over index together.
    pub(crate) fn record(&mut self, delivery: Delivery) {
        let legal_before = self.ledger.legal_balls();
        self.overs.record(delivery.clone(), legal_before);
        self.ledger.push(delivery);
    }

    /// Pop the tail of the ledger and the over index together.
    pub(crate) fn pop(&mut self) -> Option<Delivery> {
        let delivery = self.ledger.pop()?;
        self.overs.pop();
        Some(delivery)
    }

    pub fn runs(&self) -> u32 {
        self.ledger.total_runs()
    }

    pub fn wickets(&self) -> u32 {
        self.ledger.wickets()
    }

    pub fn legal_balls(&self) -> u32 {
        self.ledger.legal_balls()
    }

    pub fn overs_bowled(&self) -> OversCount {
        OversCount::from_legal_balls(self.legal_balls())
    }

    pub fn ball_limit(&self) -> u32 {
        self.over_limit * BALLS_PER_OVER
    }

    pub fn balls_remaining(&self) -> u32 {
        self.ball_limit().saturating_sub(self.legal_balls())
    }

    /// Legal balls bowled so far in the over currently in progress.
    pub fn balls_into_current_over(&self) -> u32 {
        self.legal_balls() % BALLS_PER_OVER
    }

    /// Who bowled the most recently completed over, found by scanning the
    /// ledger backward from the last over boundary.
    pub fn last_completed_over_bowler(&self) -> Option<&str> {
        let completed = self.legal_balls() / BALLS_PER_OVER;
        if completed == 0 {
            return None;
        }
        self.overs
            .overs()
            .iter()
            .rev()
            .find(|over| over.number == completed - 1)
            .and_then(|over| over.bowler())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtraKind;

    fn ball(runs: u32, extra: ExtraKind, bowler: &str) -> Delivery {
        Delivery {
            runs,
            extra,
            striker: "Asha".into(),
            non_striker: "Bilal".into(),
            bowler: bowler.into(),
            dismissal: None,
        }
    }

    #[test]
    fn test_record_keeps_ledger_and_overs_in_step() {
        let mut innings = Innings::first(TeamSide::One, 2);
        for _ in 0..6 {
            innings.record(ball(1, ExtraKind::None, "Zane"));
        }
        innings.record(ball(0, ExtraKind::Wide, "Yuki"));
        assert_eq!(innings.ledger.len(), 7);
        assert_eq!(innings.overs.len(), 2);
        assert_eq!(innings.runs(), 7);
        assert_eq!(innings.legal_balls(), 6);
        assert_eq!(innings.balls_remaining(), 6);
        assert_eq!(innings.balls_into_current_over(), 0);

        let popped = innings.pop().map(|d| d.extra);
        assert_eq!(popped, Some(ExtraKind::Wide));
        assert_eq!(innings.overs.len(), 1);
    }

    #[test]
    fn test_last_completed_over_bowler() {
        let mut innings = Innings::first(TeamSide::Two, 5);
        assert_eq!(innings.last_completed_over_bowler(), None);
        for _ in 0..6 {
            innings.record(ball(0, ExtraKind::None, "Zane"));
        }
        assert_eq!(innings.last_completed_over_bowler(), Some("Zane"));
        innings.record(ball(0, ExtraKind::None, "Yuki"));
        assert_eq!(innings.last_completed_over_bowler(), Some("Zane"));
        assert_eq!(innings.bowling, TeamSide::One);
    }
}
