//! Full-innings scorecard views.
//!
//! Everything here is rebuilt from an innings' ledger and the two rosters;
//! nothing is cached. Empty input gives zeroed totals and empty lists.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::partnership::{highest_partnership, Partnership};
use crate::models::{Dismissal, ExtraKind, Innings, OversCount, PlayerStatus, Team};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtrasBreakdown {
    /// Wide runs including the penalty.
    pub wides: u32,
    /// No-ball penalty plus the runs scored off that ball. The batter is
    /// still credited with the runs off the bat.
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
    pub total: u32,
}

/// Extras column of a scorecard. Wides and no-balls count their penalty
/// plus every run on the delivery, so `total` overlaps batter runs scored
/// off no-balls.
pub fn extras(innings: &Innings) -> ExtrasBreakdown {
    let mut out = ExtrasBreakdown::default();
    for d in innings.ledger.deliveries() {
        let runs = match d.extra {
            ExtraKind::NoBall => d.total_runs(),
            _ => d.extra_runs(),
        };
        match d.extra {
            ExtraKind::None => continue,
            ExtraKind::Wide => out.wides += runs,
            ExtraKind::NoBall => out.no_balls += runs,
            ExtraKind::Bye => out.byes += runs,
            ExtraKind::LegBye => out.leg_byes += runs,
        }
        out.total += runs;
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FallOfWicket {
    pub wicket_number: u32,
    pub score: u32,
    pub batter: String,
    pub dismissal: Dismissal,
    /// Overs bowled up to and including the wicket ball.
    pub overs: OversCount,
}

pub fn fall_of_wickets(innings: &Innings) -> Vec<FallOfWicket> {
    let mut score = 0;
    let mut legal = 0;
    let mut fallen = Vec::new();
    for d in innings.ledger.deliveries() {
        score += d.total_runs();
        legal += u32::from(d.is_legal());
        if let (Some(dismissal), Some(batter)) = (d.dismissal, d.dismissed_batter()) {
            fallen.push(FallOfWicket {
                wicket_number: fallen.len() as u32 + 1,
                score,
                batter: batter.to_string(),
                dismissal,
                overs: OversCount::from_legal_balls(legal),
            });
        }
    }
    fallen
}

/// One over as a line of ball notations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OverSummary {
    /// One-based, as read out on the ground.
    pub number: u32,
    pub bowler: String,
    pub balls: Vec<String>,
    pub runs: u32,
    pub wickets: u32,
}

pub fn over_breakdown(innings: &Innings) -> Vec<OverSummary> {
    innings
        .overs
        .overs()
        .iter()
        .map(|over| OverSummary {
            number: over.number + 1,
            bowler: over
                .bowler()
                .or_else(|| over.deliveries.last().map(|d| d.bowler.as_str()))
                .unwrap_or_default()
                .to_string(),
            balls: over.deliveries.iter().map(|d| d.notation()).collect(),
            runs: over.runs(),
            wickets: over.wickets(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BattingRow {
    pub name: String,
    pub status: PlayerStatus,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
}

impl BattingRow {
    pub fn has_batted(&self) -> bool {
        self.status != PlayerStatus::Available || self.balls > 0
    }
}

/// One row per roster player, in batting-order position.
pub fn batting_table(team: &Team) -> Vec<BattingRow> {
    team.players
        .iter()
        .map(|p| BattingRow {
            name: p.name.clone(),
            status: p.status,
            runs: p.batting.runs,
            balls: p.batting.balls,
            fours: p.batting.fours,
            sixes: p.batting.sixes,
            strike_rate: p.batting.strike_rate(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BowlingRow {
    pub name: String,
    pub overs: OversCount,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub economy: f64,
}

/// Only players who have bowled a ball or conceded a run.
pub fn bowling_table(team: &Team) -> Vec<BowlingRow> {
    team.players
        .iter()
        .filter(|p| p.bowling.has_bowled())
        .map(|p| BowlingRow {
            name: p.name.clone(),
            overs: p.bowling.overs(),
            runs_conceded: p.bowling.runs_conceded,
            wickets: p.bowling.wickets,
            economy: p.bowling.economy(),
        })
        .collect()
}

/// Printable scorecard for one innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InningsCard {
    pub number: u8,
    pub batting_team: String,
    pub bowling_team: String,
    pub runs: u32,
    pub wickets: u32,
    pub overs: OversCount,
    pub batting: Vec<BattingRow>,
    pub bowling: Vec<BowlingRow>,
    pub extras: ExtrasBreakdown,
    pub fall_of_wickets: Vec<FallOfWicket>,
    pub overs_breakdown: Vec<OverSummary>,
    pub highest_partnership: Option<Partnership>,
}

impl InningsCard {
    /// `batting` and `bowling` are the innings' batting and fielding sides.
    pub fn build(innings: &Innings, batting: &Team, bowling: &Team) -> Self {
        Self {
            number: innings.number,
            batting_team: batting.name.clone(),
            bowling_team: bowling.name.clone(),
            runs: innings.runs(),
            wickets: innings.wickets(),
            overs: innings.overs_bowled(),
            batting: batting_table(batting),
            bowling: bowling_table(bowling),
            extras: extras(innings),
            fall_of_wickets: fall_of_wickets(innings),
            overs_breakdown: over_breakdown(innings),
            highest_partnership: highest_partnership(innings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Delivery, End, TeamSide};

    fn ball(runs: u32, extra: ExtraKind, dismissal: Option<Dismissal>) -> Delivery {
        Delivery {
            runs,
            extra,
            striker: "Asha".into(),
            non_striker: "Bilal".into(),
            bowler: "Zane".into(),
            dismissal,
        }
    }

    fn sample() -> Innings {
        let mut innings = Innings::first(TeamSide::One, 20);
        innings.record(ball(1, ExtraKind::Wide, None));
        innings.record(ball(4, ExtraKind::NoBall, None));
        innings.record(ball(2, ExtraKind::Bye, None));
        innings.record(ball(1, ExtraKind::LegBye, None));
        innings.record(ball(0, ExtraKind::None, Some(Dismissal::Caught)));
        innings.record(ball(1, ExtraKind::None, Some(Dismissal::RunOut { end: End::NonStriker })));
        innings
    }

    #[test]
    fn test_extras_breakdown() {
        let extras = extras(&sample());
        assert_eq!(
            extras,
            ExtrasBreakdown { wides: 2, no_balls: 5, byes: 2, leg_byes: 1, total: 10 }
        );
        assert_eq!(super::extras(&Innings::first(TeamSide::One, 5)), ExtrasBreakdown::default());
    }

    #[test]
    fn test_no_ball_extras_include_runs_off_the_bat() {
        use crate::config::tests::setup;
        use crate::engine::ScoringEngine;
        use crate::models::DeliveryInput;

        let mut engine = ScoringEngine::new(&setup(2, 3)).unwrap();
        engine.select_striker("L1").unwrap();
        engine.select_non_striker("L2").unwrap();
        engine.select_bowler("T1").unwrap();
        engine.record_delivery(DeliveryInput::no_ball(4)).unwrap();

        let extras = extras(engine.innings());
        assert_eq!(extras.no_balls, 5);
        assert_eq!(extras.total, 5);
        let striker = engine.batting_team().player("L1").unwrap();
        assert_eq!(striker.batting.runs, 4);
    }

    #[test]
    fn test_fall_of_wickets() {
        let fow = fall_of_wickets(&sample());
        assert_eq!(fow.len(), 2);
        assert_eq!(fow[0].score, 10);
        assert_eq!(fow[0].batter, "Asha");
        assert_eq!(fow[0].overs.to_string(), "0.3");
        assert_eq!(fow[1].wicket_number, 2);
        assert_eq!(fow[1].score, 11);
        assert_eq!(fow[1].batter, "Bilal");
    }

    #[test]
    fn test_over_breakdown() {
        let overs = over_breakdown(&sample());
        assert_eq!(overs.len(), 1);
        assert_eq!(overs[0].number, 1);
        assert_eq!(overs[0].balls, vec!["2wd", "nb+4", "2b", "1lb", "W", "W+1"]);
        assert_eq!(overs[0].runs, 11);
        assert_eq!(overs[0].wickets, 2);
        assert_eq!(overs[0].bowler, "Zane");
    }

    #[test]
    fn test_tables() {
        let mut team = Team::new("Lions", ["Asha", "Bilal", "Chen"]);
        team.players[0].batting.runs = 12;
        team.players[0].batting.balls = 8;
        team.players[0].status = PlayerStatus::Out;
        team.players[1].bowling.balls = 6;
        team.players[1].bowling.runs_conceded = 9;

        let batting = batting_table(&team);
        assert_eq!(batting.len(), 3);
        assert!((batting[0].strike_rate - 150.0).abs() < 1e-9);
        assert!(batting[0].has_batted());
        assert!(!batting[2].has_batted());

        let bowling = bowling_table(&team);
        assert_eq!(bowling.len(), 1);
        assert_eq!(bowling[0].name, "Bilal");
        assert!((bowling[0].economy - 9.0).abs() < 1e-9);
    }
}
