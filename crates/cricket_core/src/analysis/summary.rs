use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::partnership::{current_partnership, Partnership};
use super::rates::{projected_score, required_run_rate, run_rate, runs_needed};
use crate::engine::{InningsPhase, ScoringEngine};
use crate::models::{End, MatchResult, OversCount};

/// Live score state for a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreSummary {
    pub phase: InningsPhase,
    pub innings: u8,
    pub batting_team: String,
    pub bowling_team: String,
    pub runs: u32,
    pub wickets: u32,
    pub overs: OversCount,
    pub over_limit: u32,
    pub run_rate: f64,
    pub projected_score: u32,
    pub target: Option<u32>,
    pub runs_needed: Option<u32>,
    pub balls_remaining: u32,
    pub required_run_rate: Option<f64>,
    pub striker: Option<String>,
    pub non_striker: Option<String>,
    pub bowler: Option<String>,
    pub partnership: Partnership,
    /// Ball notations of the over in progress (or the one just finished).
    pub this_over: Vec<String>,
    pub awaiting_batsman: Option<End>,
    pub awaiting_bowler: bool,
    pub result: Option<MatchResult>,
}

impl ScoreSummary {
    pub fn from_engine(engine: &ScoringEngine) -> Self {
        let innings = engine.innings();
        let name = |p: Option<&crate::models::Player>| p.map(|p| p.name.clone());

        let mut partnership = current_partnership(innings);
        if let (Some(s), Some(n)) = (engine.striker(), engine.non_striker()) {
            partnership.batters = vec![s.name.clone(), n.name.clone()];
        }

        Self {
            phase: engine.phase(),
            innings: innings.number,
            batting_team: engine.batting_team().name.clone(),
            bowling_team: engine.bowling_team().name.clone(),
            runs: innings.runs(),
            wickets: innings.wickets(),
            overs: innings.overs_bowled(),
            over_limit: innings.over_limit,
            run_rate: run_rate(innings),
            projected_score: projected_score(innings),
            target: innings.target,
            runs_needed: runs_needed(innings),
            balls_remaining: innings.balls_remaining(),
            required_run_rate: required_run_rate(innings),
            striker: name(engine.striker()),
            non_striker: name(engine.non_striker()),
            bowler: name(engine.bowler()),
            partnership,
            this_over: innings
                .overs
                .last()
                .map(|o| o.deliveries.iter().map(|d| d.notation()).collect())
                .unwrap_or_default(),
            awaiting_batsman: engine.awaiting_batsman(),
            awaiting_bowler: engine.awaiting_bowler(),
            result: engine.result().cloned(),
        }
    }
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {}/{} ({} ov, RR {:.2})",
            self.batting_team, self.runs, self.wickets, self.overs, self.run_rate
        )?;
        if let (Some(needed), Some(rrr)) = (self.runs_needed, self.required_run_rate) {
            if self.result.is_none() {
                write!(
                    f,
                    ": need {} from {} balls (RRR {:.2})",
                    needed, self.balls_remaining, rrr
                )?;
            }
        }
        if let Some(result) = &self.result {
            write!(f, ". {}", result)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::tests::setup;
    use crate::engine::ScoringEngine;
    use crate::models::DeliveryInput;

    #[test]
    fn test_summary_tracks_live_state() {
        let mut engine = ScoringEngine::new(&setup(2, 3)).unwrap();
        engine.select_striker("L1").unwrap();
        engine.select_non_striker("L2").unwrap();
        engine.select_bowler("T1").unwrap();
        engine.record_delivery(DeliveryInput::runs(4)).unwrap();
        engine.record_delivery(DeliveryInput::wide(0)).unwrap();

        let summary = engine.summary();
        assert_eq!(summary.runs, 5);
        assert_eq!(summary.overs.to_string(), "0.1");
        assert_eq!(summary.striker.as_deref(), Some("L1"));
        assert_eq!(summary.bowler.as_deref(), Some("T1"));
        assert_eq!(summary.this_over, vec!["4", "wd"]);
        assert_eq!(summary.partnership.runs, 5);
        assert_eq!(summary.partnership.batters, vec!["L1".to_string(), "L2".to_string()]);
        assert_eq!(summary.target, None);
        assert_eq!(summary.required_run_rate, None);
        assert_eq!(summary.to_string(), "Lions 5/0 (0.1 ov, RR 30.00)");
    }

    #[test]
    fn test_summary_in_chase() {
        let mut engine = ScoringEngine::new(&setup(1, 3)).unwrap();
        engine.select_striker("L1").unwrap();
        engine.select_non_striker("L2").unwrap();
        engine.select_bowler("T1").unwrap();
        for _ in 0..6 {
            engine.record_delivery(DeliveryInput::runs(2)).unwrap();
        }
        engine.start_second_innings().unwrap();

        let summary = engine.summary();
        assert_eq!(summary.batting_team, "Tigers");
        assert_eq!(summary.target, Some(12));
        assert_eq!(summary.runs_needed, Some(13));
        assert_eq!(summary.balls_remaining, 6);
        assert_eq!(summary.required_run_rate, Some(13.0));
        assert!(summary.partnership.batters.is_empty());
        assert_eq!(
            summary.to_string(),
            "Tigers 0/0 (0.0 ov, RR 0.00): need 13 from 6 balls (RRR 13.00)"
        );
    }
}
