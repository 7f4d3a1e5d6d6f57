//! Innings lifecycle.
//!
//! `InningsOneActive → InningsOneComplete → InningsTwoActive → MatchComplete`.
//! Innings one completing only raises a flag and fixes the target; the
//! second innings opens on an explicit `start_second_innings`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ScoringEngine;
use crate::error::{Result, ScoringError};
use crate::models::{Innings, MatchEvent, MatchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InningsPhase {
    InningsOneActive,
    /// Innings one is over; waiting for the manual advance.
    InningsOneComplete,
    InningsTwoActive,
    MatchComplete,
}

impl InningsPhase {
    /// Whether deliveries and selections are accepted in this phase.
    pub fn accepts_play(self) -> bool {
        matches!(self, InningsPhase::InningsOneActive | InningsPhase::InningsTwoActive)
    }
}

/// All out or out of balls.
pub fn innings_complete(innings: &Innings, max_wickets: u32) -> bool {
    innings.wickets() >= max_wickets || innings.legal_balls() >= innings.ball_limit()
}

/// Decide the chase, or `None` while it is still live.
pub fn classify_result(
    innings: &Innings,
    max_wickets: u32,
    batting_team: &str,
    bowling_team: &str,
) -> Option<MatchResult> {
    let target = innings.target?;
    let score = innings.runs();

    if score > target {
        let wickets = max_wickets.saturating_sub(innings.wickets());
        return Some(MatchResult::WonByWickets { winner: batting_team.to_string(), wickets });
    }
    if !innings_complete(innings, max_wickets) {
        return None;
    }
    if score == target {
        Some(MatchResult::Tie)
    } else {
        Some(MatchResult::WonByRuns { winner: bowling_team.to_string(), runs: target - score })
    }
}

impl ScoringEngine {
    /// Run after every recorded delivery. Each transition fires once: the
    /// phase check keeps a second evaluation from re-raising it.
    pub(crate) fn evaluate_lifecycle(&mut self) {
        let max_wickets = self.batting_team().max_wickets();
        match self.phase {
            InningsPhase::InningsOneActive => {
                if !innings_complete(&self.innings, max_wickets) {
                    return;
                }
                let target = self.innings.runs();
                self.target = Some(target);
                self.phase = InningsPhase::InningsOneComplete;
                self.crease.clear_prompts();
                self.events.push(MatchEvent::InningsOverReady { target });
                log::info!(
                    "First innings complete: {}/{} in {} overs. Target: {}",
                    target,
                    self.innings.wickets(),
                    self.innings.overs_bowled(),
                    target + 1
                );
            }
            InningsPhase::InningsTwoActive => {
                let result = classify_result(
                    &self.innings,
                    max_wickets,
                    &self.batting_team().name,
                    &self.bowling_team().name,
                );
                if let Some(result) = result {
                    self.phase = InningsPhase::MatchComplete;
                    self.crease.clear_prompts();
                    log::info!("Match complete: {}", result);
                    self.events.push(MatchEvent::MatchCompleted { result: result.clone() });
                    self.result = Some(result);
                }
            }
            InningsPhase::InningsOneComplete | InningsPhase::MatchComplete => {}
        }
    }

    /// Withdraw a completion that the undone delivery had triggered.
    pub(crate) fn reevaluate_after_undo(&mut self) {
        let max_wickets = self.batting_team().max_wickets();
        match self.phase {
            InningsPhase::InningsOneComplete if !innings_complete(&self.innings, max_wickets) => {
                self.phase = InningsPhase::InningsOneActive;
                self.target = None;
                log::info!("First innings reopened by undo");
            }
            InningsPhase::MatchComplete => {
                let still_decided = classify_result(
                    &self.innings,
                    max_wickets,
                    &self.batting_team().name,
                    &self.bowling_team().name,
                )
                .is_some();
                if !still_decided {
                    self.phase = InningsPhase::InningsTwoActive;
                    self.result = None;
                    log::info!("Match result withdrawn by undo");
                }
            }
            _ => {}
        }
    }

    /// Archive innings one and open the chase with the teams' roles swapped.
    pub fn start_second_innings(&mut self) -> Result<()> {
        if self.phase != InningsPhase::InningsOneComplete {
            return Err(ScoringError::state(format!(
                "second innings can only start once the first is complete (phase: {:?})",
                self.phase
            )));
        }
        let target = self
            .target
            .ok_or_else(|| ScoringError::state("first innings finished without a target"))?;

        let over_limit = self.revised_overs.unwrap_or(self.total_overs);
        let chasing = self.innings.bowling;
        let second = Innings::second(chasing, over_limit, target);
        let first = std::mem::replace(&mut self.innings, second);
        self.first_innings = Some(first);
        self.phase = InningsPhase::InningsTwoActive;
        self.crease = Default::default();
        self.undo.clear();

        let batting_team = self.batting_team().name.clone();
        log::info!(
            "Second innings started: {} need {} from {} overs",
            batting_team,
            target + 1,
            over_limit
        );
        self.events.push(MatchEvent::SecondInningsStarted { batting_team, target });
        Ok(())
    }

    /// Shorten the chase (e.g. weather). Applies at the advance when set
    /// while innings one awaits it.
    pub fn revise_second_innings_overs(&mut self, overs: u32) -> Result<()> {
        if overs == 0 || overs > self.total_overs {
            return Err(ScoringError::selection(format!(
                "revised overs must be between 1 and {}",
                self.total_overs
            )));
        }
        match self.phase {
            InningsPhase::InningsOneComplete => {}
            InningsPhase::InningsTwoActive => {
                if overs * crate::models::BALLS_PER_OVER <= self.innings.legal_balls() {
                    return Err(ScoringError::state(format!(
                        "{} overs have already been bowled",
                        self.innings.overs_bowled()
                    )));
                }
                self.innings.over_limit = overs;
            }
            phase => {
                return Err(ScoringError::state(format!(
                    "second-innings overs cannot be revised during {:?}",
                    phase
                )));
            }
        }
        self.revised_overs = Some(overs);
        log::info!("Second innings revised to {} overs", overs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Delivery, ExtraKind, TeamSide};

    fn chase(target: u32, over_limit: u32, runs: &[u32], wickets: usize) -> Innings {
        let mut innings = Innings::second(TeamSide::Two, over_limit, target);
        for (i, r) in runs.iter().enumerate() {
            innings.record(Delivery {
                runs: *r,
                extra: ExtraKind::None,
                striker: "T1".into(),
                non_striker: "T2".into(),
                bowler: "L1".into(),
                dismissal: (i < wickets).then_some(crate::models::Dismissal::Bowled),
            });
        }
        innings
    }

    #[test]
    fn test_chase_still_live() {
        let innings = chase(10, 2, &[1, 1, 1], 0);
        assert_eq!(classify_result(&innings, 10, "Tigers", "Lions"), None);
    }

    #[test]
    fn test_win_by_wickets() {
        let innings = chase(10, 2, &[6, 4, 1], 1);
        assert_eq!(
            classify_result(&innings, 10, "Tigers", "Lions"),
            Some(MatchResult::WonByWickets { winner: "Tigers".into(), wickets: 9 })
        );
    }

    #[test]
    fn test_tie_and_win_by_runs_when_out_of_balls() {
        let innings = chase(6, 1, &[1; 6], 0);
        assert_eq!(classify_result(&innings, 10, "Tigers", "Lions"), Some(MatchResult::Tie));

        let innings = chase(10, 1, &[1; 6], 0);
        assert_eq!(
            classify_result(&innings, 10, "Tigers", "Lions"),
            Some(MatchResult::WonByRuns { winner: "Lions".into(), runs: 4 })
        );
    }

    #[test]
    fn test_only_active_phases_accept_play() {
        assert!(InningsPhase::InningsOneActive.accepts_play());
        assert!(InningsPhase::InningsTwoActive.accepts_play());
        assert!(!InningsPhase::InningsOneComplete.accepts_play());
        assert!(!InningsPhase::MatchComplete.accepts_play());
    }

    #[test]
    fn test_all_out_short_of_target() {
        let innings = chase(50, 20, &[0, 0], 2);
        assert_eq!(
            classify_result(&innings, 2, "Tigers", "Lions"),
            Some(MatchResult::WonByRuns { winner: "Lions".into(), runs: 50 })
        );
        assert!(innings_complete(&innings, 2));
    }
}
