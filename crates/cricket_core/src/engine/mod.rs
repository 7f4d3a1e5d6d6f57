//! Live scoring engine.
//!
//! `ScoringEngine` is the single owner of all mutable match state. Callers
//! issue commands one at a time; each either applies completely or is
//! rejected with a `ScoringError` and leaves the state untouched.
//!
//! ## Delivery pipeline
//!
//! ```text
//! record_delivery(input)
//!   ├─ validate phase, prompts, selected actors, dismissal/extra combination
//!   ├─ snapshot crease + rosters (wickets only)      → undo log
//!   ├─ append to ledger + over index                 (models::innings)
//!   ├─ credit striker and bowler                     (stats)
//!   ├─ rotate strike                                 (strike)
//!   ├─ apply wicket, await replacement               (dismissal)
//!   ├─ sixth legal ball: await next bowler
//!   └─ evaluate innings/match completion             (lifecycle)
//! ```
//!
//! Derived figures (score, rates, partnership) are never stored; they are
//! recomputed from the ledger by `analysis` on demand.

pub mod dismissal;
pub mod lifecycle;
pub mod stats;
pub mod strike;
pub(crate) mod undo;

pub use dismissal::Crease;
pub use lifecycle::{classify_result, innings_complete, InningsPhase};

use uuid::Uuid;

use crate::analysis::ScoreSummary;
use crate::config::MatchSetup;
use crate::error::{Result, ScoringError, SetupError};
use crate::models::{
    Delivery, DeliveryInput, End, Innings, MatchEvent, MatchResult, Player, Team, TeamSide,
    BALLS_PER_OVER,
};
use crate::snapshot::MatchSnapshot;
use undo::{UndoEntry, UndoLog};

#[derive(Debug, Clone)]
pub struct ScoringEngine {
    match_id: Uuid,
    started_at_ms: u64,
    teams: [Team; 2],
    total_overs: u32,
    /// Archived once the second innings starts.
    first_innings: Option<Innings>,
    innings: Innings,
    phase: InningsPhase,
    target: Option<u32>,
    revised_overs: Option<u32>,
    result: Option<MatchResult>,
    crease: Crease,
    undo: UndoLog,
    events: Vec<MatchEvent>,
}

impl ScoringEngine {
    pub fn new(setup: &MatchSetup) -> std::result::Result<Self, SetupError> {
        setup.validate()?;
        let batting_first = setup.batting_first()?;
        let match_id = setup.resolve_match_id()?;
        log::info!(
            "New match {}: {} v {}, {} overs",
            match_id,
            setup.team_one.name,
            setup.team_two.name,
            setup.total_overs
        );
        Ok(Self {
            match_id,
            started_at_ms: crate::snapshot::current_timestamp(),
            teams: setup.teams(),
            total_overs: setup.total_overs,
            first_innings: None,
            innings: Innings::first(batting_first, setup.total_overs),
            phase: InningsPhase::InningsOneActive,
            target: None,
            revised_overs: None,
            result: None,
            crease: Crease::default(),
            undo: UndoLog::default(),
            events: Vec::new(),
        })
    }

    /// Discard everything and begin again from a fresh setup.
    pub fn start_new_match(&mut self, setup: &MatchSetup) -> std::result::Result<(), SetupError> {
        *self = Self::new(setup)?;
        Ok(())
    }

    // ========================
    // Recording
    // ========================

    /// Append one ball and apply everything that follows from it.
    pub fn record_delivery(&mut self, input: DeliveryInput) -> Result<()> {
        self.ensure_ready_to_bowl()?;
        if let Some(dismissal) = input.dismissal {
            if !dismissal.allowed_with(input.extra) {
                return Err(ScoringError::InvalidDelivery(format!(
                    "{} is not possible on a {:?} delivery",
                    dismissal.label(),
                    input.extra
                )));
            }
        }
        let (Some(striker), Some(non_striker), Some(bowler)) =
            (self.crease.striker, self.crease.non_striker, self.crease.bowler)
        else {
            return Err(ScoringError::state("striker, non-striker and bowler must be selected"));
        };

        let delivery = Delivery {
            runs: input.runs,
            extra: input.extra,
            striker: self.batting_team().players[striker].name.clone(),
            non_striker: self.batting_team().players[non_striker].name.clone(),
            bowler: self.bowling_team().players[bowler].name.clone(),
            dismissal: input.dismissal,
        };
        let completes_over =
            delivery.is_legal() && (self.innings.legal_balls() + 1) % BALLS_PER_OVER == 0;

        let entry = if delivery.is_wicket() {
            UndoEntry::WicketDelivery(Box::new(self.roster_snapshot()))
        } else {
            UndoEntry::Delivery
        };

        self.innings.record(delivery.clone());
        {
            let (batting, bowling) = self.teams_mut();
            stats::apply(&mut batting.players[striker], &mut bowling.players[bowler], &delivery);
        }
        if strike::should_swap(&delivery, completes_over) {
            self.crease.swap();
        }
        if let Some(dismissal) = delivery.dismissal {
            self.apply_dismissal(dismissal);
        }
        if completes_over {
            self.crease.awaiting_bowler = true;
            let over = self.innings.legal_balls() / BALLS_PER_OVER - 1;
            let runs = self.innings.overs.last().map(|o| o.runs()).unwrap_or_default();
            self.events.push(MatchEvent::OverCompleted {
                innings: self.innings.number,
                over,
                bowler: delivery.bowler.clone(),
                runs,
            });
        }
        self.undo.push(entry);

        log::debug!(
            "Ball {}: {} to {} -> {}/{}",
            self.innings.overs_bowled(),
            delivery.bowler,
            delivery.striker,
            self.innings.runs(),
            self.innings.wickets()
        );
        self.evaluate_lifecycle();
        Ok(())
    }

    fn ensure_ready_to_bowl(&self) -> Result<()> {
        self.ensure_play_open()?;
        if let Some(end) = self.crease.pending_batsman {
            return Err(ScoringError::state(format!("awaiting a new batter at the {} end", end)));
        }
        if self.crease.awaiting_bowler {
            return Err(ScoringError::state("awaiting a bowler for the next over"));
        }
        if self.crease.striker.is_none() {
            return Err(ScoringError::state("no striker selected"));
        }
        if self.crease.non_striker.is_none() {
            return Err(ScoringError::state("no non-striker selected"));
        }
        if self.crease.bowler.is_none() {
            return Err(ScoringError::state("no bowler selected"));
        }
        Ok(())
    }

    pub(crate) fn ensure_play_open(&self) -> Result<()> {
        if self.phase.accepts_play() {
            return Ok(());
        }
        Err(ScoringError::state(match self.phase {
            InningsPhase::InningsOneComplete => {
                "first innings is complete; start the second innings"
            }
            _ => "the match is complete",
        }))
    }

    pub(crate) fn teams_mut(&mut self) -> (&mut Team, &mut Team) {
        let [one, two] = &mut self.teams;
        match self.innings.batting {
            TeamSide::One => (one, two),
            TeamSide::Two => (two, one),
        }
    }

    // ========================
    // Read access
    // ========================

    pub fn match_id(&self) -> Uuid {
        self.match_id
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        &self.teams[side.index()]
    }

    pub fn batting_team(&self) -> &Team {
        self.team(self.innings.batting)
    }

    pub fn bowling_team(&self) -> &Team {
        self.team(self.innings.bowling)
    }

    pub fn total_overs(&self) -> u32 {
        self.total_overs
    }

    /// The innings in progress (or just finished).
    pub fn innings(&self) -> &Innings {
        &self.innings
    }

    /// Innings one, once archived by `start_second_innings`.
    pub fn first_innings(&self) -> Option<&Innings> {
        self.first_innings.as_ref()
    }

    pub fn phase(&self) -> InningsPhase {
        self.phase
    }

    /// First-innings total, set when innings one completes.
    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn is_innings_over_ready(&self) -> bool {
        self.phase == InningsPhase::InningsOneComplete
    }

    pub fn is_match_complete(&self) -> bool {
        self.phase == InningsPhase::MatchComplete
    }

    pub fn crease(&self) -> &Crease {
        &self.crease
    }

    pub fn awaiting_batsman(&self) -> Option<End> {
        self.crease.pending_batsman
    }

    pub fn awaiting_bowler(&self) -> bool {
        self.crease.awaiting_bowler
    }

    pub fn striker(&self) -> Option<&Player> {
        self.crease.striker.map(|i| &self.batting_team().players[i])
    }

    pub fn non_striker(&self) -> Option<&Player> {
        self.crease.non_striker.map(|i| &self.batting_team().players[i])
    }

    pub fn bowler(&self) -> Option<&Player> {
        self.crease.bowler.map(|i| &self.bowling_team().players[i])
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Take the notifications queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary::from_engine(self)
    }

    /// Owned, immutable copy of the whole match for export or storage.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::from_engine(self)
    }
}
