//! Command/undo log.
//!
//! Two strategies live side by side:
//! - Arithmetic undo for ordinary deliveries: the stat deltas and the strike
//!   decision are recomputed from the removed ball and applied in reverse.
//! - Snapshot undo for wickets and substitutions: the crease and both
//!   rosters are restored verbatim from the copy taken before the command.
//!   A wicket's replacement is a separate later command, so its effects
//!   cannot be unwound arithmetically.

use super::{stats, strike, Crease, ScoringEngine};
use crate::error::{Result, ScoringError};
use crate::models::{End, Team, BALLS_PER_OVER};

/// Crease and full roster state captured before a non-invertible command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RosterSnapshot {
    crease: Crease,
    teams: [Team; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UndoEntry {
    /// Non-wicket delivery, reversed arithmetically.
    Delivery,
    /// Wicket delivery, reversed from the pre-wicket snapshot.
    WicketDelivery(Box<RosterSnapshot>),
    /// Batter replacement, retirement, or player swap.
    Substitution(Box<RosterSnapshot>),
}

impl UndoEntry {
    fn removes_delivery(&self) -> bool {
        !matches!(self, UndoEntry::Substitution(_))
    }
}

/// LIFO log. Only the most recent entry is part of the undo contract, but
/// the log keeps every entry of the current innings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct UndoLog {
    entries: Vec<UndoEntry>,
}

impl UndoLog {
    pub(crate) fn push(&mut self, entry: UndoEntry) {
        self.entries.push(entry);
    }

    fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    fn last(&self) -> Option<&UndoEntry> {
        self.entries.last()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScoringEngine {
    pub(crate) fn roster_snapshot(&self) -> RosterSnapshot {
        RosterSnapshot { crease: self.crease.clone(), teams: self.teams.clone() }
    }

    fn restore(&mut self, snapshot: RosterSnapshot) {
        self.crease = snapshot.crease;
        self.teams = snapshot.teams;
    }

    /// Reverse the most recent delivery or substitution.
    pub fn undo_last(&mut self) -> Result<()> {
        let removes_delivery = match self.undo.last() {
            Some(entry) => entry.removes_delivery(),
            None => return Err(ScoringError::NothingToUndo),
        };
        if removes_delivery && self.innings.ledger.is_empty() {
            return Err(ScoringError::NothingToUndo);
        }
        let Some(entry) = self.undo.pop() else {
            return Err(ScoringError::NothingToUndo);
        };

        match entry {
            UndoEntry::Substitution(snapshot) => {
                self.restore(*snapshot);
                log::debug!("Undo: substitution");
            }
            UndoEntry::WicketDelivery(snapshot) => {
                let removed = self.innings.pop();
                self.restore(*snapshot);
                if let Some(d) = removed {
                    log::debug!("Undo: wicket of {}", d.dismissed_batter().unwrap_or("?"));
                }
            }
            UndoEntry::Delivery => self.undo_arithmetic(),
        }

        if removes_delivery && self.innings.ledger.is_empty() {
            self.reopen_before_first_ball();
        }
        self.reevaluate_after_undo();
        Ok(())
    }

    /// Nothing is left to derive the pair from: fall back to the openers
    /// and have the caller re-confirm the non-striker.
    fn reopen_before_first_ball(&mut self) {
        let crease = &mut self.crease;
        crease.striker = crease.opening_striker.or(crease.striker);
        crease.non_striker = crease.opening_non_striker.or(crease.non_striker);
        crease.pending_batsman = Some(End::NonStriker);
        log::debug!("Undo: back before the first ball, awaiting the non-striker");
    }

    fn undo_arithmetic(&mut self) {
        let Some(delivery) = self.innings.pop() else {
            return;
        };
        let striker = self.batting_team().index_of(&delivery.striker);
        let non_striker = self.batting_team().index_of(&delivery.non_striker);
        let bowler = self.bowling_team().index_of(&delivery.bowler);

        if let (Some(s), Some(b)) = (striker, bowler) {
            let (batting, bowling) = self.teams_mut();
            stats::revert(&mut batting.players[s], &mut bowling.players[b], &delivery);
        } else {
            log::warn!(
                "Undo: {} or {} missing from the rosters",
                delivery.striker,
                delivery.bowler
            );
        }

        let completed_over =
            delivery.is_legal() && (self.innings.legal_balls() + 1) % BALLS_PER_OVER == 0;
        if strike::should_swap(&delivery, completed_over) {
            self.crease.swap();
        }
        // The removed ball names who was on strike; the ledger wins if the
        // ends were changed by hand since.
        if let Some(s) = striker {
            self.crease.put_on_strike(s);
        }
        if self.crease.striker != striker || self.crease.non_striker != non_striker {
            self.crease.striker = striker;
            self.crease.non_striker = non_striker;
        }
        self.crease.bowler = bowler;
        self.crease.awaiting_bowler = false;
        log::debug!(
            "Undo: {} from {} to {}",
            delivery.notation(),
            delivery.bowler,
            delivery.striker
        );
    }
}
