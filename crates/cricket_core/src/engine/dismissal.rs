//! Dismissals and crease management.
//!
//! This module contains the selection side of the engine:
//! - Who stands at each end and who bowls (`Crease`)
//! - Applying a wicket and awaiting the replacement batter
//! - Opening-pair, replacement, bowler, and substitution commands
//! - Retired hurt
//!
//! The batter and bowler prompts are independent: a wicket on the last
//! ball of an over leaves both pending.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::undo::UndoEntry;
use super::ScoringEngine;
use crate::error::{Result, ScoringError};
use crate::models::{Dismissal, End, MatchEvent, PlayerStatus};

/// Active participants, as roster positions into the batting and bowling
/// teams of the current innings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Crease {
    pub striker: Option<usize>,
    pub non_striker: Option<usize>,
    pub bowler: Option<usize>,
    /// End waiting for a new batter after a wicket or retirement.
    pub pending_batsman: Option<End>,
    /// Set once the sixth legal ball of an over has been bowled.
    pub awaiting_bowler: bool,
    pub opening_striker: Option<usize>,
    pub opening_non_striker: Option<usize>,
}

impl Crease {
    pub fn occupant(&self, end: End) -> Option<usize> {
        match end {
            End::Striker => self.striker,
            End::NonStriker => self.non_striker,
        }
    }

    pub fn end_of(&self, player: usize) -> Option<End> {
        if self.striker == Some(player) {
            Some(End::Striker)
        } else if self.non_striker == Some(player) {
            Some(End::NonStriker)
        } else {
            None
        }
    }

    fn slot_mut(&mut self, end: End) -> &mut Option<usize> {
        match end {
            End::Striker => &mut self.striker,
            End::NonStriker => &mut self.non_striker,
        }
    }

    pub(crate) fn swap(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    pub(crate) fn vacate(&mut self, end: End) -> Option<usize> {
        self.slot_mut(end).take()
    }

    /// Put `player` on strike if they are at the non-striker's end.
    pub(crate) fn put_on_strike(&mut self, player: usize) {
        if self.non_striker == Some(player) {
            self.swap();
        }
    }

    pub(crate) fn clear_prompts(&mut self) {
        self.pending_batsman = None;
        self.awaiting_bowler = false;
    }

    fn set_opener(&mut self, end: End, player: usize) {
        match end {
            End::Striker => self.opening_striker = Some(player),
            End::NonStriker => self.opening_non_striker = Some(player),
        }
    }
}

impl ScoringEngine {
    /// Mark the batter at the vacated end out and await their replacement.
    pub(crate) fn apply_dismissal(&mut self, dismissal: Dismissal) {
        let end = dismissal.vacated_end();
        if let Some(index) = self.crease.vacate(end) {
            let innings = self.innings.number;
            let score = self.innings.runs();
            let wicket_number = self.innings.wickets();
            let (batting, _) = self.teams_mut();
            let batter = &mut batting.players[index];
            batter.status = PlayerStatus::Out;
            log::info!(
                "Wicket: {} {} ({}/{})",
                batter.name,
                dismissal.label(),
                score,
                wicket_number
            );
            let batter = batter.name.clone();
            self.events.push(MatchEvent::WicketFell {
                innings,
                batter,
                dismissal,
                score,
                wicket_number,
            });
        }
        self.crease.pending_batsman = Some(end);
    }

    pub fn select_striker(&mut self, name: &str) -> Result<()> {
        self.select_at(End::Striker, name)
    }

    pub fn select_non_striker(&mut self, name: &str) -> Result<()> {
        self.select_at(End::NonStriker, name)
    }

    /// Opening selections. Once play has started an end can only be filled
    /// through a pending replacement.
    fn select_at(&mut self, end: End, name: &str) -> Result<()> {
        if self.crease.pending_batsman == Some(end) {
            return self.select_batsman(name);
        }
        self.ensure_play_open()?;
        if !self.innings.ledger.is_empty() {
            return Err(ScoringError::state(format!(
                "the {} end cannot be changed after play has started; use replace_player",
                end
            )));
        }
        let index = self.batting_index(name)?;
        self.check_batter_eligible(end, index)?;
        self.install_batter(end, index);
        self.crease.set_opener(end, index);
        log::debug!("Opening {}: {}", end, name);
        Ok(())
    }

    /// Fill the end left empty by a wicket or retirement.
    pub fn select_batsman(&mut self, name: &str) -> Result<()> {
        self.ensure_play_open()?;
        let end = self
            .crease
            .pending_batsman
            .ok_or_else(|| ScoringError::state("no batter is awaited"))?;
        let index = self.batting_index(name)?;
        self.check_batter_eligible(end, index)?;

        self.undo.push(UndoEntry::Substitution(Box::new(self.roster_snapshot())));
        self.install_batter(end, index);
        self.crease.pending_batsman = None;
        if self.innings.ledger.is_empty() {
            self.crease.set_opener(end, index);
        }
        log::debug!("New batter at the {} end: {}", end, name);
        Ok(())
    }

    /// Install the bowler for the coming over. Nobody bowls two overs in a row.
    pub fn select_bowler(&mut self, name: &str) -> Result<()> {
        self.ensure_play_open()?;
        let over_open = self.crease.awaiting_bowler
            || self.crease.bowler.is_none()
            || self.innings.balls_into_current_over() == 0;
        if !over_open {
            return Err(ScoringError::state(
                "the bowler cannot change mid-over; use replace_player",
            ));
        }
        let index = self.bowling_index(name)?;
        self.check_bowler_eligible(index)?;
        self.crease.bowler = Some(index);
        self.crease.awaiting_bowler = false;
        log::debug!("Bowler: {}", name);
        Ok(())
    }

    /// Manual strike change (e.g. batters crossed before a catch).
    pub fn swap_batsmen(&mut self) -> Result<()> {
        self.ensure_play_open()?;
        if let Some(end) = self.crease.pending_batsman {
            return Err(ScoringError::state(format!("awaiting a new batter at the {} end", end)));
        }
        if self.crease.striker.is_none() || self.crease.non_striker.is_none() {
            return Err(ScoringError::state("both batters must be selected to swap"));
        }
        self.crease.swap();
        Ok(())
    }

    /// Vacate an end without a wicket. The batter's figures stand.
    pub fn retire_hurt(&mut self, end: End) -> Result<()> {
        self.ensure_play_open()?;
        if let Some(pending) = self.crease.pending_batsman {
            return Err(ScoringError::state(format!(
                "awaiting a new batter at the {} end",
                pending
            )));
        }
        let index = self
            .crease
            .occupant(end)
            .ok_or_else(|| ScoringError::state(format!("no batter at the {} end", end)))?;

        self.undo.push(UndoEntry::Substitution(Box::new(self.roster_snapshot())));
        self.crease.vacate(end);
        self.crease.pending_batsman = Some(end);
        let innings = self.innings.number;
        let (batting, _) = self.teams_mut();
        let batter = &mut batting.players[index];
        batter.status = PlayerStatus::RetiredHurt;
        log::info!("{} retired hurt", batter.name);
        let batter = batter.name.clone();
        self.events.push(MatchEvent::BatterRetiredHurt { innings, batter, end });
        Ok(())
    }

    /// Swap a batter at the crease or the current bowler for someone else.
    pub fn replace_player(&mut self, old: &str, new: &str) -> Result<()> {
        self.ensure_play_open()?;

        let at_crease = self
            .batting_team()
            .index_of(old)
            .and_then(|i| self.crease.end_of(i).map(|end| (i, end)));
        if let Some((old_index, end)) = at_crease {
            let index = self.batting_index(new)?;
            if index == old_index {
                return Err(ScoringError::selection(format!("{} is already at the crease", new)));
            }
            self.check_batter_eligible(end, index)?;
            self.undo.push(UndoEntry::Substitution(Box::new(self.roster_snapshot())));
            self.install_batter(end, index);
            log::info!("{} replaced by {} at the {} end", old, new, end);
            return Ok(());
        }

        let bowling = self.bowling_team().index_of(old).filter(|i| self.crease.bowler == Some(*i));
        if let Some(old_index) = bowling {
            let index = self.bowling_index(new)?;
            if index == old_index {
                return Err(ScoringError::selection(format!("{} is already bowling", new)));
            }
            self.check_bowler_eligible(index)?;
            self.undo.push(UndoEntry::Substitution(Box::new(self.roster_snapshot())));
            self.crease.bowler = Some(index);
            log::info!("Bowler {} replaced by {}", old, new);
            return Ok(());
        }

        Err(ScoringError::selection(format!("{} is not on the field", old)))
    }

    fn install_batter(&mut self, end: End, index: usize) {
        let previous = self.crease.occupant(end);
        let (batting, _) = self.teams_mut();
        if let Some(prev) = previous.filter(|p| *p != index) {
            let player = &mut batting.players[prev];
            if player.status == PlayerStatus::Batting {
                player.status = PlayerStatus::Available;
            }
        }
        batting.players[index].status = PlayerStatus::Batting;
        *self.crease.slot_mut(end) = Some(index);
    }

    fn check_batter_eligible(&self, end: End, index: usize) -> Result<()> {
        let player = &self.batting_team().players[index];
        if self.crease.occupant(end.other()) == Some(index) {
            return Err(ScoringError::selection(format!(
                "{} is already batting at the {} end",
                player.name,
                end.other()
            )));
        }
        if !player.status.can_bat() {
            return Err(ScoringError::selection(format!(
                "{} cannot bat again ({:?})",
                player.name, player.status
            )));
        }
        Ok(())
    }

    fn check_bowler_eligible(&self, index: usize) -> Result<()> {
        let name = &self.bowling_team().players[index].name;
        if self.innings.last_completed_over_bowler() == Some(name.as_str()) {
            return Err(ScoringError::selection(format!(
                "{} bowled the previous over",
                name
            )));
        }
        Ok(())
    }

    fn batting_index(&self, name: &str) -> Result<usize> {
        let team = self.batting_team();
        team.index_of(name).ok_or_else(|| {
            ScoringError::selection(format!("{} is not in the batting side {}", name, team.name))
        })
    }

    fn bowling_index(&self, name: &str) -> Result<usize> {
        let team = self.bowling_team();
        team.index_of(name).ok_or_else(|| {
            ScoringError::selection(format!("{} is not in the bowling side {}", name, team.name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crease_swap_and_vacate() {
        let mut crease = Crease { striker: Some(0), non_striker: Some(1), ..Default::default() };
        crease.swap();
        assert_eq!((crease.striker, crease.non_striker), (Some(1), Some(0)));
        assert_eq!(crease.end_of(0), Some(End::NonStriker));
        assert_eq!(crease.vacate(End::Striker), Some(1));
        assert_eq!(crease.occupant(End::Striker), None);
        assert_eq!(crease.end_of(1), None);
    }

    #[test]
    fn test_put_on_strike() {
        let mut crease = Crease { striker: Some(0), non_striker: Some(1), ..Default::default() };
        crease.put_on_strike(0);
        assert_eq!(crease.striker, Some(0));
        crease.put_on_strike(1);
        assert_eq!(crease.striker, Some(1));
        assert_eq!(crease.non_striker, Some(0));
    }
}
