//! Player stat aggregation.
//!
//! Figures are derived incrementally from each ledger entry. `revert` uses
//! the same predicates as `apply`, so the pair is an exact inverse.

use crate::models::{Delivery, Player};

/// Credit one delivery to the striker and the bowler.
pub fn apply(striker: &mut Player, bowler: &mut Player, delivery: &Delivery) {
    let batting = &mut striker.batting;
    batting.runs += delivery.batter_runs();
    batting.balls += u32::from(delivery.counts_as_ball_faced());
    batting.fours += u32::from(delivery.is_four());
    batting.sixes += u32::from(delivery.is_six());

    let bowling = &mut bowler.bowling;
    bowling.balls += u32::from(delivery.is_legal());
    bowling.runs_conceded += delivery.total_runs();
    bowling.wickets += u32::from(bowler_wicket(delivery));
}

/// Take one delivery back off the striker and the bowler.
pub fn revert(striker: &mut Player, bowler: &mut Player, delivery: &Delivery) {
    let batting = &mut striker.batting;
    batting.runs = batting.runs.saturating_sub(delivery.batter_runs());
    batting.balls = batting.balls.saturating_sub(u32::from(delivery.counts_as_ball_faced()));
    batting.fours = batting.fours.saturating_sub(u32::from(delivery.is_four()));
    batting.sixes = batting.sixes.saturating_sub(u32::from(delivery.is_six()));

    let bowling = &mut bowler.bowling;
    bowling.balls = bowling.balls.saturating_sub(u32::from(delivery.is_legal()));
    bowling.runs_conceded = bowling.runs_conceded.saturating_sub(delivery.total_runs());
    bowling.wickets = bowling.wickets.saturating_sub(u32::from(bowler_wicket(delivery)));
}

fn bowler_wicket(delivery: &Delivery) -> bool {
    delivery.dismissal.is_some_and(|d| d.credited_to_bowler())
}
