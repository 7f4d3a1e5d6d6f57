//! Scoring rates.
//!
//! All rates are per six legal balls and fall back to `0.0` before the
//! first legal ball.

use crate::models::{Innings, BALLS_PER_OVER};

fn per_over(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    runs as f64 / (balls as f64 / BALLS_PER_OVER as f64)
}

pub fn run_rate(innings: &Innings) -> f64 {
    per_over(innings.runs(), innings.legal_balls())
}

/// Current run rate carried over the full over limit, rounded.
pub fn projected_score(innings: &Innings) -> u32 {
    (run_rate(innings) * innings.over_limit as f64).round() as u32
}

/// Runs still needed to pass the target. `None` outside a chase.
pub fn runs_needed(innings: &Innings) -> Option<u32> {
    innings.target.map(|target| (target + 1).saturating_sub(innings.runs()))
}

/// `None` outside a chase; `0.0` once the target is passed or the balls
/// have run out.
pub fn required_run_rate(innings: &Innings) -> Option<f64> {
    let needed = runs_needed(innings)?;
    let balls = innings.balls_remaining();
    if needed == 0 || balls == 0 {
        return Some(0.0);
    }
    Some(per_over(needed, balls))
}
