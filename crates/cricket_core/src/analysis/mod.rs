//! Derived match views.
//!
//! Pure read functions over an innings ledger and the rosters. They never
//! fail and never mutate: empty input gives zeroes and empty lists.
//!
//! - `rates`: run rate, projected score, required rate
//! - `partnership`: current and highest stands
//! - `scorecard`: extras, fall of wickets, over-by-over, batting/bowling tables
//! - `summary`: the live `ScoreSummary`

pub mod partnership;
pub mod rates;
pub mod scorecard;
pub mod summary;

pub use partnership::{current_partnership, highest_partnership, partnerships, Partnership};
pub use rates::{projected_score, required_run_rate, run_rate, runs_needed};
pub use scorecard::{
    batting_table, bowling_table, extras, fall_of_wickets, over_breakdown, BattingRow, BowlingRow,
    ExtrasBreakdown, FallOfWicket, InningsCard, OverSummary,
};
pub use summary::ScoreSummary;
