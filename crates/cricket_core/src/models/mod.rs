pub mod delivery;
pub mod events;
pub mod innings;
pub mod over;
pub mod player;
pub mod result;
pub mod team;

#[cfg(test)]
pub(crate) mod proptest_gen;

pub use delivery::{Delivery, DeliveryInput, Dismissal, End, ExtraKind, BALLS_PER_OVER};
pub use events::MatchEvent;
pub use innings::{BallLedger, Innings, TeamSide};
pub use over::{Over, OverIndex, OversCount};
pub use player::{BattingFigures, BowlingFigures, Player, PlayerStatus};
pub use result::MatchResult;
pub use team::Team;
