use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Player;

/// A named side with its ordered roster. Whether it bats or bowls is a
/// property of the innings, not of the team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    pub fn new<I, S>(name: impl Into<String>, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { name: name.into(), players: players.into_iter().map(Player::new).collect() }
    }

    /// Roster position of the player with this exact name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Case-insensitive name clash check used when entering a squad.
    pub fn has_duplicate_name(&self, name: &str) -> bool {
        let lowered = name.trim().to_lowercase();
        self.players.iter().any(|p| p.name.to_lowercase() == lowered)
    }

    /// Wickets that end an innings: one batter is always left not out.
    pub fn max_wickets(&self) -> u32 {
        self.players.len().saturating_sub(1) as u32
    }
}
