//! Match setup: the two squads, the over limit, and the toss.
//!
//! A setup is plain JSON. Front ends may hand one over directly; the CLI
//! also honours `CRICKET_SETUP_PATH` when no path is given.

use std::{env, fs};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SetupError;
use crate::models::{Team, TeamSide};

pub const SETUP_PATH_ENV: &str = "CRICKET_SETUP_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TeamSheet {
    pub name: String,
    pub players: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TossDecision {
    Bat,
    Bowl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Toss {
    pub winner: String,
    pub decision: TossDecision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MatchSetup {
    pub team_one: TeamSheet,
    pub team_two: TeamSheet,
    pub total_overs: u32,
    pub toss: Toss,
    /// UUID of the match; generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
}

impl MatchSetup {
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let setup: Self = serde_json::from_str(json)?;
        setup.validate()?;
        Ok(setup)
    }

    /// Load from the file named by `CRICKET_SETUP_PATH`, if it is set.
    pub fn from_env() -> Result<Option<Self>, SetupError> {
        let Ok(path) = env::var(SETUP_PATH_ENV) else {
            return Ok(None);
        };
        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .map_err(|e| SetupError::Io { path: path.to_string(), message: e.to_string() })?;
        Self::from_json(&content).map(Some)
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if self.total_overs == 0 {
            return Err(SetupError::NoOvers);
        }

        for sheet in [&self.team_one, &self.team_two] {
            if sheet.name.trim().is_empty() {
                return Err(SetupError::EmptyTeamName);
            }
            if sheet.players.len() < 2 {
                return Err(SetupError::RosterTooSmall {
                    team: sheet.name.clone(),
                    found: sheet.players.len(),
                });
            }
            let mut roster = Team::new(sheet.name.clone(), Vec::<String>::new());
            for name in &sheet.players {
                if name.trim().is_empty() {
                    return Err(SetupError::EmptyPlayerName { team: sheet.name.clone() });
                }
                if roster.has_duplicate_name(name) {
                    return Err(SetupError::DuplicatePlayer {
                        team: sheet.name.clone(),
                        name: name.clone(),
                    });
                }
                roster.players.push(crate::models::Player::new(name.trim()));
            }
        }

        if self.team_one.name.trim().eq_ignore_ascii_case(self.team_two.name.trim()) {
            return Err(SetupError::DuplicateTeam(self.team_one.name.clone()));
        }

        self.toss_winner()?;

        if let Some(id) = &self.match_id {
            Uuid::parse_str(id).map_err(|_| SetupError::InvalidMatchId(id.clone()))?;
        }

        Ok(())
    }

    /// Side that bats first, from the toss winner and their decision.
    pub fn batting_first(&self) -> Result<TeamSide, SetupError> {
        let winner = self.toss_winner()?;
        Ok(match self.toss.decision {
            TossDecision::Bat => winner,
            TossDecision::Bowl => winner.opponent(),
        })
    }

    pub(crate) fn teams(&self) -> [Team; 2] {
        let build = |sheet: &TeamSheet| {
            Team::new(sheet.name.trim(), sheet.players.iter().map(|p| p.trim().to_string()))
        };
        [build(&self.team_one), build(&self.team_two)]
    }

    pub(crate) fn resolve_match_id(&self) -> Result<Uuid, SetupError> {
        match &self.match_id {
            Some(id) => Uuid::parse_str(id).map_err(|_| SetupError::InvalidMatchId(id.clone())),
            None => Ok(Uuid::new_v4()),
        }
    }

    fn toss_winner(&self) -> Result<TeamSide, SetupError> {
        let winner = self.toss.winner.trim();
        if winner == self.team_one.name.trim() {
            Ok(TeamSide::One)
        } else if winner == self.team_two.name.trim() {
            Ok(TeamSide::Two)
        } else {
            Err(SetupError::UnknownTossWinner(self.toss.winner.clone()))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn setup(overs: u32, players_per_side: usize) -> MatchSetup {
        let names = |prefix: &str| {
            (1..=players_per_side).map(|i| format!("{prefix}{i}")).collect::<Vec<_>>()
        };
        MatchSetup {
            team_one: TeamSheet { name: "Lions".into(), players: names("L") },
            team_two: TeamSheet { name: "Tigers".into(), players: names("T") },
            total_overs: overs,
            toss: Toss { winner: "Lions".into(), decision: TossDecision::Bat },
            match_id: None,
        }
    }

    #[test]
    fn test_valid_setup_and_batting_first() {
        let mut s = setup(20, 11);
        assert!(s.validate().is_ok());
        assert_eq!(s.batting_first().unwrap(), TeamSide::One);
        s.toss.decision = TossDecision::Bowl;
        assert_eq!(s.batting_first().unwrap(), TeamSide::Two);
    }

    #[test]
    fn test_rejects_bad_setups() {
        let mut s = setup(0, 11);
        assert!(matches!(s.validate(), Err(SetupError::NoOvers)));

        s = setup(20, 1);
        assert!(matches!(s.validate(), Err(SetupError::RosterTooSmall { found: 1, .. })));

        s = setup(20, 3);
        s.team_two.players[2] = "t1".into();
        assert!(matches!(s.validate(), Err(SetupError::DuplicatePlayer { .. })));

        s = setup(20, 3);
        s.team_two.name = "LIONS".into();
        assert!(matches!(s.validate(), Err(SetupError::DuplicateTeam(_))));

        s = setup(20, 3);
        s.toss.winner = "Bears".into();
        assert!(matches!(s.validate(), Err(SetupError::UnknownTossWinner(_))));

        s = setup(20, 3);
        s.match_id = Some("not-a-uuid".into());
        assert!(matches!(s.validate(), Err(SetupError::InvalidMatchId(_))));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "team_one": {"name": "Lions", "players": ["Asha", "Bilal", "Chen"]},
            "team_two": {"name": "Tigers", "players": ["Xavi", "Yuki", "Zane"]},
            "total_overs": 5,
            "toss": {"winner": "Tigers", "decision": "bowl"}
        }"#;
        let s = MatchSetup::from_json(json).unwrap();
        assert_eq!(s.batting_first().unwrap(), TeamSide::One);
        assert_eq!(s.teams()[1].players[2].name, "Zane");

        assert!(matches!(MatchSetup::from_json("{"), Err(SetupError::Json(_))));
    }
}
