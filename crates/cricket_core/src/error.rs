use thiserror::Error;

/// Rejection of a scoring command.
///
/// Every command validates before it mutates, so an `Err` always leaves the
/// engine exactly as it was. None of these are fatal: the caller re-prompts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    /// Required actors are unselected, a replacement is pending, or the
    /// innings/match phase does not allow the command.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Ineligible player: unknown, already out or retired, already at the
    /// other end, or the bowler of the previous over.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// A dismissal that cannot happen on the given kind of delivery.
    #[error("Invalid delivery: {0}")]
    InvalidDelivery(String),

    #[error("Nothing to undo")]
    NothingToUndo,
}

impl ScoringError {
    /// Stable machine-readable tag used by the JSON surface.
    pub fn kind(&self) -> &'static str {
        match self {
            ScoringError::InvalidState(_) => "invalid_state",
            ScoringError::InvalidSelection(_) => "invalid_selection",
            ScoringError::InvalidDelivery(_) => "invalid_delivery",
            ScoringError::NothingToUndo => "nothing_to_undo",
        }
    }

    pub(crate) fn state(msg: impl Into<String>) -> Self {
        ScoringError::InvalidState(msg.into())
    }

    pub(crate) fn selection(msg: impl Into<String>) -> Self {
        ScoringError::InvalidSelection(msg.into())
    }
}

/// Problems with a match setup before any ball is bowled.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Total overs must be at least 1")]
    NoOvers,

    #[error("Team '{team}' needs at least 2 players, found {found}")]
    RosterTooSmall { team: String, found: usize },

    #[error("Team name must not be empty")]
    EmptyTeamName,

    #[error("Player name must not be empty in team '{team}'")]
    EmptyPlayerName { team: String },

    #[error("Duplicate player '{name}' in team '{team}'")]
    DuplicatePlayer { team: String, name: String },

    #[error("Both teams are named '{0}'")]
    DuplicateTeam(String),

    #[error("Toss winner '{0}' is not one of the teams")]
    UnknownTossWinner(String),

    #[error("Invalid match id '{0}'")]
    InvalidMatchId(String),

    #[error("Failed to read setup from {path}: {message}")]
    Io { path: String, message: String },

    #[error("Setup JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoringError>;
