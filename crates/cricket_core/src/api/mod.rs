//! External command surface over `ScoringEngine`.

pub mod json_api;

pub use json_api::{
    apply_command, apply_command_json, command_schema, snapshot_json, summary_json, ApiError,
    CommandResponse, ErrorBody, MatchCommand, API_VERSION,
};
