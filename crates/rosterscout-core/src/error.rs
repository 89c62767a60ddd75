// Error taxonomy for the scoring engine.

use thiserror::Error;

use crate::stats::{Metric, PlayerId};

#[derive(Debug, Error)]
pub enum ScoutError {
    /// Caller input (or state derived from it) is unusable.
    #[error("invalid input: {0}")]
    InputValidation(String),

    /// Data the computation cannot proceed without is missing for a named player.
    #[error("query failed for player {player_id}: {message}")]
    Query { player_id: PlayerId, message: String },

    /// A league standard deviation consumed as a divisor was exactly zero.
    #[error("league standard deviation for `{metric}` is zero")]
    ZeroStdDev { metric: Metric },

    #[error("data source error: {0}")]
    DataSource(#[from] anyhow::Error),
}

impl ScoutError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ScoutError::InputValidation(message.into())
    }

    pub(crate) fn missing_seasons(player_id: PlayerId) -> Self {
        ScoutError::Query {
            player_id,
            message: "no season data found".into(),
        }
    }
}
