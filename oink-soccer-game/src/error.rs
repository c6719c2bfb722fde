//! Failure taxonomy for a match simulation.
//!
//! A simulation is all-or-nothing: any of these aborts the run and no partial
//! event list is produced.

use log::debug;
use thiserror::Error;

use crate::config::ConfigError;
use crate::events::TeamType;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatchError {
    /// A weighted draw was configured with no candidates or only zero weights.
    #[error("weight table `{pool}` is empty or has no positive weights")]
    InvalidConfiguration { pool: &'static str },
    /// A lineup cannot supply the players the engine needs to draw from.
    #[error("{team:?} lineup is malformed: {reason}")]
    MalformedLineup { team: TeamType, reason: String },
}

impl MatchError {
    #[must_use]
    pub fn malformed(team: TeamType, reason: impl Into<String>) -> Self {
        Self::MalformedLineup {
            team,
            reason: reason.into(),
        }
    }
}

impl From<ConfigError> for MatchError {
    fn from(err: ConfigError) -> Self {
        debug!("rejecting configuration: {err}");
        Self::InvalidConfiguration { pool: err.table() }
    }
}
