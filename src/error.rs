//! Error types for scouting operations.

use chrono::NaiveDate;

use crate::ids::{AssignmentId, ScoutId, TeamId};

/// Why a scouting operation was rejected.
///
/// The `Display` output is the human-readable reason intended for the
/// caller; no operation panics on a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoutingError {
    #[error("team {team} already employs the maximum of {max} scouts")]
    CapacityExceeded { team: TeamId, max: usize },

    #[error("team {team} must keep at least {min} scout(s)")]
    BelowMinimum { team: TeamId, min: usize },

    #[error("scout not found: {0}")]
    ScoutNotFound(ScoutId),

    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("{scout} is not employed by {team}")]
    ScoutNotOnTeam { team: TeamId, scout: ScoutId },

    #[error("{0} is already employed")]
    ScoutAlreadyEmployed(ScoutId),

    #[error("{0} is on the free-agent list")]
    ScoutIsFreeAgent(ScoutId),

    #[error("{scout} is already working on {assignment}")]
    AlreadyAssigned {
        scout: ScoutId,
        assignment: AssignmentId,
    },

    #[error("no {0} ids left to allocate")]
    IdSpaceExhausted(&'static str),

    #[error("{0} is not available for assignments")]
    ScoutUnavailable(ScoutId),

    #[error("assignment duration must be between 1 and {max} days, got {days}")]
    InvalidDuration { days: u32, max: u32 },

    #[error("invalid scouting target: {0}")]
    InvalidTarget(String),

    #[error("simulated date moved backwards: today is {today}, requested {requested}")]
    DateRegression {
        today: NaiveDate,
        requested: NaiveDate,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("snapshot is inconsistent: {0}")]
    SnapshotInconsistent(String),
}

/// Result type alias for scouting operations.
pub type ScoutingResult<T> = Result<T, ScoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        let err = ScoutingError::CapacityExceeded {
            team: TeamId(1),
            max: 5,
        };
        assert_eq!(
            err.to_string(),
            "team team#1 already employs the maximum of 5 scouts"
        );

        let err = ScoutingError::InvalidDuration { days: 0, max: 60 };
        assert!(err.to_string().contains("got 0"));

        let err = ScoutingError::ScoutAlreadyEmployed(ScoutId(7));
        assert_eq!(err.to_string(), "scout#7 is already employed");

        let err = ScoutingError::IdSpaceExhausted("scout");
        assert_eq!(err.to_string(), "no scout ids left to allocate");
    }
}
