//! Assignment targets and the assignment record.

use std::fmt;

use chrono::{Days, NaiveDate};

use crate::error::{ScoutingError, ScoutingResult};
use crate::ids::{AssignmentId, PlayerId, ScoutId, TeamId};

/// Which player population a player target belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerKind {
    NbaPlayer,
    CollegeProspect,
}

/// Flat classification of what an assignment observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    NbaPlayer,
    CollegeProspect,
    OpponentTeam,
}

impl From<PlayerKind> for TargetKind {
    fn from(kind: PlayerKind) -> Self {
        match kind {
            PlayerKind::NbaPlayer => TargetKind::NbaPlayer,
            PlayerKind::CollegeProspect => TargetKind::CollegeProspect,
        }
    }
}

/// What a scout is sent to observe: a single player or an opponent team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoutingTarget {
    Player { id: PlayerId, kind: PlayerKind },
    Team(TeamId),
}

impl ScoutingTarget {
    pub fn nba_player(id: PlayerId) -> Self {
        ScoutingTarget::Player {
            id,
            kind: PlayerKind::NbaPlayer,
        }
    }

    pub fn prospect(id: PlayerId) -> Self {
        ScoutingTarget::Player {
            id,
            kind: PlayerKind::CollegeProspect,
        }
    }

    pub fn team(id: TeamId) -> Self {
        ScoutingTarget::Team(id)
    }

    /// Builds a target from the two-optional-field representation.
    ///
    /// Exactly one of `player` / `team` must be set, and it must agree with
    /// `kind`; anything else is [`ScoutingError::InvalidTarget`].
    ///
    /// ```
    /// use u_scouting::{PlayerId, ScoutingTarget, TargetKind, TeamId};
    ///
    /// let ok = ScoutingTarget::from_parts(Some(PlayerId(4)), None, TargetKind::NbaPlayer);
    /// assert!(ok.is_ok());
    ///
    /// let both =
    ///     ScoutingTarget::from_parts(Some(PlayerId(4)), Some(TeamId(2)), TargetKind::NbaPlayer);
    /// assert!(both.is_err());
    /// ```
    pub fn from_parts(
        player: Option<PlayerId>,
        team: Option<TeamId>,
        kind: TargetKind,
    ) -> ScoutingResult<Self> {
        match (player, team, kind) {
            (Some(id), None, TargetKind::NbaPlayer) => Ok(Self::nba_player(id)),
            (Some(id), None, TargetKind::CollegeProspect) => Ok(Self::prospect(id)),
            (None, Some(id), TargetKind::OpponentTeam) => Ok(Self::team(id)),
            (Some(_), Some(_), _) => Err(ScoutingError::InvalidTarget(
                "both a player and a team were given".into(),
            )),
            (None, None, _) => Err(ScoutingError::InvalidTarget(
                "neither a player nor a team was given".into(),
            )),
            (Some(id), None, TargetKind::OpponentTeam) => Err(ScoutingError::InvalidTarget(
                format!("{id} cannot be scouted as an opponent team"),
            )),
            (None, Some(id), _) => Err(ScoutingError::InvalidTarget(format!(
                "{id} cannot be scouted as a {kind:?}"
            ))),
        }
    }

    pub fn kind(&self) -> TargetKind {
        match self {
            ScoutingTarget::Player { kind, .. } => (*kind).into(),
            ScoutingTarget::Team(_) => TargetKind::OpponentTeam,
        }
    }

    /// The identity used to key reports and history.
    pub fn key(&self) -> TargetKey {
        match self {
            ScoutingTarget::Player { id, .. } => TargetKey::Player(*id),
            ScoutingTarget::Team(id) => TargetKey::Team(*id),
        }
    }
}

/// Identity of a scouted target, independent of player kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKey {
    Player(PlayerId),
    Team(TeamId),
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKey::Player(id) => id.fmt(f),
            TargetKey::Team(id) => id.fmt(f),
        }
    }
}

impl From<PlayerId> for TargetKey {
    fn from(id: PlayerId) -> Self {
        TargetKey::Player(id)
    }
}

impl From<TeamId> for TargetKey {
    fn from(id: TeamId) -> Self {
        TargetKey::Team(id)
    }
}

/// A scout's live, time-bounded evaluation task.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub id: AssignmentId,
    pub scout: ScoutId,
    /// Team the scout works for; owner of the resulting report.
    pub team: TeamId,
    pub target: ScoutingTarget,
    /// Simulated date the assignment was created.
    pub start: NaiveDate,
    /// Declared length in days.
    pub duration_days: u32,
    /// Days the scheduler has advanced this assignment. Informational only;
    /// completion is decided by elapsed calendar days.
    pub observations: u32,
}

impl Assignment {
    /// Calendar days between `start` and `date` (negative before start).
    pub fn elapsed_days(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days()
    }

    /// Completion predicate: elapsed days since start ≥ declared duration.
    pub fn is_complete(&self, date: NaiveDate) -> bool {
        self.elapsed_days(date) >= i64::from(self.duration_days)
    }

    /// The first date on which the assignment completes.
    pub fn due_date(&self) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(u64::from(self.duration_days)))
            .unwrap_or(NaiveDate::MAX)
    }
}
