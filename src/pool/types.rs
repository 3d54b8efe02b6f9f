//! Scout entity and specialization.

use crate::assignment::TargetKind;
use crate::ids::{AssignmentId, ScoutId, TeamId};

/// The kind of evaluation a scout is trained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Specialization {
    /// Professional (NBA) players.
    Pro,
    /// College prospects.
    College,
    /// Advance scouting of opponent teams.
    Advance,
}

impl Specialization {
    pub const ALL: [Specialization; 3] = [
        Specialization::Pro,
        Specialization::College,
        Specialization::Advance,
    ];

    /// Returns `true` when this specialization matches the target kind.
    pub fn covers(self, kind: TargetKind) -> bool {
        matches!(
            (self, kind),
            (Specialization::Pro, TargetKind::NbaPlayer)
                | (Specialization::College, TargetKind::CollegeProspect)
                | (Specialization::Advance, TargetKind::OpponentTeam)
        )
    }
}

/// A scout that can work one assignment at a time.
///
/// Identity and skill fields are public. Team affiliation, availability,
/// and the assignment back-reference are maintained by the office and are
/// read through accessors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scout {
    pub id: ScoutId,
    pub name: String,
    pub specialization: Specialization,
    /// Evaluation capacity on a 1–100 scale.
    pub capacity: u8,
    pub(crate) team: Option<TeamId>,
    pub(crate) available: bool,
    pub(crate) current_assignment: Option<AssignmentId>,
}

impl Scout {
    /// Creates an unaffiliated, available scout.
    ///
    /// `capacity` is clamped into 1–100.
    pub fn new(
        id: ScoutId,
        name: impl Into<String>,
        specialization: Specialization,
        capacity: u8,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            specialization,
            capacity: capacity.clamp(1, 100),
            team: None,
            available: true,
            current_assignment: None,
        }
    }

    /// The employing team, or `None` for a free agent.
    pub fn team(&self) -> Option<TeamId> {
        self.team
    }

    pub fn is_free_agent(&self) -> bool {
        self.team.is_none()
    }

    /// Whether the scout may be given new assignments.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// The live assignment this scout is working, if any.
    pub fn current_assignment(&self) -> Option<AssignmentId> {
        self.current_assignment
    }

    pub fn is_idle(&self) -> bool {
        self.current_assignment.is_none()
    }

    pub(crate) fn detach(&mut self) {
        self.team = None;
        self.current_assignment = None;
    }
}
