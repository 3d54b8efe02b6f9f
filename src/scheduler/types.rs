//! Outcome types returned by the daily scheduler.

use chrono::NaiveDate;

use crate::assignment::Assignment;
use crate::ids::{AssignmentId, PlayerId, ScoutId, TeamId};
use crate::report::ScoutingReport;

/// How a completed assignment was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// A report was generated and stored.
    Reported,
    /// The player could not be resolved; no report was produced.
    DirectoryMiss,
    /// Opponent-team scouting completed. Team reports are not generated;
    /// only history is recorded.
    TeamReportDeferred,
}

/// An assignment closed by the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedAssignment {
    pub assignment: Assignment,
    pub outcome: CompletionOutcome,
}

/// Non-fatal irregularities observed while processing a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoutingAnomaly {
    /// A completed player assignment whose player the directory did not know.
    DirectoryMiss {
        team: TeamId,
        scout: ScoutId,
        player: PlayerId,
        assignment: AssignmentId,
    },
    /// A ledger entry whose scout was no longer on the roster; it was dropped.
    OrphanedAssignment {
        team: TeamId,
        scout: ScoutId,
        assignment: AssignmentId,
    },
}

/// Everything one `process_day` call did for one team.
#[derive(Debug, Clone, PartialEq)]
pub struct DayOutcome {
    pub team: TeamId,
    pub date: NaiveDate,
    /// Assignments whose observation counter was bumped.
    pub advanced: usize,
    /// Assignments that completed, in roster order.
    pub completed: Vec<CompletedAssignment>,
    /// Reports produced, in roster order.
    pub reports: Vec<ScoutingReport>,
    pub anomalies: Vec<ScoutingAnomaly>,
}

impl DayOutcome {
    pub(crate) fn new(team: TeamId, date: NaiveDate) -> Self {
        Self {
            team,
            date,
            advanced: 0,
            completed: Vec::new(),
            reports: Vec::new(),
            anomalies: Vec::new(),
        }
    }

    pub fn reports(&self) -> &[ScoutingReport] {
        &self.reports
    }

    pub fn into_reports(self) -> Vec<ScoutingReport> {
        self.reports
    }

    /// Returns `true` when no assignment completed and nothing irregular happened.
    pub fn is_quiet(&self) -> bool {
        self.completed.is_empty() && self.anomalies.is_empty()
    }
}
