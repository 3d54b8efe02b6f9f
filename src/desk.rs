//! One team's scouting state: roster, ledger and report store.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::assignment::{AssignRequest, Assignment, AssignmentLedger, ScoutingTarget};
use crate::config::{ScoutingConfig, StalenessPolicy};
use crate::error::{ScoutingError, ScoutingResult};
use crate::ids::{AssignmentId, ScoutId, TeamId};
use crate::pool::{Scout, ScoutPool};
use crate::report::{ReportStore, ScoutingReport};

/// Result of advancing one scout by a day.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DayProgress {
    Ongoing { observations: u32 },
    Completed(Assignment),
}

/// A team's {Scout Pool, Assignment Ledger, Report Store} triple.
///
/// The desk keeps each scout's assignment back-reference in step with the
/// ledger: a scout has `current_assignment` set exactly when the ledger
/// holds an entry for it. A desk is the unit of exclusive access; nothing
/// in it is shared with other teams.
#[derive(Debug, Clone)]
pub struct TeamDesk {
    team: TeamId,
    roster: ScoutPool,
    ledger: AssignmentLedger,
    reports: ReportStore,
}

impl TeamDesk {
    pub fn new(team: TeamId) -> Self {
        Self {
            team,
            roster: ScoutPool::new(team),
            ledger: AssignmentLedger::new(),
            reports: ReportStore::new(),
        }
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn roster(&self) -> &ScoutPool {
        &self.roster
    }

    pub fn ledger(&self) -> &AssignmentLedger {
        &self.ledger
    }

    pub fn reports(&self) -> &ReportStore {
        &self.reports
    }

    pub fn hire(&mut self, scout: Scout, config: &ScoutingConfig) -> ScoutingResult<ScoutId> {
        let id = self.roster.hire(scout, config.max_scouts)?;
        info!(team = %self.team, scout = %id, size = self.roster.len(), "Scout hired");
        Ok(id)
    }

    /// Releases a scout, cancelling its live assignment first.
    pub fn fire(&mut self, scout: ScoutId, config: &ScoutingConfig) -> ScoutingResult<Scout> {
        self.roster.check_release(scout, config.min_scouts)?;
        if let Some(cancelled) = self.cancel(scout) {
            info!(
                team = %self.team,
                scout = %scout,
                assignment = %cancelled.id,
                "Assignment cancelled by firing"
            );
        }
        let released = self
            .roster
            .remove(scout)
            .ok_or(ScoutingError::ScoutNotOnTeam {
                team: self.team,
                scout,
            })?;
        info!(team = %self.team, scout = %scout, size = self.roster.len(), "Scout fired");
        Ok(released)
    }

    /// Puts an Idle, available scout to work on `target`.
    pub fn assign(
        &mut self,
        id: AssignmentId,
        scout: ScoutId,
        target: ScoutingTarget,
        duration_days: u32,
        start: NaiveDate,
        config: &ScoutingConfig,
    ) -> ScoutingResult<&Assignment> {
        let entry = self
            .roster
            .get_mut(scout)
            .ok_or(ScoutingError::ScoutNotFound(scout))?;
        if !entry.available {
            return Err(ScoutingError::ScoutUnavailable(scout));
        }

        let assignment = self.ledger.assign(
            AssignRequest {
                id,
                scout,
                team: self.team,
                target,
                duration_days,
                start,
            },
            config.max_assignment_days,
        )?;
        entry.current_assignment = Some(assignment.id);

        info!(
            team = %self.team,
            scout = %scout,
            assignment = %assignment.id,
            target = %target.key(),
            days = duration_days,
            "Scout assigned"
        );
        Ok(assignment)
    }

    /// Cancels the scout's live assignment. No-op for an Idle scout.
    pub fn cancel(&mut self, scout: ScoutId) -> Option<Assignment> {
        let cancelled = self.ledger.cancel(scout)?;
        if let Some(entry) = self.roster.get_mut(scout) {
            entry.current_assignment = None;
        }
        debug!(team = %self.team, scout = %scout, assignment = %cancelled.id, "Assignment closed");
        Some(cancelled)
    }

    pub fn set_availability(&mut self, scout: ScoutId, available: bool) -> ScoutingResult<()> {
        let entry = self
            .roster
            .get_mut(scout)
            .ok_or(ScoutingError::ScoutNotOnTeam {
                team: self.team,
                scout,
            })?;
        entry.available = available;
        Ok(())
    }

    /// Scouts that are available and hold no ledger entry, in hiring order.
    pub fn list_available(&self) -> Vec<&Scout> {
        self.roster
            .iter()
            .filter(|s| s.available && !self.ledger.contains(s.id))
            .collect()
    }

    pub fn list_outdated(&self, now: NaiveDate, policy: &StalenessPolicy) -> Vec<&ScoutingReport> {
        self.reports.outdated(now, policy)
    }

    /// Advances one scout's assignment and closes it if complete.
    ///
    /// Returns `None` when the scout is Idle.
    pub(crate) fn advance_scout(&mut self, scout: ScoutId, date: NaiveDate) -> Option<DayProgress> {
        let (complete, observations) = {
            let assignment = self.ledger.advance_one_day(scout)?;
            (assignment.is_complete(date), assignment.observations)
        };
        if complete {
            self.cancel(scout).map(DayProgress::Completed)
        } else {
            Some(DayProgress::Ongoing { observations })
        }
    }

    /// Drops ledger entries whose scout is no longer on the roster.
    pub(crate) fn take_orphans(&mut self) -> Vec<Assignment> {
        let roster = &self.roster;
        self.ledger.drain_where(|scout| !roster.contains(scout))
    }

    pub(crate) fn store_report(&mut self, report: ScoutingReport) -> Option<ScoutingReport> {
        self.reports.upsert(report)
    }

    pub(crate) fn roster_mut(&mut self) -> &mut ScoutPool {
        &mut self.roster
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut AssignmentLedger {
        &mut self.ledger
    }
}
