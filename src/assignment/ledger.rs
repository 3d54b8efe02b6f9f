//! Active-assignment table keyed by scout.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{ScoutingError, ScoutingResult};
use crate::ids::{AssignmentId, ScoutId, TeamId};

use super::types::{Assignment, ScoutingTarget};

/// Parameters for [`AssignmentLedger::assign`].
#[derive(Debug, Clone)]
pub struct AssignRequest {
    pub id: AssignmentId,
    pub scout: ScoutId,
    pub team: TeamId,
    pub target: ScoutingTarget,
    pub duration_days: u32,
    pub start: NaiveDate,
}

/// Live assignments, at most one per scout.
///
/// A scout with no entry is Idle; a scout with an entry is Assigned.
/// Iteration is ordered by scout id.
#[derive(Debug, Clone, Default)]
pub struct AssignmentLedger {
    active: BTreeMap<ScoutId, Assignment>,
}

impl AssignmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn get(&self, scout: ScoutId) -> Option<&Assignment> {
        self.active.get(&scout)
    }

    pub fn contains(&self, scout: ScoutId) -> bool {
        self.active.contains_key(&scout)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.active.values()
    }

    /// Creates an assignment for an Idle scout.
    ///
    /// # Errors
    ///
    /// - [`ScoutingError::InvalidDuration`] when `duration_days` is 0 or
    ///   exceeds `max_days`
    /// - [`ScoutingError::InvalidTarget`] when a team is told to scout itself
    /// - [`ScoutingError::AlreadyAssigned`] when the scout is Assigned
    pub fn assign(&mut self, request: AssignRequest, max_days: u32) -> ScoutingResult<&Assignment> {
        let AssignRequest {
            id,
            scout,
            team,
            target,
            duration_days,
            start,
        } = request;

        if duration_days == 0 || duration_days > max_days {
            return Err(ScoutingError::InvalidDuration {
                days: duration_days,
                max: max_days,
            });
        }
        if target == ScoutingTarget::Team(team) {
            return Err(ScoutingError::InvalidTarget(format!(
                "{team} cannot scout itself"
            )));
        }
        if let Some(existing) = self.active.get(&scout) {
            return Err(ScoutingError::AlreadyAssigned {
                scout,
                assignment: existing.id,
            });
        }

        let assignment = self.active.entry(scout).or_insert(Assignment {
            id,
            scout,
            team,
            target,
            start,
            duration_days,
            observations: 0,
        });
        Ok(assignment)
    }

    /// Removes the scout's assignment. Returns `None` when the scout is Idle.
    pub fn cancel(&mut self, scout: ScoutId) -> Option<Assignment> {
        self.active.remove(&scout)
    }

    /// Bumps the observation counter of the scout's assignment by one.
    pub fn advance_one_day(&mut self, scout: ScoutId) -> Option<&Assignment> {
        let assignment = self.active.get_mut(&scout)?;
        assignment.observations = assignment.observations.saturating_add(1);
        Some(assignment)
    }

    /// Whether the scout's assignment satisfies the completion predicate.
    pub fn is_complete(&self, scout: ScoutId, date: NaiveDate) -> bool {
        self.active
            .get(&scout)
            .is_some_and(|a| a.is_complete(date))
    }

    /// Removes and returns every assignment whose scout matches `remove`.
    pub(crate) fn drain_where<F>(&mut self, mut remove: F) -> Vec<Assignment>
    where
        F: FnMut(ScoutId) -> bool,
    {
        let doomed: Vec<ScoutId> = self
            .active
            .keys()
            .copied()
            .filter(|scout| remove(*scout))
            .collect();
        doomed
            .into_iter()
            .filter_map(|scout| self.active.remove(&scout))
            .collect()
    }

    /// Inserts an assignment exactly as given. Used when restoring snapshots.
    pub(crate) fn insert_raw(&mut self, assignment: Assignment) -> Option<Assignment> {
        self.active.insert(assignment.scout, assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PlayerId;
    use chrono::Days;

    fn date(day: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 1).unwrap() + Days::new(day)
    }

    fn request(id: u64, scout: u64, days: u32) -> AssignRequest {
        AssignRequest {
            id: AssignmentId(id),
            scout: ScoutId(scout),
            team: TeamId(1),
            target: ScoutingTarget::nba_player(PlayerId(10)),
            duration_days: days,
            start: date(0),
        }
    }

    #[test]
    fn test_assign_starts_idle_counter() {
        let mut ledger = AssignmentLedger::new();
        let a = ledger.assign(request(0, 1, 5), 60).unwrap();
        assert_eq!(a.observations, 0);
        assert_eq!(a.start, date(0));
        assert!(ledger.contains(ScoutId(1)));
    }

    #[test]
    fn test_assign_twice_rejected() {
        let mut ledger = AssignmentLedger::new();
        ledger.assign(request(0, 1, 5), 60).unwrap();
        assert_eq!(
            ledger.assign(request(1, 1, 3), 60).unwrap_err(),
            ScoutingError::AlreadyAssigned {
                scout: ScoutId(1),
                assignment: AssignmentId(0)
            }
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_invalid_durations() {
        let mut ledger = AssignmentLedger::new();
        assert!(matches!(
            ledger.assign(request(0, 1, 0), 60),
            Err(ScoutingError::InvalidDuration { days: 0, .. })
        ));
        assert!(matches!(
            ledger.assign(request(0, 1, 61), 60),
            Err(ScoutingError::InvalidDuration { days: 61, max: 60 })
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_self_scouting_rejected() {
        let mut ledger = AssignmentLedger::new();
        let mut req = request(0, 1, 5);
        req.target = ScoutingTarget::team(TeamId(1));
        assert!(matches!(
            ledger.assign(req, 60),
            Err(ScoutingError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_cancel_idle_is_noop() {
        let mut ledger = AssignmentLedger::new();
        assert!(ledger.cancel(ScoutId(4)).is_none());
        ledger.assign(request(0, 4, 5), 60).unwrap();
        assert_eq!(ledger.cancel(ScoutId(4)).unwrap().id, AssignmentId(0));
        assert!(ledger.cancel(ScoutId(4)).is_none());
    }

    #[test]
    fn test_counter_is_independent_of_completion() {
        let mut ledger = AssignmentLedger::new();
        ledger.assign(request(0, 1, 5), 60).unwrap();

        // A single advance on day 5 completes the assignment even though
        // only one observation was counted.
        let a = ledger.advance_one_day(ScoutId(1)).unwrap();
        assert_eq!(a.observations, 1);
        assert!(!ledger.is_complete(ScoutId(1), date(4)));
        assert!(ledger.is_complete(ScoutId(1), date(5)));
        assert!(ledger.advance_one_day(ScoutId(2)).is_none());
    }

    #[test]
    fn test_drain_where() {
        let mut ledger = AssignmentLedger::new();
        ledger.assign(request(0, 1, 5), 60).unwrap();
        ledger.assign(request(1, 2, 5), 60).unwrap();
        let drained = ledger.drain_where(|scout| scout == ScoutId(2));
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].scout, ScoutId(2));
        assert_eq!(ledger.len(), 1);
    }
}
