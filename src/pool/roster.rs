//! Per-team scout roster.

use crate::error::{ScoutingError, ScoutingResult};
use crate::ids::{ScoutId, TeamId};

use super::types::Scout;

/// The scouts employed by one team, in hiring order.
///
/// Limits are passed in by the caller so the pool stays independent of
/// office-wide configuration.
#[derive(Debug, Clone)]
pub struct ScoutPool {
    team: TeamId,
    scouts: Vec<Scout>,
}

impl ScoutPool {
    pub fn new(team: TeamId) -> Self {
        Self {
            team,
            scouts: Vec::new(),
        }
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn len(&self) -> usize {
        self.scouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scouts.is_empty()
    }

    /// All scouts in hiring order.
    pub fn scouts(&self) -> &[Scout] {
        &self.scouts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scout> {
        self.scouts.iter()
    }

    pub fn get(&self, id: ScoutId) -> Option<&Scout> {
        self.scouts.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: ScoutId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get_mut(&mut self, id: ScoutId) -> Option<&mut Scout> {
        self.scouts.iter_mut().find(|s| s.id == id)
    }

    /// Attaches a scout to this team and marks it available.
    ///
    /// Fails with [`ScoutingError::CapacityExceeded`] when the roster
    /// already holds `max_scouts`.
    pub fn hire(&mut self, mut scout: Scout, max_scouts: usize) -> ScoutingResult<ScoutId> {
        if self.contains(scout.id) {
            return Err(ScoutingError::ScoutAlreadyEmployed(scout.id));
        }
        if self.scouts.len() >= max_scouts {
            return Err(ScoutingError::CapacityExceeded {
                team: self.team,
                max: max_scouts,
            });
        }
        scout.team = Some(self.team);
        scout.available = true;
        scout.current_assignment = None;
        let id = scout.id;
        self.scouts.push(scout);
        Ok(id)
    }

    /// Checks that `id` may be released without breaking the minimum.
    pub(crate) fn check_release(&self, id: ScoutId, min_scouts: usize) -> ScoutingResult<()> {
        if !self.contains(id) {
            return Err(ScoutingError::ScoutNotOnTeam {
                team: self.team,
                scout: id,
            });
        }
        if self.scouts.len() <= min_scouts {
            return Err(ScoutingError::BelowMinimum {
                team: self.team,
                min: min_scouts,
            });
        }
        Ok(())
    }

    /// Removes a scout and detaches it from the team.
    pub(crate) fn remove(&mut self, id: ScoutId) -> Option<Scout> {
        let index = self.scouts.iter().position(|s| s.id == id)?;
        let mut scout = self.scouts.remove(index);
        scout.detach();
        Some(scout)
    }

    /// Inserts a scout exactly as given. Used when restoring snapshots.
    pub(crate) fn insert_raw(&mut self, scout: Scout) {
        self.scouts.push(scout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Specialization;

    fn scout(id: u64) -> Scout {
        Scout::new(ScoutId(id), format!("Scout {id}"), Specialization::Pro, 60)
    }

    #[test]
    fn test_hire_attaches_team() {
        let mut pool = ScoutPool::new(TeamId(1));
        pool.hire(scout(1), 5).unwrap();
        let hired = pool.get(ScoutId(1)).unwrap();
        assert_eq!(hired.team(), Some(TeamId(1)));
        assert!(hired.is_available());
    }

    #[test]
    fn test_hire_capacity_exceeded() {
        let mut pool = ScoutPool::new(TeamId(1));
        for id in 0..5 {
            pool.hire(scout(id), 5).unwrap();
        }
        let err = pool.hire(scout(5), 5).unwrap_err();
        assert_eq!(
            err,
            ScoutingError::CapacityExceeded {
                team: TeamId(1),
                max: 5
            }
        );
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn test_hire_duplicate_rejected() {
        let mut pool = ScoutPool::new(TeamId(1));
        pool.hire(scout(1), 5).unwrap();
        assert_eq!(
            pool.hire(scout(1), 5),
            Err(ScoutingError::ScoutAlreadyEmployed(ScoutId(1)))
        );
    }

    #[test]
    fn test_check_release() {
        let mut pool = ScoutPool::new(TeamId(2));
        pool.hire(scout(1), 5).unwrap();
        assert_eq!(
            pool.check_release(ScoutId(1), 1),
            Err(ScoutingError::BelowMinimum {
                team: TeamId(2),
                min: 1
            })
        );
        assert_eq!(
            pool.check_release(ScoutId(9), 1),
            Err(ScoutingError::ScoutNotOnTeam {
                team: TeamId(2),
                scout: ScoutId(9)
            })
        );

        pool.hire(scout(2), 5).unwrap();
        assert!(pool.check_release(ScoutId(1), 1).is_ok());
    }

    #[test]
    fn test_remove_detaches() {
        let mut pool = ScoutPool::new(TeamId(1));
        pool.hire(scout(1), 5).unwrap();
        pool.hire(scout(2), 5).unwrap();

        let removed = pool.remove(ScoutId(1)).unwrap();
        assert!(removed.is_free_agent());
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.scouts()[0].id, ScoutId(2));
    }
}
