//! The scouting service object.
//!
//! [`ScoutingOffice`] owns every table of the scouting core: one
//! [`TeamDesk`] per team, the free-agent list, the organization-wide
//! [`HistoryBook`], and a scout-id → team index. It is constructed
//! explicitly and passed around by the caller, so independent simulations
//! never share state.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::assignment::{Assignment, ScoutingTarget, TargetKey};
use crate::config::ScoutingConfig;
use crate::desk::TeamDesk;
use crate::error::{ScoutingError, ScoutingResult};
use crate::ids::{AssignmentId, ScoutId, TeamId};
use crate::pool::{FreeAgentConfig, FreeAgentGenerator, Scout};
use crate::report::{
    GradedReportGenerator, HistoryBook, PlayerDirectory, ReportGenerator, ScoutingHistory,
    ScoutingReport,
};
use crate::scheduler::{AdvancedDay, DailyScheduler, DayOutcome};

/// Verbatim copy of the four entity tables, for persistence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OfficeSnapshot {
    pub today: NaiveDate,
    /// Employed scouts (team order, then hiring order) followed by free agents.
    pub scouts: Vec<Scout>,
    pub assignments: Vec<Assignment>,
    pub reports: Vec<ScoutingReport>,
    pub history: Vec<ScoutingHistory>,
}

/// Scout pools, assignment ledgers, report stores and history for a league.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_scouting::{
///     InMemoryDirectory, PlayerId, PlayerKind, PlayerProfile, Scout, ScoutId,
///     ScoutingConfig, ScoutingOffice, ScoutingTarget, Specialization, TeamId,
/// };
///
/// let day0 = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
/// let mut office = ScoutingOffice::new(ScoutingConfig::default(), day0).unwrap();
/// let team = TeamId(1);
///
/// office
///     .hire(team, Scout::new(ScoutId(1), "Ada Grant", Specialization::Pro, 75))
///     .unwrap();
/// office
///     .assign(ScoutId(1), ScoutingTarget::nba_player(PlayerId(30)), 2)
///     .unwrap();
///
/// let directory = InMemoryDirectory::new().with_player(
///     PlayerProfile::new(PlayerId(30), "Nico Vance", PlayerKind::NbaPlayer)
///         .with_attribute("shooting", 81),
/// );
///
/// let day1 = day0.succ_opt().unwrap();
/// let day2 = day1.succ_opt().unwrap();
/// assert!(office.process_day(team, day1, &directory).unwrap().reports().is_empty());
/// assert_eq!(office.process_day(team, day2, &directory).unwrap().reports().len(), 1);
/// ```
pub struct ScoutingOffice {
    config: ScoutingConfig,
    today: NaiveDate,
    desks: BTreeMap<TeamId, TeamDesk>,
    scout_index: HashMap<ScoutId, TeamId>,
    free_agents: BTreeMap<ScoutId, Scout>,
    history: HistoryBook,
    generator: Box<dyn ReportGenerator>,
    free_agent_generator: FreeAgentGenerator,
    /// `None` once `u64::MAX` has been handed out.
    next_scout_id: Option<u64>,
    next_assignment_id: Option<u64>,
}

impl ScoutingOffice {
    /// Creates an empty office whose calendar starts at `today`.
    pub fn new(config: ScoutingConfig, today: NaiveDate) -> ScoutingResult<Self> {
        config.validate().map_err(ScoutingError::InvalidConfig)?;
        let free_agent_generator = FreeAgentGenerator::new(FreeAgentConfig::default())
            .map_err(ScoutingError::InvalidConfig)?;
        Ok(Self {
            config,
            today,
            desks: BTreeMap::new(),
            scout_index: HashMap::new(),
            free_agents: BTreeMap::new(),
            history: HistoryBook::new(),
            generator: Box::new(GradedReportGenerator::default()),
            free_agent_generator,
            next_scout_id: Some(1),
            next_assignment_id: Some(1),
        })
    }

    /// Replaces the report generator.
    pub fn with_report_generator<G: ReportGenerator + 'static>(mut self, generator: G) -> Self {
        self.generator = Box::new(generator);
        self
    }

    /// Replaces the free-agent generator.
    pub fn with_free_agent_generator(mut self, generator: FreeAgentGenerator) -> Self {
        self.free_agent_generator = generator;
        self
    }

    pub fn config(&self) -> &ScoutingConfig {
        &self.config
    }

    /// The latest simulated date seen by the office.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    // ---- Teams & scouts ----

    /// Registers a team with an empty roster. Returns `false` if it already exists.
    pub fn register_team(&mut self, team: TeamId) -> bool {
        if self.desks.contains_key(&team) {
            return false;
        }
        self.desks.insert(team, TeamDesk::new(team));
        true
    }

    pub fn teams(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.desks.keys().copied()
    }

    pub fn desk(&self, team: TeamId) -> Option<&TeamDesk> {
        self.desks.get(&team)
    }

    /// Hires `scout` onto `team`, registering the team if needed.
    ///
    /// Ids already on the free-agent list are rejected with
    /// [`ScoutingError::ScoutIsFreeAgent`]; sign those through
    /// [`hire_free_agent`](Self::hire_free_agent).
    pub fn hire(&mut self, team: TeamId, scout: Scout) -> ScoutingResult<ScoutId> {
        let id = scout.id;
        if self.scout_index.contains_key(&id) {
            return Err(ScoutingError::ScoutAlreadyEmployed(id));
        }
        if self.free_agents.contains_key(&id) {
            return Err(ScoutingError::ScoutIsFreeAgent(id));
        }
        self.enlist(team, scout)
    }

    fn enlist(&mut self, team: TeamId, scout: Scout) -> ScoutingResult<ScoutId> {
        let id = scout.id;
        let desk = self
            .desks
            .entry(team)
            .or_insert_with(|| TeamDesk::new(team));
        desk.hire(scout, &self.config)?;

        self.scout_index.insert(id, team);
        self.next_scout_id = next_after(self.next_scout_id, id.get());
        Ok(id)
    }

    /// Moves a scout from the free-agent list onto `team`.
    pub fn hire_free_agent(&mut self, team: TeamId, scout: ScoutId) -> ScoutingResult<ScoutId> {
        let candidate = self
            .free_agents
            .remove(&scout)
            .ok_or(ScoutingError::ScoutNotFound(scout))?;
        match self.enlist(team, candidate.clone()) {
            Ok(id) => Ok(id),
            Err(err) => {
                self.free_agents.insert(scout, candidate);
                Err(err)
            }
        }
    }

    /// Fires a scout, cancelling its live assignment first.
    ///
    /// The returned scout is detached from the team and no longer tracked.
    pub fn fire(&mut self, team: TeamId, scout: ScoutId) -> ScoutingResult<Scout> {
        let desk = self
            .desks
            .get_mut(&team)
            .ok_or(ScoutingError::TeamNotFound(team))?;
        let released = desk.fire(scout, &self.config)?;
        self.scout_index.remove(&scout);
        Ok(released)
    }

    /// Looks up any scout, employed or free agent.
    pub fn scout(&self, id: ScoutId) -> Option<&Scout> {
        match self.scout_index.get(&id) {
            Some(team) => self.desks.get(team).and_then(|d| d.roster().get(id)),
            None => self.free_agents.get(&id),
        }
    }

    /// A team's scouts in hiring order (empty for an unknown team).
    pub fn scouts(&self, team: TeamId) -> &[Scout] {
        self.desks
            .get(&team)
            .map(|d| d.roster().scouts())
            .unwrap_or(&[])
    }

    pub fn scout_count(&self, team: TeamId) -> usize {
        self.scouts(team).len()
    }

    /// Available scouts with no live assignment, in hiring order.
    pub fn list_available(&self, team: TeamId) -> Vec<&Scout> {
        self.desks
            .get(&team)
            .map(|d| d.list_available())
            .unwrap_or_default()
    }

    pub fn set_availability(&mut self, scout: ScoutId, available: bool) -> ScoutingResult<()> {
        if let Some(free) = self.free_agents.get_mut(&scout) {
            free.available = available;
            return Ok(());
        }
        let desk = self.desk_of_mut(scout)?;
        desk.set_availability(scout, available)
    }

    /// Bulk-creates unaffiliated scouts and returns their ids.
    ///
    /// Ids continue above every id seen so far. Fails with
    /// [`ScoutingError::IdSpaceExhausted`], creating nothing, when fewer than
    /// `count` ids remain.
    pub fn generate_free_agents(&mut self, count: usize) -> ScoutingResult<Vec<ScoutId>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let exhausted = ScoutingError::IdSpaceExhausted("scout");
        let first = self.next_scout_id.ok_or(exhausted.clone())?;
        let last = u64::try_from(count - 1)
            .ok()
            .and_then(|span| first.checked_add(span))
            .ok_or(exhausted)?;

        let scouts = self.free_agent_generator.generate(first, count);
        self.next_scout_id = last.checked_add(1);
        let ids: Vec<ScoutId> = scouts.iter().map(|s| s.id).collect();
        for scout in scouts {
            self.free_agents.insert(scout.id, scout);
        }
        info!(count, "Free-agent scouts generated");
        Ok(ids)
    }

    /// Free agents ordered by id.
    pub fn free_agents(&self) -> impl Iterator<Item = &Scout> {
        self.free_agents.values()
    }

    // ---- Assignments ----

    /// Sends an employed scout to observe `target`, starting today.
    pub fn assign(
        &mut self,
        scout: ScoutId,
        target: ScoutingTarget,
        duration_days: u32,
    ) -> ScoutingResult<AssignmentId> {
        let id = AssignmentId(
            self.next_assignment_id.ok_or(ScoutingError::IdSpaceExhausted("assignment"))?,
        );
        let start = self.today;
        let config = &self.config;
        let team = *self
            .scout_index
            .get(&scout)
            .ok_or(ScoutingError::ScoutNotFound(scout))?;
        let desk = self
            .desks
            .get_mut(&team)
            .ok_or(ScoutingError::TeamNotFound(team))?;
        desk.assign(id, scout, target, duration_days, start, config)?;
        self.next_assignment_id = id.get().checked_add(1);
        Ok(id)
    }

    /// Cancels a scout's live assignment; `Ok(None)` if it was Idle.
    pub fn cancel(&mut self, scout: ScoutId) -> ScoutingResult<Option<Assignment>> {
        let desk = self.desk_of_mut(scout)?;
        Ok(desk.cancel(scout))
    }

    pub fn assignment_for(&self, scout: ScoutId) -> Option<&Assignment> {
        let team = self.scout_index.get(&scout)?;
        self.desks.get(team)?.ledger().get(scout)
    }

    /// A team's live assignments ordered by scout id.
    pub fn assignments(&self, team: TeamId) -> Vec<&Assignment> {
        self.desks
            .get(&team)
            .map(|d| d.ledger().iter().collect())
            .unwrap_or_default()
    }

    // ---- Time ----

    /// Advances one team's assignments to `date`.
    ///
    /// `date` must not precede the office calendar; calling several teams
    /// for the same date is expected.
    pub fn process_day<D>(
        &mut self,
        team: TeamId,
        date: NaiveDate,
        directory: &D,
    ) -> ScoutingResult<DayOutcome>
    where
        D: PlayerDirectory + ?Sized,
    {
        self.check_date(date)?;
        let desk = self
            .desks
            .get_mut(&team)
            .ok_or(ScoutingError::TeamNotFound(team))?;
        self.today = date;
        let outcome = DailyScheduler::run(
            desk,
            &mut self.history,
            date,
            directory,
            self.generator.as_ref(),
        );
        debug!(
            team = %team,
            date = %date,
            advanced = outcome.advanced,
            reports = outcome.reports.len(),
            "Scouting day processed"
        );
        Ok(outcome)
    }

    /// Advances every team to `date`, returning one outcome per team in team order.
    ///
    /// With the `parallel` feature the per-team advance phase runs on rayon;
    /// report generation and history updates always run in team order.
    pub fn process_day_all<D>(
        &mut self,
        date: NaiveDate,
        directory: &D,
    ) -> ScoutingResult<Vec<DayOutcome>>
    where
        D: PlayerDirectory + ?Sized,
    {
        self.check_date(date)?;
        self.today = date;

        let mut advanced = self.advance_all(date);
        advanced.sort_by_key(|a| a.team);

        let mut outcomes = Vec::with_capacity(advanced.len());
        for day in advanced {
            if let Some(desk) = self.desks.get_mut(&day.team) {
                outcomes.push(DailyScheduler::resolve(
                    desk,
                    &mut self.history,
                    date,
                    day,
                    directory,
                    self.generator.as_ref(),
                ));
            }
        }
        Ok(outcomes)
    }

    #[cfg(feature = "parallel")]
    fn advance_all(&mut self, date: NaiveDate) -> Vec<AdvancedDay> {
        use rayon::prelude::*;

        self.desks
            .par_iter_mut()
            .map(|(_, desk)| DailyScheduler::advance(desk, date))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn advance_all(&mut self, date: NaiveDate) -> Vec<AdvancedDay> {
        self.desks
            .values_mut()
            .map(|desk| DailyScheduler::advance(desk, date))
            .collect()
    }

    // ---- Reports & history ----

    pub fn report(&self, team: TeamId, target: TargetKey) -> Option<&ScoutingReport> {
        self.desks.get(&team)?.reports().get(target)
    }

    /// A team's reports ordered by target.
    pub fn reports(&self, team: TeamId) -> Vec<&ScoutingReport> {
        self.desks
            .get(&team)
            .map(|d| d.reports().iter().collect())
            .unwrap_or_default()
    }

    /// Reports past the configured shelf life as of `now`.
    pub fn list_outdated(&self, team: TeamId, now: NaiveDate) -> Vec<&ScoutingReport> {
        self.desks
            .get(&team)
            .map(|d| d.list_outdated(now, &self.config.staleness))
            .unwrap_or_default()
    }

    pub fn history_of(&self, target: TargetKey) -> Option<&ScoutingHistory> {
        self.history.get(target)
    }

    pub fn history(&self) -> &HistoryBook {
        &self.history
    }

    // ---- Persistence ----

    /// Copies the four entity tables out of the office.
    pub fn snapshot(&self) -> OfficeSnapshot {
        let mut scouts: Vec<Scout> = self
            .desks
            .values()
            .flat_map(|d| d.roster().iter().cloned())
            .collect();
        scouts.extend(self.free_agents.values().cloned());

        OfficeSnapshot {
            today: self.today,
            scouts,
            assignments: self
                .desks
                .values()
                .flat_map(|d| d.ledger().iter().cloned())
                .collect(),
            reports: self
                .desks
                .values()
                .flat_map(|d| d.reports().iter().cloned())
                .collect(),
            history: self.history.sorted().into_iter().cloned().collect(),
        }
    }

    /// Rebuilds an office from a snapshot, checking referential integrity.
    ///
    /// Fails with [`ScoutingError::SnapshotInconsistent`] on duplicate scouts,
    /// rosters over `max_scouts`, assignments without a matching scout, or
    /// back-references without a matching assignment.
    pub fn restore(config: ScoutingConfig, snapshot: OfficeSnapshot) -> ScoutingResult<Self> {
        let mut office = Self::new(config, snapshot.today)?;
        let inconsistent = |msg: String| ScoutingError::SnapshotInconsistent(msg);

        for scout in snapshot.scouts {
            let id = scout.id;
            if office.scout_index.contains_key(&id) || office.free_agents.contains_key(&id) {
                return Err(inconsistent(format!("{id} appears more than once")));
            }
            office.next_scout_id = next_after(office.next_scout_id, id.get());
            match scout.team {
                Some(team) => {
                    let desk = office
                        .desks
                        .entry(team)
                        .or_insert_with(|| TeamDesk::new(team));
                    if desk.roster().len() >= office.config.max_scouts {
                        return Err(inconsistent(format!(
                            "{team} has more than {} scouts",
                            office.config.max_scouts
                        )));
                    }
                    desk.roster_mut().insert_raw(scout);
                    office.scout_index.insert(id, team);
                }
                None => {
                    if scout.current_assignment.is_some() {
                        return Err(inconsistent(format!("free agent {id} holds an assignment")));
                    }
                    office.free_agents.insert(id, scout);
                }
            }
        }

        for assignment in snapshot.assignments {
            let scout = office
                .scout(assignment.scout)
                .filter(|s| s.team == Some(assignment.team))
                .ok_or_else(|| {
                    inconsistent(format!(
                        "{} references {} outside {}",
                        assignment.id, assignment.scout, assignment.team
                    ))
                })?;
            if scout.current_assignment != Some(assignment.id) {
                return Err(inconsistent(format!(
                    "{} is not linked from {}",
                    assignment.id, assignment.scout
                )));
            }
            office.next_assignment_id = next_after(office.next_assignment_id, assignment.id.get());
            let desk = office
                .desks
                .get_mut(&assignment.team)
                .ok_or_else(|| inconsistent(format!("{} has no desk", assignment.team)))?;
            if let Some(duplicate) = desk.ledger_mut().insert_raw(assignment) {
                return Err(inconsistent(format!(
                    "{} holds more than one assignment",
                    duplicate.scout
                )));
            }
        }

        for desk in office.desks.values() {
            if let Some(dangling) = desk
                .roster()
                .iter()
                .find(|s| s.current_assignment.is_some() && !desk.ledger().contains(s.id))
            {
                return Err(inconsistent(format!(
                    "{} points at a missing assignment",
                    dangling.id
                )));
            }
        }

        for report in snapshot.reports {
            office
                .desks
                .entry(report.team)
                .or_insert_with(|| TeamDesk::new(report.team))
                .store_report(report);
        }
        for entry in snapshot.history {
            office.history.insert_raw(entry);
        }

        info!(
            teams = office.desks.len(),
            scouts = office.scout_index.len(),
            free_agents = office.free_agents.len(),
            "Scouting office restored"
        );
        Ok(office)
    }

    // ---- Internals ----

    fn check_date(&self, date: NaiveDate) -> ScoutingResult<()> {
        if date < self.today {
            return Err(ScoutingError::DateRegression {
                today: self.today,
                requested: date,
            });
        }
        Ok(())
    }

    fn desk_of_mut(&mut self, scout: ScoutId) -> ScoutingResult<&mut TeamDesk> {
        let team = self
            .scout_index
            .get(&scout)
            .ok_or(ScoutingError::ScoutNotFound(scout))?;
        self.desks
            .get_mut(team)
            .ok_or(ScoutingError::TeamNotFound(*team))
    }
}

/// Next free id once `used` is taken; `None` when nothing is left above it.
fn next_after(next: Option<u64>, used: u64) -> Option<u64> {
    match (next, used.checked_add(1)) {
        (Some(next), Some(after)) => Some(next.max(after)),
        _ => None,
    }
}

impl std::fmt::Debug for ScoutingOffice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoutingOffice")
            .field("config", &self.config)
            .field("today", &self.today)
            .field("teams", &self.desks.len())
            .field("employed", &self.scout_index.len())
            .field("free_agents", &self.free_agents.len())
            .field("history", &self.history.len())
            .finish()
    }
}
