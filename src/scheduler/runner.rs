//! Daily scheduler execution.
//!
//! # Algorithm
//!
//! 1. Advance phase (per desk, touches only that desk):
//!    a. For each rostered scout holding an assignment, bump its counter
//!    b. If the completion predicate holds, close the assignment and
//!       return the scout to Idle
//!    c. Drop ledger entries whose scout has left the roster
//! 2. Resolve phase (needs the office-wide history):
//!    a. Player target: look up the player and generate a report, or
//!       record a directory miss
//!    b. Team target: no report
//!    c. Record the observation in history for every completion, then
//!       store the report if one was produced
//!
//! Splitting the phases lets a league-wide day advance every desk in
//! parallel and still resolve in a fixed team order.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::assignment::{Assignment, ScoutingTarget};
use crate::desk::{DayProgress, TeamDesk};
use crate::ids::{ScoutId, TeamId};
use crate::report::{HistoryBook, PlayerDirectory, ReportGenerator, ScoutingReport};

use super::types::{CompletedAssignment, CompletionOutcome, DayOutcome, ScoutingAnomaly};

/// Result of the advance phase for one desk.
#[derive(Debug, Clone)]
pub(crate) struct AdvancedDay {
    pub(crate) team: TeamId,
    pub(crate) advanced: usize,
    pub(crate) completed: Vec<Assignment>,
    pub(crate) orphans: Vec<Assignment>,
}

/// Advances scouting assignments by one simulated day.
pub struct DailyScheduler;

impl DailyScheduler {
    /// Processes one team's day and returns what happened.
    ///
    /// Reports appear in the outcome in roster (hiring) order.
    pub fn run<D, G>(
        desk: &mut TeamDesk,
        history: &mut HistoryBook,
        date: NaiveDate,
        directory: &D,
        generator: &G,
    ) -> DayOutcome
    where
        D: PlayerDirectory + ?Sized,
        G: ReportGenerator + ?Sized,
    {
        let advanced = Self::advance(desk, date);
        Self::resolve(desk, history, date, advanced, directory, generator)
    }

    pub(crate) fn advance(desk: &mut TeamDesk, date: NaiveDate) -> AdvancedDay {
        let team = desk.team();
        let scouts: Vec<ScoutId> = desk
            .roster()
            .iter()
            .filter(|s| !s.is_idle())
            .map(|s| s.id)
            .collect();

        let mut advanced = 0;
        let mut completed = Vec::new();
        for scout in scouts {
            match desk.advance_scout(scout, date) {
                Some(DayProgress::Ongoing { observations }) => {
                    advanced += 1;
                    debug!(team = %team, scout = %scout, observations, "Assignment advanced");
                }
                Some(DayProgress::Completed(assignment)) => {
                    advanced += 1;
                    completed.push(assignment);
                }
                None => {}
            }
        }

        let orphans = desk.take_orphans();
        AdvancedDay {
            team,
            advanced,
            completed,
            orphans,
        }
    }

    pub(crate) fn resolve<D, G>(
        desk: &mut TeamDesk,
        history: &mut HistoryBook,
        date: NaiveDate,
        advanced: AdvancedDay,
        directory: &D,
        generator: &G,
    ) -> DayOutcome
    where
        D: PlayerDirectory + ?Sized,
        G: ReportGenerator + ?Sized,
    {
        let team = advanced.team;
        let mut outcome = DayOutcome::new(team, date);
        outcome.advanced = advanced.advanced;

        for orphan in advanced.orphans {
            warn!(
                team = %team,
                scout = %orphan.scout,
                assignment = %orphan.id,
                "Dropping assignment of a scout no longer on the roster"
            );
            outcome.anomalies.push(ScoutingAnomaly::OrphanedAssignment {
                team,
                scout: orphan.scout,
                assignment: orphan.id,
            });
        }

        for assignment in advanced.completed {
            let key = assignment.target.key();
            let result = match assignment.target {
                ScoutingTarget::Player { id: player, .. } => {
                    let profile = directory.lookup(player);
                    let scout = desk.roster().get(assignment.scout);
                    match (profile, scout) {
                        (Some(profile), Some(scout)) => {
                            let prior = history.times_observed(key);
                            let content =
                                generator.generate(&profile, scout, prior, assignment.observations);
                            let report = ScoutingReport {
                                team,
                                target: assignment.target,
                                target_name: profile.name,
                                scout: scout.id,
                                generated_on: date,
                                content,
                            };
                            history.record(key, date, assignment.scout);
                            info!(
                                team = %team,
                                scout = %assignment.scout,
                                target = %key,
                                confidence = report.content.confidence,
                                "Scouting report filed"
                            );
                            desk.store_report(report.clone());
                            outcome.reports.push(report);
                            CompletionOutcome::Reported
                        }
                        _ => {
                            history.record(key, date, assignment.scout);
                            warn!(
                                team = %team,
                                scout = %assignment.scout,
                                player = %player,
                                "Player not found in directory; assignment closed without a report"
                            );
                            outcome.anomalies.push(ScoutingAnomaly::DirectoryMiss {
                                team,
                                scout: assignment.scout,
                                player,
                                assignment: assignment.id,
                            });
                            CompletionOutcome::DirectoryMiss
                        }
                    }
                }
                ScoutingTarget::Team(opponent) => {
                    history.record(key, date, assignment.scout);
                    // Opponent reports are not generated yet; only history is kept.
                    info!(
                        team = %team,
                        scout = %assignment.scout,
                        opponent = %opponent,
                        "Opponent scouting completed"
                    );
                    CompletionOutcome::TeamReportDeferred
                }
            };
            outcome.completed.push(CompletedAssignment {
                assignment,
                outcome: result,
            });
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::{PlayerKind, TargetKey};
    use crate::config::ScoutingConfig;
    use crate::ids::{AssignmentId, PlayerId};
    use crate::pool::{Scout, Specialization};
    use crate::report::{GradedReportGenerator, InMemoryDirectory, PlayerProfile};
    use chrono::Days;

    fn date(day: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 1).unwrap() + Days::new(day)
    }

    fn directory() -> InMemoryDirectory {
        InMemoryDirectory::new()
            .with_player(
                PlayerProfile::new(PlayerId(1), "Jalen Cross", PlayerKind::NbaPlayer)
                    .with_attribute("shooting", 75)
                    .with_attribute("defense", 60),
            )
            .with_player(
                PlayerProfile::new(PlayerId(2), "Theo Banks", PlayerKind::CollegeProspect)
                    .with_attribute("athleticism", 80),
            )
    }

    fn desk(scouts: u64) -> TeamDesk {
        let config = ScoutingConfig::default();
        let mut desk = TeamDesk::new(TeamId(1));
        for id in 1..=scouts {
            desk.hire(
                Scout::new(ScoutId(id), format!("S{id}"), Specialization::Pro, 70),
                &config,
            )
            .unwrap();
        }
        desk
    }

    fn assign(desk: &mut TeamDesk, scout: u64, target: ScoutingTarget, days: u32) {
        desk.assign(
            AssignmentId(scout * 100),
            ScoutId(scout),
            target,
            days,
            date(0),
            &ScoutingConfig::default(),
        )
        .unwrap();
    }

    fn run(desk: &mut TeamDesk, history: &mut HistoryBook, day: u64) -> DayOutcome {
        DailyScheduler::run(
            desk,
            history,
            date(day),
            &directory(),
            &GradedReportGenerator::default(),
        )
    }

    #[test]
    fn test_seven_day_assignment() {
        let mut desk = desk(1);
        let mut history = HistoryBook::new();
        assign(&mut desk, 1, ScoutingTarget::nba_player(PlayerId(1)), 7);

        for day in 1..=6 {
            let outcome = run(&mut desk, &mut history, day);
            assert!(outcome.reports().is_empty(), "no report on day {day}");
            assert_eq!(outcome.advanced, 1);
            assert!(desk.ledger().contains(ScoutId(1)));
        }
        assert_eq!(desk.ledger().get(ScoutId(1)).unwrap().observations, 6);

        let outcome = run(&mut desk, &mut history, 7);
        assert_eq!(outcome.reports().len(), 1);
        assert_eq!(outcome.completed[0].outcome, CompletionOutcome::Reported);
        assert_eq!(outcome.completed[0].assignment.observations, 7);
        assert!(desk.roster().get(ScoutId(1)).unwrap().is_idle());
        assert!(desk.ledger().is_empty());
        assert_eq!(desk.reports().len(), 1);
        assert_eq!(history.times_observed(TargetKey::Player(PlayerId(1))), 1);
    }

    #[test]
    fn test_before_threshold_only_counter_changes() {
        let mut desk = desk(1);
        let mut history = HistoryBook::new();
        assign(&mut desk, 1, ScoutingTarget::nba_player(PlayerId(1)), 3);

        let outcome = run(&mut desk, &mut history, 1);
        assert!(outcome.is_quiet());
        assert!(history.is_empty());
        assert!(desk.reports().is_empty());
        assert!(desk.list_available().is_empty());
        assert_eq!(desk.ledger().get(ScoutId(1)).unwrap().observations, 1);
    }

    #[test]
    fn test_skipped_days_still_complete() {
        let mut desk = desk(1);
        let mut history = HistoryBook::new();
        assign(&mut desk, 1, ScoutingTarget::nba_player(PlayerId(1)), 5);

        let outcome = run(&mut desk, &mut history, 9);
        assert_eq!(outcome.reports().len(), 1);
        assert_eq!(outcome.completed[0].assignment.observations, 1);
    }

    #[test]
    fn test_directory_miss_frees_scout_and_records_history() {
        let mut desk = desk(1);
        let mut history = HistoryBook::new();
        assign(&mut desk, 1, ScoutingTarget::nba_player(PlayerId(404)), 2);

        run(&mut desk, &mut history, 1);
        let outcome = run(&mut desk, &mut history, 2);

        assert!(outcome.reports().is_empty());
        assert_eq!(outcome.completed[0].outcome, CompletionOutcome::DirectoryMiss);
        assert_eq!(
            outcome.anomalies,
            vec![ScoutingAnomaly::DirectoryMiss {
                team: TeamId(1),
                scout: ScoutId(1),
                player: PlayerId(404),
                assignment: AssignmentId(100),
            }]
        );
        assert!(desk.roster().get(ScoutId(1)).unwrap().is_idle());
        let entry = history.get(TargetKey::Player(PlayerId(404))).unwrap();
        assert_eq!(entry.times_observed, 1);
        assert_eq!(entry.last_observed, date(2));
        assert!(entry.observers.contains(&ScoutId(1)));
    }

    #[test]
    fn test_team_target_records_history_only() {
        let mut desk = desk(1);
        let mut history = HistoryBook::new();
        assign(&mut desk, 1, ScoutingTarget::team(TeamId(9)), 1);

        let outcome = run(&mut desk, &mut history, 1);
        assert!(outcome.reports().is_empty());
        assert_eq!(
            outcome.completed[0].outcome,
            CompletionOutcome::TeamReportDeferred
        );
        assert!(outcome.anomalies.is_empty());
        assert_eq!(history.times_observed(TargetKey::Team(TeamId(9))), 1);
        assert!(desk.reports().is_empty());
    }

    #[test]
    fn test_reports_follow_roster_order() {
        let mut desk = desk(3);
        let mut history = HistoryBook::new();
        // Hire order is 1, 2, 3; scout 3 targets player 1, scout 1 targets player 2.
        assign(&mut desk, 3, ScoutingTarget::nba_player(PlayerId(1)), 2);
        assign(&mut desk, 1, ScoutingTarget::prospect(PlayerId(2)), 2);

        let outcome = run(&mut desk, &mut history, 2);
        let scouts: Vec<ScoutId> = outcome.reports().iter().map(|r| r.scout).collect();
        assert_eq!(scouts, vec![ScoutId(1), ScoutId(3)]);
    }

    #[test]
    fn test_prior_observations_feed_confidence() {
        let mut desk = desk(2);
        let mut history = HistoryBook::new();
        assign(&mut desk, 1, ScoutingTarget::nba_player(PlayerId(1)), 1);
        let first = run(&mut desk, &mut history, 1).into_reports().remove(0);

        desk.assign(
            AssignmentId(7),
            ScoutId(1),
            ScoutingTarget::nba_player(PlayerId(1)),
            1,
            date(1),
            &ScoutingConfig::default(),
        )
        .unwrap();
        let second = run(&mut desk, &mut history, 2).into_reports().remove(0);

        assert!(second.confidence() > first.confidence());
        assert_eq!(desk.reports().len(), 1);
        assert_eq!(
            desk.reports()
                .get(TargetKey::Player(PlayerId(1)))
                .unwrap()
                .generated_on,
            date(2)
        );
        let entry = history.get(TargetKey::Player(PlayerId(1))).unwrap();
        assert_eq!(entry.times_observed, 2);
        assert_eq!(entry.observers.len(), 1);
    }

    #[test]
    fn test_orphaned_assignment_is_dropped() {
        let mut desk = desk(2);
        let mut history = HistoryBook::new();
        assign(&mut desk, 2, ScoutingTarget::nba_player(PlayerId(1)), 3);
        desk.roster_mut().remove(ScoutId(2));

        let outcome = run(&mut desk, &mut history, 1);
        assert_eq!(
            outcome.anomalies,
            vec![ScoutingAnomaly::OrphanedAssignment {
                team: TeamId(1),
                scout: ScoutId(2),
                assignment: AssignmentId(200),
            }]
        );
        assert!(desk.ledger().is_empty());
    }
}
