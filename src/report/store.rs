//! Latest-only report store and the organization-wide history book.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::assignment::TargetKey;
use crate::config::StalenessPolicy;
use crate::ids::ScoutId;

use super::types::{ScoutingHistory, ScoutingReport};

/// One team's reports, at most one per target.
#[derive(Debug, Clone, Default)]
pub struct ReportStore {
    reports: BTreeMap<TargetKey, ScoutingReport>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Inserts a report, returning the one it supersedes.
    pub fn upsert(&mut self, report: ScoutingReport) -> Option<ScoutingReport> {
        self.reports.insert(report.target_key(), report)
    }

    pub fn get(&self, target: TargetKey) -> Option<&ScoutingReport> {
        self.reports.get(&target)
    }

    /// Reports ordered by target key.
    pub fn iter(&self) -> impl Iterator<Item = &ScoutingReport> {
        self.reports.values()
    }

    /// Reports older than the policy's shelf life as of `now`.
    pub fn outdated(&self, now: NaiveDate, policy: &StalenessPolicy) -> Vec<&ScoutingReport> {
        self.reports
            .values()
            .filter(|r| r.is_outdated(now, policy))
            .collect()
    }
}

/// Times-observed, last-observed and observer set per target, across all teams.
#[derive(Debug, Clone, Default)]
pub struct HistoryBook {
    entries: HashMap<TargetKey, ScoutingHistory>,
}

impl HistoryBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, target: TargetKey) -> Option<&ScoutingHistory> {
        self.entries.get(&target)
    }

    /// Number of completed observations of `target` so far (0 if never seen).
    pub fn times_observed(&self, target: TargetKey) -> u32 {
        self.entries
            .get(&target)
            .map(|h| h.times_observed)
            .unwrap_or(0)
    }

    /// Records one completed observation.
    pub fn record(
        &mut self,
        target: TargetKey,
        date: NaiveDate,
        scout: ScoutId,
    ) -> &ScoutingHistory {
        self.entries
            .entry(target)
            .and_modify(|h| h.record(date, scout))
            .or_insert_with(|| ScoutingHistory::first(target, date, scout))
    }

    /// Entries sorted by target key.
    pub fn sorted(&self) -> Vec<&ScoutingHistory> {
        let mut entries: Vec<&ScoutingHistory> = self.entries.values().collect();
        entries.sort_by_key(|h| h.target);
        entries
    }

    pub(crate) fn insert_raw(&mut self, history: ScoutingHistory) -> Option<ScoutingHistory> {
        self.entries.insert(history.target, history)
    }
}
