//! Scouting report and history records.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::assignment::{ScoutingTarget, TargetKey};
use crate::config::StalenessPolicy;
use crate::ids::{ScoutId, TeamId};

/// What a [`ReportGenerator`](super::ReportGenerator) produces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportContent {
    /// Accuracy of the estimates, in `[0, 1]`.
    pub confidence: f64,

    /// One-line qualitative assessment.
    pub summary: String,

    /// Estimated attribute ratings keyed by attribute name.
    pub grades: BTreeMap<String, u8>,
}

/// The knowledge a team holds about one target.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoutingReport {
    /// Team that owns the report.
    pub team: TeamId,
    pub target: ScoutingTarget,
    pub target_name: String,
    /// Scout whose assignment produced the report.
    pub scout: ScoutId,
    pub generated_on: NaiveDate,
    pub content: ReportContent,
}

impl ScoutingReport {
    pub fn target_key(&self) -> TargetKey {
        self.target.key()
    }

    pub fn confidence(&self) -> f64 {
        self.content.confidence
    }

    /// Days since the report was generated.
    pub fn age_days(&self, now: NaiveDate) -> i64 {
        (now - self.generated_on).num_days()
    }

    pub fn is_outdated(&self, now: NaiveDate, policy: &StalenessPolicy) -> bool {
        policy.is_outdated(self.age_days(now))
    }

    /// Confidence after applying the policy's half-life decay.
    pub fn effective_confidence(&self, now: NaiveDate, policy: &StalenessPolicy) -> f64 {
        self.content.confidence * policy.decay_factor(self.age_days(now))
    }
}

/// Organization-wide audit trail for one target.
///
/// Survives report supersession and never shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoutingHistory {
    pub target: TargetKey,
    pub times_observed: u32,
    pub last_observed: NaiveDate,
    /// Every scout that has completed an assignment on this target.
    pub observers: BTreeSet<ScoutId>,
}

impl ScoutingHistory {
    pub(crate) fn first(target: TargetKey, date: NaiveDate, scout: ScoutId) -> Self {
        Self {
            target,
            times_observed: 1,
            last_observed: date,
            observers: BTreeSet::from([scout]),
        }
    }

    pub(crate) fn record(&mut self, date: NaiveDate, scout: ScoutId) {
        self.times_observed = self.times_observed.saturating_add(1);
        self.last_observed = self.last_observed.max(date);
        self.observers.insert(scout);
    }
}
