//! Scouting core for a basketball team-management simulation.
//!
//! Teams employ a bounded roster of scouts, send them on time-boxed
//! assignments against players or opponent teams, and collect the
//! resulting reports:
//!
//! - **Scout Pool** ([`pool`]): per-team rosters with hiring limits, plus
//!   free-agent generation.
//! - **Assignment Ledger** ([`assignment`]): at most one live assignment
//!   per scout, with duration validation.
//! - **Reports** ([`report`]): per-team report store, organization-wide
//!   observation history, and the pluggable report generator.
//! - **Daily Scheduler** ([`scheduler`]): advances assignments one
//!   simulated day at a time and turns completions into reports.
//!
//! [`ScoutingOffice`] ties the tables together and is the entry point for
//! callers. It is an ordinary value: construct one per simulation.
//!
//! # Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` on entities, configs and
//!   [`OfficeSnapshot`].
//! - `parallel`: advances teams concurrently in
//!   [`ScoutingOffice::process_day_all`] via rayon.

pub mod assignment;
pub mod config;
pub mod desk;
pub mod error;
pub mod ids;
pub mod office;
pub mod pool;
pub mod report;
pub mod scheduler;

pub use assignment::{Assignment, PlayerKind, ScoutingTarget, TargetKey, TargetKind};
pub use config::{ScoutingConfig, StalenessPolicy};
pub use desk::TeamDesk;
pub use error::{ScoutingError, ScoutingResult};
pub use ids::{AssignmentId, PlayerId, ScoutId, TeamId};
pub use office::{OfficeSnapshot, ScoutingOffice};
pub use pool::{Scout, Specialization};
pub use report::{
    GradedReportGenerator, InMemoryDirectory, PlayerDirectory, PlayerProfile, ReportGenerator,
    ScoutingHistory, ScoutingReport,
};
pub use scheduler::{CompletionOutcome, DayOutcome, ScoutingAnomaly};
