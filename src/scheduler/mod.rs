//! Daily Scheduler.
//!
//! Advances every live assignment of a team by one simulated day, closes
//! the ones whose declared duration has elapsed, turns them into reports
//! and history entries, and frees their scouts.
//!
//! Opponent-team assignments complete and are recorded in history, but do
//! not produce a report ([`CompletionOutcome::TeamReportDeferred`]).
//! A player missing from the directory closes the assignment without a
//! report but still counts as an observation in history. It is surfaced
//! as a [`ScoutingAnomaly`], never as an error.

mod runner;
mod types;

pub(crate) use runner::AdvancedDay;
pub use runner::DailyScheduler;
pub use types::{CompletedAssignment, CompletionOutcome, DayOutcome, ScoutingAnomaly};
