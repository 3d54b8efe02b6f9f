//! Report Store & History.
//!
//! Completed assignments turn into [`ScoutingReport`]s. Each team keeps the
//! latest report per target in a [`ReportStore`]; the office keeps a single
//! [`HistoryBook`] recording how often and when every target was observed.
//!
//! Reports age: [`StalenessPolicy`](crate::StalenessPolicy) decides when a
//! report is outdated and how its confidence decays. Both are evaluated
//! against an explicit `now`, never a clock.
//!
//! # Seams
//!
//! - [`PlayerDirectory`]: resolves player ids to profiles
//! - [`ReportGenerator`]: scores an observation into [`ReportContent`];
//!   [`GradedReportGenerator`] is the default implementation

mod generator;
mod store;
mod types;

pub use generator::{
    GradedReportGenerator, GradedReportGeneratorConfig, InMemoryDirectory, PlayerDirectory,
    PlayerProfile, ReportGenerator,
};
pub use store::{HistoryBook, ReportStore};
pub use types::{ReportContent, ScoutingHistory, ScoutingReport};
