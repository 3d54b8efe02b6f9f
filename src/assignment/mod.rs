//! Assignment Ledger.
//!
//! Each scout is either Idle (no entry) or Assigned (exactly one live
//! [`Assignment`]). Targets are a sum type, [`ScoutingTarget`], so an
//! assignment always names exactly one player or one opponent team.
//!
//! Completion is decided by the calendar, not the observation counter:
//! an assignment is complete once the days elapsed since its start reach
//! its declared duration.

mod ledger;
mod types;

pub use ledger::{AssignRequest, AssignmentLedger};
pub use types::{Assignment, PlayerKind, ScoutingTarget, TargetKey, TargetKind};
