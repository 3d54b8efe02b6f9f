//! Scout Pool.
//!
//! Each team employs between `min_scouts` and `max_scouts` scouts, held in a
//! [`ScoutPool`] in hiring order. Scouts not employed by any team are free
//! agents; [`FreeAgentGenerator`] produces new ones in bulk.
//!
//! # Key Types
//!
//! - [`Scout`]: Identity, specialization, capacity and availability
//! - [`ScoutPool`]: One team's roster with hire/release limits
//! - [`FreeAgentGenerator`]: Seeded bulk creation of unaffiliated scouts

mod generator;
mod roster;
mod types;

pub use generator::{FreeAgentConfig, FreeAgentGenerator};
pub use roster::ScoutPool;
pub use types::{Scout, Specialization};
