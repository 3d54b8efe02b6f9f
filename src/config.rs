//! Office-wide configuration.
//!
//! [`ScoutingConfig`] holds the roster limits, the assignment length cap,
//! and the [`StalenessPolicy`] used to age scouting reports.

/// When a scouting report is considered outdated, and how fast its
/// confidence fades.
///
/// # Examples
///
/// ```
/// use u_scouting::StalenessPolicy;
///
/// let policy = StalenessPolicy::default()
///     .with_shelf_life_days(21)
///     .with_half_life_days(14);
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StalenessPolicy {
    /// Age in days beyond which a report is outdated.
    ///
    /// A report generated exactly `shelf_life_days` ago is still current.
    pub shelf_life_days: u32,

    /// Days for a report's effective confidence to halve.
    pub half_life_days: u32,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self {
            shelf_life_days: 30,
            half_life_days: 30,
        }
    }
}

impl StalenessPolicy {
    pub fn with_shelf_life_days(mut self, days: u32) -> Self {
        self.shelf_life_days = days;
        self
    }

    pub fn with_half_life_days(mut self, days: u32) -> Self {
        self.half_life_days = days;
        self
    }

    /// Returns `true` when a report of the given age is outdated.
    pub fn is_outdated(&self, age_days: i64) -> bool {
        age_days > i64::from(self.shelf_life_days)
    }

    /// Multiplier in `(0, 1]` applied to a report's confidence at the given age.
    ///
    /// Reports dated in the future (negative age) are not boosted.
    pub fn decay_factor(&self, age_days: i64) -> f64 {
        let age = age_days.max(0) as f64;
        0.5_f64.powf(age / f64::from(self.half_life_days))
    }

    /// Validates the policy.
    pub fn validate(&self) -> Result<(), String> {
        if self.half_life_days == 0 {
            return Err("half_life_days must be positive".into());
        }
        Ok(())
    }
}

/// Configuration for a [`ScoutingOffice`](crate::ScoutingOffice).
///
/// # Defaults
///
/// ```
/// use u_scouting::ScoutingConfig;
///
/// let config = ScoutingConfig::default();
/// assert_eq!(config.max_scouts, 5);
/// assert_eq!(config.min_scouts, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_scouting::{ScoutingConfig, StalenessPolicy};
///
/// let config = ScoutingConfig::default()
///     .with_max_scouts(8)
///     .with_max_assignment_days(30)
///     .with_staleness(StalenessPolicy::default().with_shelf_life_days(14));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoutingConfig {
    /// Maximum scouts a team may employ. Hiring beyond this is rejected.
    pub max_scouts: usize,

    /// Minimum scouts a team must keep. Firing below this is rejected.
    pub min_scouts: usize,

    /// Longest assignment a scout may be given, in days.
    pub max_assignment_days: u32,

    /// Report aging policy.
    pub staleness: StalenessPolicy,
}

impl Default for ScoutingConfig {
    fn default() -> Self {
        Self {
            max_scouts: 5,
            min_scouts: 1,
            max_assignment_days: 60,
            staleness: StalenessPolicy::default(),
        }
    }
}

impl ScoutingConfig {
    pub fn with_max_scouts(mut self, n: usize) -> Self {
        self.max_scouts = n;
        self
    }

    pub fn with_min_scouts(mut self, n: usize) -> Self {
        self.min_scouts = n;
        self
    }

    pub fn with_max_assignment_days(mut self, days: u32) -> Self {
        self.max_assignment_days = days;
        self
    }

    pub fn with_staleness(mut self, staleness: StalenessPolicy) -> Self {
        self.staleness = staleness;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_scouts == 0 {
            return Err("max_scouts must be positive".into());
        }
        if self.min_scouts > self.max_scouts {
            return Err(format!(
                "min_scouts ({}) must not exceed max_scouts ({})",
                self.min_scouts, self.max_scouts
            ));
        }
        if self.max_assignment_days == 0 {
            return Err("max_assignment_days must be positive".into());
        }
        self.staleness.validate()
    }
}
