//! Free-agent scout generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ids::ScoutId;

use super::types::{Scout, Specialization};

const FIRST_NAMES: &[&str] = &[
    "Avery", "Blake", "Casey", "Dana", "Elliot", "Frankie", "Gray", "Harper", "Jordan",
    "Kendall", "Logan", "Morgan", "Quinn", "Reese", "Sasha", "Taylor",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Barnes", "Coleman", "Delgado", "Ellis", "Fischer", "Grant", "Hughes", "Iverson",
    "Jennings", "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Petrov",
];

/// Configuration for [`FreeAgentGenerator`].
///
/// # Examples
///
/// ```
/// use u_scouting::pool::FreeAgentConfig;
///
/// let config = FreeAgentConfig::default()
///     .with_capacity_range(40, 85)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FreeAgentConfig {
    /// Lowest capacity a generated scout can have (inclusive).
    pub capacity_min: u8,

    /// Highest capacity a generated scout can have (inclusive).
    pub capacity_max: u8,

    /// Relative weights for Pro, College and Advance specializations.
    pub specialization_weights: [f64; 3],

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for FreeAgentConfig {
    fn default() -> Self {
        Self {
            capacity_min: 30,
            capacity_max: 90,
            specialization_weights: [0.4, 0.4, 0.2],
            seed: None,
        }
    }
}

impl FreeAgentConfig {
    pub fn with_capacity_range(mut self, min: u8, max: u8) -> Self {
        self.capacity_min = min;
        self.capacity_max = max;
        self
    }

    pub fn with_specialization_weights(mut self, weights: [f64; 3]) -> Self {
        self.specialization_weights = weights;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.capacity_min == 0 || self.capacity_max > 100 {
            return Err("capacity range must lie within 1..=100".into());
        }
        if self.capacity_min > self.capacity_max {
            return Err(format!(
                "capacity_min ({}) must not exceed capacity_max ({})",
                self.capacity_min, self.capacity_max
            ));
        }
        if self
            .specialization_weights
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err("specialization weights must be finite and non-negative".into());
        }
        if self.specialization_weights.iter().sum::<f64>() <= 0.0 {
            return Err("at least one specialization weight must be positive".into());
        }
        Ok(())
    }
}

/// Produces unaffiliated scouts with random names, skills and specializations.
///
/// The generator owns its RNG, so successive batches differ while the whole
/// sequence stays reproducible for a fixed seed.
#[derive(Debug, Clone)]
pub struct FreeAgentGenerator {
    config: FreeAgentConfig,
    rng: StdRng,
}

impl FreeAgentGenerator {
    /// Creates a generator. Fails when the configuration is invalid.
    pub fn new(config: FreeAgentConfig) -> Result<Self, String> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &FreeAgentConfig {
        &self.config
    }

    /// Generates `count` scouts with consecutive ids starting at `first_id`.
    ///
    /// Stops early at `u64::MAX` rather than wrapping around.
    pub fn generate(&mut self, first_id: u64, count: usize) -> Vec<Scout> {
        (0..count as u64)
            .map_while(|offset| first_id.checked_add(offset))
            .map(|id| self.generate_one(ScoutId(id)))
            .collect()
    }

    fn generate_one(&mut self, id: ScoutId) -> Scout {
        let first = FIRST_NAMES[self.rng.random_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[self.rng.random_range(0..LAST_NAMES.len())];
        let capacity = self
            .rng
            .random_range(self.config.capacity_min..=self.config.capacity_max);
        let specialization = self.pick_specialization();
        Scout::new(id, format!("{first} {last}"), specialization, capacity)
    }

    fn pick_specialization(&mut self) -> Specialization {
        let weights = self.config.specialization_weights;
        let total: f64 = weights.iter().sum();
        let mut roll = self.rng.random_range(0.0..total);
        for (spec, weight) in Specialization::ALL.iter().zip(weights.iter()) {
            if roll < *weight {
                return *spec;
            }
            roll -= weight;
        }
        // Floating-point leftovers land on the last weighted entry.
        Specialization::ALL
            .iter()
            .zip(weights.iter())
            .rev()
            .find(|(_, w)| **w > 0.0)
            .map(|(spec, _)| *spec)
            .unwrap_or(Specialization::Pro)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = FreeAgentConfig::default().with_seed(42);
        let a = FreeAgentGenerator::new(config.clone()).unwrap().generate(1, 10);
        let b = FreeAgentGenerator::new(config).unwrap().generate(1, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_generated_scouts_respect_config() {
        let config = FreeAgentConfig::default()
            .with_capacity_range(50, 60)
            .with_seed(3);
        let scouts = FreeAgentGenerator::new(config).unwrap().generate(100, 50);

        assert_eq!(scouts.len(), 50);
        for (i, scout) in scouts.iter().enumerate() {
            assert_eq!(scout.id, ScoutId(100 + i as u64));
            assert!((50..=60).contains(&scout.capacity));
            assert!(scout.is_free_agent());
            assert!(scout.is_available());
        }
    }

    #[test]
    fn test_generation_stops_at_id_limit() {
        let config = FreeAgentConfig::default().with_seed(5);
        let scouts = FreeAgentGenerator::new(config)
            .unwrap()
            .generate(u64::MAX - 1, 5);
        let ids: Vec<ScoutId> = scouts.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![ScoutId(u64::MAX - 1), ScoutId(u64::MAX)]);
    }

    #[test]
    fn test_single_weight_forces_specialization() {
        let config = FreeAgentConfig::default()
            .with_specialization_weights([0.0, 0.0, 1.0])
            .with_seed(11);
        let scouts = FreeAgentGenerator::new(config).unwrap().generate(0, 20);
        assert!(scouts
            .iter()
            .all(|s| s.specialization == Specialization::Advance));
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        assert!(FreeAgentConfig::default()
            .with_capacity_range(80, 20)
            .validate()
            .is_err());
        assert!(FreeAgentConfig::default()
            .with_capacity_range(0, 20)
            .validate()
            .is_err());
        assert!(FreeAgentConfig::default()
            .with_specialization_weights([0.0, 0.0, 0.0])
            .validate()
            .is_err());
    }
}
