//! Report generation seams: the player directory and the report generator.

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assignment::PlayerKind;
use crate::ids::PlayerId;
use crate::pool::Scout;

use super::types::ReportContent;

/// Attributes of a player as known to the wider application.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub name: String,
    pub kind: PlayerKind,
    /// True attribute ratings, 0–100, keyed by attribute name.
    pub attributes: BTreeMap<String, u8>,
}

impl PlayerProfile {
    pub fn new(id: PlayerId, name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, rating: u8) -> Self {
        self.attributes.insert(name.into(), rating.min(100));
        self
    }
}

/// Resolves player ids to profiles.
///
/// Lookups must be fast and side-effect free; they run inside the daily
/// scheduler.
pub trait PlayerDirectory {
    /// Returns the player's profile, or `None` on a directory miss.
    fn lookup(&self, id: PlayerId) -> Option<PlayerProfile>;
}

/// A [`PlayerDirectory`] backed by a hash map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    players: HashMap<PlayerId, PlayerProfile>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player(mut self, profile: PlayerProfile) -> Self {
        self.insert(profile);
        self
    }

    pub fn insert(&mut self, profile: PlayerProfile) -> Option<PlayerProfile> {
        self.players.insert(profile.id, profile)
    }

    pub fn remove(&mut self, id: PlayerId) -> Option<PlayerProfile> {
        self.players.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl PlayerDirectory for InMemoryDirectory {
    fn lookup(&self, id: PlayerId) -> Option<PlayerProfile> {
        self.players.get(&id).cloned()
    }
}

/// Turns an observed player and the observing scout into report content.
///
/// The scheduler treats implementations as opaque scoring functions. They
/// must be deterministic for identical inputs.
pub trait ReportGenerator: Send + Sync {
    /// Produces report content.
    ///
    /// * `prior_observations` - completed observations of this player
    ///   before the current one, across all teams
    /// * `observation_count` - days the current assignment was advanced
    fn generate(
        &self,
        player: &PlayerProfile,
        scout: &Scout,
        prior_observations: u32,
        observation_count: u32,
    ) -> ReportContent;
}

/// Configuration for [`GradedReportGenerator`].
///
/// Confidence is the sum of a base value and four bonuses, clamped to
/// `[0, max_confidence]`:
///
/// `base + capacity/100 * capacity_weight + min(obs * per_observation, max_observation_bonus)
///  + min(prior * per_prior_observation, max_prior_bonus) + specialization_bonus`
#[derive(Debug, Clone, PartialEq)]
pub struct GradedReportGeneratorConfig {
    pub base_confidence: f64,
    pub capacity_weight: f64,
    pub per_observation: f64,
    pub max_observation_bonus: f64,
    pub per_prior_observation: f64,
    pub max_prior_bonus: f64,
    /// Added when the scout's specialization matches the player kind.
    pub specialization_bonus: f64,
    pub max_confidence: f64,
    /// Largest rating error at zero confidence. The error bound shrinks
    /// linearly to 0 at full confidence.
    pub max_grade_error: u8,
    /// Seed mixed into every grade perturbation.
    pub seed: u64,
}

impl Default for GradedReportGeneratorConfig {
    fn default() -> Self {
        Self {
            base_confidence: 0.25,
            capacity_weight: 0.45,
            per_observation: 0.02,
            max_observation_bonus: 0.14,
            per_prior_observation: 0.03,
            max_prior_bonus: 0.09,
            specialization_bonus: 0.06,
            max_confidence: 0.98,
            max_grade_error: 15,
            seed: 0,
        }
    }
}

impl GradedReportGeneratorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_grade_error(mut self, error: u8) -> Self {
        self.max_grade_error = error;
        self
    }

    pub fn with_max_confidence(mut self, max: f64) -> Self {
        self.max_confidence = max;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        let weights = [
            self.base_confidence,
            self.capacity_weight,
            self.per_observation,
            self.max_observation_bonus,
            self.per_prior_observation,
            self.max_prior_bonus,
            self.specialization_bonus,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err("confidence weights must be finite and non-negative".into());
        }
        if !(0.0..=1.0).contains(&self.max_confidence) {
            return Err(format!(
                "max_confidence must be in [0, 1], got {}",
                self.max_confidence
            ));
        }
        Ok(())
    }
}

/// Default [`ReportGenerator`]: confidence from scout skill and exposure,
/// grades perturbed by seeded noise bounded by the remaining uncertainty.
#[derive(Debug, Clone, Default)]
pub struct GradedReportGenerator {
    config: GradedReportGeneratorConfig,
}

impl GradedReportGenerator {
    pub fn new(config: GradedReportGeneratorConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GradedReportGeneratorConfig {
        &self.config
    }

    /// Confidence for the given scout and exposure, before any grading.
    pub fn confidence(
        &self,
        player: &PlayerProfile,
        scout: &Scout,
        prior_observations: u32,
        observation_count: u32,
    ) -> f64 {
        let c = &self.config;
        let observation_bonus =
            (f64::from(observation_count) * c.per_observation).min(c.max_observation_bonus);
        let prior_bonus =
            (f64::from(prior_observations) * c.per_prior_observation).min(c.max_prior_bonus);
        let specialization_bonus = if scout.specialization.covers(player.kind.into()) {
            c.specialization_bonus
        } else {
            0.0
        };

        let raw = c.base_confidence
            + f64::from(scout.capacity) / 100.0 * c.capacity_weight
            + observation_bonus
            + prior_bonus
            + specialization_bonus;
        raw.clamp(0.0, c.max_confidence)
    }

    /// Chains `seed_from_u64` over each input so every observation gets its own stream.
    fn rng_for(
        &self,
        player: &PlayerProfile,
        scout: &Scout,
        prior: u32,
        observations: u32,
    ) -> StdRng {
        let mut state = self.config.seed;
        for value in [
            player.id.get(),
            scout.id.get(),
            u64::from(prior),
            u64::from(observations),
        ] {
            state = StdRng::seed_from_u64(state ^ value).random::<u64>();
        }
        StdRng::seed_from_u64(state)
    }
}

impl ReportGenerator for GradedReportGenerator {
    fn generate(
        &self,
        player: &PlayerProfile,
        scout: &Scout,
        prior_observations: u32,
        observation_count: u32,
    ) -> ReportContent {
        let confidence = self.confidence(player, scout, prior_observations, observation_count);
        let bound = ((1.0 - confidence) * f64::from(self.config.max_grade_error)).round() as i32;
        let mut rng = self.rng_for(player, scout, prior_observations, observation_count);

        let grades: BTreeMap<String, u8> = player
            .attributes
            .iter()
            .map(|(name, &truth)| {
                let noise = rng.random_range(-bound..=bound);
                let estimate = (i32::from(truth) + noise).clamp(0, 100) as u8;
                (name.clone(), estimate)
            })
            .collect();

        let summary = if grades.is_empty() {
            format!("{}: no measurable attributes observed", player.name)
        } else {
            let overall = grades.values().map(|&g| u32::from(g)).sum::<u32>() / grades.len() as u32;
            format!(
                "{}: {} (est. overall {}, {:.0}% confidence)",
                player.name,
                tier_label(overall),
                overall,
                confidence * 100.0
            )
        };

        ReportContent {
            confidence,
            summary,
            grades,
        }
    }
}

fn tier_label(overall: u32) -> &'static str {
    match overall {
        80.. => "franchise talent",
        70..=79 => "starter",
        60..=69 => "rotation player",
        50..=59 => "fringe roster player",
        _ => "long shot",
    }
}
