//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every tunable the control surface can touch lives
//! here, and the whole struct is threaded explicitly into the components that
//! read it.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults)
//! 3. Runtime edits through `World::configure`, validated before they stick
//!
//! ## Example `config.toml`
//!
//! ```toml
//! simulation_speed = 2
//!
//! [world]
//! width = 800.0
//! height = 600.0
//! seed = 42
//!
//! [ants]
//! speed = 1.5
//! perception_radius = 25.0
//!
//! [ants.steering_forces]
//! random = 1.0
//! colony_attraction = 0.0
//!
//! [pheromones]
//! decay_rate = 1.0
//! food_trail_ranking = "strongest"
//!
//! [[terrain]]
//! x = 200.0
//! y = 150.0
//! radius = 60.0
//! speed_multiplier = 0.5
//! ```

use crate::error::SimError;
use crate::ranking::RankingPolicy;
use myrmex_data::{TerrainZone, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World-level configuration: bounds, colony placement and initial stock.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub seed: Option<u64>,
    /// Colony point. Defaults to the world center when unset.
    pub colony: Option<(f64, f64)>,
    /// Landing radius agents must reach to be taken in.
    pub colony_radius: f64,
    pub initial_ants: usize,
    /// Number of food sources kept alive by replenishment.
    pub food_sources: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            seed: None,
            colony: None,
            colony_radius: 15.0,
            initial_ants: 0,
            food_sources: 5,
        }
    }
}

impl WorldConfig {
    #[must_use]
    pub fn colony_position(&self) -> Vec2 {
        self.colony
            .map(Vec2::from)
            .unwrap_or_else(|| Vec2::new(self.width / 2.0, self.height / 2.0))
    }
}

/// Relative importance of each standard steering influence.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SteeringForces {
    pub random: f64,
    pub avoidance: f64,
    pub pheromone_avoidance: f64,
    pub colony_attraction: f64,
}

impl Default for SteeringForces {
    fn default() -> Self {
        Self {
            random: 1.0,
            avoidance: 1.5,
            pheromone_avoidance: 0.5,
            colony_attraction: 0.1,
        }
    }
}

/// Forager kinematics, sensing and population parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AntConfig {
    pub speed: f64,
    pub perception_radius: f64,
    pub max_ants: usize,
    /// Body diameter; half of it is the contact radius.
    pub size: f64,
    /// Ticks between spawn attempts.
    pub spawn_interval: u64,
    /// Ticks between scent deposits.
    pub deposit_interval: u64,
    /// Carried strength lost after each deposit. Kept below
    /// `deposit_interval * decay_rate` so newer markers of a trail outrank
    /// older ones.
    pub carried_strength_decay: f64,
    /// Noise offset advance per sample.
    pub noise_increment: f64,
    /// Heading multiplier applied to the random steer noise.
    pub noise_frequency: f64,
    /// Magnitude of the wobble added when homing on a target.
    pub trail_noise: f64,
    pub steering_forces: SteeringForces,
}

impl Default for AntConfig {
    fn default() -> Self {
        Self {
            speed: 1.5,
            perception_radius: 25.0,
            max_ants: 100,
            size: 5.0,
            spawn_interval: 10,
            deposit_interval: 5,
            carried_strength_decay: 2.0,
            noise_increment: 0.01,
            noise_frequency: 4.0,
            trail_noise: 0.3,
            steering_forces: SteeringForces::default(),
        }
    }
}

impl AntConfig {
    #[inline]
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PheromoneConfig {
    /// Strength lost per tick by every marker.
    pub decay_rate: f64,
    /// Carried strength at the start of a trip; also the reference maximum
    /// for pheromone avoidance.
    pub initial_strength: f64,
    /// Which food marker a trail follower chases.
    pub food_trail_ranking: RankingPolicy,
    /// Which explore marker a returning forager chases.
    pub return_trail_ranking: RankingPolicy,
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        Self {
            decay_rate: 1.0,
            initial_strength: 255.0,
            food_trail_ranking: RankingPolicy::Weakest,
            return_trail_ranking: RankingPolicy::Weakest,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FoodConfig {
    pub initial_quantity: f64,
    pub size: f64,
    /// Quantity removed per forager contact.
    pub bite_size: f64,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            initial_quantity: 100.0,
            size: 10.0,
            bite_size: 10.0,
        }
    }
}

/// One `[[terrain]]` entry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TerrainZoneConfig {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub speed_multiplier: f64,
}

impl From<TerrainZoneConfig> for TerrainZone {
    fn from(c: TerrainZoneConfig) -> Self {
        TerrainZone::new(Vec2::new(c.x, c.y), c.radius, c.speed_multiplier)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub ants: AntConfig,
    pub pheromones: PheromoneConfig,
    pub food: FoodConfig,
    pub terrain: Vec<TerrainZoneConfig>,
    /// Steps executed per frame.
    pub simulation_speed: u32,
    pub simulation_paused: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            ants: AntConfig::default(),
            pheromones: PheromoneConfig::default(),
            food: FoodConfig::default(),
            terrain: vec![
                TerrainZoneConfig {
                    x: 200.0,
                    y: 150.0,
                    radius: 60.0,
                    speed_multiplier: 0.5,
                },
                TerrainZoneConfig {
                    x: 600.0,
                    y: 450.0,
                    radius: 80.0,
                    speed_multiplier: 0.3,
                },
            ],
            simulation_speed: 1,
            simulation_paused: false,
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    ///
    /// # Validation Rules
    /// - World dimensions must be positive and finite
    /// - Speeds, radii and sizes must be positive
    /// - Force weights and rates must be non-negative
    /// - Intervals and the simulation speed must be at least one
    pub fn validate(&self) -> anyhow::Result<()> {
        let w = &self.world;
        anyhow::ensure!(
            w.width > 0.0 && w.width.is_finite(),
            "World width must be positive"
        );
        anyhow::ensure!(
            w.height > 0.0 && w.height.is_finite(),
            "World height must be positive"
        );
        anyhow::ensure!(
            w.colony_radius >= 0.0,
            "Colony radius must be non-negative"
        );
        if let Some((cx, cy)) = w.colony {
            anyhow::ensure!(
                (0.0..w.width).contains(&cx) && (0.0..w.height).contains(&cy),
                "Colony must lie inside the world"
            );
        }

        let a = &self.ants;
        anyhow::ensure!(a.speed > 0.0, "Ant speed must be positive");
        anyhow::ensure!(
            a.perception_radius > 0.0,
            "Perception radius must be positive"
        );
        anyhow::ensure!(a.size > 0.0, "Ant size must be positive");
        anyhow::ensure!(a.spawn_interval > 0, "Spawn interval must be positive");
        anyhow::ensure!(a.deposit_interval > 0, "Deposit interval must be positive");
        anyhow::ensure!(
            a.carried_strength_decay >= 0.0,
            "Carried strength decay must be non-negative"
        );
        anyhow::ensure!(a.noise_increment > 0.0, "Noise increment must be positive");
        anyhow::ensure!(a.trail_noise >= 0.0, "Trail noise must be non-negative");
        anyhow::ensure!(
            w.initial_ants <= a.max_ants,
            "Initial ants exceed max ants"
        );

        let f = &a.steering_forces;
        anyhow::ensure!(
            f.random >= 0.0
                && f.avoidance >= 0.0
                && f.pheromone_avoidance >= 0.0
                && f.colony_attraction >= 0.0,
            "Steering weights must be non-negative"
        );

        let p = &self.pheromones;
        anyhow::ensure!(p.decay_rate >= 0.0, "Decay rate must be non-negative");
        anyhow::ensure!(
            p.initial_strength > 0.0,
            "Initial strength must be positive"
        );

        let food = &self.food;
        anyhow::ensure!(
            food.initial_quantity > 0.0,
            "Food quantity must be positive"
        );
        anyhow::ensure!(food.size > 0.0, "Food size must be positive");
        anyhow::ensure!(food.bite_size > 0.0, "Bite size must be positive");

        for zone in &self.terrain {
            anyhow::ensure!(zone.radius > 0.0, "Terrain radius must be positive");
            anyhow::ensure!(
                zone.speed_multiplier.is_finite(),
                "Terrain speed multiplier must be finite"
            );
        }

        anyhow::ensure!(
            self.simulation_speed >= 1,
            "Simulation speed must be at least 1"
        );
        anyhow::ensure!(
            self.simulation_speed <= 64,
            "Simulation speed too high (max 64)"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SimError> {
        let config = toml::from_str::<Self>(content)?;
        config
            .validate()
            .map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields the defaults; a present but invalid file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    #[must_use]
    pub fn terrain_zones(&self) -> Vec<TerrainZone> {
        self.terrain.iter().copied().map(TerrainZone::from).collect()
    }

    /// Hash of the behavior-relevant sections, for telling runs apart.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.ants).as_bytes());
        hasher.update(format!("{:?}", self.pheromones).as_bytes());
        hasher.update(format!("{:?}", self.food).as_bytes());
        hasher.update(format!("{:?}", self.terrain).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_world_width() {
        let config = AppConfig {
            world: WorldConfig {
                width: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = AppConfig::default();
        config.ants.steering_forces.avoidance = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_simulation_speed_rejected() {
        let config = AppConfig {
            simulation_speed: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_colony_outside_world_rejected() {
        let mut config = AppConfig::default();
        config.world.colony = Some((-5.0, 10.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_colony_defaults_to_center() {
        let config = AppConfig::default();
        assert_eq!(config.world.colony_position(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            simulation_speed = 3

            [ants]
            perception_radius = 35.0

            [pheromones]
            return_trail_ranking = "strongest"
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation_speed, 3);
        assert_eq!(config.ants.perception_radius, 35.0);
        assert_eq!(config.ants.speed, AntConfig::default().speed);
        assert_eq!(config.pheromones.return_trail_ranking, RankingPolicy::Strongest);
    }

    #[test]
    fn test_invalid_toml_value_is_error() {
        let err = AppConfig::from_toml("[ants]\nspeed = -1.0\n").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_fingerprint_tracks_changes() {
        let config1 = AppConfig::default();
        let mut config2 = AppConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());
        config2.ants.speed = 2.0;
        assert_ne!(config1.fingerprint(), config2.fingerprint());
    }

    #[test]
    fn test_default_trails_have_a_gradient() {
        let config = AppConfig::default();
        let per_deposit_decay =
            config.ants.deposit_interval as f64 * config.pheromones.decay_rate;
        assert!(config.ants.carried_strength_decay < per_deposit_decay);
        assert_eq!(config.pheromones.food_trail_ranking, RankingPolicy::Weakest);
        assert_eq!(config.pheromones.return_trail_ranking, RankingPolicy::Weakest);
    }

    #[test]
    fn test_terrain_multiplier_only_needs_to_be_finite() {
        let mut config = AppConfig::default();
        config.terrain[0].speed_multiplier = -0.5;
        assert!(config.validate().is_ok());
        config.terrain[0].speed_multiplier = f64::NAN;
        assert!(config.validate().is_err());
    }
}
