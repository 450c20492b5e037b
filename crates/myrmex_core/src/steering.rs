//! Standard steering: weighted composition of four influences.
//!
//! 1. random steer from the forager's smooth noise stream
//! 2. avoidance of peers in perception range
//! 3. avoidance of explore markers in range, scaled by their freshness
//! 4. attraction toward the colony
//!
//! Each raw influence is normalized before weighting, so the weights read as
//! relative importance no matter how many neighbors contributed. The weighted
//! sum is rescaled to the forager speed.

use crate::config::{AppConfig, SteeringForces};
use crate::noise::SmoothNoise;
use crate::scent::ScentField;
use crate::spatial_hash::SpatialHash;
use myrmex_data::{ScentChannel, Vec2};
use serde::{Deserialize, Serialize};

/// Read-only view of everything a forager can sense this tick.
#[derive(Clone, Copy)]
pub struct Neighborhood<'a> {
    /// Peer positions, indexed like the population arena.
    pub peers: &'a [Vec2],
    /// Grid over `peers`.
    pub peer_index: &'a SpatialHash,
    pub scent: &'a ScentField,
    pub colony: Vec2,
}

/// Raw (unweighted, unnormalized) influence vectors, kept for overlays.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceVectors {
    pub random: Vec2,
    pub avoidance: Vec2,
    pub pheromone_avoidance: Vec2,
    pub colony_attraction: Vec2,
}

#[derive(Debug, Clone, Copy)]
pub struct SteeringEngine {
    pub speed: f64,
    pub perception_radius: f64,
    pub weights: SteeringForces,
    pub noise_frequency: f64,
    /// Reference strength for pheromone avoidance scaling.
    pub max_strength: f64,
}

impl SteeringEngine {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            speed: config.ants.speed,
            perception_radius: config.ants.perception_radius,
            weights: config.ants.steering_forces,
            noise_frequency: config.ants.noise_frequency,
            max_strength: config.pheromones.initial_strength,
        }
    }

    /// Unit vector whose heading follows the noise stream.
    pub fn random_steer(&self, noise: &mut SmoothNoise) -> Vec2 {
        Vec2::from_angle(noise.heading(self.noise_frequency))
    }

    /// Inverse-distance push away from peers, averaged over contributors.
    ///
    /// `self_idx` is skipped, as is any peer at exactly zero distance.
    pub fn avoidance(&self, position: Vec2, self_idx: Option<usize>, hood: &Neighborhood) -> Vec2 {
        let mut steering = Vec2::ZERO;
        let mut total = 0usize;
        for idx in hood
            .peer_index
            .query_iter(position.x, position.y, self.perception_radius)
        {
            if Some(idx) == self_idx {
                continue;
            }
            let Some(&other) = hood.peers.get(idx) else {
                continue;
            };
            let d = position.distance(other);
            if d > 0.0 && d < self.perception_radius {
                steering += (position - other).normalize_or_zero() / d;
                total += 1;
            }
        }
        if total > 0 {
            steering / total as f64
        } else {
            Vec2::ZERO
        }
    }

    /// Like [`Self::avoidance`] but against explore markers, each weighted by
    /// `strength / max_strength`.
    pub fn pheromone_avoidance(&self, position: Vec2, scent: &ScentField) -> Vec2 {
        let mut steering = Vec2::ZERO;
        let mut total = 0usize;
        for m in scent.query(position, self.perception_radius, ScentChannel::Explore) {
            let d = position.distance(m.position);
            if d > 0.0 {
                let freshness = if self.max_strength > 0.0 {
                    m.strength / self.max_strength
                } else {
                    0.0
                };
                steering += (position - m.position).normalize_or_zero() / d * freshness;
                total += 1;
            }
        }
        if total > 0 {
            steering / total as f64
        } else {
            Vec2::ZERO
        }
    }

    /// Unit vector toward the colony, independent of distance.
    pub fn colony_attraction(&self, position: Vec2, colony: Vec2) -> Vec2 {
        (colony - position).normalize_or_zero()
    }

    /// Samples all four influences.
    pub fn forces(
        &self,
        position: Vec2,
        self_idx: Option<usize>,
        noise: &mut SmoothNoise,
        hood: &Neighborhood,
    ) -> ForceVectors {
        ForceVectors {
            random: self.random_steer(noise),
            avoidance: self.avoidance(position, self_idx, hood),
            pheromone_avoidance: self.pheromone_avoidance(position, hood.scent),
            colony_attraction: self.colony_attraction(position, hood.colony),
        }
    }

    /// Normalizes, weights, sums and rescales to the configured speed.
    ///
    /// When the weighted sum cancels out, `previous` is kept at full speed.
    pub fn compose(&self, forces: &ForceVectors, previous: Vec2) -> Vec2 {
        let w = &self.weights;
        let sum = forces.random.normalize_or_zero() * w.random
            + forces.avoidance.normalize_or_zero() * w.avoidance
            + forces.pheromone_avoidance.normalize_or_zero() * w.pheromone_avoidance
            + forces.colony_attraction.normalize_or_zero() * w.colony_attraction;
        if sum.is_zero() || !sum.is_finite() {
            previous.with_length(self.speed)
        } else {
            sum.with_length(self.speed)
        }
    }

    /// Full standard steering step: returns the new velocity and the raw forces.
    pub fn steer(
        &self,
        position: Vec2,
        previous: Vec2,
        self_idx: Option<usize>,
        noise: &mut SmoothNoise,
        hood: &Neighborhood,
    ) -> (Vec2, ForceVectors) {
        let forces = self.forces(position, self_idx, noise, hood);
        (self.compose(&forces, previous), forces)
    }

    /// Heading straight at `target` with a noise wobble, limited to speed.
    pub fn seek_with_noise(
        &self,
        position: Vec2,
        target: Vec2,
        noise: &mut SmoothNoise,
        wobble: f64,
    ) -> Vec2 {
        let desired = (target - position).with_length(self.speed);
        let jitter = Vec2::from_angle(noise.heading(self.noise_frequency)) * wobble;
        (desired + jitter).clamp_length_max(self.speed)
    }

    /// Heading straight at `target` at full speed.
    pub fn seek(&self, position: Vec2, target: Vec2) -> Vec2 {
        (target - position).with_length(self.speed)
    }
}
