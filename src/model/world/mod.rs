use crate::model::config::AppConfig;
use crate::model::metrics::Metrics;
use crate::model::population::PopulationManager;
use crate::model::resources::ResourceRegistry;
use crate::model::scent::{ScentDeposit, ScentField};
use crate::model::spatial_hash::SpatialHash;
use crate::model::steering::{ForceVectors, SteeringEngine};
use myrmex_data::Vec2;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use uuid::Uuid;

pub mod commands;
pub mod finalize;
pub mod init;
pub mod update;

/// The whole simulation: one colony, its foragers, the scent field and the
/// food and terrain around it.
///
/// `step` advances one tick; `update` applies the pause flag and speed
/// multiplier on top. The command methods in [`commands`] are the only way
/// state changes from outside a tick.
pub struct World {
    pub tick: u64,
    pub config: AppConfig,
    /// Bumped on every accepted configuration change.
    pub config_version: u64,
    pub colony: Vec2,
    pub scent: ScentField,
    pub resources: ResourceRegistry,
    pub population: PopulationManager,
    pub metrics: Metrics,
    pub rng: ChaCha8Rng,
    pub(crate) steering: SteeringEngine,
    pub(crate) peer_positions: Vec<Vec2>,
    pub(crate) peer_index: SpatialHash,
    pub(crate) deposit_buffer: Vec<ScentDeposit>,
    pub(crate) arrival_buffer: Vec<usize>,
    /// Steering influences from the last tick, for the force overlay.
    pub(crate) overlay: HashMap<Uuid, ForceVectors>,
}

impl World {
    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.population.len()
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.scent.len()
    }

    #[must_use]
    pub fn food_count(&self) -> usize {
        self.resources.food_sources().len()
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.config.world.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.config.world.height
    }

    /// Steering influences an agent used on the last tick, if it wandered.
    #[must_use]
    pub fn forces_of(&self, id: &Uuid) -> Option<ForceVectors> {
        self.overlay.get(id).copied()
    }
}
