use crate::model::config::AppConfig;
use crate::model::forager::ForagerAgent;
use crate::model::metrics::Metrics;
use crate::model::population::PopulationManager;
use crate::model::resources::ResourceRegistry;
use crate::model::scent::ScentField;
use crate::model::spatial_hash::SpatialHash;
use crate::model::steering::SteeringEngine;
use crate::model::world::World;
use anyhow::Context;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

impl World {
    /// Builds a world from a validated configuration.
    ///
    /// Places `world.food_sources` full food sources at random points and
    /// spawns `world.initial_ants` foragers at the colony. With no seed the
    /// RNG is drawn from entropy.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate().context("Invalid world configuration")?;

        let mut rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let (width, height) = (config.world.width, config.world.height);
        let perception = config.ants.perception_radius;
        let colony = config.world.colony_position();

        let mut resources = ResourceRegistry::new(config.terrain_zones());
        for _ in 0..config.world.food_sources {
            resources.spawn_random_food(
                &mut rng,
                width,
                height,
                config.food.initial_quantity,
                config.food.size,
            );
        }

        let mut population = PopulationManager::new();
        population.seed(&mut rng, colony, config.world.initial_ants, &config);

        tracing::info!(
            width,
            height,
            seed = ?config.world.seed,
            ants = population.len(),
            food = resources.food_sources().len(),
            fingerprint = %config.fingerprint(),
            "World created"
        );

        Ok(Self {
            tick: 0,
            steering: SteeringEngine::new(&config),
            scent: ScentField::new(config.pheromones.decay_rate, perception, width, height),
            peer_index: SpatialHash::new(perception, width, height),
            peer_positions: Vec::new(),
            deposit_buffer: Vec::new(),
            arrival_buffer: Vec::new(),
            overlay: HashMap::new(),
            config_version: 0,
            colony,
            resources,
            population,
            metrics: Metrics::new(),
            rng,
            config,
        })
    }

    /// Adds a prepared forager, respecting the population cap.
    ///
    /// Returns `false` when the colony is already full.
    pub fn add_agent(&mut self, agent: ForagerAgent) -> bool {
        self.population.insert(agent, &self.config)
    }
}
