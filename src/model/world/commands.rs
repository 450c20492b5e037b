use crate::model::config::AppConfig;
use crate::model::error::SimError;
use crate::model::spatial_hash::SpatialHash;
use crate::model::steering::SteeringEngine;
use crate::model::world::World;
use myrmex_data::{FoodId, FoodSource, Vec2};

impl World {
    /// Places a food source of `quantity` at `point`.
    ///
    /// The footprint size comes from `food.size`.
    pub fn place_food(&mut self, point: Vec2, quantity: f64) -> Result<FoodId, SimError> {
        if !self.contains(point) {
            tracing::warn!(x = point.x, y = point.y, "Rejected food placement outside the world");
            return Err(SimError::OutOfBounds {
                x: point.x,
                y: point.y,
            });
        }
        if !(quantity.is_finite() && quantity > 0.0) {
            tracing::warn!(quantity, "Rejected food placement with bad quantity");
            return Err(SimError::InvalidQuantity(quantity));
        }
        let id = self
            .resources
            .place_food(point, quantity, self.config.food.size);
        tracing::info!(id = id.0, x = point.x, y = point.y, quantity, "Food placed");
        Ok(id)
    }

    /// Removes the food source whose footprint covers `point`, nearest first.
    pub fn remove_food_at(&mut self, point: Vec2) -> Option<FoodSource> {
        let removed = self.resources.remove_food_at(point);
        if let Some(food) = &removed {
            tracing::info!(id = food.id.0, "Food removed");
        }
        removed
    }

    /// Applies a configuration edit.
    ///
    /// The edit runs on a copy; if the result fails validation the live
    /// configuration is left untouched and the error is returned. Otherwise
    /// the change takes effect from the next tick and the new version is
    /// returned.
    pub fn configure<F>(&mut self, edit: F) -> Result<u64, SimError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut next = self.config.clone();
        edit(&mut next);
        if let Err(e) = next.validate() {
            tracing::warn!(error = %e, "Rejected configuration change");
            return Err(SimError::InvalidConfig(e.to_string()));
        }
        if next == self.config {
            return Ok(self.config_version);
        }
        self.apply_config(next);
        self.config_version += 1;
        tracing::info!(version = self.config_version, "Configuration updated");
        Ok(self.config_version)
    }

    fn apply_config(&mut self, next: AppConfig) {
        let prev = std::mem::replace(&mut self.config, next);
        let config = &self.config;

        if prev.pheromones.decay_rate != config.pheromones.decay_rate {
            self.scent.set_decay_rate(config.pheromones.decay_rate);
        }

        let (width, height) = (config.world.width, config.world.height);
        let perception = config.ants.perception_radius;
        if prev.ants.perception_radius != perception
            || prev.world.width != width
            || prev.world.height != height
        {
            self.scent.resize_index(perception, width, height);
            self.peer_index = SpatialHash::new(perception, width, height);
        }

        if prev.terrain != config.terrain {
            self.resources.set_terrain(config.terrain_zones());
        }

        if prev.ants.noise_increment != config.ants.noise_increment {
            for agent in self.population.agents_mut() {
                agent.noise.set_increment(config.ants.noise_increment);
            }
        }

        self.colony = config.world.colony_position();
        self.steering = SteeringEngine::new(config);
    }

    fn contains(&self, point: Vec2) -> bool {
        point.is_finite()
            && (0.0..self.config.world.width).contains(&point.x)
            && (0.0..self.config.world.height).contains(&point.y)
    }
}
