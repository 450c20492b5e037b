use crate::model::metrics::FOOD_REPLACED;
use crate::model::snapshot::{AgentSnapshot, ColonySnapshot, WorldSnapshot};
use crate::model::world::World;

impl World {
    /// Swaps every depleted food source for a fresh one at a random point.
    pub(crate) fn replenish_food(&mut self) {
        let food = &self.config.food;
        let replaced = self.resources.replenish(
            &mut self.rng,
            self.config.world.width,
            self.config.world.height,
            food.initial_quantity,
            food.size,
        );
        if !replaced.is_empty() {
            self.metrics
                .add_to_counter(FOOD_REPLACED, replaced.len() as u64);
            tracing::info!(tick = self.tick, replaced = replaced.len(), "Food source depleted and replaced");
        }
    }

    /// Captures the renderer-facing view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            config_version: self.config_version,
            width: self.config.world.width,
            height: self.config.world.height,
            agents: self
                .population
                .agents()
                .iter()
                .map(|a| AgentSnapshot::capture(a, self.overlay.get(&a.id).copied()))
                .collect(),
            markers: self.scent.markers().to_vec(),
            food: self.resources.food_sources().to_vec(),
            terrain: self.resources.terrain_zones().to_vec(),
            colony: ColonySnapshot {
                position: self.colony,
                radius: self.config.world.colony_radius,
            },
        }
    }
}
