use crate::model::forager::ForagerContext;
use crate::model::metrics::{BITES, RETURNED, SPAWNED};
use crate::model::steering::Neighborhood;
use crate::model::world::World;
use std::time::Instant;

impl World {
    /// Advances the simulation by one tick.
    ///
    /// Order within a tick:
    /// 1. the population may spawn one forager at the colony
    /// 2. the scent field decays and prunes
    /// 3. every forager runs its state machine against a snapshot of peer
    ///    positions and the decayed field
    /// 4. buffered deposits land in the field and arrivals are removed
    /// 5. depleted food is replaced
    ///
    /// Stepping has no failure path.
    pub fn step(&mut self) {
        let start = Instant::now();
        self.tick += 1;

        if let Some(slot) = self
            .population
            .try_spawn(&mut self.rng, self.colony, &self.config)
        {
            self.metrics.increment_counter(SPAWNED);
            tracing::debug!(tick = self.tick, slot, "Forager spawned");
        }

        self.scent.tick();

        self.population.positions_into(&mut self.peer_positions);
        self.peer_index.build(&self.peer_positions);
        self.overlay.clear();
        self.arrival_buffer.clear();

        {
            let mut ctx = ForagerContext {
                config: &self.config,
                steering: &self.steering,
                hood: Neighborhood {
                    peers: &self.peer_positions,
                    peer_index: &self.peer_index,
                    scent: &self.scent,
                    colony: self.colony,
                },
                resources: &mut self.resources,
                food_ranking: self.config.pheromones.food_trail_ranking,
                return_ranking: self.config.pheromones.return_trail_ranking,
            };

            for (slot, agent) in self.population.agents_mut().iter_mut().enumerate() {
                let outcome = agent.tick(Some(slot), &mut ctx);
                if let Some(deposit) = outcome.deposit {
                    self.deposit_buffer.push(deposit);
                }
                if let Some(forces) = outcome.forces {
                    self.overlay.insert(agent.id, forces);
                }
                if outcome.bite.is_some() {
                    self.metrics.increment_counter(BITES);
                }
                if outcome.arrived {
                    self.arrival_buffer.push(slot);
                }
            }
        }

        self.scent.apply_deposits(self.deposit_buffer.drain(..));
        for &slot in &self.arrival_buffer {
            self.population.mark_for_removal(slot);
        }
        let returned = self.population.apply_removals();
        self.metrics.add_to_counter(RETURNED, returned as u64);

        self.replenish_food();

        self.metrics.record_tick(
            start.elapsed(),
            self.population.len(),
            self.scent.len(),
            self.resources.food_sources().len(),
        );
    }

    /// Runs one frame: nothing while paused, otherwise `simulation_speed`
    /// ticks. Returns the number of ticks executed.
    pub fn update(&mut self) -> u32 {
        if self.config.simulation_paused {
            return 0;
        }
        let steps = self.config.simulation_speed;
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// Steps `ticks` times regardless of the pause flag.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }
}
