//! Agent arena, spawn cadence and deferred removal.

use crate::config::AppConfig;
use crate::forager::ForagerAgent;
use myrmex_data::{AgentState, Vec2};
use rand::Rng;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct PopulationManager {
    agents: Vec<ForagerAgent>,
    /// Arena slots to drop after the current agent pass.
    pending_removal: HashSet<usize>,
    /// Ticks since the last spawn attempt.
    spawn_timer: u64,
}

impl PopulationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `count` agents at `colony`, stopping at capacity.
    pub fn seed<R: Rng>(&mut self, rng: &mut R, colony: Vec2, count: usize, config: &AppConfig) -> usize {
        let room = config.ants.max_ants.saturating_sub(self.agents.len());
        let n = count.min(room);
        for _ in 0..n {
            self.agents.push(ForagerAgent::spawn(rng, colony, config));
        }
        n
    }

    /// Advances the spawn timer and, once the interval has elapsed, attempts
    /// one spawn at the colony.
    ///
    /// The timer resets on every attempt. An attempt at capacity does nothing.
    /// Returns the new agent's slot if one was spawned.
    pub fn try_spawn<R: Rng>(&mut self, rng: &mut R, colony: Vec2, config: &AppConfig) -> Option<usize> {
        self.spawn_timer += 1;
        if self.spawn_timer < config.ants.spawn_interval {
            return None;
        }
        self.spawn_timer = 0;
        if self.agents.len() >= config.ants.max_ants {
            return None;
        }
        self.agents.push(ForagerAgent::spawn(rng, colony, config));
        Some(self.agents.len() - 1)
    }

    /// Adds an externally built agent unless the arena is full.
    pub fn insert(&mut self, agent: ForagerAgent, config: &AppConfig) -> bool {
        if self.agents.len() >= config.ants.max_ants {
            return false;
        }
        self.agents.push(agent);
        true
    }

    /// Queues the agent in `slot` for removal. Queuing twice is harmless.
    pub fn mark_for_removal(&mut self, slot: usize) {
        if slot < self.agents.len() {
            self.pending_removal.insert(slot);
        }
    }

    /// Drops every queued agent in one pass, keeping the order of the rest.
    ///
    /// Returns how many were removed.
    pub fn apply_removals(&mut self) -> usize {
        if self.pending_removal.is_empty() {
            return 0;
        }
        let before = self.agents.len();
        let pending = std::mem::take(&mut self.pending_removal);
        let mut slot = 0;
        self.agents.retain(|_| {
            let keep = !pending.contains(&slot);
            slot += 1;
            keep
        });
        before - self.agents.len()
    }

    #[must_use]
    pub fn agents(&self) -> &[ForagerAgent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [ForagerAgent] {
        &mut self.agents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.pending_removal.len()
    }

    #[must_use]
    pub fn spawn_timer(&self) -> u64 {
        self.spawn_timer
    }

    #[must_use]
    pub fn count_in(&self, state: AgentState) -> usize {
        self.agents.iter().filter(|a| a.state == state).count()
    }

    /// Positions in arena order, for the peer index.
    pub fn positions_into(&self, out: &mut Vec<Vec2>) {
        out.clear();
        out.extend(self.agents.iter().map(|a| a.position));
    }
}
