use crate::forager::ForagerAgent;
use crate::steering::ForceVectors;
use myrmex_data::{AgentState, FoodSource, ScentMarker, TerrainZone, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub id: Uuid,
    pub position: Vec2,
    pub velocity: Vec2,
    pub state: AgentState,
    pub found_food: bool,
    /// Raw steering influences from the agent's last standard-steering tick.
    pub forces: Option<ForceVectors>,
}

impl AgentSnapshot {
    pub fn capture(agent: &ForagerAgent, forces: Option<ForceVectors>) -> Self {
        Self {
            id: agent.id,
            position: agent.position,
            velocity: agent.velocity,
            state: agent.state,
            found_food: agent.found_food,
            forces,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ColonySnapshot {
    pub position: Vec2,
    pub radius: f64,
}

/// Everything a renderer needs to draw one frame.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub config_version: u64,
    pub width: f64,
    pub height: f64,
    pub agents: Vec<AgentSnapshot>,
    pub markers: Vec<ScentMarker>,
    pub food: Vec<FoodSource>,
    pub terrain: Vec<TerrainZone>,
    pub colony: ColonySnapshot,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    #[must_use]
    pub fn count_in(&self, state: AgentState) -> usize {
        self.agents.iter().filter(|a| a.state == state).count()
    }
}
