pub mod macros;

use myrmex_lib::model::config::AppConfig;
use myrmex_lib::model::data::{AgentState, Vec2};
use myrmex_lib::model::forager::ForagerAgent;
use myrmex_lib::model::noise::SmoothNoise;
use myrmex_lib::model::world::World;
use uuid::Uuid;

type WorldMod = Box<dyn FnOnce(&mut World)>;

/// Builds small, quiet worlds for scenario tests.
///
/// Defaults: 400x400 world, fixed seed, no terrain, no food, no initial ants
/// and a spawn interval long enough that nothing spawns unless asked.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    agents: Vec<AgentSpec>,
    mods: Vec<WorldMod>,
}

#[allow(dead_code)]
struct AgentSpec {
    position: Vec2,
    velocity: Option<Vec2>,
    state: AgentState,
    found_food: bool,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.width = 400.0;
        config.world.height = 400.0;
        config.world.seed = Some(42);
        config.world.food_sources = 0;
        config.world.initial_ants = 0;
        config.ants.spawn_interval = 1_000_000;
        config.terrain.clear();
        Self {
            config,
            agents: Vec::new(),
            mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Only colony attraction steers wanderers.
    pub fn homing_steering(self) -> Self {
        self.with_config(|c| {
            c.ants.steering_forces.random = 0.0;
            c.ants.steering_forces.avoidance = 0.0;
            c.ants.steering_forces.pheromone_avoidance = 0.0;
            c.ants.steering_forces.colony_attraction = 1.0;
        })
    }

    /// No steering influence at all; wanderers hold their heading.
    pub fn straight_steering(self) -> Self {
        self.with_config(|c| {
            c.ants.steering_forces.random = 0.0;
            c.ants.steering_forces.avoidance = 0.0;
            c.ants.steering_forces.pheromone_avoidance = 0.0;
            c.ants.steering_forces.colony_attraction = 0.0;
        })
    }

    pub fn with_agent_at(mut self, x: f64, y: f64) -> Self {
        self.agents.push(AgentSpec {
            position: Vec2::new(x, y),
            velocity: None,
            state: AgentState::Exploring,
            found_food: false,
        });
        self
    }

    pub fn with_moving_agent(mut self, x: f64, y: f64, vx: f64, vy: f64) -> Self {
        self.agents.push(AgentSpec {
            position: Vec2::new(x, y),
            velocity: Some(Vec2::new(vx, vy)),
            state: AgentState::Exploring,
            found_food: false,
        });
        self
    }

    pub fn with_returning_agent_at(mut self, x: f64, y: f64, found_food: bool) -> Self {
        self.agents.push(AgentSpec {
            position: Vec2::new(x, y),
            velocity: None,
            state: AgentState::Returning,
            found_food,
        });
        self
    }

    pub fn with_food(mut self, x: f64, y: f64, quantity: f64) -> Self {
        self.mods.push(Box::new(move |world| {
            world
                .place_food(Vec2::new(x, y), quantity)
                .expect("food placement in test builder");
        }));
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("Failed to create world in test builder");
        for modifier in self.mods {
            modifier(&mut world);
        }
        for (i, spec) in self.agents.into_iter().enumerate() {
            let speed = world.config.ants.speed;
            let mut agent = ForagerAgent::new(
                Uuid::from_u128(i as u128 + 1),
                spec.position,
                spec.velocity.unwrap_or(Vec2::new(speed, 0.0)),
                SmoothNoise::new(i as u64, 0.0, world.config.ants.noise_increment),
                &world.config,
            );
            agent.state = spec.state;
            agent.found_food = spec.found_food;
            assert!(world.add_agent(agent), "test builder exceeded max_ants");
        }
        world
    }
}

/// Id given to the `n`th agent added through the builder (zero based).
#[allow(dead_code)]
pub fn agent_id(n: usize) -> Uuid {
    Uuid::from_u128(n as u128 + 1)
}
