//! A single forager: behavior state machine, kinematics and deposit cadence.

use crate::config::AppConfig;
use crate::noise::SmoothNoise;
use crate::ranking::{MarkerRanking, RankingPolicy};
use crate::resources::ResourceRegistry;
use crate::scent::ScentDeposit;
use crate::steering::{ForceVectors, Neighborhood, SteeringEngine};
use myrmex_data::{AgentState, FoodId, ScentChannel, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything a forager reads or touches during its tick.
///
/// The ranking policies are generic so trail selection can be swapped out
/// without touching the state machine.
pub struct ForagerContext<'a, F = RankingPolicy, R = RankingPolicy> {
    pub config: &'a AppConfig,
    pub steering: &'a SteeringEngine,
    pub hood: Neighborhood<'a>,
    pub resources: &'a mut ResourceRegistry,
    /// Picks the food marker to chase while following a trail.
    pub food_ranking: F,
    /// Picks the explore marker to chase while heading home.
    pub return_ranking: R,
}

/// Side effects of one tick, applied by the caller after the agent pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForagerOutcome {
    pub deposit: Option<ScentDeposit>,
    /// Reached the colony while returning; the agent must be removed.
    pub arrived: bool,
    /// Food source bitten this tick.
    pub bite: Option<FoodId>,
    /// Raw steering influences, when standard steering ran.
    pub forces: Option<ForceVectors>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForagerAgent {
    pub id: Uuid,
    pub position: Vec2,
    pub velocity: Vec2,
    pub state: AgentState,
    pub deposit_counter: u64,
    /// Strength given to the next deposited marker.
    pub carried_strength: f64,
    /// Food being approached, with its position when sighted.
    pub target: Option<(FoodId, Vec2)>,
    pub found_food: bool,
    pub noise: SmoothNoise,
    /// Markers deposited over the agent's lifetime.
    pub deposits: u64,
}

impl ForagerAgent {
    pub fn new(id: Uuid, position: Vec2, velocity: Vec2, noise: SmoothNoise, config: &AppConfig) -> Self {
        Self {
            id,
            position,
            velocity,
            state: AgentState::Exploring,
            deposit_counter: 0,
            carried_strength: config.pheromones.initial_strength,
            target: None,
            found_food: false,
            noise,
            deposits: 0,
        }
    }

    /// Creates an agent at `position` with a random heading, id and noise stream.
    pub fn spawn<R: Rng>(rng: &mut R, position: Vec2, config: &AppConfig) -> Self {
        let id = Uuid::from_u128(rng.gen());
        let heading = rng.gen_range(0.0..std::f64::consts::TAU);
        let noise = SmoothNoise::new(
            rng.gen(),
            rng.gen_range(0.0..1000.0),
            config.ants.noise_increment,
        );
        Self::new(
            id,
            position,
            Vec2::from_angle(heading) * config.ants.speed,
            noise,
            config,
        )
    }

    /// Advances the agent by one tick.
    ///
    /// `self_idx` is this agent's slot in the peer snapshot, skipped by
    /// avoidance. An agent that arrives home does not move or deposit.
    pub fn tick<F: MarkerRanking, R: MarkerRanking>(
        &mut self,
        self_idx: Option<usize>,
        ctx: &mut ForagerContext<'_, F, R>,
    ) -> ForagerOutcome {
        let mut out = ForagerOutcome::default();
        match self.state {
            AgentState::Exploring => self.explore(self_idx, ctx, &mut out),
            AgentState::MovingToFood => self.move_to_food(self_idx, ctx, &mut out),
            AgentState::FollowingFoodTrail => self.follow_food_trail(self_idx, ctx, &mut out),
            AgentState::Returning => self.return_home(self_idx, ctx, &mut out),
        }
        if out.arrived {
            return out;
        }

        let multiplier = ctx.resources.speed_multiplier_at(self.position);
        let world = &ctx.config.world;
        self.position = (self.position + self.velocity * multiplier).wrap(world.width, world.height);

        self.deposit_counter += 1;
        if self.deposit_counter >= ctx.config.ants.deposit_interval {
            self.deposit_counter = 0;
            out.deposit = Some(self.deposit(ctx.config));
            if self.state == AgentState::Exploring && self.carried_strength <= 0.0 {
                self.enter_returning(ctx.config);
            }
        }
        out
    }

    fn deposit(&mut self, config: &AppConfig) -> ScentDeposit {
        let channel = if self.state == AgentState::Returning && self.found_food {
            ScentChannel::Food
        } else {
            ScentChannel::Explore
        };
        let deposit = ScentDeposit {
            position: self.position,
            channel,
            strength: self.carried_strength,
        };
        self.carried_strength = (self.carried_strength - config.ants.carried_strength_decay).max(0.0);
        self.deposits += 1;
        deposit
    }

    fn explore<F: MarkerRanking, R: MarkerRanking>(
        &mut self,
        self_idx: Option<usize>,
        ctx: &mut ForagerContext<'_, F, R>,
        out: &mut ForagerOutcome,
    ) {
        let perception = ctx.config.ants.perception_radius;
        if let Some(food) = ctx.resources.nearest_food_within(self.position, perception) {
            self.target = Some((food.id, food.position));
            self.transition(AgentState::MovingToFood);
            self.move_to_food(self_idx, ctx, out);
        } else if ctx
            .hood
            .scent
            .any_within(self.position, perception, ScentChannel::Food)
        {
            self.transition(AgentState::FollowingFoodTrail);
            self.follow_food_trail(self_idx, ctx, out);
        } else {
            self.wander(self_idx, ctx, out);
        }
    }

    fn move_to_food<F: MarkerRanking, R: MarkerRanking>(
        &mut self,
        self_idx: Option<usize>,
        ctx: &mut ForagerContext<'_, F, R>,
        out: &mut ForagerOutcome,
    ) {
        let contact_radius = ctx.config.ants.radius();
        let bite = ctx.config.food.bite_size;
        let live = self
            .target
            .and_then(|(id, _)| ctx.resources.food_mut(id))
            .filter(|f| !f.is_depleted());
        let Some(food) = live else {
            self.target = None;
            self.transition(AgentState::Exploring);
            self.wander(self_idx, ctx, out);
            return;
        };

        self.velocity = ctx.steering.seek(self.position, food.position);
        if self.position.distance(food.position) <= contact_radius + food.footprint_radius() {
            food.reduce(bite);
            out.bite = Some(food.id);
            self.found_food = true;
            self.target = None;
            self.enter_returning(ctx.config);
        }
    }

    /// Markers within the agent's own radius count as reached and are
    /// skipped when picking the next waypoint.
    fn follow_food_trail<F: MarkerRanking, R: MarkerRanking>(
        &mut self,
        self_idx: Option<usize>,
        ctx: &mut ForagerContext<'_, F, R>,
        out: &mut ForagerOutcome,
    ) {
        let perception = ctx.config.ants.perception_radius;
        if let Some(food) = ctx.resources.nearest_food_within(self.position, perception) {
            self.target = Some((food.id, food.position));
            self.transition(AgentState::MovingToFood);
            self.move_to_food(self_idx, ctx, out);
            return;
        }

        let position = self.position;
        let colony = ctx.hood.colony;
        let reach = ctx.config.ants.radius();
        // Food trails lead away from the colony.
        let best = ctx.food_ranking.best(
            ctx.hood
                .scent
                .query(position, perception, ScentChannel::Food)
                .filter(|m| m.position.distance(position) > reach),
            |m| -m.position.distance_squared(colony),
        );
        match best.map(|m| m.position) {
            Some(waypoint) => {
                self.velocity = ctx.steering.seek_with_noise(
                    self.position,
                    waypoint,
                    &mut self.noise,
                    ctx.config.ants.trail_noise,
                );
            }
            None => {
                self.transition(AgentState::Exploring);
                self.wander(self_idx, ctx, out);
            }
        }
    }

    fn return_home<F: MarkerRanking, R: MarkerRanking>(
        &mut self,
        self_idx: Option<usize>,
        ctx: &mut ForagerContext<'_, F, R>,
        out: &mut ForagerOutcome,
    ) {
        let colony = ctx.hood.colony;
        let distance = self.position.distance(colony);
        if distance <= ctx.config.ants.perception_radius {
            if distance <= ctx.config.ants.radius() + ctx.config.world.colony_radius {
                out.arrived = true;
                tracing::debug!(agent = %self.id, found_food = self.found_food, "Forager reached colony");
                return;
            }
            self.velocity = ctx.steering.seek(self.position, colony);
            return;
        }

        let position = self.position;
        let reach = ctx.config.ants.radius();
        let best = ctx.return_ranking.best(
            ctx.hood
                .scent
                .query(position, ctx.config.ants.perception_radius, ScentChannel::Explore)
                .filter(|m| m.position.distance(position) > reach),
            |m| m.position.distance_squared(colony),
        );
        match best.map(|m| m.position) {
            Some(waypoint) => {
                self.velocity = ctx.steering.seek_with_noise(
                    self.position,
                    waypoint,
                    &mut self.noise,
                    ctx.config.ants.trail_noise,
                );
            }
            None => self.wander(self_idx, ctx, out),
        }
    }

    fn wander<F, R>(
        &mut self,
        self_idx: Option<usize>,
        ctx: &ForagerContext<'_, F, R>,
        out: &mut ForagerOutcome,
    ) {
        let (velocity, forces) =
            ctx.steering
                .steer(self.position, self.velocity, self_idx, &mut self.noise, &ctx.hood);
        self.velocity = velocity;
        out.forces = Some(forces);
    }

    fn enter_returning(&mut self, config: &AppConfig) {
        self.carried_strength = config.pheromones.initial_strength;
        self.transition(AgentState::Returning);
    }

    fn transition(&mut self, to: AgentState) {
        tracing::debug!(agent = %self.id, from = self.state.label(), to = to.label(), "Forager state change");
        self.state = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scent::ScentField;
    use crate::spatial_hash::SpatialHash;
    use myrmex_data::TerrainZone;

    struct Harness {
        config: AppConfig,
        steering: SteeringEngine,
        resources: ResourceRegistry,
        scent: ScentField,
        peers: Vec<Vec2>,
        index: SpatialHash,
    }

    impl Harness {
        fn new(config: AppConfig) -> Self {
            let w = config.world.width;
            let h = config.world.height;
            let r = config.ants.perception_radius;
            Self {
                steering: SteeringEngine::new(&config),
                resources: ResourceRegistry::default(),
                scent: ScentField::new(config.pheromones.decay_rate, r, w, h),
                peers: Vec::new(),
                index: SpatialHash::new(r, w, h),
                config,
            }
        }

        fn step(&mut self, agent: &mut ForagerAgent) -> ForagerOutcome {
            self.peers.clear();
            self.peers.push(agent.position);
            self.index.build(&self.peers);
            let mut ctx = ForagerContext {
                config: &self.config,
                steering: &self.steering,
                hood: Neighborhood {
                    peers: &self.peers,
                    peer_index: &self.index,
                    scent: &self.scent,
                    colony: self.config.world.colony_position(),
                },
                resources: &mut self.resources,
                food_ranking: self.config.pheromones.food_trail_ranking,
                return_ranking: self.config.pheromones.return_trail_ranking,
            };
            agent.tick(Some(0), &mut ctx)
        }
    }

    fn base_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.terrain.clear();
        config.world.width = 400.0;
        config.world.height = 400.0;
        config
    }

    fn agent_at(config: &AppConfig, x: f64, y: f64) -> ForagerAgent {
        ForagerAgent::new(
            Uuid::from_u128(1),
            Vec2::new(x, y),
            Vec2::new(config.ants.speed, 0.0),
            SmoothNoise::new(5, 0.0, config.ants.noise_increment),
            config,
        )
    }

    #[test]
    fn test_lone_explorer_keeps_exploring_within_speed() {
        let mut config = base_config();
        config.ants.perception_radius = 35.0;
        let mut h = Harness::new(config);
        let mut agent = agent_at(&h.config, 240.0, 200.0);

        for _ in 0..100 {
            let before = agent.position;
            let out = h.step(&mut agent);
            assert_eq!(agent.state, AgentState::Exploring);
            assert!(!out.arrived);
            let moved = before.distance(agent.position);
            assert!(moved > 0.0);
            assert!(moved <= h.config.ants.speed + 1e-9);
        }
    }

    #[test]
    fn test_deposit_count_follows_interval() {
        let mut h = Harness::new(base_config());
        let mut agent = agent_at(&h.config, 100.0, 100.0);
        let mut emitted = 0;
        for _ in 0..23 {
            if h.step(&mut agent).deposit.is_some() {
                emitted += 1;
            }
        }
        assert_eq!(emitted, 23 / h.config.ants.deposit_interval);
        assert_eq!(agent.deposits, emitted);
    }

    #[test]
    fn test_carried_strength_decays_per_deposit() {
        let mut h = Harness::new(base_config());
        let mut agent = agent_at(&h.config, 100.0, 100.0);
        let mut strengths = Vec::new();
        for _ in 0..10 {
            if let Some(d) = h.step(&mut agent).deposit {
                assert_eq!(d.channel, ScentChannel::Explore);
                strengths.push(d.strength);
            }
        }
        let start = h.config.pheromones.initial_strength;
        assert_eq!(
            strengths,
            vec![start, start - h.config.ants.carried_strength_decay]
        );
    }

    #[test]
    fn test_exhausted_explorer_turns_home() {
        let mut config = base_config();
        config.ants.carried_strength_decay = config.pheromones.initial_strength;
        let mut h = Harness::new(config);
        let mut agent = agent_at(&h.config, 100.0, 100.0);
        for _ in 0..4 {
            h.step(&mut agent);
            assert_eq!(agent.state, AgentState::Exploring);
        }
        h.step(&mut agent);
        assert_eq!(agent.state, AgentState::Returning);
        assert_eq!(agent.carried_strength, h.config.pheromones.initial_strength);
        assert!(!agent.found_food);
    }

    #[test]
    fn test_sighted_food_is_bitten_then_agent_returns() {
        let mut h = Harness::new(base_config());
        let id = h
            .resources
            .place_food(Vec2::new(115.0, 100.0), 100.0, 10.0);
        let mut agent = agent_at(&h.config, 100.0, 100.0);

        h.step(&mut agent);
        assert_eq!(agent.state, AgentState::MovingToFood);
        assert_eq!(agent.target.map(|t| t.0), Some(id));

        let mut bitten = false;
        for _ in 0..20 {
            if h.step(&mut agent).bite == Some(id) {
                bitten = true;
                break;
            }
        }
        assert!(bitten);
        assert_eq!(agent.state, AgentState::Returning);
        assert!(agent.found_food);
        assert!(agent.target.is_none());
        assert_eq!(h.resources.food(id).map(|f| f.quantity), Some(90.0));
    }

    #[test]
    fn test_vanished_target_reverts_to_exploring() {
        let mut h = Harness::new(base_config());
        h.resources.place_food(Vec2::new(120.0, 100.0), 100.0, 10.0);
        let mut agent = agent_at(&h.config, 100.0, 100.0);
        h.step(&mut agent);
        assert_eq!(agent.state, AgentState::MovingToFood);

        h.resources.remove_food_at(Vec2::new(120.0, 100.0));
        let out = h.step(&mut agent);
        assert_eq!(agent.state, AgentState::Exploring);
        assert!(agent.target.is_none());
        assert!(out.forces.is_some());
    }

    #[test]
    fn test_food_marker_starts_trail_following() {
        let mut config = base_config();
        config.ants.trail_noise = 0.0;
        let mut h = Harness::new(config);
        h.scent
            .deposit(Vec2::new(100.0, 115.0), ScentChannel::Food, 100.0);
        let mut agent = agent_at(&h.config, 100.0, 100.0);

        h.step(&mut agent);
        assert_eq!(agent.state, AgentState::FollowingFoodTrail);
        assert!((agent.velocity.y - h.config.ants.speed).abs() < 1e-9);

        h.scent.clear();
        h.step(&mut agent);
        assert_eq!(agent.state, AgentState::Exploring);
    }

    #[test]
    fn test_returning_agent_arrives_at_colony() {
        let mut h = Harness::new(base_config());
        let colony = h.config.world.colony_position();
        let mut agent = agent_at(&h.config, colony.x + 22.0, colony.y);
        agent.state = AgentState::Returning;
        agent.found_food = true;

        let mut arrived_at = None;
        for tick in 0..20 {
            if h.step(&mut agent).arrived {
                arrived_at = Some(tick);
                break;
            }
        }
        assert!(arrived_at.is_some());
        assert!(agent.position.distance(colony) <= h.config.ants.radius() + h.config.world.colony_radius);
    }

    #[test]
    fn test_loaded_return_lays_food_trail() {
        let mut h = Harness::new(base_config());
        let mut agent = agent_at(&h.config, 20.0, 20.0);
        agent.state = AgentState::Returning;
        agent.found_food = true;
        let deposit = (0..5).find_map(|_| h.step(&mut agent).deposit);
        assert_eq!(deposit.map(|d| d.channel), Some(ScentChannel::Food));
    }

    #[test]
    fn test_terrain_scales_displacement() {
        let mut h = Harness::new(base_config());
        h.resources
            .set_terrain(vec![TerrainZone::new(Vec2::new(100.0, 100.0), 50.0, 0.5)]);
        let mut agent = agent_at(&h.config, 100.0, 100.0);
        let before = agent.position;
        h.step(&mut agent);
        let moved = before.distance(agent.position);
        assert!((moved - 0.5 * h.config.ants.speed).abs() < 1e-9);
    }

    #[test]
    fn test_position_wraps_at_edges() {
        let mut config = base_config();
        config.ants.steering_forces.random = 0.0;
        config.ants.steering_forces.colony_attraction = 0.0;
        let mut h = Harness::new(config);
        let mut agent = agent_at(&h.config, 399.5, 100.0);
        h.step(&mut agent);
        assert!(agent.position.x < 1.5);
    }
}
