//! Food sources and terrain zones.

use myrmex_data::{FoodId, FoodSource, TerrainZone, Vec2};
use rand::Rng;

#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    food: Vec<FoodSource>,
    terrain: Vec<TerrainZone>,
    next_food_id: u64,
}

impl ResourceRegistry {
    pub fn new(terrain: Vec<TerrainZone>) -> Self {
        Self {
            food: Vec::new(),
            terrain,
            next_food_id: 0,
        }
    }

    /// Adds a source and returns its id.
    pub fn place_food(&mut self, position: Vec2, quantity: f64, size: f64) -> FoodId {
        let id = FoodId(self.next_food_id);
        self.next_food_id += 1;
        self.food.push(FoodSource::new(id, position, quantity, size));
        id
    }

    /// Places a full source at a uniformly random in-bounds point.
    pub fn spawn_random_food<R: Rng>(
        &mut self,
        rng: &mut R,
        width: f64,
        height: f64,
        quantity: f64,
        size: f64,
    ) -> FoodId {
        let position = Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        self.place_food(position, quantity, size)
    }

    /// Removes the source nearest `point` among those whose footprint covers it.
    pub fn remove_food_at(&mut self, point: Vec2) -> Option<FoodSource> {
        let idx = self
            .food
            .iter()
            .enumerate()
            .filter(|(_, f)| f.position.distance(point) <= f.footprint_radius())
            .min_by(|(_, a), (_, b)| {
                a.position
                    .distance_squared(point)
                    .total_cmp(&b.position.distance_squared(point))
            })
            .map(|(i, _)| i)?;
        Some(self.food.remove(idx))
    }

    /// Nearest non-depleted source whose center lies within `radius` of `point`.
    pub fn nearest_food_within(&self, point: Vec2, radius: f64) -> Option<&FoodSource> {
        let radius_sq = radius * radius;
        self.food
            .iter()
            .filter(|f| !f.is_depleted())
            .map(|f| (f, f.position.distance_squared(point)))
            .filter(|&(_, d)| d <= radius_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(f, _)| f)
    }

    pub fn food(&self, id: FoodId) -> Option<&FoodSource> {
        self.food.iter().find(|f| f.id == id)
    }

    pub fn food_mut(&mut self, id: FoodId) -> Option<&mut FoodSource> {
        self.food.iter_mut().find(|f| f.id == id)
    }

    /// Replaces every depleted source with a fresh one at a random point.
    ///
    /// Each depleted source yields exactly one replacement, so the number of
    /// sources is unchanged. Returns the ids of the replacements.
    pub fn replenish<R: Rng>(
        &mut self,
        rng: &mut R,
        width: f64,
        height: f64,
        quantity: f64,
        size: f64,
    ) -> Vec<FoodId> {
        let depleted = self.food.iter().filter(|f| f.is_depleted()).count();
        if depleted == 0 {
            return Vec::new();
        }
        self.food.retain(|f| !f.is_depleted());
        (0..depleted)
            .map(|_| self.spawn_random_food(rng, width, height, quantity, size))
            .collect()
    }

    /// Multiplier of the first zone containing `position`, or 1.0.
    ///
    /// Overlapping zones are not blended.
    #[must_use]
    pub fn speed_multiplier_at(&self, position: Vec2) -> f64 {
        self.terrain
            .iter()
            .find(|z| z.contains(position))
            .map_or(1.0, |z| z.speed_multiplier)
    }

    #[must_use]
    pub fn food_sources(&self) -> &[FoodSource] {
        &self.food
    }

    #[must_use]
    pub fn terrain_zones(&self) -> &[TerrainZone] {
        &self.terrain
    }

    pub fn set_terrain(&mut self, terrain: Vec<TerrainZone>) {
        self.terrain = terrain;
    }
}
