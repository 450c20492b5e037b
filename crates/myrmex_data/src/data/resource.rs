use super::geometry::Vec2;
use serde::{Deserialize, Serialize};

/// Stable handle for a food source. Never reused within one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoodId(pub u64);

/// A depletable pile of food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSource {
    pub id: FoodId,
    pub position: Vec2,
    /// Remaining quantity, never negative.
    pub quantity: f64,
    /// Footprint diameter in world units.
    pub size: f64,
}

impl FoodSource {
    #[must_use]
    pub fn new(id: FoodId, position: Vec2, quantity: f64, size: f64) -> Self {
        Self {
            id,
            position,
            quantity: quantity.max(0.0),
            size,
        }
    }

    /// Takes `amount` off the pile, stopping at zero.
    pub fn reduce(&mut self, amount: f64) {
        self.quantity = (self.quantity - amount).max(0.0);
    }

    #[inline]
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.quantity <= 0.0
    }

    #[inline]
    #[must_use]
    pub fn footprint_radius(&self) -> f64 {
        self.size / 2.0
    }
}

/// Circular ground patch that scales movement speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainZone {
    pub position: Vec2,
    pub radius: f64,
    pub speed_multiplier: f64,
}

impl TerrainZone {
    #[must_use]
    pub fn new(position: Vec2, radius: f64, speed_multiplier: f64) -> Self {
        Self {
            position,
            radius,
            speed_multiplier,
        }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance(point) < self.radius
    }
}
