use super::geometry::Vec2;
use serde::{Deserialize, Serialize};

/// Semantic kind of a scent marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScentChannel {
    /// Outbound trail laid while searching.
    Explore,
    /// Inbound trail laid by a forager carrying food.
    Food,
}

/// One deposited trail point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScentMarker {
    pub position: Vec2,
    pub channel: ScentChannel,
    pub strength: f64,
    pub decay_rate: f64,
}

impl ScentMarker {
    #[must_use]
    pub fn new(position: Vec2, channel: ScentChannel, strength: f64, decay_rate: f64) -> Self {
        Self {
            position,
            channel,
            strength: strength.max(0.0),
            decay_rate,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.strength <= 0.0
    }
}
