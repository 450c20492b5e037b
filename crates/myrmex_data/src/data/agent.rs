use serde::{Deserialize, Serialize};

/// Behavioral state of a forager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgentState {
    /// Wandering under standard steering.
    #[default]
    Exploring,
    /// Heading straight for a sighted food source.
    MovingToFood,
    /// Tracking food-channel markers.
    FollowingFoodTrail,
    /// Heading home. Terminal once the colony is reached.
    Returning,
}

impl AgentState {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AgentState::Exploring => "exploring",
            AgentState::MovingToFood => "moving_to_food",
            AgentState::FollowingFoodTrail => "following_food_trail",
            AgentState::Returning => "returning",
        }
    }
}
