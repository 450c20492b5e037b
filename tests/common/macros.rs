/// Asserts that the agent with the given id is in the given state.
#[macro_export]
macro_rules! assert_agent_state {
    ($world:expr, $id:expr, $state:expr) => {
        let agent = $world
            .population
            .agents()
            .iter()
            .find(|a| a.id == $id)
            .expect("Agent not found in world");
        assert_eq!(
            agent.state, $state,
            "Agent {} is {:?}, expected {:?}",
            $id, agent.state, $state
        );
    };
}

/// Asserts that no agent with the given id remains in the world.
#[macro_export]
macro_rules! assert_agent_removed {
    ($world:expr, $id:expr) => {
        let exists = $world.population.agents().iter().any(|a| a.id == $id);
        assert!(!exists, "Agent {} should be removed but was found", $id);
    };
}

/// Asserts that the population count matches the expected value.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!($world.agent_count(), $count, "Population count mismatch");
    };
}

/// Asserts two floats agree within a tolerance.
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr) => {
        let (l, r): (f64, f64) = ($left, $right);
        assert!((l - r).abs() <= 1e-9, "{} is not within 1e-9 of {}", l, r);
    };
    ($left:expr, $right:expr, $eps:expr) => {
        let (l, r): (f64, f64) = ($left, $right);
        assert!((l - r).abs() <= $eps, "{} is not within {} of {}", l, $eps, r);
    };
}
