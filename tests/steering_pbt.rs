use myrmex_lib::model::config::{AppConfig, SteeringForces};
use myrmex_lib::model::data::Vec2;
use myrmex_lib::model::noise::SmoothNoise;
use myrmex_lib::model::scent::ScentField;
use myrmex_lib::model::spatial_hash::SpatialHash;
use myrmex_lib::model::steering::{ForceVectors, Neighborhood, SteeringEngine};
use proptest::prelude::*;

prop_compose! {
    fn arb_vec()(x in -50.0f64..50.0, y in -50.0f64..50.0) -> Vec2 {
        Vec2::new(x, y)
    }
}

prop_compose! {
    fn arb_position()(x in 0.0f64..300.0, y in 0.0f64..300.0) -> Vec2 {
        Vec2::new(x, y)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_composed_velocity_has_speed_magnitude(
        random in arb_vec(),
        avoidance in arb_vec(),
        pheromone in arb_vec(),
        colony in arb_vec(),
        previous in arb_vec(),
        speed in 0.1f64..5.0,
    ) {
        let mut config = AppConfig::default();
        config.ants.speed = speed;
        let engine = SteeringEngine::new(&config);
        let forces = ForceVectors {
            random,
            avoidance,
            pheromone_avoidance: pheromone,
            colony_attraction: colony,
        };
        let v = engine.compose(&forces, previous);
        if !previous.is_zero() || v.length() > 0.0 {
            prop_assert!((v.length() - speed).abs() < 1e-9, "|v| = {}", v.length());
        }
    }

    #[test]
    fn test_isolated_wanderer_moves_at_speed(
        position in arb_position(),
        seed in any::<u64>(),
        offset in 0.0f64..1000.0,
    ) {
        let mut config = AppConfig::default();
        config.ants.steering_forces = SteeringForces {
            colony_attraction: 0.0,
            ..SteeringForces::default()
        };
        let engine = SteeringEngine::new(&config);
        let peers = vec![position];
        let mut index = SpatialHash::new(25.0, 300.0, 300.0);
        index.build(&peers);
        let scent = ScentField::new(1.0, 25.0, 300.0, 300.0);
        let hood = Neighborhood {
            peers: &peers,
            peer_index: &index,
            scent: &scent,
            colony: Vec2::new(150.0, 150.0),
        };
        let mut noise = SmoothNoise::new(seed, offset, 0.01);
        let (v, _) = engine.steer(position, Vec2::new(1.0, 0.0), Some(0), &mut noise, &hood);
        prop_assert!((v.length() - config.ants.speed).abs() < 1e-9);
    }

    #[test]
    fn test_spatial_hash_matches_brute_force(
        points in prop::collection::vec(arb_position(), 0..80),
        center in arb_position(),
        radius in 0.5f64..80.0,
        cell_size in 5.0f64..40.0,
    ) {
        let mut index = SpatialHash::new(cell_size, 300.0, 300.0);
        index.build(&points);

        let mut candidates = Vec::new();
        index.query_into(center.x, center.y, radius, &mut candidates);
        let mut found: Vec<usize> = candidates
            .into_iter()
            .filter(|&i| points[i].distance(center) <= radius)
            .collect();
        found.sort_unstable();

        let brute: Vec<usize> = (0..points.len())
            .filter(|&i| points[i].distance(center) <= radius)
            .collect();
        prop_assert_eq!(found, brute);
    }
}
