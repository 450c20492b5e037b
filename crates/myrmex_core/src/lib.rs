//! # Myrmex Core
//!
//! The simulation engine for Myrmex, a colony foraging simulation.
//!
//! This crate contains the deterministic simulation logic, including:
//! - The forager state machine and its steering forces
//! - The scent field (deposit, decay, prune) and trail ranking
//! - Food sources, terrain zones and population bookkeeping
//! - Spatial indexing for perception queries
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! Each component owns its data and exposes plain methods; the per-tick
//! orchestration lives in the root crate. Agents never mutate shared state
//! during their pass: scent deposits and removals are returned as outcomes and
//! applied afterwards, so every agent in a tick sees the same field.
//!
//! ## Example
//!
//! ```
//! use myrmex_core::scent::ScentField;
//! use myrmex_data::{ScentChannel, Vec2};
//!
//! let mut field = ScentField::new(100.0, 25.0, 800.0, 600.0);
//! field.deposit(Vec2::new(10.0, 10.0), ScentChannel::Food, 1000.0);
//! field.tick();
//! assert_eq!(field.markers()[0].strength, 900.0);
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Typed errors for configuration and commands
pub mod error;
/// Forager state machine and kinematics
pub mod forager;
/// Performance metrics collection and logging
pub mod metrics;
/// Seeded smooth noise for wandering headings
pub mod noise;
/// Agent arena, spawn cadence and removal
pub mod population;
/// Best-marker selection policies
pub mod ranking;
/// Food sources and terrain zones
pub mod resources;
/// Scent markers: deposit, decay and queries
pub mod scent;
/// Renderer-facing world snapshots
pub mod snapshot;
/// Spatial hashing for proximity queries
pub mod spatial_hash;
/// Weighted steering force composition
pub mod steering;

pub use config::AppConfig;
pub use error::SimError;
pub use forager::{ForagerAgent, ForagerContext, ForagerOutcome};
pub use metrics::{init_logging, Metrics};
pub use population::PopulationManager;
pub use ranking::{MarkerRanking, RankingPolicy};
pub use resources::ResourceRegistry;
pub use scent::{ScentDeposit, ScentField};
pub use snapshot::WorldSnapshot;
pub use steering::{ForceVectors, Neighborhood, SteeringEngine};
