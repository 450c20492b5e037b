//! Myrmex: a colony foraging simulation.
//!
//! Foragers leave the colony, lay decaying scent trails, find food and carry
//! it home. The simulation components live in `myrmex_core`; this crate wires
//! them into a [`model::world::World`] that advances tick by tick and accepts
//! commands from a front end.

pub mod model;
