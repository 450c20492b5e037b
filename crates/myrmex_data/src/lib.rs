//! Plain data model shared by the simulation core and its front ends.

pub mod data;

pub use data::*;
