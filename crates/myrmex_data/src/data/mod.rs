pub mod agent;
pub mod geometry;
pub mod resource;
pub mod scent;

pub use agent::*;
pub use geometry::*;
pub use resource::*;
pub use scent::*;
