pub use myrmex_core::{MarkerRanking, RankingPolicy};
pub mod config {
    pub use myrmex_core::config::*;
}
pub mod error {
    pub use myrmex_core::error::*;
}
pub mod forager {
    pub use myrmex_core::forager::*;
}
pub mod metrics {
    pub use myrmex_core::metrics::*;
}
pub mod noise {
    pub use myrmex_core::noise::*;
}
pub mod population {
    pub use myrmex_core::population::*;
}
pub mod resources {
    pub use myrmex_core::resources::*;
}
pub mod scent {
    pub use myrmex_core::scent::*;
}
pub mod snapshot {
    pub use myrmex_core::snapshot::*;
}
pub mod spatial_hash {
    pub use myrmex_core::spatial_hash::*;
}
pub mod steering {
    pub use myrmex_core::steering::*;
}
pub mod data {
    pub use myrmex_data::*;
}

pub mod world;
