// mod.rs - Distance functions module root

pub mod corrected;
pub mod identity;
pub mod p_distance;
pub mod registry;
pub mod sites;
pub mod traits;

// Re-export main types for convenience
pub use corrected::{KimuraProteinDistance, PoissonDistance};
pub use identity::Identity;
pub use p_distance::PDistance;
pub use registry::MetricRegistry;
pub use sites::{compare_sites, GapPolicy, SiteComparison};
pub use traits::DistanceFunction;
