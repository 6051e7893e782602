// traits.rs - Core trait for pluggable distance functions

use std::fmt::Debug;
use super::sites::SiteComparison;

/// Trait for pairwise scoring strategies.
/// The gap policy decides which columns are compared; a function only turns
/// the resulting counts into a score.
pub trait DistanceFunction: Send + Sync + Debug {
    /// Score for one pair, or `None` when the function is undefined
    /// (saturated) for these counts
    fn evaluate(&self, sites: &SiteComparison) -> Option<f64>;

    /// Get a human-readable name for this function
    fn name(&self) -> &'static str;

    /// Get a description of this function
    fn description(&self) -> &'static str;

    /// True when the function reports similarity (1 = identical)
    fn is_similarity(&self) -> bool {
        false
    }

    /// True when every score lies in [0,1]
    fn is_bounded(&self) -> bool {
        true
    }

    /// Score as a distance, converting similarities with `1 - s`
    fn distance(&self, sites: &SiteComparison) -> Option<f64> {
        let score = self.evaluate(sites)?;
        if self.is_similarity() {
            Some(1.0 - score)
        } else {
            Some(score)
        }
    }
}
