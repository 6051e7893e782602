// identity.rs - Percent identity expressed as a similarity

use super::sites::SiteComparison;
use super::traits::DistanceFunction;

/// Fraction of identical compared sites (1 - p)
#[derive(Debug, Clone)]
pub struct Identity;

impl DistanceFunction for Identity {
    fn evaluate(&self, sites: &SiteComparison) -> Option<f64> {
        Some(1.0 - sites.p_distance())
    }

    fn name(&self) -> &'static str {
        "identity"
    }

    fn description(&self) -> &'static str {
        "Fraction of identical positions (similarity, stored as 1 - identity)"
    }

    fn is_similarity(&self) -> bool {
        true
    }
}
