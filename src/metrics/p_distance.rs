// p_distance.rs - Fraction of mismatched sites

use super::sites::SiteComparison;
use super::traits::DistanceFunction;

/// Uncorrected p-distance: mismatches / compared sites, in [0,1]
#[derive(Debug, Clone)]
pub struct PDistance;

impl DistanceFunction for PDistance {
    fn evaluate(&self, sites: &SiteComparison) -> Option<f64> {
        Some(sites.p_distance())
    }

    fn name(&self) -> &'static str {
        "p-distance"
    }

    fn description(&self) -> &'static str {
        "Fraction of mismatched positions (uncorrected p-distance)"
    }
}
