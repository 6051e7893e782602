// corrected.rs - Multiple-hit corrected protein distances

use super::sites::SiteComparison;
use super::traits::DistanceFunction;

/// Poisson correction: d = -ln(1 - p)
#[derive(Debug, Clone)]
pub struct PoissonDistance;

impl DistanceFunction for PoissonDistance {
    fn evaluate(&self, sites: &SiteComparison) -> Option<f64> {
        let p = sites.p_distance();
        if p >= 1.0 {
            return None;
        }
        if p == 0.0 {
            return Some(0.0);
        }
        Some(-(1.0 - p).ln())
    }

    fn name(&self) -> &'static str {
        "poisson"
    }

    fn description(&self) -> &'static str {
        "Poisson-corrected amino acid distance, -ln(1 - p)"
    }

    fn is_bounded(&self) -> bool {
        false
    }
}

/// Kimura's empirical protein correction: d = -ln(1 - p - 0.2 p^2)
#[derive(Debug, Clone)]
pub struct KimuraProteinDistance;

impl DistanceFunction for KimuraProteinDistance {
    fn evaluate(&self, sites: &SiteComparison) -> Option<f64> {
        let p = sites.p_distance();
        if p == 0.0 {
            return Some(0.0);
        }
        let arg = 1.0 - p - 0.2 * p * p;
        if arg <= 0.0 {
            return None;
        }
        Some(-arg.ln())
    }

    fn name(&self) -> &'static str {
        "kimura"
    }

    fn description(&self) -> &'static str {
        "Kimura protein distance, -ln(1 - p - 0.2 p^2)"
    }

    fn is_bounded(&self) -> bool {
        false
    }
}
