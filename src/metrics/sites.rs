// sites.rs - Per-pair site comparison under a gap policy

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::data::is_gap;

/// How gap columns take part in a pairwise comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapPolicy {
    /// Gaps are ordinary symbols: gap/residue mismatches, gap/gap matches
    Include,
    /// Skip a column for a pair when either sequence has a gap there
    #[default]
    Pairwise,
    /// Drop columns that carry a gap in any sequence of the alignment
    Complete,
}

impl FromStr for GapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "include" | "gaps-as-symbols" => Ok(GapPolicy::Include),
            "pairwise" | "pairwise-deletion" => Ok(GapPolicy::Pairwise),
            "complete" | "complete-deletion" => Ok(GapPolicy::Complete),
            _ => Err(format!("Invalid gap policy: {}. Use: include, pairwise, complete", s)),
        }
    }
}

impl GapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GapPolicy::Include => "include",
            GapPolicy::Pairwise => "pairwise",
            GapPolicy::Complete => "complete",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GapPolicy::Include => "gaps compared as symbols",
            GapPolicy::Pairwise => "pairwise deletion of gapped columns",
            GapPolicy::Complete => "complete deletion of gapped columns",
        }
    }
}

/// Outcome of comparing two aligned sequences column by column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SiteComparison {
    /// Columns that took part in the comparison
    pub compared: usize,
    /// Compared columns where the residues differ
    pub mismatches: usize,
}

impl SiteComparison {
    /// Fraction of mismatched compared sites (0 when nothing was compared)
    pub fn p_distance(&self) -> f64 {
        if self.compared == 0 {
            0.0
        } else {
            self.mismatches as f64 / self.compared as f64
        }
    }
}

/// Compare two equal-width sequences.
///
/// `mask` marks columns removed for everyone (complete deletion); pass `None`
/// for the other policies. Callers guarantee equal widths.
pub fn compare_sites(a: &[u8], b: &[u8], policy: GapPolicy, mask: Option<&[bool]>) -> SiteComparison {
    let mut sites = SiteComparison::default();

    for (col, (&x, &y)) in a.iter().zip(b).enumerate() {
        if let Some(mask) = mask {
            if mask[col] {
                continue;
            }
        }
        if policy == GapPolicy::Pairwise && (is_gap(x) || is_gap(y)) {
            continue;
        }
        sites.compared += 1;
        let same = x == y || (is_gap(x) && is_gap(y));
        if !same {
            sites.mismatches += 1;
        }
    }

    sites
}
