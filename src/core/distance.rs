// distance.rs - Core pairwise distance engine

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use rayon::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use crate::core::matrix::{condensed_index, condensed_len, DistanceMatrix};
use crate::data::{Alignment, Sequence};
use crate::error::{DistanceError, Result};
use crate::metrics::{compare_sites, DistanceFunction, GapPolicy, MetricRegistry, PDistance};

/// Settings for a matrix computation
#[derive(Debug, Clone)]
pub struct DistanceConfig {
    pub gap_policy: GapPolicy,
    /// Pairs comparing fewer columns than this are left undefined
    pub min_sites: usize,
    /// Compute each distinct sequence only once
    pub collapse_identical: bool,
    /// Print status lines and a progress bar
    pub verbose: bool,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            gap_policy: GapPolicy::Pairwise,
            min_sites: 1,
            collapse_identical: true,
            verbose: false,
        }
    }
}

/// Builds symmetric distance matrices from aligned sequences
#[derive(Debug, Clone)]
pub struct PairwiseDistanceComputer {
    metric: Arc<dyn DistanceFunction>,
    config: DistanceConfig,
}

impl Default for PairwiseDistanceComputer {
    fn default() -> Self {
        Self::new(Arc::new(PDistance), DistanceConfig::default())
    }
}

impl PairwiseDistanceComputer {
    pub fn new(metric: Arc<dyn DistanceFunction>, config: DistanceConfig) -> Self {
        Self { metric, config }
    }

    /// Create with a function looked up in the default registry
    pub fn from_metric_name(name: &str, config: DistanceConfig) -> std::result::Result<Self, String> {
        let registry = MetricRegistry::new();
        let metric = registry.get_metric(name).ok_or_else(|| {
            format!(
                "Unknown distance metric '{}'. Available: {}",
                name,
                registry.get_metric_names().join(", ")
            )
        })?;
        Ok(Self::new(metric, config))
    }

    pub fn metric(&self) -> &dyn DistanceFunction {
        self.metric.as_ref()
    }

    pub fn config(&self) -> &DistanceConfig {
        &self.config
    }

    /// Distance between two sequences, `None` if they share fewer than
    /// `min_sites` comparable columns.
    ///
    /// Complete deletion needs the whole alignment; for a lone pair it
    /// removes the columns gapped in either sequence.
    pub fn pair_distance(&self, a: &Sequence, b: &Sequence) -> Result<Option<f64>> {
        if a.len() != b.len() {
            return Err(DistanceError::ShapeMismatch {
                id: b.id.clone(),
                expected: a.len(),
                found: b.len(),
            });
        }
        let policy = match self.config.gap_policy {
            GapPolicy::Complete => GapPolicy::Pairwise,
            other => other,
        };
        self.score(a, b, policy, None)
    }

    fn score(&self, a: &Sequence, b: &Sequence, policy: GapPolicy, mask: Option<&[bool]>) -> Result<Option<f64>> {
        let sites = compare_sites(&a.residues, &b.residues, policy, mask);
        if sites.compared < self.config.min_sites.max(1) {
            return Ok(None);
        }
        match self.metric.distance(&sites) {
            Some(d) => Ok(Some(d)),
            None => Err(DistanceError::Saturated {
                metric: self.metric.name().to_string(),
                first: a.id.clone(),
                second: b.id.clone(),
                p: sites.p_distance(),
            }),
        }
    }

    /// Compute the full matrix.
    ///
    /// Fails with `EmptyInput` for an empty alignment and `ShapeMismatch` when
    /// widths differ.
    pub fn compute(&self, alignment: &Alignment) -> Result<DistanceMatrix> {
        let width = alignment.check_shape()?;
        let n = alignment.len();
        let policy = self.config.gap_policy;
        let seqs = &alignment.sequences;

        let mask = if policy == GapPolicy::Complete {
            let mask = alignment.gapped_columns();
            if self.config.verbose {
                let removed = mask.iter().filter(|&&m| m).count();
                println!(
                    "✂️  Complete deletion: {} of {} columns removed",
                    removed, width
                );
            }
            Some(mask)
        } else {
            None
        };
        let mask = mask.as_deref();

        // Group identical sequences so each distinct pair is scored once
        let groups: Vec<Vec<usize>> = if self.config.collapse_identical {
            alignment.identical_groups()
        } else {
            (0..n).map(|i| vec![i]).collect()
        };
        let n_groups = groups.len();
        let mut group_of = vec![0usize; n];
        for (g, members) in groups.iter().enumerate() {
            for &m in members {
                group_of[m] = g;
            }
        }

        let total_pairs = condensed_len(n_groups);
        if self.config.verbose {
            println!(
                "🔄 Computing distance matrix ({} sequences, {} distinct, {} unique pairs, width {})...",
                n, n_groups, total_pairs, width
            );
        }
        let start = Instant::now();

        // Members of one group compare against their representative
        let within: Vec<Option<f64>> = groups
            .iter()
            .map(|members| {
                let rep = &seqs[members[0]];
                self.score(rep, rep, policy, mask)
            })
            .collect::<Result<_>>()?;

        let pb = if self.config.verbose && total_pairs > 0 {
            let pb = ProgressBar::new(total_pairs as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        // Update every 1% to reduce contention
        let update_interval = std::cmp::max(1, total_pairs / 100);
        let progress_counter = AtomicUsize::new(0);

        let between: Vec<Option<f64>> = (0..n_groups)
            .into_par_iter()
            .flat_map_iter(|gi| (gi + 1..n_groups).map(move |gj| (gi, gj)))
            .map(|(gi, gj)| {
                let d = self.score(&seqs[groups[gi][0]], &seqs[groups[gj][0]], policy, mask);
                if let Some(pb) = &pb {
                    let count = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % update_interval == 0 {
                        pb.set_position(count as u64);
                    }
                }
                d
            })
            .collect::<Result<_>>()?;

        if let Some(pb) = &pb {
            pb.finish_with_message("✅ Pairwise distances computed!");
        }

        // Expand group distances to every sequence pair
        let mut condensed = Vec::with_capacity(condensed_len(n));
        for i in 0..n {
            for j in i + 1..n {
                let (gi, gj) = (group_of[i], group_of[j]);
                let d = match gi.cmp(&gj) {
                    std::cmp::Ordering::Equal => within[gi],
                    std::cmp::Ordering::Less => between[condensed_index(n_groups, gi, gj)],
                    std::cmp::Ordering::Greater => between[condensed_index(n_groups, gj, gi)],
                };
                condensed.push(d);
            }
        }

        let matrix = DistanceMatrix::from_condensed(alignment.ids(), condensed)?
            .with_labels(self.metric.name(), policy.as_str());

        if self.config.verbose {
            println!(
                "✅ Distance matrix computed in {:.2}s",
                start.elapsed().as_secs_f64()
            );
            let undefined = matrix.undefined_pairs();
            if undefined > 0 {
                println!(
                    "⚠️  {} pairs share fewer than {} comparable sites (reported as NA)",
                    undefined, self.config.min_sites
                );
            }
        }

        Ok(matrix)
    }
}

/// Calculate a distance matrix with the given function and settings
pub fn calculate_distance_matrix(
    alignment: &Alignment,
    metric: Arc<dyn DistanceFunction>,
    config: DistanceConfig,
) -> Result<DistanceMatrix> {
    PairwiseDistanceComputer::new(metric, config).compute(alignment)
}
