// validation.rs - Input validation utilities

use std::sync::Arc;
use std::str::FromStr;
use regex::Regex;
use crate::cli::args::Args;
use crate::core::{ClusterCut, Linkage, DEFAULT_KEY_RESIDUES};
use crate::data::{load_set_from_file, IdFilter};
use crate::metrics::{DistanceFunction, GapPolicy, MetricRegistry};
use crate::output::MATRIX_FORMATS;

pub struct ValidationResult {
    pub metric: Arc<dyn DistanceFunction>,
    pub gap_policy: GapPolicy,
    pub linkage: Linkage,
    pub cluster_cut: Option<ClusterCut>,
    pub key_positions: Vec<usize>,
    pub id_filter: IdFilter,
}

/// Parse a comma separated list of 1-based positions
pub fn parse_positions(list: &str) -> Result<Vec<usize>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let pos = s
                .parse::<usize>()
                .map_err(|_| format!("Invalid residue position '{}'", s))?;
            if pos == 0 {
                return Err("Residue positions are 1-based; 0 is not allowed".to_string());
            }
            Ok(pos)
        })
        .collect()
}

fn compile_regex(pattern: &Option<String>, name: &str) -> Result<Option<Regex>, String> {
    pattern
        .as_deref()
        .map(|p| Regex::new(p).map_err(|e| format!("Invalid {} regex: {}", name, e)))
        .transpose()
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    if args.alignment.is_none() && args.conservation_dir.is_empty() {
        return Err("Nothing to do: give --alignment and/or --conservation-dir".to_string());
    }

    if args.alignment.is_none() {
        let needs_alignment = [
            ("--output", args.output.is_some()),
            ("--clusters", args.clusters.is_some()),
            ("--conservation", args.conservation.is_some()),
            ("--stats-only", args.stats_only),
        ];
        if let Some((flag, _)) = needs_alignment.iter().find(|(_, set)| *set) {
            return Err(format!("{} requires --alignment", flag));
        }
    }

    // Validate distance function
    let registry = MetricRegistry::new();
    let metric = registry.get_metric(&args.metric).ok_or_else(|| {
        format!(
            "Invalid metric '{}'. Available: {}",
            args.metric,
            registry.get_metric_names().join(", ")
        )
    })?;

    let gap_policy = GapPolicy::from_str(&args.gap_policy)?;

    if !MATRIX_FORMATS.contains(&args.format.to_lowercase().as_str()) {
        return Err(format!(
            "Unsupported output format: {}. Use: {}",
            args.format,
            MATRIX_FORMATS.join(", ")
        ));
    }

    if args.similarity && !metric.is_bounded() {
        return Err(format!(
            "--similarity needs a bounded metric; '{}' distances can exceed 1",
            metric.name()
        ));
    }

    if args.min_sites == 0 {
        return Err("--min-sites must be at least 1".to_string());
    }

    // Validate clustering
    let linkage = Linkage::from_str(&args.linkage)?;
    let cluster_cut = match (args.cluster_threshold, args.cluster_count) {
        (Some(_), Some(_)) => {
            return Err("--cluster-threshold and --cluster-count are mutually exclusive".to_string())
        }
        (Some(t), None) => {
            if t.is_nan() || t < 0.0 {
                return Err("Cluster threshold must be a non-negative number".to_string());
            }
            Some(ClusterCut::Threshold(t))
        }
        (None, Some(k)) => {
            if k == 0 {
                return Err("Cluster count must be at least 1".to_string());
            }
            Some(ClusterCut::Count(k))
        }
        (None, None) => None,
    };
    if args.clusters.is_some() && cluster_cut.is_none() {
        return Err("--clusters requires --cluster-threshold or --cluster-count".to_string());
    }

    // Validate conservation settings
    if !(0.0..=1.0).contains(&args.conserved_threshold) {
        return Err("Conserved threshold must be between 0.0 and 1.0".to_string());
    }
    let key_positions = match &args.key_residues {
        Some(list) => parse_positions(list)?,
        None => DEFAULT_KEY_RESIDUES.to_vec(),
    };

    // Compile regex patterns and load filter sets from files
    let id_filter = IdFilter {
        include_regex: compile_regex(&args.include_ids, "include_ids")?,
        exclude_regex: compile_regex(&args.exclude_ids, "exclude_ids")?,
        include_set: args
            .include_ids_list
            .as_deref()
            .map(load_set_from_file)
            .transpose()?,
        exclude_set: args
            .exclude_ids_list
            .as_deref()
            .map(load_set_from_file)
            .transpose()?,
    };

    Ok(ValidationResult {
        metric,
        gap_policy,
        linkage,
        cluster_cut,
        key_positions,
        id_filter,
    })
}
