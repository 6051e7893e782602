// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub alignment: Option<String>,
    pub conservation_dirs: Option<Vec<String>>,
    pub results: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,

    // Distance settings
    pub metric: Option<String>,
    pub gap_policy: Option<String>,
    pub min_sites: Option<usize>,
    pub no_collapse: Option<bool>,
    pub similarity: Option<bool>,

    // Clustering
    pub clusters: Option<String>,
    pub linkage: Option<String>,
    pub cluster_threshold: Option<f64>,
    pub cluster_count: Option<usize>,

    // Conservation
    pub conservation: Option<String>,
    pub key_residues: Option<Vec<usize>>,
    pub conserved_threshold: Option<f64>,

    // Performance
    pub threads: Option<usize>,

    // Sequence filtering
    pub include_ids: Option<String>,
    pub exclude_ids: Option<String>,
    pub include_ids_list: Option<String>,
    pub exclude_ids_list: Option<String>,

    // Flags
    pub quiet: Option<bool>,
    pub stats_only: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        println!("📄 Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# msadist.toml - Configuration file for msadist
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Aligned FASTA file to compute distances for
alignment = "falcipains.afa"

# Folders of *.afa alignments for batch conservation analysis
conservation_dirs = ["v1", "v2", "v3"]

# Results directory for batch conservation reports
results = "results"

# Output distance matrix file
output = "distances.tsv"

# Output format: tsv, csv, phylip, nexus, json
format = "tsv"

# =============================================================================
# DISTANCE SETTINGS
# =============================================================================

# Distance function: p-distance, poisson, kimura, identity
metric = "p-distance"

# Gap handling: include, pairwise, complete
gap_policy = "pairwise"

# Minimum number of comparable columns for a defined distance
min_sites = 1

# Compute every pair even when sequences are identical
no_collapse = false

# Write similarity (1 - distance) instead of distance
similarity = false

# =============================================================================
# CLUSTERING
# =============================================================================

# Cluster assignment output (TSV: Sequence, Cluster)
# clusters = "clusters.tsv"

# Linkage: single, complete, average
linkage = "average"

# Cut the tree at a distance threshold...
# cluster_threshold = 0.3

# ...or at a fixed number of clusters
# cluster_count = 4

# =============================================================================
# CONSERVATION
# =============================================================================

# Conservation profile of the alignment (TSV)
# conservation = "conservation.tsv"

# 1-based key residue positions
key_residues = [285, 417, 447]

# Positions scoring above this are highly conserved
conserved_threshold = 0.95

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# SEQUENCE FILTERING
# =============================================================================

# Include only sequences whose id matches regex pattern
# include_ids = "^FP"

# Exclude sequences whose id matches regex pattern
# exclude_ids = "partial"

# Include only sequences listed in a file (one id per line)
# include_ids_list = "ids.txt"

# Exclude sequences listed in a file (one id per line)
# exclude_ids_list = "exclude.txt"

# =============================================================================
# FLAGS
# =============================================================================

# Hide progress bars
quiet = false

# Show alignment and matrix statistics only, without writing the matrix
stats_only = false

# Validate inputs without computation (dry run)
dry_run = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config = Config::from_toml(&Config::generate_sample()).unwrap();
        assert_eq!(config.metric.as_deref(), Some("p-distance"));
        assert_eq!(config.key_residues, Some(vec![285, 417, 447]));
        assert_eq!(
            config.conservation_dirs,
            Some(vec!["v1".to_string(), "v2".to_string(), "v3".to_string()])
        );
        assert_eq!(config.cluster_threshold, None);
        assert_eq!(config.stats_only, Some(false));
    }

    #[test]
    fn test_bad_value_type_fails() {
        assert!(Config::from_toml("min_sites = \"many\"").is_err());
        let config = Config::from_toml("gap_policy = \"complete\"").unwrap();
        assert_eq!(config.gap_policy.as_deref(), Some("complete"));
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("msadist_config_{}.toml", std::process::id()));
        let config = Config {
            alignment: Some("aln.afa".to_string()),
            min_sites: Some(50),
            ..Default::default()
        };
        config.to_file(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.alignment.as_deref(), Some("aln.afa"));
        assert_eq!(loaded.min_sites, Some(50));
        let _ = std::fs::remove_file(&path);
    }
}
