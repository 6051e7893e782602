// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        let defaults = Args::defaults();

        // Input/Output
        if self.alignment.is_none() {
            self.alignment = config.alignment;
        }
        if self.conservation_dir.is_empty() {
            if let Some(dirs) = config.conservation_dirs {
                self.conservation_dir = dirs;
            }
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Core settings (only override defaults, not explicit CLI values)
        if self.results == defaults.results {
            if let Some(results) = config.results {
                self.results = results;
            }
        }
        if self.format == defaults.format {
            if let Some(format) = config.format {
                self.format = format;
            }
        }
        if self.metric == defaults.metric {
            if let Some(metric) = config.metric {
                self.metric = metric;
            }
        }
        if self.gap_policy == defaults.gap_policy {
            if let Some(gap_policy) = config.gap_policy {
                self.gap_policy = gap_policy;
            }
        }
        if self.min_sites == defaults.min_sites {
            if let Some(min_sites) = config.min_sites {
                self.min_sites = min_sites;
            }
        }

        // Clustering
        if self.clusters.is_none() {
            self.clusters = config.clusters;
        }
        if self.linkage == defaults.linkage {
            if let Some(linkage) = config.linkage {
                self.linkage = linkage;
            }
        }
        if self.cluster_threshold.is_none() && self.cluster_count.is_none() {
            self.cluster_threshold = config.cluster_threshold;
            self.cluster_count = config.cluster_count;
        }

        // Conservation
        if self.conservation.is_none() {
            self.conservation = config.conservation;
        }
        if self.key_residues.is_none() {
            self.key_residues = config.key_residues.map(|positions| {
                positions
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            });
        }
        if self.conserved_threshold == defaults.conserved_threshold {
            if let Some(threshold) = config.conserved_threshold {
                self.conserved_threshold = threshold;
            }
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Sequence filtering
        if self.include_ids.is_none() {
            self.include_ids = config.include_ids;
        }
        if self.exclude_ids.is_none() {
            self.exclude_ids = config.exclude_ids;
        }
        if self.include_ids_list.is_none() {
            self.include_ids_list = config.include_ids_list;
        }
        if self.exclude_ids_list.is_none() {
            self.exclude_ids_list = config.exclude_ids_list;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.no_collapse && config.no_collapse.unwrap_or(false) {
            self.no_collapse = true;
        }
        if !self.similarity && config.similarity.unwrap_or(false) {
            self.similarity = true;
        }
        if !self.quiet && config.quiet.unwrap_or(false) {
            self.quiet = true;
        }
        if !self.stats_only && config.stats_only.unwrap_or(false) {
            self.stats_only = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
