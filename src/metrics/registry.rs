// registry.rs - Registry of available distance functions

use std::collections::BTreeMap;
use std::sync::Arc;
use super::traits::DistanceFunction;
use super::{Identity, KimuraProteinDistance, PDistance, PoissonDistance};

/// Registry for available distance functions, keyed by CLI name
pub struct MetricRegistry {
    metrics: BTreeMap<String, Arc<dyn DistanceFunction>>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            metrics: BTreeMap::new(),
        };

        // Register built-in functions
        registry.register_metric("p-distance", Arc::new(PDistance));
        registry.register_metric("identity", Arc::new(Identity));
        registry.register_metric("poisson", Arc::new(PoissonDistance));
        registry.register_metric("kimura", Arc::new(KimuraProteinDistance));

        registry
    }

    /// Register a new function (replaces any existing entry with that name)
    pub fn register_metric(&mut self, name: &str, metric: Arc<dyn DistanceFunction>) {
        self.metrics.insert(name.to_string(), metric);
    }

    /// Get a function by name
    pub fn get_metric(&self, name: &str) -> Option<Arc<dyn DistanceFunction>> {
        self.metrics.get(name).cloned()
    }

    pub fn has_metric(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    /// List (name, description) pairs in name order
    pub fn list_metrics(&self) -> Vec<(&str, &str)> {
        self.metrics
            .iter()
            .map(|(name, m)| (name.as_str(), m.description()))
            .collect()
    }

    pub fn get_metric_names(&self) -> Vec<&str> {
        self.metrics.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::new()
    }
}
