// lib.rs - msadist library root

//! # msadist - Pairwise distance matrices for aligned protein sequences
//!
//! Computes symmetric distance matrices from a multiple sequence alignment,
//! derives clusters from them and profiles per-column conservation. The
//! matrix is the input for external tree building tools.
//!
//! ## Features
//!
//! - **Parallel**: unique sequence pairs are scored with rayon
//! - **Plugin system**: p-distance, Poisson, Kimura and identity, plus custom functions
//! - **Gap policies**: gaps as symbols, pairwise deletion or complete deletion
//! - **Multiple formats**: TSV, CSV, PHYLIP, NEXUS and JSON output
//! - **Conservation**: per-column scores, key residues and batch folder reports
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use msadist::prelude::*;
//!
//! let alignment = Alignment::from_fasta_file(std::path::Path::new("falcipains.afa"))?;
//! let computer = PairwiseDistanceComputer::default();
//! let matrix = computer.compute(&alignment).map_err(|e| e.to_string())?;
//! write_matrix("distances.tsv", "tsv", &matrix, false, "example")?;
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod metrics;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{calculate_distance_matrix, cluster, conservation_scores};
    pub use crate::core::{ClusterAssignment, ClusterCut, DistanceConfig, DistanceMatrix, Linkage};
    pub use crate::core::PairwiseDistanceComputer;
    pub use crate::data::{Alignment, IdFilter, Sequence};
    pub use crate::error::DistanceError;
    pub use crate::metrics::{DistanceFunction, GapPolicy, MetricRegistry, SiteComparison};
    pub use crate::output::write_matrix;
}

// Re-export main types at the root level for convenience
pub use cli::{Args, ValidationResult};
pub use core::{DistanceConfig, DistanceMatrix, PairwiseDistanceComputer};
pub use data::{Alignment, Sequence};
pub use error::DistanceError;
pub use metrics::{DistanceFunction, GapPolicy, MetricRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "msadist v{} - Pairwise distance calculator for protein alignments",
        VERSION
    )
}
