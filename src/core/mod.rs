// mod.rs - Core logic module

pub mod batch;
pub mod cluster;
pub mod conservation;
pub mod distance;
pub mod matrix;

// Re-export main types for convenience
pub use batch::{
    analyze_alignment_file, process_folder, write_batch_summary, BatchConfig, FileReport,
    COMBINED_SUMMARY,
};
pub use cluster::{cluster, ClusterAssignment, ClusterCut, Linkage};
pub use conservation::{
    conservation_scores, highly_conserved, key_residues, mean_conservation,
    DEFAULT_CONSERVED_THRESHOLD, DEFAULT_KEY_RESIDUES, STANDARD_AMINO_ACIDS,
};
pub use distance::{calculate_distance_matrix, DistanceConfig, PairwiseDistanceComputer};
pub use matrix::{condensed_index, condensed_len, DistanceMatrix};
