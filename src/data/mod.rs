// mod.rs - Data structures module

pub mod filter;
pub mod loaders;
pub mod sequence;

// Re-export main types for convenience
pub use filter::{load_set_from_file, IdFilter};
pub use loaders::list_alignment_files;
pub use sequence::{is_gap, Alignment, Sequence, GAP, GAP_SYMBOLS};
