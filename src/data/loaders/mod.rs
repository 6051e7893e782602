// mod.rs - Alignment file loaders

pub mod fasta;

pub use fasta::{list_alignment_files, ALIGNMENT_EXTENSIONS};
