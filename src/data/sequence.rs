// sequence.rs - Aligned sequence containers

use std::collections::HashMap;
use crc32fast::Hasher;
use crate::error::{DistanceError, Result};

/// Gap symbols recognised in alignments
pub const GAP_SYMBOLS: &[u8] = b"-.";

/// Canonical gap symbol
pub const GAP: u8 = b'-';

#[inline]
pub fn is_gap(residue: u8) -> bool {
    GAP_SYMBOLS.contains(&residue)
}

/// A single aligned sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub id: String,
    pub description: Option<String>,
    pub residues: Vec<u8>,
}

impl Sequence {
    /// Create a sequence, normalising residues to uppercase
    pub fn new(id: impl Into<String>, residues: &[u8]) -> Self {
        Self {
            id: id.into(),
            description: None,
            residues: residues.iter().map(|r| r.to_ascii_uppercase()).collect(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.is_empty());
        self
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Number of gap positions
    pub fn gap_count(&self) -> usize {
        self.residues.iter().filter(|&&r| is_gap(r)).count()
    }

    /// CRC32 of the residues, used to group identical sequences
    pub fn checksum(&self) -> u32 {
        let mut hasher = Hasher::new();
        hasher.update(&self.residues);
        hasher.finalize()
    }
}

/// A set of sequences that are expected to share one alignment width
#[derive(Debug, Clone, Default)]
pub struct Alignment {
    pub sequences: Vec<Sequence>,
}

impl Alignment {
    pub fn new(sequences: Vec<Sequence>) -> Self {
        Self { sequences }
    }

    /// Number of sequences
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Alignment width taken from the first sequence (0 when empty)
    pub fn width(&self) -> usize {
        self.sequences.first().map(|s| s.len()).unwrap_or(0)
    }

    pub fn ids(&self) -> Vec<String> {
        self.sequences.iter().map(|s| s.id.clone()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Sequence> {
        self.sequences.iter().find(|s| s.id == id)
    }

    /// Verify the set is non-empty and every sequence has the same width.
    /// Returns the width.
    pub fn check_shape(&self) -> Result<usize> {
        let first = self.sequences.first().ok_or(DistanceError::EmptyInput)?;
        let expected = first.len();
        for seq in &self.sequences[1..] {
            if seq.len() != expected {
                return Err(DistanceError::ShapeMismatch {
                    id: seq.id.clone(),
                    expected,
                    found: seq.len(),
                });
            }
        }
        Ok(expected)
    }

    /// Residues of column `index` (0-based), top to bottom
    pub fn column(&self, index: usize) -> impl Iterator<Item = u8> + '_ {
        self.sequences.iter().map(move |s| s.residues[index])
    }

    /// Columns that carry a gap in at least one sequence
    pub fn gapped_columns(&self) -> Vec<bool> {
        let width = self.width();
        let mut gapped = vec![false; width];
        for seq in &self.sequences {
            for (col, &r) in seq.residues.iter().enumerate().take(width) {
                if is_gap(r) {
                    gapped[col] = true;
                }
            }
        }
        gapped
    }

    /// Group identical sequences.
    ///
    /// Returns one group per distinct residue string, each holding indices into
    /// `sequences` in input order; groups are ordered by their first member.
    /// CRC32 buckets are verified byte-wise so colliding checksums never merge
    /// different sequences.
    pub fn identical_groups(&self) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut buckets: HashMap<u32, Vec<usize>> = HashMap::new();

        for (idx, seq) in self.sequences.iter().enumerate() {
            let bucket = buckets.entry(seq.checksum()).or_default();
            let existing = bucket
                .iter()
                .copied()
                .find(|&g| self.sequences[groups[g][0]].residues == seq.residues);
            match existing {
                Some(g) => groups[g].push(idx),
                None => {
                    bucket.push(groups.len());
                    groups.push(vec![idx]);
                }
            }
        }

        groups
    }
}
