// conservation.rs - Per-column conservation profile

use crate::data::{Alignment, GAP};
use crate::error::Result;

/// The 20 standard amino acids; anything else is scored as a gap
pub const STANDARD_AMINO_ACIDS: &[u8; 20] = b"ACDEFGHIKLMNPQRSTVWY";

/// Positions reported by default (1-based)
pub const DEFAULT_KEY_RESIDUES: &[usize] = &[285, 417, 447];

/// Columns scoring above this are highly conserved
pub const DEFAULT_CONSERVED_THRESHOLD: f64 = 0.95;

fn normalize_residue(residue: u8) -> u8 {
    if STANDARD_AMINO_ACIDS.contains(&residue) {
        residue
    } else {
        GAP
    }
}

/// Highest relative frequency of a single symbol in each column.
///
/// Gaps count as a symbol, so an all-gap column scores 1.0.
pub fn conservation_scores(alignment: &Alignment) -> Result<Vec<f64>> {
    let width = alignment.check_shape()?;
    let n = alignment.len() as f64;

    let scores = (0..width)
        .map(|col| {
            let mut counts = [0usize; 256];
            for residue in alignment.column(col) {
                counts[normalize_residue(residue) as usize] += 1;
            }
            let top = counts.iter().copied().max().unwrap_or(0);
            top as f64 / n
        })
        .collect();

    Ok(scores)
}

/// 1-based positions scoring strictly above `threshold`
pub fn highly_conserved(profile: &[f64], threshold: f64) -> Vec<(usize, f64)> {
    profile
        .iter()
        .enumerate()
        .filter(|(_, &score)| score > threshold)
        .map(|(i, &score)| (i + 1, score))
        .collect()
}

/// Scores at the given 1-based positions; 0 and positions past the end are skipped
pub fn key_residues(profile: &[f64], positions: &[usize]) -> Vec<(usize, f64)> {
    positions
        .iter()
        .filter(|&&pos| pos >= 1 && pos <= profile.len())
        .map(|&pos| (pos, profile[pos - 1]))
        .collect()
}

/// Mean score over the profile
pub fn mean_conservation(profile: &[f64]) -> Option<f64> {
    if profile.is_empty() {
        None
    } else {
        Some(profile.iter().sum::<f64>() / profile.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Sequence;
    use crate::error::DistanceError;

    fn aln(rows: &[&[u8]]) -> Alignment {
        Alignment::new(
            rows.iter()
                .enumerate()
                .map(|(i, r)| Sequence::new(format!("s{}", i), r))
                .collect(),
        )
    }

    #[test]
    fn test_identical_column_scores_one() {
        let scores = conservation_scores(&aln(&[b"ACD", b"ACE", b"AGF", b"ACW"])).unwrap();
        assert_eq!(scores[0], 1.0);
        assert_eq!(scores[1], 0.75);
        assert_eq!(scores[2], 0.25);
    }

    #[test]
    fn test_non_standard_residues_count_as_gaps() {
        // X, B and '.' all collapse to '-'
        let scores = conservation_scores(&aln(&[b"X", b"B", b".", b"A"])).unwrap();
        assert_eq!(scores, vec![0.75]);
    }

    #[test]
    fn test_errors_propagate() {
        assert_eq!(conservation_scores(&Alignment::default()), Err(DistanceError::EmptyInput));
        assert!(matches!(
            conservation_scores(&aln(&[b"AC", b"A"])),
            Err(DistanceError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_highly_conserved_is_strict_and_one_based() {
        let profile = [1.0, 0.95, 0.96, 0.5];
        assert_eq!(highly_conserved(&profile, 0.95), vec![(1, 1.0), (3, 0.96)]);
    }

    #[test]
    fn test_key_residues_skip_out_of_range() {
        let profile = [0.1, 0.2, 0.3];
        assert_eq!(key_residues(&profile, &[0, 1, 3, 4]), vec![(1, 0.1), (3, 0.3)]);
        assert!(key_residues(&profile, DEFAULT_KEY_RESIDUES).is_empty());
    }

    #[test]
    fn test_mean_conservation() {
        assert_eq!(mean_conservation(&[]), None);
        assert_eq!(mean_conservation(&[1.0, 0.5]), Some(0.75));
    }
}
