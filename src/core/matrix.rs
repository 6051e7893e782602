// matrix.rs - Condensed symmetric distance matrix

use std::collections::HashMap;
use crate::error::{DistanceError, Result};

/// Number of entries in the strict upper triangle of an n x n matrix
#[inline]
pub fn condensed_len(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Position of (i, j), i < j, in the condensed upper triangle
#[inline]
pub fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i < j && j < n);
    i * n - i * (i + 1) / 2 + (j - i - 1)
}

/// Square symmetric matrix over sequence ids with a zero diagonal.
///
/// Only the upper triangle is stored, so `get(i, j) == get(j, i)` always
/// holds. `None` marks a pair that shared too few comparable sites.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    condensed: Vec<Option<f64>>,
    pub metric: String,
    pub gap_policy: String,
}

impl DistanceMatrix {
    /// Build from the upper triangle in row-major order
    pub fn from_condensed(ids: Vec<String>, condensed: Vec<Option<f64>>) -> Result<Self> {
        if ids.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        let expected = condensed_len(ids.len());
        if condensed.len() != expected {
            return Err(DistanceError::InvalidParameter(format!(
                "condensed matrix for {} ids needs {} values, got {}",
                ids.len(),
                expected,
                condensed.len()
            )));
        }
        if let Some(bad) = condensed.iter().flatten().find(|d| d.is_nan() || **d < 0.0) {
            return Err(DistanceError::InvalidParameter(format!(
                "distances must be non-negative, got {}",
                bad
            )));
        }
        let mut index = HashMap::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            if index.insert(id.clone(), i).is_some() {
                return Err(DistanceError::InvalidParameter(format!(
                    "duplicate sequence id '{}'",
                    id
                )));
            }
        }
        Ok(Self {
            ids,
            index,
            condensed,
            metric: String::from("p-distance"),
            gap_policy: String::from("pairwise"),
        })
    }

    pub fn with_labels(mut self, metric: &str, gap_policy: &str) -> Self {
        self.metric = metric.to_string();
        self.gap_policy = gap_policy.to_string();
        self
    }

    /// Number of sequences
    pub fn n(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Distance between rows `i` and `j`; the diagonal is always `Some(0.0)`
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => Some(0.0),
            std::cmp::Ordering::Less => self.condensed[condensed_index(self.n(), i, j)],
            std::cmp::Ordering::Greater => self.condensed[condensed_index(self.n(), j, i)],
        }
    }

    /// Distance by sequence id; `None` if either id is unknown or the pair is undefined
    pub fn get_by_id(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        self.get(i, j)
    }

    pub fn condensed(&self) -> &[Option<f64>] {
        &self.condensed
    }

    /// Number of undefined off-diagonal pairs
    pub fn undefined_pairs(&self) -> usize {
        self.condensed.iter().filter(|d| d.is_none()).count()
    }

    /// (min, mean, max) over defined off-diagonal pairs
    pub fn summary(&self) -> Option<(f64, f64, f64)> {
        let defined: Vec<f64> = self.condensed.iter().flatten().copied().collect();
        if defined.is_empty() {
            return None;
        }
        let min = defined.iter().copied().fold(f64::INFINITY, f64::min);
        let max = defined.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = defined.iter().sum::<f64>() / defined.len() as f64;
        Some((min, mean, max))
    }

    /// Closest other sequence for row `i` (lowest index on ties)
    pub fn nearest(&self, i: usize) -> Option<(usize, f64)> {
        (0..self.n())
            .filter(|&j| j != i)
            .filter_map(|j| self.get(i, j).map(|d| (j, d)))
            .fold(None, |best: Option<(usize, f64)>, (j, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((j, d)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("s{}", i)).collect()
    }

    #[test]
    fn test_condensed_index_layout() {
        // n = 4: (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
        assert_eq!(condensed_index(4, 0, 1), 0);
        assert_eq!(condensed_index(4, 0, 3), 2);
        assert_eq!(condensed_index(4, 1, 2), 3);
        assert_eq!(condensed_index(4, 2, 3), 5);
        assert_eq!(condensed_len(4), 6);
        assert_eq!(condensed_len(1), 0);
        assert_eq!(condensed_len(0), 0);
    }

    #[test]
    fn test_symmetric_access() {
        let values = vec![Some(0.1), Some(0.2), None, Some(0.3), Some(0.4), Some(0.5)];
        let m = DistanceMatrix::from_condensed(ids(4), values).unwrap();
        for i in 0..4 {
            assert_eq!(m.get(i, i), Some(0.0));
            for j in 0..4 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
        assert_eq!(m.get(3, 0), None);
        assert_eq!(m.get_by_id("s2", "s1"), Some(0.3));
        assert_eq!(m.get_by_id("s2", "missing"), None);
        assert_eq!(m.undefined_pairs(), 1);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(
            DistanceMatrix::from_condensed(Vec::new(), Vec::new()),
            Err(DistanceError::EmptyInput)
        );
        assert!(DistanceMatrix::from_condensed(ids(3), vec![Some(0.1)]).is_err());
        assert!(DistanceMatrix::from_condensed(ids(2), vec![Some(-0.1)]).is_err());
        assert!(DistanceMatrix::from_condensed(ids(2), vec![Some(f64::NAN)]).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let ids = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert!(matches!(
            DistanceMatrix::from_condensed(ids, vec![Some(0.1), Some(0.2), Some(0.3)]),
            Err(DistanceError::InvalidParameter(msg)) if msg.contains("'a'")
        ));
    }

    #[test]
    fn test_summary_and_nearest() {
        let values = vec![Some(0.4), Some(0.1), Some(0.2)];
        let m = DistanceMatrix::from_condensed(ids(3), values).unwrap();
        let (min, mean, max) = m.summary().unwrap();
        assert_eq!(min, 0.1);
        assert_eq!(max, 0.4);
        assert!((mean - 0.7 / 3.0).abs() < 1e-12);
        assert_eq!(m.nearest(0), Some((2, 0.1)));
        assert_eq!(m.nearest(1), Some((2, 0.2)));
    }
}
