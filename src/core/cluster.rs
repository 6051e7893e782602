// cluster.rs - Agglomerative clustering over a distance matrix

use std::collections::HashMap;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::core::matrix::DistanceMatrix;
use crate::error::{DistanceError, Result};

/// How the distance between two merged clusters is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    Single,
    Complete,
    /// UPGMA
    #[default]
    Average,
}

impl FromStr for Linkage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "nearest" => Ok(Linkage::Single),
            "complete" | "farthest" => Ok(Linkage::Complete),
            "average" | "upgma" => Ok(Linkage::Average),
            _ => Err(format!("Invalid linkage: {}. Use: single, complete, average", s)),
        }
    }
}

impl Linkage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Linkage::Single => "single",
            Linkage::Complete => "complete",
            Linkage::Average => "average",
        }
    }

    fn combine(&self, d_i: f64, size_i: usize, d_j: f64, size_j: usize) -> f64 {
        match self {
            Linkage::Single => d_i.min(d_j),
            Linkage::Complete => d_i.max(d_j),
            Linkage::Average => {
                (d_i * size_i as f64 + d_j * size_j as f64) / (size_i + size_j) as f64
            }
        }
    }
}

/// Where to stop merging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClusterCut {
    /// Merge while the closest pair is at most this far apart
    Threshold(f64),
    /// Merge until this many clusters remain
    Count(usize),
}

/// Cluster label (1-based) for every sequence, in matrix order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterAssignment {
    pub labels: Vec<(String, usize)>,
    pub n_clusters: usize,
}

impl ClusterAssignment {
    pub fn label_of(&self, id: &str) -> Option<usize> {
        self.labels.iter().find(|(s, _)| s == id).map(|(_, l)| *l)
    }

    pub fn members(&self, label: usize) -> Vec<&str> {
        self.labels
            .iter()
            .filter(|(_, l)| *l == label)
            .map(|(s, _)| s.as_str())
            .collect()
    }

    /// Cluster sizes indexed by label - 1
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_clusters];
        for (_, label) in &self.labels {
            sizes[label - 1] += 1;
        }
        sizes
    }
}

/// Cluster the rows of `matrix`.
///
/// Undefined distances count as infinitely far. Ties go to the lowest
/// (i, j) pair of active clusters, and labels are numbered by the first
/// sequence of each cluster in matrix order.
pub fn cluster(matrix: &DistanceMatrix, linkage: Linkage, cut: ClusterCut) -> Result<ClusterAssignment> {
    let n = matrix.n();
    if n == 0 {
        return Err(DistanceError::EmptyInput);
    }
    match cut {
        ClusterCut::Threshold(t) if t.is_nan() || t < 0.0 => {
            return Err(DistanceError::InvalidParameter(format!(
                "cluster threshold must be a non-negative number, got {}",
                t
            )));
        }
        ClusterCut::Count(k) if k == 0 || k > n => {
            return Err(DistanceError::InvalidParameter(format!(
                "cluster count must be between 1 and {}, got {}",
                n, k
            )));
        }
        _ => {}
    }

    // Expand to a working matrix; active clusters stay ordered by first member
    let mut dist: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| matrix.get(i, j).unwrap_or(f64::INFINITY))
                .collect()
        })
        .collect();
    let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();

    while members.len() > 1 {
        if let ClusterCut::Count(k) = cut {
            if members.len() <= k {
                break;
            }
        }

        let n_active = members.len();
        let (mut min_i, mut min_j) = (0, 1);
        let mut min_dist = dist[0][1];
        for i in 0..n_active {
            for j in (i + 1)..n_active {
                if dist[i][j] < min_dist {
                    min_dist = dist[i][j];
                    min_i = i;
                    min_j = j;
                }
            }
        }

        if let ClusterCut::Threshold(t) = cut {
            if min_dist > t {
                break;
            }
        }

        let size_i = members[min_i].len();
        let size_j = members[min_j].len();
        for k in 0..n_active {
            if k == min_i || k == min_j {
                continue;
            }
            let d_new = linkage.combine(dist[min_i][k], size_i, dist[min_j][k], size_j);
            dist[min_i][k] = d_new;
            dist[k][min_i] = d_new;
        }

        let merged = members.remove(min_j);
        members[min_i].extend(merged);
        dist.remove(min_j);
        for row in dist.iter_mut() {
            row.remove(min_j);
        }
    }

    let mut cluster_of = vec![0usize; n];
    for (c, group) in members.iter().enumerate() {
        for &m in group {
            cluster_of[m] = c;
        }
    }

    let mut label_for: HashMap<usize, usize> = HashMap::new();
    let labels = matrix
        .ids()
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let next = label_for.len() + 1;
            let label = *label_for.entry(cluster_of[i]).or_insert(next);
            (id.clone(), label)
        })
        .collect();

    Ok(ClusterAssignment {
        labels,
        n_clusters: members.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(ids: &[&str], condensed: Vec<Option<f64>>) -> DistanceMatrix {
        DistanceMatrix::from_condensed(ids.iter().map(|s| s.to_string()).collect(), condensed).unwrap()
    }

    /// Points at 0, 1 and 2.1 on a line
    fn line() -> DistanceMatrix {
        matrix(&["a", "b", "c"], vec![Some(1.0), Some(2.1), Some(1.1)])
    }

    #[test]
    fn test_identical_sequences_share_label() {
        let m = matrix(&["a", "b", "c"], vec![Some(0.0), Some(0.5), Some(0.5)]);
        let result = cluster(&m, Linkage::Average, ClusterCut::Threshold(0.0)).unwrap();
        assert_eq!(result.n_clusters, 2);
        assert_eq!(result.label_of("a"), result.label_of("b"));
        assert_eq!(result.label_of("c"), Some(2));
    }

    #[test]
    fn test_zero_threshold_gives_singletons() {
        let result = cluster(&line(), Linkage::Single, ClusterCut::Threshold(0.0)).unwrap();
        assert_eq!(result.n_clusters, 3);
        assert_eq!(result.sizes(), vec![1, 1, 1]);
    }

    #[test]
    fn test_count_one_gives_single_cluster() {
        for linkage in [Linkage::Single, Linkage::Complete, Linkage::Average] {
            let result = cluster(&line(), linkage, ClusterCut::Count(1)).unwrap();
            assert_eq!(result.n_clusters, 1);
            assert_eq!(result.members(1), vec!["a", "b", "c"]);
        }
    }

    #[test]
    fn test_linkages_differ_at_threshold() {
        let cut = ClusterCut::Threshold(1.5);
        assert_eq!(cluster(&line(), Linkage::Single, cut).unwrap().n_clusters, 1);
        assert_eq!(cluster(&line(), Linkage::Complete, cut).unwrap().n_clusters, 2);
        // (2.1 + 1.1) / 2 = 1.6
        assert_eq!(cluster(&line(), Linkage::Average, cut).unwrap().n_clusters, 2);
    }

    #[test]
    fn test_labels_follow_first_appearance() {
        let m = matrix(
            &["x", "y", "z", "w"],
            vec![Some(0.9), Some(0.9), Some(0.1), Some(0.9), Some(0.9), Some(0.9)],
        );
        let result = cluster(&m, Linkage::Average, ClusterCut::Count(3)).unwrap();
        let labels: Vec<usize> = result.labels.iter().map(|(_, l)| *l).collect();
        assert_eq!(labels, vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_undefined_distance_never_merged_by_threshold() {
        let m = matrix(&["a", "b"], vec![None]);
        let result = cluster(&m, Linkage::Single, ClusterCut::Threshold(10.0)).unwrap();
        assert_eq!(result.n_clusters, 2);
        let result = cluster(&m, Linkage::Single, ClusterCut::Count(1)).unwrap();
        assert_eq!(result.n_clusters, 1);
    }

    #[test]
    fn test_tie_breaks_on_lowest_pair() {
        let m = matrix(&["a", "b", "c"], vec![Some(0.5), Some(0.5), Some(0.5)]);
        let result = cluster(&m, Linkage::Single, ClusterCut::Count(2)).unwrap();
        assert_eq!(result.members(1), vec!["a", "b"]);
        assert_eq!(result.members(2), vec!["c"]);
    }

    #[test]
    fn test_invalid_cuts() {
        assert!(matches!(
            cluster(&line(), Linkage::Average, ClusterCut::Count(0)),
            Err(DistanceError::InvalidParameter(_))
        ));
        assert!(matches!(
            cluster(&line(), Linkage::Average, ClusterCut::Count(4)),
            Err(DistanceError::InvalidParameter(_))
        ));
        assert!(matches!(
            cluster(&line(), Linkage::Average, ClusterCut::Threshold(f64::NAN)),
            Err(DistanceError::InvalidParameter(_))
        ));
        assert!(matches!(
            cluster(&line(), Linkage::Average, ClusterCut::Threshold(-1.0)),
            Err(DistanceError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_linkage_from_str() {
        assert_eq!("UPGMA".parse::<Linkage>(), Ok(Linkage::Average));
        assert_eq!("single".parse::<Linkage>(), Ok(Linkage::Single));
        assert!("ward".parse::<Linkage>().is_err());
    }
}
