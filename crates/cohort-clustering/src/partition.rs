//! Flat partitioning of the Ward hierarchy.
use crate::error::ClusteringError;
use crate::linkage::{build_ward_linkage, LinkageTree};
use crate::math::Array2;

/// Number of student groups. Fixed: the labeling rule has exactly four quadrants.
pub const N_CLUSTERS: usize = 4;

/// Assign every row of `x` to one of `k` clusters using Ward linkage on
/// Euclidean distance.
///
/// The returned indices are in `0..k`, each of them used at least once, and
/// numbered by first appearance in row order.
pub fn cut(x: &Array2<f64>, k: usize) -> Result<Vec<usize>, ClusteringError> {
    validate(x.nrows(), k)?;
    let tree = build_ward_linkage(x)?;
    tree.cut(k)
}

/// Same as [`cut`] but reuses an already built tree.
pub fn cut_tree(tree: &LinkageTree, k: usize) -> Result<Vec<usize>, ClusteringError> {
    validate(tree.n_observations(), k)?;
    tree.cut(k)
}

fn validate(n: usize, k: usize) -> Result<(), ClusteringError> {
    if k == 0 {
        return Err(ClusteringError::InvalidClusterCount(k));
    }
    if n < k.max(2) {
        return Err(ClusteringError::InsufficientData {
            required: k.max(2),
            available: n,
        });
    }
    Ok(())
}

/// Member row indices per cluster, in row order.
pub fn members_by_cluster(assignment: &[usize], k: usize) -> Vec<Vec<usize>> {
    let mut groups = vec![Vec::new(); k];
    for (row, &cluster) in assignment.iter().enumerate() {
        groups[cluster].push(row);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_rows_cannot_make_four_groups() {
        let x = Array2::from_rows(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
        assert_eq!(
            cut(&x, N_CLUSTERS).unwrap_err(),
            ClusteringError::InsufficientData {
                required: 4,
                available: 3
            }
        );
    }

    #[test]
    fn zero_clusters_is_invalid() {
        let x = Array2::from_rows(&[[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(cut(&x, 0).unwrap_err(), ClusteringError::InvalidClusterCount(0));
    }

    #[test]
    fn four_rows_are_four_singletons() {
        let x = Array2::from_rows(&[[0.0, 0.0], [1.0, 1.0], [2.0, 5.0], [3.0, 0.0]]);
        assert_eq!(cut(&x, 4).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn members_are_grouped() {
        let groups = members_by_cluster(&[0, 1, 0, 2], 3);
        assert_eq!(groups, vec![vec![0, 2], vec![1], vec![3]]);
    }
}
