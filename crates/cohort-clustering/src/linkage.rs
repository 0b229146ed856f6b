//! Ward hierarchical linkage.
//!
//! Builds the full agglomerative merge tree over the standardized features.
//! Cluster references use the linkage-matrix convention: ids `0..n` are the
//! original observations and the cluster created by step `i` gets id `n + i`.
//!
//! The merge cost between clusters `a` and `b` is the Ward distance
//!
//! d(a, b) = sqrt(2 * |a| * |b| / (|a| + |b|)) * ||c_a - c_b||
//!
//! which is the square root of twice the increase in total within-cluster
//! sum of squares caused by the merge. For singletons it reduces to the plain
//! Euclidean distance, so heights are directly comparable to a dendrogram
//! drawn from a standard linkage matrix.
use std::cmp::Ordering;

use serde::Serialize;

use crate::error::ClusteringError;
use crate::math::Array2;

/// One agglomeration step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MergeStep {
    /// Smaller of the two merged cluster ids.
    pub left: usize,
    pub right: usize,
    /// Ward distance between the two clusters at the time of merging.
    pub distance: f64,
    /// Number of observations in the merged cluster.
    pub size: usize,
}

/// Complete merge history for `n` observations (`n - 1` steps).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkageTree {
    n_observations: usize,
    steps: Vec<MergeStep>,
}

/// One U-shaped dendrogram link in plotting coordinates.
///
/// Leaves sit at x = 5, 15, 25, ... in [`LinkageTree::leaf_order`] order and
/// y is the merge height.
#[derive(Debug, Clone, PartialEq)]
pub struct DendrogramLink {
    pub xs: [f64; 4],
    pub ys: [f64; 4],
    /// Topmost ancestor (by id) whose height is below the colour threshold,
    /// `None` when the link itself is at or above it.
    pub color_group: Option<usize>,
}

struct ActiveCluster {
    id: usize,
    size: usize,
    /// Lowest original observation index among the members.
    min_index: usize,
    centroid: Vec<f64>,
}

impl ActiveCluster {
    fn ward_distance(&self, other: &ActiveCluster) -> f64 {
        let sq: f64 = self
            .centroid
            .iter()
            .zip(&other.centroid)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        let (na, nb) = (self.size as f64, other.size as f64);
        (2.0 * na * nb / (na + nb) * sq).sqrt()
    }

    fn tie_key(&self, other: &ActiveCluster) -> (usize, usize) {
        if self.min_index < other.min_index {
            (self.min_index, other.min_index)
        } else {
            (other.min_index, self.min_index)
        }
    }
}

/// Build the Ward linkage tree for the rows of `x`.
///
/// Exact ties on distance go to the pair whose sorted lowest member indices
/// compare smaller, which makes the output depend only on row order.
pub fn build_ward_linkage(x: &Array2<f64>) -> Result<LinkageTree, ClusteringError> {
    let n = x.nrows();
    if n < 2 {
        return Err(ClusteringError::InsufficientData {
            required: 2,
            available: n,
        });
    }

    let mut active: Vec<ActiveCluster> = (0..n)
        .map(|i| ActiveCluster {
            id: i,
            size: 1,
            min_index: i,
            centroid: x.row_slice(i).to_vec(),
        })
        .collect();
    let mut steps = Vec::with_capacity(n - 1);

    while active.len() > 1 {
        let mut best: Option<(usize, usize, f64, (usize, usize))> = None;
        for a in 0..active.len() {
            for b in (a + 1)..active.len() {
                let d = active[a].ward_distance(&active[b]);
                let key = active[a].tie_key(&active[b]);
                let better = match best {
                    None => true,
                    Some((_, _, best_d, best_key)) => match d.partial_cmp(&best_d) {
                        Some(Ordering::Less) => true,
                        Some(Ordering::Equal) => key < best_key,
                        _ => false,
                    },
                };
                if better {
                    best = Some((a, b, d, key));
                }
            }
        }

        let (a, b, distance, _) = match best {
            Some(found) => found,
            None => break,
        };
        // b > a, so removing b first keeps a's position valid.
        let second = active.remove(b);
        let first = active.remove(a);

        let size = first.size + second.size;
        let (wa, wb) = (first.size as f64 / size as f64, second.size as f64 / size as f64);
        let centroid = first
            .centroid
            .iter()
            .zip(&second.centroid)
            .map(|(ca, cb)| wa * ca + wb * cb)
            .collect();

        let step = MergeStep {
            left: first.id.min(second.id),
            right: first.id.max(second.id),
            distance,
            size,
        };
        log::trace!(
            "Ward step {}: {} + {} at {:.4} (size {})",
            steps.len(),
            step.left,
            step.right,
            step.distance,
            step.size
        );
        active.push(ActiveCluster {
            id: n + steps.len(),
            size,
            min_index: first.min_index.min(second.min_index),
            centroid,
        });
        steps.push(step);
    }

    Ok(LinkageTree {
        n_observations: n,
        steps,
    })
}

impl LinkageTree {
    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    pub fn steps(&self) -> &[MergeStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn max_distance(&self) -> f64 {
        self.steps.iter().map(|s| s.distance).fold(0.0, f64::max)
    }

    /// Height used to colour dendrogram branches: `ratio * max_distance`.
    pub fn cut_threshold(&self, ratio: f64) -> f64 {
        ratio * self.max_distance()
    }

    /// Flat assignment with exactly `k` clusters.
    ///
    /// Replays the first `n - k` merges. Cluster indices are numbered by
    /// first appearance in observation order.
    pub fn cut(&self, k: usize) -> Result<Vec<usize>, ClusteringError> {
        let n = self.n_observations;
        if k == 0 {
            return Err(ClusteringError::InvalidClusterCount(k));
        }
        if k > n {
            return Err(ClusteringError::InsufficientData {
                required: k,
                available: n,
            });
        }

        let mut members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
        let mut merged = vec![false; 2 * n - 1];
        for step in &self.steps[..n - k] {
            let mut joined = std::mem::take(&mut members[step.left]);
            joined.append(&mut members[step.right]);
            merged[step.left] = true;
            merged[step.right] = true;
            members.push(joined);
        }

        let mut raw = vec![0usize; n];
        for (node, group) in members.iter().enumerate() {
            if merged[node] {
                continue;
            }
            for &obs in group {
                raw[obs] = node;
            }
        }

        let mut relabel: Vec<Option<usize>> = vec![None; members.len()];
        let mut next = 0;
        let labels = raw
            .iter()
            .map(|&node| {
                *relabel[node].get_or_insert_with(|| {
                    next += 1;
                    next - 1
                })
            })
            .collect();
        Ok(labels)
    }

    /// Left-to-right leaf order of the dendrogram.
    pub fn leaf_order(&self) -> Vec<usize> {
        let n = self.n_observations;
        if self.steps.is_empty() {
            return (0..n).collect();
        }
        let mut order = Vec::with_capacity(n);
        let mut stack = vec![n + self.steps.len() - 1];
        while let Some(node) = stack.pop() {
            if node < n {
                order.push(node);
            } else {
                let step = &self.steps[node - n];
                stack.push(step.right);
                stack.push(step.left);
            }
        }
        order
    }

    /// Dendrogram links in step order, coloured against `threshold`.
    pub fn dendrogram_links(&self, threshold: f64) -> Vec<DendrogramLink> {
        let n = self.n_observations;
        let total = n + self.steps.len();

        let mut x_pos = vec![0.0; total];
        for (slot, leaf) in self.leaf_order().into_iter().enumerate() {
            x_pos[leaf] = 5.0 + 10.0 * slot as f64;
        }
        let mut height = vec![0.0; total];
        for (i, step) in self.steps.iter().enumerate() {
            x_pos[n + i] = (x_pos[step.left] + x_pos[step.right]) / 2.0;
            height[n + i] = step.distance;
        }

        let mut parent: Vec<Option<usize>> = vec![None; total];
        for (i, step) in self.steps.iter().enumerate() {
            parent[step.left] = Some(n + i);
            parent[step.right] = Some(n + i);
        }
        let mut group: Vec<Option<usize>> = vec![None; total];
        for i in (0..self.steps.len()).rev() {
            let node = n + i;
            if self.steps[i].distance >= threshold {
                continue;
            }
            group[node] = match parent[node].and_then(|p| group[p]) {
                Some(g) => Some(g),
                None => Some(node),
            };
        }

        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| DendrogramLink {
                xs: [
                    x_pos[step.left],
                    x_pos[step.left],
                    x_pos[step.right],
                    x_pos[step.right],
                ],
                ys: [height[step.left], step.distance, step.distance, height[step.right]],
                color_group: group[n + i],
            })
            .collect()
    }
}
