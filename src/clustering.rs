//! Distribution center selection by k-medoids over hospital locations.
//!
//! Alternating (Voronoi iteration) k-medoids with the "heuristic"
//! initialisation: the `k` hospitals with the smallest total distance to all
//! others. The result is fully deterministic for a given input order.

use tracing::debug;

use crate::euclidean::EuclideanMatrix;
use crate::scenario::Site;
use crate::traits::Center;

const DEFAULT_MAX_ITERATIONS: usize = 300;

#[derive(Debug, Clone)]
pub struct KMedoids {
    pub n_clusters: usize,
    pub max_iterations: usize,
}

/// Selected centers plus the cluster label of every input hospital.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterSelection {
    pub centers: Vec<Site>,
    /// Input indices of the medoids, ascending.
    pub medoid_indices: Vec<usize>,
    /// `labels[h]` is the position in `centers` of hospital `h`'s medoid.
    pub labels: Vec<usize>,
}

impl KMedoids {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Pick `n_clusters` hospitals as distribution centers. Asking for more
    /// clusters than hospitals selects every hospital.
    pub fn select_distribution_centers(&self, hospitals: &[Site]) -> CenterSelection {
        let n = hospitals.len();
        let k = self.n_clusters.min(n);
        if k == 0 {
            return CenterSelection {
                centers: Vec::new(),
                medoid_indices: Vec::new(),
                labels: Vec::new(),
            };
        }

        let dist: Vec<Vec<f64>> = hospitals
            .iter()
            .map(|a| {
                hospitals
                    .iter()
                    .map(|b| EuclideanMatrix::distance(a.location(), b.location()))
                    .collect()
            })
            .collect();

        let mut medoids = heuristic_init(&dist, k);
        let mut labels = assign(&dist, &medoids);
        let mut iterations = 0;

        while iterations < self.max_iterations {
            iterations += 1;
            let mut next = medoids.clone();
            for (cluster, medoid) in next.iter_mut().enumerate() {
                let members: Vec<usize> = (0..n).filter(|&h| labels[h] == cluster).collect();
                let cost = |candidate: usize| -> f64 { members.iter().map(|&m| dist[candidate][m]).sum() };
                let mut best = *medoid;
                let mut best_cost = cost(best);
                for &candidate in &members {
                    let candidate_cost = cost(candidate);
                    if candidate_cost < best_cost - 1e-12 {
                        best = candidate;
                        best_cost = candidate_cost;
                    }
                }
                *medoid = best;
            }

            if next == medoids {
                break;
            }
            medoids = next;
            labels = assign(&dist, &medoids);
        }

        // Report medoids in input order and relabel to match.
        let mut order: Vec<usize> = (0..k).collect();
        order.sort_by_key(|&cluster| medoids[cluster]);
        let mut position = vec![0; k];
        for (pos, &cluster) in order.iter().enumerate() {
            position[cluster] = pos;
        }
        let medoid_indices: Vec<usize> = order.iter().map(|&cluster| medoids[cluster]).collect();
        let labels = labels.into_iter().map(|cluster| position[cluster]).collect();
        let centers = medoid_indices.iter().map(|&h| hospitals[h].clone()).collect();

        debug!(hospitals = n, clusters = k, iterations, "selected distribution centers");

        CenterSelection {
            centers,
            medoid_indices,
            labels,
        }
    }
}

/// The `k` points with the smallest total distance to all other points.
fn heuristic_init(dist: &[Vec<f64>], k: usize) -> Vec<usize> {
    let mut totals: Vec<(f64, usize)> = dist
        .iter()
        .enumerate()
        .map(|(i, row)| (row.iter().sum(), i))
        .collect();
    totals.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    totals.into_iter().take(k).map(|(_, i)| i).collect()
}

/// Label every point with the cluster of its nearest medoid.
fn assign(dist: &[Vec<f64>], medoids: &[usize]) -> Vec<usize> {
    dist.iter()
        .map(|row| {
            let mut best = 0;
            for cluster in 1..medoids.len() {
                if row[medoids[cluster]] < row[medoids[best]] {
                    best = cluster;
                }
            }
            best
        })
        .collect()
}
