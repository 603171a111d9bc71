//! Euclidean distance matrix provider.
//!
//! Straight-line distance on the planning plane, in the same units as the
//! coordinates.

use rayon::prelude::*;

use crate::traits::{Center, DistanceMatrix, DistanceMatrixProvider, Recipient};

/// Euclidean recipient-to-center distances.
///
/// Rows are computed in parallel once the recipient count reaches
/// `parallel_threshold`.
#[derive(Debug, Clone)]
pub struct EuclideanMatrix {
    pub parallel_threshold: usize,
}

impl Default for EuclideanMatrix {
    fn default() -> Self {
        Self {
            parallel_threshold: 1024,
        }
    }
}

impl EuclideanMatrix {
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    pub fn distance(from: (f64, f64), to: (f64, f64)) -> f64 {
        (from.0 - to.0).hypot(from.1 - to.1)
    }
}

impl DistanceMatrixProvider for EuclideanMatrix {
    fn matrix_for<R, C>(&self, recipients: &[R], centers: &[C]) -> DistanceMatrix
    where
        R: Recipient,
        C: Center,
    {
        let locations: Vec<(f64, f64)> = centers.iter().map(|center| center.location()).collect();
        let row = |from: (f64, f64)| -> Vec<f64> {
            locations.iter().map(|&to| Self::distance(from, to)).collect()
        };

        let origins: Vec<(f64, f64)> = recipients.iter().map(|recipient| recipient.location()).collect();
        if origins.len() >= self.parallel_threshold {
            origins.par_iter().map(|&from| row(from)).collect()
        } else {
            origins.iter().map(|&from| row(from)).collect()
        }
    }
}
