//! Converts the allocator's raw pairs into the externally visible result.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::flow::FlowAllocation;
use crate::traits::{Center, DistanceMatrix, Recipient};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub center_id: u32,
    /// Slot within the center, `0..capacity`. Slots are interchangeable.
    pub slot_index: usize,
    pub recipient_id: u32,
    pub priority: u8,
    pub distance: f64,
    pub reward: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub objective_value: f64,
    pub assignments: Vec<Assignment>,
    pub total_vaccinated: usize,
}

impl AllocationResult {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignments routed through `center_id`.
    pub fn for_center(&self, center_id: u32) -> impl Iterator<Item = &Assignment> {
        self.assignments
            .iter()
            .filter(move |assignment| assignment.center_id == center_id)
    }
}

/// Build the result record for `allocation`.
///
/// `rewards` is the table the graph was built from; the summed rewards are
/// checked against the allocator's own objective.
pub fn extract<R, C>(
    allocation: &FlowAllocation,
    recipients: &[R],
    centers: &[C],
    distances: &DistanceMatrix,
    rewards: &[Vec<f64>],
) -> AllocationResult
where
    R: Recipient,
    C: Center,
{
    let mut next_slot = vec![0usize; centers.len()];
    let mut assignments = Vec::with_capacity(allocation.len());

    for &(r, c) in &allocation.pairs {
        let recipient = &recipients[r];
        let slot_index = next_slot[c];
        next_slot[c] += 1;

        assignments.push(Assignment {
            center_id: centers[c].id(),
            slot_index,
            recipient_id: recipient.id(),
            priority: recipient.priority(),
            distance: distances[r][c],
            reward: rewards[r][c],
        });
    }

    // An empty sum is -0.0.
    let objective_value = assignments.iter().map(|a| a.reward).sum::<f64>() + 0.0;
    let tolerance = 1e-6 * objective_value.abs().max(1.0);
    if (objective_value - allocation.objective).abs() > tolerance {
        warn!(
            extracted = objective_value,
            allocator = allocation.objective,
            "objective mismatch between allocator and extracted assignments"
        );
    }
    debug_assert!((objective_value - allocation.objective).abs() <= tolerance);

    AllocationResult {
        objective_value,
        total_vaccinated: assignments.len(),
        assignments,
    }
}
