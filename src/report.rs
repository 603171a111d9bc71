//! Per-policy summaries of allocation results: totals, priority histogram
//! and travel distance statistics.

use serde::{Deserialize, Serialize};

use crate::extract::AllocationResult;
use crate::reward::Policy;
use crate::scenario::{MAX_PRIORITY, MIN_PRIORITY};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceSummary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySummary {
    pub policy: Policy,
    pub objective_value: f64,
    pub total_vaccinated: usize,
    /// Vaccinated count per priority level, lowest level first.
    pub by_priority: Vec<usize>,
    /// `None` when nobody was vaccinated.
    pub distance: Option<DistanceSummary>,
}

impl PolicySummary {
    pub fn from_result(policy: Policy, result: &AllocationResult) -> Self {
        let levels = usize::from(MAX_PRIORITY - MIN_PRIORITY) + 1;
        let mut by_priority = vec![0; levels];
        for assignment in &result.assignments {
            let level = assignment.priority.clamp(MIN_PRIORITY, MAX_PRIORITY) - MIN_PRIORITY;
            by_priority[usize::from(level)] += 1;
        }

        let distance = if result.assignments.is_empty() {
            None
        } else {
            let distances = result.assignments.iter().map(|a| a.distance);
            let min = distances.clone().fold(f64::INFINITY, f64::min);
            let max = distances.clone().fold(f64::NEG_INFINITY, f64::max);
            let mean = distances.sum::<f64>() / result.assignments.len() as f64;
            Some(DistanceSummary { min, mean, max })
        };

        Self {
            policy,
            objective_value: result.objective_value,
            total_vaccinated: result.total_vaccinated,
            by_priority,
            distance,
        }
    }
}

/// Summaries for a batch of policy runs, in the order given.
pub fn summarize<'a, I>(results: I) -> Vec<PolicySummary>
where
    I: IntoIterator<Item = (Policy, &'a AllocationResult)>,
{
    results
        .into_iter()
        .map(|(policy, result)| PolicySummary::from_result(policy, result))
        .collect()
}
