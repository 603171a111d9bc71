//! Allocation pipeline: rewards, graph, max-profit flow, result.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::config::ScenarioConfig;
use crate::error::ConfigurationError;
use crate::extract::{AllocationResult, extract};
use crate::flow::allocate;
use crate::graph::{AllocationGraph, check_distances};
use crate::reward::{Policy, PolicyParameters, reward_table};
use crate::traits::{Center, DistanceMatrix, Recipient};

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Precompute the reward table with rayon. Results are identical either way.
    pub parallel_rewards: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            parallel_rewards: true,
        }
    }
}

/// Result of one policy in a [`solve_all`] batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRun {
    pub policy: Policy,
    pub result: AllocationResult,
}

/// Compute the reward-maximizing allocation for one policy.
///
/// All validation happens before any allocation work; once it passes the
/// solve always produces a result, possibly empty.
pub fn solve<R, C>(
    recipients: &[R],
    centers: &[C],
    distances: &DistanceMatrix,
    config: &ScenarioConfig,
    options: &SolveOptions,
) -> Result<AllocationResult, ConfigurationError>
where
    R: Recipient + Sync,
    C: Center,
{
    let span = info_span!("solve", policy = %config.policy, supply = config.supply);
    let _enter = span.enter();

    let params = config.parameters()?;
    check_distances(recipients, centers, distances)?;

    let rewards = reward_table(
        recipients,
        distances,
        config.policy,
        &params,
        options.parallel_rewards,
    );
    debug!(pairs = recipients.len() * centers.len(), "computed rewards");

    let graph = AllocationGraph::build(recipients, centers, config.supply, |r, c| rewards[r][c])?;
    let allocation = allocate(graph);
    let result = extract(&allocation, recipients, centers, distances, &rewards);

    info!(
        vaccinated = result.total_vaccinated,
        objective = result.objective_value,
        "solved"
    );

    Ok(result)
}

/// Run every policy against the same inputs. The runs share nothing but
/// read-only data, so they execute in parallel.
pub fn solve_all<R, C>(
    recipients: &[R],
    centers: &[C],
    distances: &DistanceMatrix,
    params: PolicyParameters,
    supply: i64,
    options: &SolveOptions,
) -> Result<Vec<PolicyRun>, ConfigurationError>
where
    R: Recipient + Sync,
    C: Center + Sync,
{
    Policy::ALL
        .par_iter()
        .map(|&policy| {
            let config = ScenarioConfig::new(policy, params, supply);
            solve(recipients, centers, distances, &config, options)
                .map(|result| PolicyRun { policy, result })
        })
        .collect()
}
