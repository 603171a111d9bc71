//! End-to-end synthetic run: generate data, select centers, compute
//! distances, then solve every policy.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clustering::KMedoids;
use crate::config::RunConfig;
use crate::error::ConfigurationError;
use crate::euclidean::EuclideanMatrix;
use crate::report::{PolicySummary, summarize};
use crate::scenario::{ScenarioGenerator, Site};
use crate::solver::{PolicyRun, SolveOptions, solve_all};
use crate::traits::DistanceMatrixProvider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub label: String,
    pub config: RunConfig,
    pub centers: Vec<Site>,
    pub runs: Vec<PolicyRun>,
}

impl ScenarioReport {
    pub fn summaries(&self) -> Vec<PolicySummary> {
        summarize(self.runs.iter().map(|run| (run.policy, &run.result)))
    }
}

pub fn run_scenario(config: &RunConfig, options: &SolveOptions) -> Result<ScenarioReport, ConfigurationError> {
    let params = config.parameters()?;
    let scenario = ScenarioGenerator::new(config.n_persons, config.n_hospitals, config.seed).generate();
    let selection = KMedoids::new(config.n_centers).select_distribution_centers(&scenario.hospitals);
    let distances = EuclideanMatrix::default().matrix_for(&scenario.persons, &selection.centers);

    let runs = solve_all(
        &scenario.persons,
        &selection.centers,
        &distances,
        params,
        config.n_vaccines,
        options,
    )?;

    for run in &runs {
        info!(
            scenario = %config.label(),
            policy = %run.policy,
            vaccinated = run.result.total_vaccinated,
            "policy finished"
        );
    }

    Ok(ScenarioReport {
        label: config.label(),
        config: config.clone(),
        centers: selection.centers,
        runs,
    })
}
