//! Scenario and run configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::reward::{Policy, PolicyParameters};

/// Inputs to a single solve besides the scenario data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub policy: Policy,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    /// Global supply of doses.
    pub supply: i64,
}

impl ScenarioConfig {
    pub fn new(policy: Policy, params: PolicyParameters, supply: i64) -> Self {
        Self {
            policy,
            alpha: params.alpha,
            beta: params.beta,
            gamma: params.gamma,
            supply,
        }
    }

    pub fn parameters(&self) -> Result<PolicyParameters, ConfigurationError> {
        PolicyParameters::new(self.alpha, self.beta, self.gamma)
    }

    pub fn with_policy(self, policy: Policy) -> Self {
        Self { policy, ..self }
    }
}

/// A full synthetic run: generate data, select centers, solve all policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub n_persons: usize,
    pub n_hospitals: usize,
    pub n_vaccines: i64,
    pub n_centers: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Defaults to a quarter of `n_persons`.
    #[serde(default)]
    pub alpha: Option<f64>,
    /// Defaults to a quarter of `n_persons`.
    #[serde(default)]
    pub beta: Option<f64>,
    /// Defaults to 1.0.
    #[serde(default)]
    pub gamma: Option<f64>,
}

fn default_seed() -> u64 {
    42
}

impl RunConfig {
    pub fn new(n_persons: usize, n_hospitals: usize, n_vaccines: i64, n_centers: usize) -> Self {
        Self {
            n_persons,
            n_hospitals,
            n_vaccines,
            n_centers,
            seed: default_seed(),
            alpha: None,
            beta: None,
            gamma: None,
        }
    }

    /// The three reference scenarios: persons, hospitals, vaccines, centers.
    pub fn presets() -> Vec<RunConfig> {
        vec![
            RunConfig::new(100, 10, 80, 5),
            RunConfig::new(200, 15, 150, 8),
            RunConfig::new(300, 20, 250, 10),
        ]
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading run config {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("parsing run config {}", path.display()))?;
        Ok(config)
    }

    pub fn parameters(&self) -> Result<PolicyParameters, ConfigurationError> {
        let scale = 0.25 * self.n_persons as f64;
        PolicyParameters::new(
            self.alpha.unwrap_or(scale),
            self.beta.unwrap_or(scale),
            self.gamma.unwrap_or(1.0),
        )
    }

    pub fn scenario_config(&self, policy: Policy) -> Result<ScenarioConfig, ConfigurationError> {
        Ok(ScenarioConfig::new(policy, self.parameters()?, self.n_vaccines))
    }

    pub fn label(&self) -> String {
        format!(
            "{}p_{}h_{}v_{}c",
            self.n_persons, self.n_hospitals, self.n_vaccines, self.n_centers
        )
    }
}
