//! vaccine-planner core
//!
//! Allocates a scarce supply of doses to recipients served by staffed
//! distribution centers, maximizing total reward under one of four ranking
//! policies with an exact max-profit flow.

pub mod traits;
pub mod error;
pub mod reward;
pub mod graph;
pub mod flow;
pub mod extract;
pub mod solver;
pub mod config;
pub mod euclidean;
pub mod scenario;
pub mod clustering;
pub mod report;
pub mod runner;
pub mod logging;

pub use config::{RunConfig, ScenarioConfig};
pub use error::ConfigurationError;
pub use extract::{AllocationResult, Assignment};
pub use reward::{Policy, PolicyParameters};
pub use runner::{ScenarioReport, run_scenario};
pub use solver::{PolicyRun, SolveOptions, solve, solve_all};
