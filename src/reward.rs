//! Reward model: maps a (recipient, center) pair to a scalar reward under
//! one of four ranking policies.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::traits::{DistanceMatrix, Recipient};

/// Ranking policy used to score every (recipient, center) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// Pure count maximization.
    #[serde(rename = "B-VDM")]
    Basic,
    #[serde(rename = "P-VDM")]
    Priority,
    #[serde(rename = "D-VDM")]
    Distance,
    #[serde(rename = "PD-VDM")]
    PriorityDistance,
}

impl Policy {
    pub const ALL: [Policy; 4] = [
        Policy::Basic,
        Policy::Priority,
        Policy::Distance,
        Policy::PriorityDistance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Policy::Basic => "B-VDM",
            Policy::Priority => "P-VDM",
            Policy::Distance => "D-VDM",
            Policy::PriorityDistance => "PD-VDM",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" | "b-vdm" => Ok(Policy::Basic),
            "priority" | "p-vdm" => Ok(Policy::Priority),
            "distance" | "d-vdm" => Ok(Policy::Distance),
            "priority-distance" | "pd-vdm" => Ok(Policy::PriorityDistance),
            _ => Err(format!("invalid policy: {}", s)),
        }
    }
}

/// Reward weights shared by all policies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyParameters {
    /// Base reward for serving a recipient.
    pub alpha: f64,
    /// Weight applied to recipient priority.
    pub beta: f64,
    /// Penalty per unit of distance.
    pub gamma: f64,
}

impl PolicyParameters {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Result<Self, ConfigurationError> {
        let params = Self { alpha, beta, gamma };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta), ("gamma", self.gamma)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Reward for serving `recipient` at a center `distance` away.
pub fn reward<R: Recipient>(
    recipient: &R,
    distance: f64,
    policy: Policy,
    params: &PolicyParameters,
) -> f64 {
    let priority = f64::from(recipient.priority());
    match policy {
        Policy::Basic => params.alpha,
        Policy::Priority => params.alpha + params.beta * priority,
        Policy::Distance => params.alpha - params.gamma * distance,
        Policy::PriorityDistance => params.alpha + params.beta * priority - params.gamma * distance,
    }
}

/// Precompute rewards for every pair, indexed like the distance matrix.
///
/// Rows are independent, so the parallel and sequential paths agree exactly.
pub fn reward_table<R>(
    recipients: &[R],
    distances: &DistanceMatrix,
    policy: Policy,
    params: &PolicyParameters,
    parallel: bool,
) -> Vec<Vec<f64>>
where
    R: Recipient + Sync,
{
    let row = |(recipient, distances): (&R, &Vec<f64>)| -> Vec<f64> {
        distances
            .iter()
            .map(|&distance| reward(recipient, distance, policy, params))
            .collect()
    };

    if parallel {
        recipients.par_iter().zip(distances.par_iter()).map(row).collect()
    } else {
        recipients.iter().zip(distances.iter()).map(row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct P(u8);

    impl Recipient for P {
        fn id(&self) -> u32 {
            0
        }

        fn location(&self) -> (f64, f64) {
            (0.0, 0.0)
        }

        fn priority(&self) -> u8 {
            self.0
        }
    }

    fn params() -> PolicyParameters {
        PolicyParameters::new(10.0, 2.0, 0.5).unwrap()
    }

    #[test]
    fn test_basic_ignores_priority_and_distance() {
        assert_eq!(reward(&P(5), 40.0, Policy::Basic, &params()), 10.0);
        assert_eq!(reward(&P(1), 0.0, Policy::Basic, &params()), 10.0);
    }

    #[test]
    fn test_priority_policy() {
        assert_eq!(reward(&P(3), 40.0, Policy::Priority, &params()), 16.0);
    }

    #[test]
    fn test_distance_policy_can_go_negative() {
        assert_eq!(reward(&P(3), 4.0, Policy::Distance, &params()), 8.0);
        assert!(reward(&P(3), 30.0, Policy::Distance, &params()) < 0.0);
    }

    #[test]
    fn test_priority_distance_policy() {
        assert_eq!(reward(&P(4), 6.0, Policy::PriorityDistance, &params()), 15.0);
    }

    #[test]
    fn test_rejects_negative_or_nan_weights() {
        assert!(matches!(
            PolicyParameters::new(-1.0, 0.0, 0.0),
            Err(ConfigurationError::InvalidParameter { name: "alpha", .. })
        ));
        assert!(PolicyParameters::new(1.0, f64::NAN, 0.0).is_err());
        assert!(PolicyParameters::new(1.0, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_parallel_table_matches_sequential() {
        let recipients = vec![P(1), P(3), P(5)];
        let distances = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let seq = reward_table(&recipients, &distances, Policy::PriorityDistance, &params(), false);
        let par = reward_table(&recipients, &distances, Policy::PriorityDistance, &params(), true);
        assert_eq!(seq, par);
        assert_eq!(seq[2][1], 10.0 + 10.0 - 3.0);
    }

    #[test]
    fn test_policy_labels_round_trip() {
        for policy in Policy::ALL {
            assert_eq!(policy.label().parse::<Policy>().unwrap(), policy);
        }
        assert_eq!("priority-distance".parse::<Policy>().unwrap(), Policy::PriorityDistance);
        assert!("greedy".parse::<Policy>().is_err());
    }
}
