//! Test fixtures for vaccine-planner.
//!
//! Builder-style recipients and centers implementing the domain traits, and
//! an exhaustive reference solver for small instances.

#![allow(dead_code)]

use vaccine_planner::traits::{Center, DistanceMatrix, Recipient};

/// Builder for test recipients with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestRecipient {
    pub id: u32,
    pub location: (f64, f64),
    pub priority: u8,
}

impl TestRecipient {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            location: (0.0, 0.0),
            priority: 1,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.location = (x, y);
        self
    }

    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

impl Recipient for TestRecipient {
    fn id(&self) -> u32 {
        self.id
    }

    fn location(&self) -> (f64, f64) {
        self.location
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

/// Builder for test centers with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestCenter {
    pub id: u32,
    pub location: (f64, f64),
    pub capacity: i64,
}

impl TestCenter {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            location: (0.0, 0.0),
            capacity: 1,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.location = (x, y);
        self
    }

    pub fn capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Center for TestCenter {
    fn id(&self) -> u32 {
        self.id
    }

    fn location(&self) -> (f64, f64) {
        self.location
    }

    fn capacity(&self) -> i64 {
        self.capacity
    }
}

/// Best total reward over every feasible allocation, by exhaustive search.
/// Each recipient is either unserved or served at a center with room left.
pub fn brute_force_best(rewards: &[Vec<f64>], capacities: &[i64], supply: usize) -> f64 {
    fn go(r: usize, rewards: &[Vec<f64>], remaining: &mut [i64], supply_left: usize) -> f64 {
        if r == rewards.len() {
            return 0.0;
        }
        let mut best = go(r + 1, rewards, remaining, supply_left);
        if supply_left > 0 {
            for c in 0..remaining.len() {
                if remaining[c] > 0 {
                    remaining[c] -= 1;
                    let value = rewards[r][c] + go(r + 1, rewards, remaining, supply_left - 1);
                    remaining[c] += 1;
                    if value > best {
                        best = value;
                    }
                }
            }
        }
        best
    }

    let mut remaining = capacities.to_vec();
    go(0, rewards, &mut remaining, supply)
}

/// Manhattan distances, simple and predictable.
pub fn manhattan(recipients: &[TestRecipient], centers: &[TestCenter]) -> DistanceMatrix {
    recipients
        .iter()
        .map(|r| {
            centers
                .iter()
                .map(|c| (r.location.0 - c.location.0).abs() + (r.location.1 - c.location.1).abs())
                .collect()
        })
        .collect()
}
