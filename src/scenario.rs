//! Synthetic scenario data: persons to vaccinate and candidate hospitals.
//!
//! Everything here is a collaborator of the allocation core. `Person` and
//! `Site` are plain records implementing the domain traits.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::traits::{Center, Recipient};

/// Side length of the square planning area.
pub const AREA_SIZE: f64 = 100.0;

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;

const MIN_STAFF: i64 = 3;
const MAX_STAFF: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub priority: u8,
}

impl Person {
    pub fn new(id: u32, location: (f64, f64), priority: u8) -> Self {
        Self {
            id,
            x: location.0,
            y: location.1,
            priority,
        }
    }
}

impl Recipient for Person {
    fn id(&self) -> u32 {
        self.id
    }

    fn location(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

/// A hospital, or a hospital selected as a distribution center.
/// `capacity` is its staff count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub capacity: i64,
}

impl Site {
    pub fn new(id: u32, location: (f64, f64), capacity: i64) -> Self {
        Self {
            id,
            x: location.0,
            y: location.1,
            capacity,
        }
    }
}

impl Center for Site {
    fn id(&self) -> u32 {
        self.id
    }

    fn location(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn capacity(&self) -> i64 {
        self.capacity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub persons: Vec<Person>,
    pub hospitals: Vec<Site>,
}

/// Seeded generator: uniform locations over the planning area, priorities
/// in `1..=5` and staff counts in `3..=7`.
#[derive(Debug, Clone)]
pub struct ScenarioGenerator {
    pub n_persons: usize,
    pub n_hospitals: usize,
    pub seed: u64,
}

impl ScenarioGenerator {
    pub fn new(n_persons: usize, n_hospitals: usize, seed: u64) -> Self {
        Self {
            n_persons,
            n_hospitals,
            seed,
        }
    }

    pub fn generate(&self) -> Scenario {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let persons = (0..self.n_persons)
            .map(|id| {
                let location = (rng.gen_range(0.0..AREA_SIZE), rng.gen_range(0.0..AREA_SIZE));
                let priority = rng.gen_range(MIN_PRIORITY..=MAX_PRIORITY);
                Person::new(id as u32, location, priority)
            })
            .collect();

        let hospitals = (0..self.n_hospitals)
            .map(|id| {
                let location = (rng.gen_range(0.0..AREA_SIZE), rng.gen_range(0.0..AREA_SIZE));
                let staff = rng.gen_range(MIN_STAFF..=MAX_STAFF);
                Site::new(id as u32, location, staff)
            })
            .collect();

        debug!(
            persons = self.n_persons,
            hospitals = self.n_hospitals,
            seed = self.seed,
            "generated scenario"
        );

        Scenario { persons, hospitals }
    }
}
