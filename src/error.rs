//! Errors raised while validating a scenario before any allocation work.

use thiserror::Error;

/// A structurally invalid scenario. The allocator itself never fails: once
/// a scenario passes validation the empty allocation is always feasible.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("center {center_id} has negative capacity {capacity}")]
    NegativeCapacity { center_id: u32, capacity: i64 },

    #[error("supply must be non-negative, got {supply}")]
    NegativeSupply { supply: i64 },

    #[error(
        "positive supply {supply} requires recipients and centers (got {recipients} recipients, {centers} centers)"
    )]
    EmptyInput {
        recipients: usize,
        centers: usize,
        supply: i64,
    },

    #[error("distance matrix has {actual} rows, expected one per recipient ({expected})")]
    DistanceRows { expected: usize, actual: usize },

    #[error("distance matrix row {row} has {actual} columns, expected one per center ({expected})")]
    DistanceColumns {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("distance from recipient {recipient_id} to center {center_id} is invalid: {distance}")]
    InvalidDistance {
        recipient_id: u32,
        center_id: u32,
        distance: f64,
    },

    #[error("parameter {name} must be a finite non-negative number, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
