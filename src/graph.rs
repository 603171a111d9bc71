//! Capacitated three-layer flow network the allocator optimizes over.
//!
//! Node layout: the source, then one node per center, then one node per
//! recipient, then the sink. Centers and recipients are laid out in
//! ascending id order so that node order doubles as the tie-break order.

use tracing::debug;

use crate::error::ConfigurationError;
use crate::traits::{Center, DistanceMatrix, Recipient};

/// Relative rounding tolerance, scaled by the largest reward magnitude.
const RELATIVE_EPSILON: f64 = 1e-9;

/// Residual edge. `cost` is the negated reward so the allocator can run a
/// shortest-path search; `rev` indexes the paired edge in `to`'s list.
#[derive(Debug, Clone)]
pub(crate) struct Edge {
    pub to: usize,
    pub rev: usize,
    pub cap: i64,
    pub cost: f64,
}

#[derive(Debug, Clone)]
pub struct AllocationGraph {
    pub(crate) adjacency: Vec<Vec<Edge>>,
    /// Input index of the center at node `1 + i`.
    center_order: Vec<usize>,
    /// Input index of the recipient at node `1 + centers + i`.
    recipient_order: Vec<usize>,
    supply: usize,
    /// Sum of center capacities, saturating at `usize::MAX`.
    total_capacity: usize,
    /// Costs closer than this are treated as equal.
    tolerance: f64,
}

impl AllocationGraph {
    /// Build the network for `recipients` and `centers` with a global
    /// supply ceiling. `reward(r, c)` is called once per pair with input
    /// indices and must be defined for every pair.
    pub fn build<R, C, F>(
        recipients: &[R],
        centers: &[C],
        supply: i64,
        reward: F,
    ) -> Result<Self, ConfigurationError>
    where
        R: Recipient,
        C: Center,
        F: Fn(usize, usize) -> f64,
    {
        if supply < 0 {
            return Err(ConfigurationError::NegativeSupply { supply });
        }
        if let Some(center) = centers.iter().find(|center| center.capacity() < 0) {
            return Err(ConfigurationError::NegativeCapacity {
                center_id: center.id(),
                capacity: center.capacity(),
            });
        }
        if supply > 0 && (recipients.is_empty() || centers.is_empty()) {
            return Err(ConfigurationError::EmptyInput {
                recipients: recipients.len(),
                centers: centers.len(),
                supply,
            });
        }

        let mut center_order: Vec<usize> = (0..centers.len()).collect();
        center_order.sort_by_key(|&i| centers[i].id());
        let mut recipient_order: Vec<usize> = (0..recipients.len()).collect();
        recipient_order.sort_by_key(|&i| recipients[i].id());

        let node_count = centers.len() + recipients.len() + 2;
        let mut graph = Self {
            adjacency: vec![Vec::new(); node_count],
            center_order,
            recipient_order,
            supply: supply as usize,
            total_capacity: 0,
            tolerance: 0.0,
        };

        let source = graph.source();
        let sink = graph.sink();

        // A center never serves more than every recipient once.
        let recipient_bound = i64::try_from(recipients.len()).unwrap_or(i64::MAX);
        for slot in 0..centers.len() {
            let capacity = centers[graph.center_order[slot]].capacity();
            let capacity_units = usize::try_from(capacity).unwrap_or(usize::MAX);
            graph.total_capacity = graph.total_capacity.saturating_add(capacity_units);
            graph.add_edge(source, graph.center_node(slot), capacity.min(recipient_bound), 0.0);
        }

        let mut scale: f64 = 0.0;
        for c_slot in 0..centers.len() {
            let center = graph.center_order[c_slot];
            for r_slot in 0..recipients.len() {
                let recipient = graph.recipient_order[r_slot];
                let value = reward(recipient, center);
                scale = scale.max(value.abs());
                graph.add_edge(graph.center_node(c_slot), graph.recipient_node(r_slot), 1, -value);
            }
        }
        graph.tolerance = RELATIVE_EPSILON * scale;

        for r_slot in 0..recipients.len() {
            graph.add_edge(graph.recipient_node(r_slot), sink, 1, 0.0);
        }

        debug!(
            recipients = recipients.len(),
            centers = centers.len(),
            supply,
            total_capacity = graph.total_capacity,
            tolerance = graph.tolerance,
            nodes = node_count,
            "built allocation graph"
        );

        Ok(graph)
    }

    fn add_edge(&mut self, from: usize, to: usize, cap: i64, cost: f64) {
        let rev_from = self.adjacency[to].len();
        let rev_to = self.adjacency[from].len();
        self.adjacency[from].push(Edge { to, rev: rev_from, cap, cost });
        self.adjacency[to].push(Edge {
            to: from,
            rev: rev_to,
            cap: 0,
            cost: -cost,
        });
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn source(&self) -> usize {
        0
    }

    pub fn sink(&self) -> usize {
        self.adjacency.len() - 1
    }

    pub fn center_count(&self) -> usize {
        self.center_order.len()
    }

    pub fn recipient_count(&self) -> usize {
        self.recipient_order.len()
    }

    pub fn supply(&self) -> usize {
        self.supply
    }

    pub fn total_capacity(&self) -> usize {
        self.total_capacity
    }

    /// Absolute tolerance for comparing path costs and gains. Zero when
    /// every reward is zero.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Upper bound on the number of units the allocator can route.
    pub fn flow_limit(&self) -> usize {
        self.supply
            .min(self.recipient_count())
            .min(self.total_capacity)
    }

    pub(crate) fn center_node(&self, slot: usize) -> usize {
        1 + slot
    }

    pub(crate) fn recipient_node(&self, slot: usize) -> usize {
        1 + self.center_count() + slot
    }

    pub(crate) fn is_center_node(&self, node: usize) -> bool {
        node >= 1 && node <= self.center_count()
    }

    pub(crate) fn is_recipient_node(&self, node: usize) -> bool {
        node > self.center_count() && node < self.sink()
    }

    /// Input index of the center behind `node`.
    pub(crate) fn center_at(&self, node: usize) -> usize {
        self.center_order[node - 1]
    }

    /// Input index of the recipient behind `node`.
    pub(crate) fn recipient_at(&self, node: usize) -> usize {
        self.recipient_order[node - 1 - self.center_count()]
    }
}

/// Check that `distances` is a `recipients x centers` matrix of finite,
/// non-negative values.
pub fn check_distances<R, C>(
    recipients: &[R],
    centers: &[C],
    distances: &DistanceMatrix,
) -> Result<(), ConfigurationError>
where
    R: Recipient,
    C: Center,
{
    if distances.len() != recipients.len() {
        return Err(ConfigurationError::DistanceRows {
            expected: recipients.len(),
            actual: distances.len(),
        });
    }
    for (row, (recipient, values)) in recipients.iter().zip(distances).enumerate() {
        if values.len() != centers.len() {
            return Err(ConfigurationError::DistanceColumns {
                row,
                expected: centers.len(),
                actual: values.len(),
            });
        }
        for (center, &distance) in centers.iter().zip(values) {
            if !distance.is_finite() || distance < 0.0 {
                return Err(ConfigurationError::InvalidDistance {
                    recipient_id: recipient.id(),
                    center_id: center.id(),
                    distance,
                });
            }
        }
    }
    Ok(())
}
