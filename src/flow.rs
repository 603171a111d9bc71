//! Max-profit flow over an [`AllocationGraph`].
//!
//! Successive shortest augmenting paths: Bellman-Ford seeds the node
//! potentials on the initial network (which carries negative costs), then
//! every augmentation runs Dijkstra on reduced costs. Each augmentation
//! routes one unit, and the loop stops as soon as the best remaining path
//! is not profitable, the supply is exhausted, or the sink is unreachable.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::graph::AllocationGraph;

/// Raw allocator output, in input indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowAllocation {
    /// `(recipient, center)` input indices, ordered by center id then
    /// recipient id.
    pub pairs: Vec<(usize, usize)>,
    /// Total reward accumulated over the augmenting paths.
    pub objective: f64,
}

impl FlowAllocation {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Min-heap entry ordered by distance, then by node index.
#[derive(Debug, Clone, Copy, PartialEq)]
struct State {
    cost: f64,
    node: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find the profit-maximizing allocation on `graph`.
///
/// Never fails: with no profitable pair or zero supply the result is the
/// empty allocation.
pub fn allocate(mut graph: AllocationGraph) -> FlowAllocation {
    let limit = graph.flow_limit();
    if limit == 0 {
        return FlowAllocation::default();
    }

    let source = graph.source();
    let sink = graph.sink();
    let tolerance = graph.tolerance();
    let mut potential = initial_potentials(&graph);
    let mut flow = 0;
    let mut objective = 0.0;

    while flow < limit {
        let Some((dist, prev)) = shortest_paths(&graph, &potential) else {
            break;
        };

        // Nodes unreachable now stay unreachable: augmenting only adds
        // residual edges between nodes on the path.
        for (node, d) in dist.iter().enumerate() {
            if d.is_finite() {
                potential[node] += d;
            }
        }

        let gain = -(potential[sink] - potential[source]);
        if gain <= tolerance {
            trace!(gain, flow, "best remaining path is not profitable");
            break;
        }

        let mut node = sink;
        while node != source {
            let Some((from, edge)) = prev[node] else {
                break;
            };
            let rev = graph.adjacency[from][edge].rev;
            graph.adjacency[from][edge].cap -= 1;
            graph.adjacency[node][rev].cap += 1;
            node = from;
        }

        flow += 1;
        objective += gain;
        trace!(flow, gain, objective, "augmented");
    }

    FlowAllocation {
        pairs: matched_pairs(&graph),
        objective,
    }
}

/// Bellman-Ford distances from the source over edges with residual
/// capacity. Unreachable nodes get zero; they are never relaxed later.
fn initial_potentials(graph: &AllocationGraph) -> Vec<f64> {
    let n = graph.node_count();
    let tolerance = graph.tolerance();
    let mut dist = vec![f64::INFINITY; n];
    dist[graph.source()] = 0.0;

    for _ in 0..n {
        let mut changed = false;
        for from in 0..n {
            if !dist[from].is_finite() {
                continue;
            }
            for edge in &graph.adjacency[from] {
                if edge.cap > 0 && dist[from] + edge.cost + tolerance < dist[edge.to] {
                    dist[edge.to] = dist[from] + edge.cost;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    dist.into_iter()
        .map(|d| if d.is_finite() { d } else { 0.0 })
        .collect()
}

type Predecessors = Vec<Option<(usize, usize)>>;

/// Dijkstra on reduced costs. Returns `None` when the sink is unreachable.
///
/// Ties keep the first label found, and the heap pops equal distances in
/// node order, so among equally profitable paths the lowest recipient id
/// and then the lowest center id win.
fn shortest_paths(graph: &AllocationGraph, potential: &[f64]) -> Option<(Vec<f64>, Predecessors)> {
    let n = graph.node_count();
    let tolerance = graph.tolerance();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Predecessors = vec![None; n];
    let mut heap = BinaryHeap::new();

    dist[graph.source()] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: graph.source(),
    });

    while let Some(State { cost, node }) = heap.pop() {
        if cost > dist[node] {
            continue;
        }
        for (index, edge) in graph.adjacency[node].iter().enumerate() {
            if edge.cap <= 0 {
                continue;
            }
            // Clamp rounding noise; reduced costs are non-negative in exact arithmetic.
            let reduced = (edge.cost + potential[node] - potential[edge.to]).max(0.0);
            let next = cost + reduced;
            if next + tolerance < dist[edge.to] {
                dist[edge.to] = next;
                prev[edge.to] = Some((node, index));
                heap.push(State {
                    cost: next,
                    node: edge.to,
                });
            }
        }
    }

    if dist[graph.sink()].is_finite() {
        Some((dist, prev))
    } else {
        None
    }
}

/// Saturated center-to-recipient edges are the matched pairs.
fn matched_pairs(graph: &AllocationGraph) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for slot in 0..graph.center_count() {
        let node = graph.center_node(slot);
        debug_assert!(graph.is_center_node(node));
        for edge in &graph.adjacency[node] {
            if graph.is_recipient_node(edge.to) && edge.cap == 0 {
                pairs.push((graph.recipient_at(edge.to), graph.center_at(node)));
            }
        }
    }
    pairs
}
