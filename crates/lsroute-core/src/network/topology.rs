use petgraph::{
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
};

use crate::network::types::{Cost, Link, RouterId};

/// An undirected, weighted graph of routers. Router `i` is stored at node index `i`, so router
/// IDs can be used to index the graph directly.
#[derive(Debug, Clone)]
pub struct Topology {
    pub(crate) graph: UnGraph<RouterId, Cost>,
}

impl Topology {
    /// Creates a topology of `nr_routers` routers and no links. `nr_links_hint` only reserves
    /// capacity.
    pub fn new(nr_routers: usize, nr_links_hint: usize) -> Self {
        let mut graph = UnGraph::with_capacity(nr_routers, nr_links_hint);
        for id in RouterId::all(nr_routers) {
            graph.add_node(id);
        }
        Self { graph }
    }

    /// Adds a link between `source` and `destination`. A rejected link leaves the topology
    /// untouched.
    ///
    /// Correctness properties:
    ///
    /// - The cost must be non-negative.
    /// - Both endpoints must be routers of this topology.
    /// - The endpoints must be distinct.
    pub fn add_link(
        &mut self,
        source: RouterId,
        destination: RouterId,
        cost: i64,
    ) -> Result<Link, TopologyError> {
        // CORRECTNESS: The cost must be non-negative.
        let cost = u64::try_from(cost)
            .map(Cost::new)
            .map_err(|_| TopologyError::NegativeCost(cost))?;
        // CORRECTNESS: Both endpoints must be routers of this topology.
        for id in [source, destination] {
            if !self.contains(id) {
                return Err(TopologyError::InvalidRouter {
                    id,
                    nr_routers: self.nr_routers(),
                });
            }
        }
        // CORRECTNESS: The endpoints must be distinct.
        if source == destination {
            return Err(TopologyError::SelfLoop(source));
        }
        // One undirected edge is visible from both endpoints
        self.graph.add_edge(source.into(), destination.into(), cost);
        Ok(Link::new(source, destination, cost))
    }

    pub fn nr_routers(&self) -> usize {
        self.graph.node_count()
    }

    pub fn nr_links(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: RouterId) -> bool {
        id.inner() < self.nr_routers()
    }

    /// Returns `true` if no router has any link.
    pub fn is_empty_of_edges(&self) -> bool {
        self.graph.edge_count() == 0
    }

    pub fn routers(&self) -> impl Iterator<Item = RouterId> + '_ {
        self.graph.node_weights().copied()
    }

    /// Iterates over `(neighbor, cost)` for every link of `router`. Parallel links are
    /// reported individually.
    pub fn neighbors(&self, router: RouterId) -> impl Iterator<Item = (RouterId, Cost)> + '_ {
        let n = NodeIndex::from(router);
        self.graph.edges(n).map(move |e| {
            let other = if e.source() == n { e.target() } else { e.source() };
            (self.graph[other], *e.weight())
        })
    }

    /// The cheapest link directly connecting `a` and `b`, if any.
    pub fn link_cost(&self, a: RouterId, b: RouterId) -> Option<Cost> {
        if !self.contains(a) || !self.contains(b) {
            return None;
        }
        self.graph
            .edges_connecting(a.into(), b.into())
            .map(|e| *e.weight())
            .min()
    }

    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.graph
            .edge_references()
            .map(|e| Link::new(self.graph[e.source()], self.graph[e.target()], *e.weight()))
    }

    /// A sorted snapshot of every router's neighbor list. Two topologies built from the same
    /// links in any order have equal adjacencies.
    pub fn adjacency(&self) -> Vec<Vec<(RouterId, Cost)>> {
        self.routers()
            .map(|r| {
                let mut neighbors = self.neighbors(r).collect::<Vec<_>>();
                neighbors.sort();
                neighbors
            })
            .collect()
    }
}

/// The reason a link was not added to a topology.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("Negative cost {0} not allowed")]
    NegativeCost(i64),

    #[error("Router {id} does not exist (the network has {nr_routers} routers)")]
    InvalidRouter { id: RouterId, nr_routers: usize },

    #[error("Router {0} cannot be linked to itself")]
    SelfLoop(RouterId),
}
