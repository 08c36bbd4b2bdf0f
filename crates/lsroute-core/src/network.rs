pub mod routing;
pub mod topology;
pub mod types;

use std::fmt;

use log::{debug, info};

pub use topology::{Topology, TopologyError};
pub use types::*;

use crate::{opts::RoutingOpts, routing::RoutingError};

use self::routing::{RoutingTable, RoutingTables};

/// A network of routers together with the routing table every router computes for it.
///
/// Links are added first, then [`NetworkTopology::build_routing_tables`] computes one table per
/// router. Paths can only be simulated once the tables are built.
#[derive(Debug, Clone)]
pub struct NetworkTopology {
    topology: Topology,
    opts: RoutingOpts,
    tables: Option<RoutingTables>,
}

impl NetworkTopology {
    /// Creates a network of `nr_routers` routers and no links, with default routing options.
    /// `nr_links_hint` only reserves capacity.
    pub fn new(nr_routers: usize, nr_links_hint: usize) -> Self {
        Self::with_opts(nr_routers, nr_links_hint, RoutingOpts::default())
    }

    pub fn with_opts(nr_routers: usize, nr_links_hint: usize, opts: RoutingOpts) -> Self {
        Self {
            topology: Topology::new(nr_routers, nr_links_hint),
            opts,
            tables: None,
        }
    }

    /// Adds a link to the network. Adding a link discards routing tables built earlier.
    pub fn add_link(
        &mut self,
        source: RouterId,
        destination: RouterId,
        cost: i64,
    ) -> Result<(), TopologyError> {
        match self.topology.add_link(source, destination, cost) {
            Ok(link) => {
                debug!("Link added: {link}");
                self.tables = None;
                Ok(())
            }
            Err(e) => {
                debug!("Link not added: {e}");
                Err(e)
            }
        }
    }

    /// Computes the routing table of every router. Rebuilding an unchanged network produces the
    /// same tables.
    pub fn build_routing_tables(&mut self) -> Result<(), RoutingError> {
        info!(
            "Building routing tables for {} routers and {} links",
            self.topology.nr_routers(),
            self.topology.nr_links()
        );
        let tables = RoutingTables::build(&self.topology, &self.opts)?;
        self.tables = Some(tables);
        info!("Routing tables built");
        Ok(())
    }

    /// Returns `router`'s table, or `None` if the tables are not built or `router` does not
    /// exist.
    pub fn routing_table(&self, router: RouterId) -> Option<&RoutingTable> {
        self.tables.as_ref().and_then(|t| t.for_router(router))
    }

    /// Every routing table in router order. Empty until the tables are built.
    pub fn routing_tables(&self) -> impl Iterator<Item = &RoutingTable> + '_ {
        self.tables.iter().flat_map(|t| t.iter())
    }

    /// Simulates the path a packet takes from `from` to `to`. Each router along the way forwards
    /// according to its own routing table.
    ///
    /// Returns an error if the tables are not built, or if the next hops loop, which would
    /// indicate inconsistent routing tables.
    pub fn simulate_path(&self, from: RouterId, to: RouterId) -> Result<PathResult, RoutingError> {
        if !self.topology.contains(from) || !self.topology.contains(to) {
            return Ok(PathResult::InvalidEndpoints);
        }
        let tables = self.tables.as_ref().ok_or(RoutingError::TablesNotBuilt)?;
        let table_of = |r| tables.for_router(r).ok_or(RoutingError::UnknownRouter(r));
        if table_of(from)?.distance_to(to).is_none() {
            return Ok(PathResult::NoLink);
        }
        if from == to {
            return Ok(PathResult::SelfLoop(from));
        }
        let nr_routers = self.topology.nr_routers();
        let mut path = vec![from];
        let mut cur = from;
        while let Some(next) = table_of(cur)?.next_hop_to(to) {
            // A simple path visits every router at most once
            if path.len() + 2 > nr_routers {
                return Err(RoutingError::NextHopCycle {
                    from,
                    to,
                    hops: path.len(),
                });
            }
            path.push(next);
            cur = next;
        }
        path.push(to);
        Ok(PathResult::Path(path))
    }

    /// The total cost of following `path` over the cheapest direct links between consecutive
    /// routers, or `None` if two consecutive routers are not linked.
    pub fn path_cost(&self, path: &[RouterId]) -> Option<Cost> {
        path.windows(2)
            .map(|w| self.topology.link_cost(w[0], w[1]))
            .sum()
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn opts(&self) -> &RoutingOpts {
        &self.opts
    }

    delegate::delegate! {
        to self.topology {
            pub fn nr_routers(&self) -> usize;
            pub fn routers(&self) -> impl Iterator<Item = RouterId> + '_;
            pub fn nr_links(&self) -> usize;
            pub fn is_empty_of_edges(&self) -> bool;
        }
    }
}

/// The outcome of simulating a path between two routers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum PathResult {
    /// The destination is unreachable from the source.
    NoLink,
    /// The source and destination are the same router.
    SelfLoop(RouterId),
    /// The routers visited, from source to destination inclusive.
    Path(Vec<RouterId>),
    /// The source or destination does not exist.
    InvalidEndpoints,
}

impl PathResult {
    /// The routers visited, if the destination was reached.
    pub fn routers(&self) -> Option<&[RouterId]> {
        match self {
            Self::SelfLoop(r) => Some(std::slice::from_ref(r)),
            Self::Path(path) => Some(path),
            Self::NoLink | Self::InvalidEndpoints => None,
        }
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLink => write!(f, "No link exists"),
            Self::InvalidEndpoints => write!(f, "Invalid source and/or destination"),
            Self::SelfLoop(r) => write!(f, "{r} - {r}"),
            Self::Path(path) => write!(f, "{}", itertools::join(path, " - ")),
        }
    }
}
