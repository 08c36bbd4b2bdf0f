#![warn(unreachable_pub, missing_debug_implementations)]

//! The core link-state routing library. Every router of a [network](NetworkTopology) runs a
//! [shortest-path computation](routing::compute_from) over the whole topology and keeps the
//! result as its [routing table](RoutingTable). Packets are then
//! [simulated](NetworkTopology::simulate_path) hop by hop through those tables.

#[macro_use]
mod ident;

pub mod network;
pub mod opts;
pub mod routing;
pub mod spec;

pub(crate) mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use network::{
    routing::{RouteEntry, RoutingTable},
    topology::{Topology, TopologyError},
    types::{Cost, Link, RouterId},
    NetworkTopology, PathResult,
};
pub use opts::RoutingOpts;
pub use routing::{NextHopPolicy, RoutingError, ShortestPaths};
pub use spec::{LinkSpec, SpecError, TopologySpec};
