//! This module defines the single-source shortest-path computation that every router runs over
//! the full topology, and the two ways of deriving next hops from it.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::str::FromStr;

use crate::network::{
    topology::Topology,
    types::{Cost, RouterId},
};

/// How the next hop toward each destination is derived while computing shortest paths.
///
/// In both cases the recorded next hop is the first router a packet is forwarded to *other than*
/// the destination. Destinations reached over a single link have no next hop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NextHopPolicy {
    /// Record each router's immediate predecessor and resolve the first hop by walking back
    /// from the destination once the computation has converged.
    #[default]
    Predecessor,
    /// Resolve the first hop while relaxing, by collapsing the relaxing router's own next-hop
    /// chain into the neighbor's entry.
    Collapsing,
}

impl FromStr for NextHopPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "predecessor" => Ok(Self::Predecessor),
            "collapsing" => Ok(Self::Collapsing),
            _ => Err(UnknownPolicy(s.to_owned())),
        }
    }
}

/// Error returned when parsing an unknown [`NextHopPolicy`].
#[derive(Debug, thiserror::Error)]
#[error("unknown next-hop policy `{0}` (expected `predecessor` or `collapsing`)")]
pub struct UnknownPolicy(String);

/// The outcome of one shortest-path computation: a distance and a next hop for every router,
/// indexed by router ID. `None` distances are unreachable.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ShortestPaths {
    pub(crate) source: RouterId,
    pub(crate) distances: Vec<Option<Cost>>,
    pub(crate) next_hops: Vec<Option<RouterId>>,
}

impl ShortestPaths {
    pub fn source(&self) -> RouterId {
        self.source
    }

    pub fn distances(&self) -> &[Option<Cost>] {
        &self.distances
    }

    pub fn next_hops(&self) -> &[Option<RouterId>] {
        &self.next_hops
    }
}

/// Computes shortest paths from `source` to every router of `topology`.
///
/// The frontier is a binary heap without decrease-key, so a router can be queued several times.
/// Entries costlier than the router's best known distance are stale and skipped. Ties are popped
/// in router ID order, which makes the result deterministic.
pub fn compute_from(
    topology: &Topology,
    source: RouterId,
    policy: NextHopPolicy,
) -> Result<ShortestPaths, RoutingError> {
    if !topology.contains(source) {
        return Err(RoutingError::UnknownRouter(source));
    }
    let nr_routers = topology.nr_routers();
    let mut distances = vec![None; nr_routers];
    let mut predecessors = vec![None; nr_routers];
    let mut collapsed = vec![None; nr_routers];

    distances[source.inner()] = Some(Cost::ZERO);
    let mut frontier = BinaryHeap::new();
    frontier.push(Reverse((Cost::ZERO, source)));

    while let Some(Reverse((cost, cur))) = frontier.pop() {
        if distances[cur.inner()].is_some_and(|best| cost > best) {
            continue;
        }
        for (succ, link_cost) in topology.neighbors(cur) {
            let candidate = cost
                .checked_add(link_cost)
                .ok_or(RoutingError::CostOverflow(succ))?;
            // Only strict improvements relax, so reprocessing a duplicate entry is a no-op
            if distances[succ.inner()].map_or(true, |best| best > candidate) {
                distances[succ.inner()] = Some(candidate);
                predecessors[succ.inner()] = Some(cur);
                if policy == NextHopPolicy::Collapsing && cur != source {
                    collapse(&mut collapsed, succ, cur)?;
                }
                frontier.push(Reverse((candidate, succ)));
            }
        }
    }

    let next_hops = match policy {
        NextHopPolicy::Predecessor => first_hops(source, &predecessors)?,
        NextHopPolicy::Collapsing => collapsed,
    };
    Ok(ShortestPaths {
        source,
        distances,
        next_hops,
    })
}

/// Points `succ` at `via`, then follows `via`'s next hops until reaching a router that is
/// delivered to directly.
fn collapse(
    next_hops: &mut [Option<RouterId>],
    succ: RouterId,
    via: RouterId,
) -> Result<(), RoutingError> {
    let mut hop = via;
    let mut steps = 0;
    while let Some(up) = next_hops[hop.inner()] {
        steps += 1;
        if steps > next_hops.len() {
            return Err(RoutingError::CollapseCycle(succ));
        }
        hop = up;
    }
    next_hops[succ.inner()] = Some(hop);
    Ok(())
}

/// Resolves every destination's first hop by walking its predecessor chain back to the router
/// adjacent to `source`.
fn first_hops(
    source: RouterId,
    predecessors: &[Option<RouterId>],
) -> Result<Vec<Option<RouterId>>, RoutingError> {
    let broken = |to| RoutingError::BrokenPredecessors { from: source, to };
    let mut hops = Vec::with_capacity(predecessors.len());
    for (i, pred) in predecessors.iter().enumerate() {
        let to = RouterId::new(i);
        // The source and unreachable routers have no predecessor
        let Some(mut hop) = *pred else {
            hops.push(None);
            continue;
        };
        if hop == source {
            hops.push(None);
            continue;
        }
        let mut steps = 0;
        loop {
            match predecessors[hop.inner()] {
                Some(p) if p == source => break,
                Some(p) => hop = p,
                None => return Err(broken(to)),
            }
            steps += 1;
            if steps > predecessors.len() {
                return Err(broken(to));
            }
        }
        hops.push(Some(hop));
    }
    Ok(hops)
}

/// Routing failures. Apart from [`RoutingError::TablesNotBuilt`], these indicate inconsistent
/// routing state and should never occur on a valid topology.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    #[error("Router {0} is not part of the topology")]
    UnknownRouter(RouterId),

    #[error("Path cost to router {0} overflows")]
    CostOverflow(RouterId),

    #[error("Predecessors of router {to} do not lead back to router {from}")]
    BrokenPredecessors { from: RouterId, to: RouterId },

    #[error("Next-hop chain of router {0} does not terminate")]
    CollapseCycle(RouterId),

    #[error("Routing tables have not been built")]
    TablesNotBuilt,

    #[error("Next hops from {from} to {to} loop after {hops} hops")]
    NextHopCycle {
        from: RouterId,
        to: RouterId,
        hops: usize,
    },
}
