use std::fmt;

use log::debug;

use crate::{
    network::{
        topology::Topology,
        types::{Cost, RouterId},
    },
    opts::RoutingOpts,
    routing::{self, RoutingError, ShortestPaths},
    utils,
};

/// One router's view of the network: the cost of reaching every destination and the next hop
/// to forward to. Tables are immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RoutingTable {
    router: RouterId,
    distances: Vec<Option<Cost>>,
    next_hops: Vec<Option<RouterId>>,
}

impl RoutingTable {
    pub fn router(&self) -> RouterId {
        self.router
    }

    /// The cost of reaching `dest`, or `None` if it is unreachable.
    pub fn distance_to(&self, dest: RouterId) -> Option<Cost> {
        self.distances.get(dest.inner()).copied().flatten()
    }

    /// The first router to forward to on the way to `dest`. Returns `None` for this router
    /// itself, for unreachable destinations, and for destinations delivered to directly.
    pub fn next_hop_to(&self, dest: RouterId) -> Option<RouterId> {
        self.next_hops.get(dest.inner()).copied().flatten()
    }

    /// Every destination except this router, in ID order.
    pub fn entries(&self) -> impl Iterator<Item = RouteEntry> + '_ {
        self.distances
            .iter()
            .zip(&self.next_hops)
            .enumerate()
            .filter(move |&(i, _)| i != self.router.inner())
            .map(|(i, (&cost, &next_hop))| RouteEntry {
                destination: RouterId::new(i),
                cost,
                next_hop,
            })
    }
}

impl From<ShortestPaths> for RoutingTable {
    fn from(paths: ShortestPaths) -> Self {
        Self {
            router: paths.source,
            distances: paths.distances,
            next_hops: paths.next_hops,
        }
    }
}

impl fmt::Display for RoutingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Node\tCost\tNext Hop")?;
        for entry in self.entries() {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// A single row of a [`RoutingTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RouteEntry {
    pub destination: RouterId,
    pub cost: Option<Cost>,
    pub next_hop: Option<RouterId>,
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.cost, self.next_hop) {
            (None, _) => write!(f, "{}\tNo link", self.destination),
            (Some(cost), None) => write!(f, "{}\t{}\t-", self.destination, cost),
            (Some(cost), Some(hop)) => write!(f, "{}\t{}\t{}", self.destination, cost, hop),
        }
    }
}

/// The routing tables of every router in a topology, indexed by router ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoutingTables {
    inner: Vec<RoutingTable>,
}

impl RoutingTables {
    /// Builds one routing table per router. Each router's computation only reads the topology,
    /// so with `opts.parallel` chunks of routers are computed in parallel.
    pub(crate) fn build(topology: &Topology, opts: &RoutingOpts) -> Result<Self, RoutingError> {
        let policy = opts.policy;
        let routers = topology.routers().collect::<Vec<_>>();
        let compute = |routers: &[RouterId]| {
            routers
                .iter()
                .map(|&r| {
                    debug!("Computing routing table for router {r}");
                    routing::compute_from(topology, r, policy).map(RoutingTable::from)
                })
                .collect::<Vec<_>>()
        };
        let results = if opts.parallel {
            utils::par_chunks(&routers, compute).collect::<Vec<_>>()
        } else {
            compute(&routers)
        };
        // Chunks finish in any order
        let mut tables = results.into_iter().collect::<Result<Vec<_>, _>>()?;
        tables.sort_by_key(|t| t.router);
        Ok(Self { inner: tables })
    }

    pub(crate) fn for_router(&self, router: RouterId) -> Option<&RoutingTable> {
        self.inner.get(router.inner())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &RoutingTable> + '_ {
        self.inner.iter()
    }

    #[cfg(test)]
    pub(crate) fn set_next_hop(&mut self, router: RouterId, dest: RouterId, hop: RouterId) {
        self.inner[router.inner()].next_hops[dest.inner()] = Some(hop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::NextHopPolicy;
    use crate::testing;

    fn id(i: usize) -> RouterId {
        RouterId::new(i)
    }

    #[test]
    fn four_router_tables_render() -> anyhow::Result<()> {
        let topo = testing::topology(testing::four_router_config())?;
        let tables = RoutingTables::build(&topo, &RoutingOpts::default())?;
        let first = tables.for_router(id(0)).unwrap();
        insta::assert_snapshot!(first.to_string(), @r###"
        Node	Cost	Next Hop
        1	1	-
        2	2	1
        3	3	1
        "###);
        let last = tables.for_router(id(3)).unwrap();
        insta::assert_snapshot!(last.to_string(), @r###"
        Node	Cost	Next Hop
        0	3	2
        1	2	2
        2	1	-
        "###);
        Ok(())
    }

    #[test]
    fn unreachable_rows_render_no_link() -> anyhow::Result<()> {
        let mut topo = Topology::new(3, 1);
        topo.add_link(id(0), id(1), 4)?;
        let tables = RoutingTables::build(&topo, &RoutingOpts::default())?;
        let rows = tables
            .for_router(id(0))
            .unwrap()
            .entries()
            .map(|e| e.to_string())
            .collect::<Vec<_>>();
        assert_eq!(rows, ["1\t4\t-", "2\tNo link"]);
        Ok(())
    }

    #[test]
    fn entries_skip_own_router() -> anyhow::Result<()> {
        let topo = testing::topology(testing::ring_config(4))?;
        let tables = RoutingTables::build(&topo, &RoutingOpts::default())?;
        for table in tables.iter() {
            assert_eq!(table.entries().count(), 3);
            assert!(table.entries().all(|e| e.destination != table.router()));
        }
        Ok(())
    }

    #[test]
    fn lookups_out_of_range_are_none() -> anyhow::Result<()> {
        let topo = testing::topology(testing::four_router_config())?;
        let tables = RoutingTables::build(&topo, &RoutingOpts::default())?;
        let table = tables.for_router(id(1)).unwrap();
        assert_eq!(table.distance_to(id(17)), None);
        assert_eq!(table.next_hop_to(id(17)), None);
        assert!(tables.for_router(id(4)).is_none());
        Ok(())
    }

    #[test]
    fn parallel_and_sequential_builds_agree() -> anyhow::Result<()> {
        let topo = testing::topology(testing::ring_config(9))?;
        let parallel = RoutingTables::build(&topo, &RoutingOpts::default())?;
        let sequential =
            RoutingTables::build(&topo, &RoutingOpts::builder().parallel(false).build())?;
        assert_eq!(parallel, sequential);
        Ok(())
    }

    #[test]
    fn policies_build_identical_tables() -> anyhow::Result<()> {
        let topo = testing::topology(testing::equal_cost_config())?;
        let predecessor = RoutingTables::build(&topo, &RoutingOpts::default())?;
        let collapsing = RoutingTables::build(
            &topo,
            &RoutingOpts::builder()
                .policy(NextHopPolicy::Collapsing)
                .build(),
        )?;
        assert_eq!(predecessor, collapsing);
        Ok(())
    }
}
