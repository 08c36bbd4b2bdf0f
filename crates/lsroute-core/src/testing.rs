use crate::{
    network::{topology::Topology, types::RouterId, NetworkTopology, TopologyError},
    opts::RoutingOpts,
    spec::LinkSpec,
};

pub(crate) type Config = (usize, Vec<LinkSpec>);

fn link(a: usize, b: usize, cost: i64) -> LinkSpec {
    LinkSpec::new(RouterId::new(a), RouterId::new(b), cost)
}

/// Four routers where the direct link 0 - 2 is costlier than the detour through 1.
pub(crate) fn four_router_config() -> Config {
    let links = vec![link(0, 1, 1), link(1, 2, 1), link(0, 2, 5), link(2, 3, 1)];
    (4, links)
}

/// A diamond in which router 2 is first reached over its direct link and then improved through
/// router 1, after which 3 is improved through 2.
pub(crate) fn diamond_config() -> Config {
    let links = vec![
        link(0, 1, 1),
        link(0, 2, 4),
        link(1, 2, 1),
        link(2, 3, 1),
        link(1, 3, 5),
    ];
    (4, links)
}

/// A diamond with two equal-cost paths from 0 to 3, and a tail 3 - 4.
pub(crate) fn equal_cost_config() -> Config {
    let links = vec![
        link(0, 1, 1),
        link(0, 2, 1),
        link(1, 3, 1),
        link(2, 3, 1),
        link(3, 4, 2),
    ];
    (5, links)
}

/// `n` routers in a ring of unit-cost links.
pub(crate) fn ring_config(n: usize) -> Config {
    let links = (0..n).map(|i| link(i, (i + 1) % n, 1)).collect();
    (n, links)
}

pub(crate) fn topology((nr_routers, links): Config) -> Result<Topology, TopologyError> {
    let mut topo = Topology::new(nr_routers, links.len());
    for l in links {
        topo.add_link(l.source, l.destination, l.cost)?;
    }
    Ok(topo)
}

/// Builds a network from `config` and computes its routing tables.
pub(crate) fn network(
    (nr_routers, links): Config,
    opts: RoutingOpts,
) -> anyhow::Result<NetworkTopology> {
    let mut network = NetworkTopology::with_opts(nr_routers, links.len(), opts);
    for l in links {
        network.add_link(l.source, l.destination, l.cost)?;
    }
    network.build_routing_tables()?;
    Ok(network)
}
