use anyhow::Context;
use lsroute_core::{NetworkTopology, NextHopPolicy, PathResult, RouterId, RoutingOpts};
use rand::prelude::*;

const NR_TOPOLOGIES: u64 = 50;

/// Generates a random network. Some of the attempted links are self-loops or have negative
/// costs, and are rejected. Networks are often disconnected.
fn random_network(seed: u64, opts: RoutingOpts) -> anyhow::Result<NetworkTopology> {
    let mut rng = StdRng::seed_from_u64(seed);
    let nr_routers = rng.gen_range(1..12);
    let nr_links = rng.gen_range(0..nr_routers * 2);
    let mut network = NetworkTopology::with_opts(nr_routers, nr_links, opts);
    for _ in 0..nr_links {
        let a = RouterId::new(rng.gen_range(0..nr_routers));
        let b = RouterId::new(rng.gen_range(0..nr_routers));
        // Positive costs make every hop strictly cheaper, so simulated paths cannot loop even
        // when tables break equal-cost ties differently
        let cost = if rng.gen_bool(0.1) {
            -rng.gen_range(1..3)
        } else {
            rng.gen_range(1..10)
        };
        let accepted = network.add_link(a, b, cost).is_ok();
        assert_eq!(accepted, a != b && cost >= 0, "{a} - {b} (cost {cost})");
    }
    network
        .build_routing_tables()
        .with_context(|| format!("failed to build tables for seed {seed}"))?;
    Ok(network)
}

#[test]
fn every_router_reaches_itself_for_free() -> anyhow::Result<()> {
    for seed in 0..NR_TOPOLOGIES {
        let network = random_network(seed, RoutingOpts::default())?;
        for r in network.routers() {
            let table = network.routing_table(r).context("missing table")?;
            assert_eq!(table.distance_to(r).map(|c| c.into_u64()), Some(0));
            assert_eq!(table.next_hop_to(r), None);
        }
    }
    Ok(())
}

#[test]
fn simulated_paths_cost_the_table_distance() -> anyhow::Result<()> {
    for seed in 0..NR_TOPOLOGIES {
        let network = random_network(seed, RoutingOpts::default())?;
        for from in network.routers() {
            let table = network.routing_table(from).context("missing table")?;
            for to in network.routers() {
                let res = network.simulate_path(from, to)?;
                match table.distance_to(to) {
                    Some(distance) => {
                        let path = res.routers().context("reachable router has no path")?;
                        assert_eq!(path.first(), Some(&from));
                        assert_eq!(path.last(), Some(&to));
                        assert_eq!(network.path_cost(path), Some(distance), "seed {seed}");
                    }
                    None => assert_eq!(res, PathResult::NoLink, "seed {seed}"),
                }
            }
        }
    }
    Ok(())
}

#[test]
fn reachability_is_symmetric() -> anyhow::Result<()> {
    for seed in 0..NR_TOPOLOGIES {
        let network = random_network(seed, RoutingOpts::default())?;
        for a in network.routers() {
            for b in network.routers() {
                let ab = network.routing_table(a).context("missing table")?.distance_to(b);
                let ba = network.routing_table(b).context("missing table")?.distance_to(a);
                assert_eq!(ab, ba, "seed {seed}: {a} <-> {b}");
            }
        }
    }
    Ok(())
}

#[test]
fn next_hop_policies_agree() -> anyhow::Result<()> {
    let collapsing = RoutingOpts::builder()
        .policy(NextHopPolicy::Collapsing)
        .build();
    for seed in 0..NR_TOPOLOGIES {
        let a = random_network(seed, RoutingOpts::default())?;
        let b = random_network(seed, collapsing.clone())?;
        assert!(
            a.routing_tables().eq(b.routing_tables()),
            "policies disagree for seed {seed}"
        );
    }
    Ok(())
}

#[test]
fn sequential_and_parallel_builds_agree() -> anyhow::Result<()> {
    let sequential = RoutingOpts::builder().parallel(false).build();
    for seed in 0..NR_TOPOLOGIES {
        let a = random_network(seed, RoutingOpts::default())?;
        let b = random_network(seed, sequential.clone())?;
        assert!(a.routing_tables().eq(b.routing_tables()), "seed {seed}");
    }
    Ok(())
}

#[test]
fn rebuilding_is_deterministic() -> anyhow::Result<()> {
    for seed in 0..NR_TOPOLOGIES {
        let mut network = random_network(seed, RoutingOpts::default())?;
        let before = network.routing_tables().cloned().collect::<Vec<_>>();
        network.build_routing_tables()?;
        let after = network.routing_tables().cloned().collect::<Vec<_>>();
        assert_eq!(before, after, "seed {seed}");
    }
    Ok(())
}
