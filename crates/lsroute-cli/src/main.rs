use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use lsroute_core::{LinkSpec, NextHopPolicy, RouterId, RoutingOpts, SpecError, TopologySpec};
use log::{info, warn};

mod report;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON topology specification
    #[arg(short, long, conflicts_with_all = ["routers", "links"])]
    topology: Option<PathBuf>,

    /// Number of routers, identified by 0..N
    #[arg(short, long, required_unless_present = "topology")]
    routers: Option<usize>,

    /// A router link, as SRC:DST:COST
    #[arg(short, long = "link", value_parser = parse_link)]
    links: Vec<LinkSpec>,

    /// How next hops are resolved
    #[arg(long, default_value = "predecessor")]
    policy: NextHopPolicy,

    /// Compute routing tables on a single thread
    #[arg(long)]
    sequential: bool,

    /// A path to simulate, as SRC:DST
    #[arg(short, long = "path", value_parser = parse_query)]
    paths: Vec<(RouterId, RouterId)>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let spec = match (&args.topology, args.routers) {
        (Some(path), _) => TopologySpec::from_path(path)?,
        (None, Some(nr_routers)) => TopologySpec::builder()
            .nr_routers(nr_routers)
            .links(args.links.clone())
            .build(),
        (None, None) => anyhow::bail!("either --topology or --routers is required"),
    };
    let opts = RoutingOpts::builder()
        .policy(args.policy)
        .parallel(!args.sequential)
        .build();

    let network = match spec.into_network(opts) {
        Ok(network) => network,
        Err(SpecError::NoLinks) => {
            warn!("No links, therefore an empty network");
            return Ok(());
        }
        Err(e) => return Err(e).context("failed to set up the network"),
    };
    if network.is_empty_of_edges() {
        warn!("Every link was rejected");
    }
    info!(
        "Network has {} routers and {} links",
        network.nr_routers(),
        network.nr_links()
    );

    let mut out = io::stdout().lock();
    report::write_tables(&mut out, &network)?;
    for &(from, to) in &args.paths {
        let res = network
            .simulate_path(from, to)
            .with_context(|| format!("failed to simulate {from} -> {to}"))?;
        report::write_path(&mut out, &network, &res)?;
    }
    Ok(())
}

fn parse_link(s: &str) -> anyhow::Result<LinkSpec> {
    let mut parts = s.split(':');
    let (Some(src), Some(dst), Some(cost), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        anyhow::bail!("expected SRC:DST:COST, got `{s}`");
    };
    Ok(LinkSpec::new(
        src.parse().with_context(|| format!("invalid router `{src}`"))?,
        dst.parse().with_context(|| format!("invalid router `{dst}`"))?,
        cost.parse().with_context(|| format!("invalid cost `{cost}`"))?,
    ))
}

fn parse_query(s: &str) -> anyhow::Result<(RouterId, RouterId)> {
    let (src, dst) = s
        .split_once(':')
        .with_context(|| format!("expected SRC:DST, got `{s}`"))?;
    Ok((
        src.parse().with_context(|| format!("invalid router `{src}`"))?,
        dst.parse().with_context(|| format!("invalid router `{dst}`"))?,
    ))
}
