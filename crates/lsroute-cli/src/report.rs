//! Plain-text rendering of routing tables and simulated paths.

use std::io::{self, Write};

use lsroute_core::{NetworkTopology, PathResult};

const RULE: &str = "--------------------------------";

/// Writes the routing table of every router, each framed by rules.
pub(crate) fn write_tables(out: &mut impl Write, network: &NetworkTopology) -> io::Result<()> {
    for table in network.routing_tables() {
        writeln!(out)?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Routing Table for Router {}", table.router())?;
        writeln!(out, "{RULE}")?;
        write!(out, "{table}")?;
        writeln!(out, "{RULE}")?;
    }
    Ok(())
}

pub(crate) fn write_path(
    out: &mut impl Write,
    network: &NetworkTopology,
    res: &PathResult,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "The router will follow the path:")?;
    match res {
        PathResult::NoLink | PathResult::InvalidEndpoints => writeln!(out, "{res}"),
        PathResult::SelfLoop(_) => {
            writeln!(out, "Self loop")?;
            writeln!(out, "{res}")
        }
        PathResult::Path(path) => {
            writeln!(out, "Link exists")?;
            writeln!(out, "{res}")?;
            match network.path_cost(path) {
                Some(cost) => writeln!(out, "Total cost: {cost}"),
                None => Ok(()),
            }
        }
    }
}
