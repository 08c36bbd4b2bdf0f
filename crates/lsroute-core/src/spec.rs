//! This module defines topology specifications ([`TopologySpec`]), which consist of a router
//! count and a list of links. A specification turns into a [`NetworkTopology`] with its routing
//! tables built.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use log::warn;

use crate::{
    network::{types::RouterId, NetworkTopology},
    opts::RoutingOpts,
    routing::RoutingError,
};

/// A topology specification.
#[derive(Debug, Clone, typed_builder::TypedBuilder, serde::Serialize, serde::Deserialize)]
pub struct TopologySpec {
    /// Number of routers. Routers are identified by `0..nr_routers`.
    pub nr_routers: usize,
    /// Router links.
    #[builder(default)]
    #[serde(default)]
    pub links: Vec<LinkSpec>,
}

/// A requested link. The cost is signed so that negative costs can be reported rather than
/// rejected by the parser.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_new::new, serde::Serialize, serde::Deserialize,
)]
pub struct LinkSpec {
    pub source: RouterId,
    pub destination: RouterId,
    pub cost: i64,
}

impl TopologySpec {
    /// Reads a JSON specification from `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SpecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let spec = serde_json::from_reader(BufReader::new(file))?;
        Ok(spec)
    }

    /// Validate a specification.
    ///
    /// Correctness properties:
    ///
    /// - There must be at least one router.
    /// - There must be at least one link.
    pub fn validate(&self) -> Result<(), SpecError> {
        // CORRECTNESS: There must be at least one router.
        if self.nr_routers == 0 {
            return Err(SpecError::NoRouters);
        }
        // CORRECTNESS: There must be at least one link.
        if self.links.is_empty() {
            return Err(SpecError::NoLinks);
        }
        Ok(())
    }

    /// Validates the specification, adds its links and builds the routing tables. Links the
    /// topology rejects are skipped with a warning.
    pub fn into_network(self, opts: RoutingOpts) -> Result<NetworkTopology, SpecError> {
        self.validate()?;
        let mut network = NetworkTopology::with_opts(self.nr_routers, self.links.len(), opts);
        for (i, link) in self.links.iter().enumerate() {
            if let Err(e) = network.add_link(link.source, link.destination, link.cost) {
                warn!(
                    "Link {} ({} - {}, cost {}) not added: {e}",
                    i + 1,
                    link.source,
                    link.destination,
                    link.cost
                );
            }
        }
        network.build_routing_tables()?;
        Ok(network)
    }
}

/// Topology specification error.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// The specification could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The specification is not valid JSON.
    #[error("failed to parse specification")]
    Parse(#[from] serde_json::Error),

    /// The network has no routers.
    #[error("no routers, therefore an empty network")]
    NoRouters,

    /// The network has no links.
    #[error("no links, therefore an empty network")]
    NoLinks,

    /// The routing tables could not be built.
    #[error("failed to build routing tables")]
    Routing(#[from] RoutingError),
}
