//! This module defines the [`RoutingOpts`] configuration which describes how routing tables are
//! computed.

use crate::routing::NextHopPolicy;

/// Routing options.
#[derive(Debug, Clone, typed_builder::TypedBuilder)]
pub struct RoutingOpts {
    /// How next hops are derived.
    #[builder(default)]
    pub policy: NextHopPolicy,
    /// Compute the routers' tables in parallel.
    #[builder(default = true)]
    pub parallel: bool,
}

impl Default for RoutingOpts {
    fn default() -> Self {
        Self::builder().build()
    }
}
