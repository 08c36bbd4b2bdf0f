/// Defines a dense ID type over `usize`. IDs of a collection of `n` items are `0..n`, so an ID
/// doubles as an index into per-item vectors and into the nodes of a `petgraph` graph whose
/// nodes were added in ID order.
macro_rules! dense_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialOrd,
            Ord,
            PartialEq,
            Eq,
            Hash,
            derive_more::Display,
            derive_more::FromStr,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            pub const fn new(val: usize) -> Self {
                Self(val)
            }

            pub const fn inner(self) -> usize {
                self.0
            }

            /// The first `count` IDs, in order.
            pub fn all(count: usize) -> impl Iterator<Item = Self> {
                (0..count).map(Self)
            }
        }

        impl From<$name> for petgraph::graph::NodeIndex {
            fn from(id: $name) -> Self {
                petgraph::graph::NodeIndex::new(id.0)
            }
        }

        impl From<petgraph::graph::NodeIndex> for $name {
            fn from(idx: petgraph::graph::NodeIndex) -> Self {
                Self(idx.index())
            }
        }
    };
}
