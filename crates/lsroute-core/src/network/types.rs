use std::fmt;

dense_id!(
    /// A router, identified by its position in `0..nr_routers`.
    RouterId
);

/// The cost of a link, or the cumulative cost of a path.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialOrd,
    Ord,
    PartialEq,
    Eq,
    Hash,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Sum,
    derive_more::Display,
    derive_more::FromStr,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Cost(u64);

impl Cost {
    pub const ZERO: Cost = Self::new(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn into_u64(self) -> u64 {
        self.0
    }

    pub fn checked_add(self, other: Cost) -> Option<Cost> {
        self.0.checked_add(other.0).map(Self)
    }
}

/// An undirected link that has been accepted into a topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, derive_new::new, serde::Serialize)]
pub struct Link {
    pub a: RouterId,
    pub b: RouterId,
    pub cost: Cost,
}

impl Link {
    /// The same link with its endpoints in ascending order.
    pub fn normalized(self) -> Self {
        if self.a <= self.b {
            self
        } else {
            Self::new(self.b, self.a, self.cost)
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} (cost {})", self.a, self.b, self.cost)
    }
}
