use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a [`crate::GroupList`]. Survives rename and membership
/// changes; minted per build by the [`crate::IdentityContext`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GroupListId(u64);

impl GroupListId {
    pub(crate) fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for GroupListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gl-{}", self.0)
    }
}

/// Stable identity of a [`crate::ScanList`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ScanListId(u64);

impl ScanListId {
    pub(crate) fn from_raw(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ScanListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sl-{}", self.0)
    }
}
