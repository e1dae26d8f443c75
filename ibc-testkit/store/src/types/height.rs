use core::fmt::{Display, Formatter};

pub type RawHeight = u64;

/// Which version of the store to read.
#[derive(Debug, Copy, Clone, Eq, Ord, PartialEq, PartialOrd)]
pub enum Height {
    /// The uncommitted state.
    Pending,
    /// The last committed state.
    Latest,
    Stable(RawHeight),
}

impl Display for Height {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Height::Pending => write!(f, "pending"),
            Height::Latest => write!(f, "latest"),
            Height::Stable(height) => write!(f, "{height}"),
        }
    }
}

/// Zero reads the latest committed state.
impl From<RawHeight> for Height {
    fn from(value: RawHeight) -> Self {
        match value {
            0 => Height::Latest,
            _ => Height::Stable(value),
        }
    }
}
