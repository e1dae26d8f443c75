use core::fmt::{Display, Formatter};

use ibc_core::host::types::path::{
    AckPath, ChannelEndPath, ClientConnectionPath, ClientConsensusStatePath, ClientStatePath,
    CommitmentPath, ConnectionPath, NextClientSequencePath, Path as IbcPath, ReceiptPath,
    SeqAckPath, SeqRecvPath, SeqSendPath,
};

/// A store key. Keys compare by their UTF-8 bytes, which is the order the
/// Merkle tree sorts its leaves in.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(String);

impl Path {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// `prefix/self`
    pub fn prefixed(&self, prefix: &Path) -> Path {
        Path(format!("{}/{}", prefix.0, self.0))
    }

    /// Inverse of [`Path::prefixed`].
    pub fn strip_prefix(&self, prefix: &Path) -> Option<Path> {
        self.0
            .strip_prefix(&prefix.0)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|rest| Path(rest.to_string()))
    }
}

impl From<String> for Path {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! impl_from_ibc_path {
    ($($path:ty),+ $(,)?) => {
        $(impl From<$path> for Path {
            fn from(ibc_path: $path) -> Self {
                Self(ibc_path.to_string())
            }
        })+
    };
}

impl_from_ibc_path!(
    IbcPath,
    NextClientSequencePath,
    ClientStatePath,
    ClientConsensusStatePath,
    ConnectionPath,
    ClientConnectionPath,
    ChannelEndPath,
    SeqSendPath,
    SeqRecvPath,
    SeqAckPath,
    CommitmentPath,
    ReceiptPath,
    AckPath,
);
