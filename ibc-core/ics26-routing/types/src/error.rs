use displaydoc::Display;
use ibc_core_host_types::error::{ErrorCode, ErrorKind, HostError};
use ibc_core_host_types::identifiers::PortId;
use ibc_primitives::prelude::*;

use crate::module::ModuleId;

const CODESPACE: &str = "port";

/// Error type for the router module.
#[derive(Debug, Display, derive_more::From)]
pub enum RouterError {
    /// no module is bound to port `{port_id}`
    #[from(ignore)]
    UnknownPort { port_id: PortId },
    /// missing module `{module_id}`
    #[from(ignore)]
    MissingModule { module_id: ModuleId },
    /// module `{module_id}` does not own port `{port_id}`
    #[from(ignore)]
    UnauthorizedPort {
        port_id: PortId,
        module_id: ModuleId,
    },
    /// port `{port_id}` is already bound
    #[from(ignore)]
    PortAlreadyBound { port_id: PortId },
    /// host error: `{0}`
    Host(HostError),
}

impl RouterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownPort { .. } | Self::UnauthorizedPort { .. } => ErrorKind::Unauthorized,
            Self::MissingModule { .. } => ErrorKind::NotFound,
            Self::PortAlreadyBound { .. } => ErrorKind::AlreadyExists,
            Self::Host(e) => e.kind(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        let code = match self {
            Self::UnknownPort { .. } => 4001,
            Self::MissingModule { .. } => 4002,
            Self::UnauthorizedPort { .. } => 4003,
            Self::PortAlreadyBound { .. } => 4004,
            Self::Host(e) => return e.code(),
        };
        ErrorCode::new(CODESPACE, code)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Host(e) => Some(e),
            _ => None,
        }
    }
}
