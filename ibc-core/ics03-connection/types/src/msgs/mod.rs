//! Message definitions for the connection handshake datagrams.
//!
//! Each of the four handshake steps is a `struct`. The three counterparty
//! fields (client id, connection id and prefix) are grouped into a single
//! [`Counterparty`](crate::Counterparty). Identifiers of the local end are
//! chosen by the sender and validated when the message is handled.
//!
//! Field names follow the `_on_a` / `_on_b` convention: chain A starts the
//! handshake with `ConnOpenInit`, chain B answers with `ConnOpenTry`.

mod conn_open_ack;
mod conn_open_confirm;
mod conn_open_init;
mod conn_open_try;

pub use conn_open_ack::*;
pub use conn_open_confirm::*;
pub use conn_open_init::*;
pub use conn_open_try::*;

/// Enumeration of all possible messages that the ICS3 protocol processes.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum ConnectionMsg {
    OpenInit(MsgConnectionOpenInit),
    OpenTry(MsgConnectionOpenTry),
    OpenAck(MsgConnectionOpenAck),
    OpenConfirm(MsgConnectionOpenConfirm),
}
