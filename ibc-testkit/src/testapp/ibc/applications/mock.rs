//! An application module that records what the core hands to it.

use std::sync::Arc;

use ibc_core::channel::types::acknowledgement::Acknowledgement;
use ibc_core::channel::types::channel::{Counterparty, Order};
use ibc_core::channel::types::error::{ChannelError, PacketError};
use ibc_core::channel::types::packet::Packet;
use ibc_core::channel::types::Version;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_core::primitives::prelude::*;
use ibc_core::primitives::Signer;
use ibc_core::router::module::Module;
use ibc_core::router::types::event::ModuleEvent;
use ibc_core::router::types::module::ModuleExtras;
use parking_lot::Mutex;

pub const MOCK_MODULE_ID: &str = "mock";
pub const MOCK_PORT_ID: &str = "mock";
pub const MOCK_APP_VERSION: &str = "mock-1";

/// How the module acknowledges a received packet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AckMode {
    /// The acknowledgement is the packet data, written right away.
    #[default]
    Echo,
    /// Nothing is written on receipt; the acknowledgement comes later
    /// through `write_acknowledgement`.
    Async,
    /// An empty acknowledgement, which ordered channels accept as "nothing
    /// to write".
    Empty,
}

/// Everything the module has been told about, in order.
#[derive(Clone, Debug, Default)]
pub struct MockModuleState {
    pub opened_channels: Vec<(PortId, ChannelId)>,
    pub closed_channels: Vec<(PortId, ChannelId)>,
    pub received: Vec<Packet>,
    pub acknowledged: Vec<(Packet, Acknowledgement)>,
    pub timed_out: Vec<Packet>,
}

#[derive(Clone, Debug, Default)]
pub struct MockModule {
    ack_mode: AckMode,
    state: Arc<Mutex<MockModuleState>>,
}

impl MockModule {
    pub fn new(ack_mode: AckMode) -> Self {
        Self {
            ack_mode,
            state: Default::default(),
        }
    }

    pub fn port_id() -> PortId {
        PortId::new(MOCK_PORT_ID.to_string()).expect("never fails because it's valid")
    }

    pub fn version() -> Version {
        Version::new(MOCK_APP_VERSION.to_string())
    }

    /// A handle on the recorded state that stays valid once the module is
    /// moved into a router.
    pub fn state(&self) -> Arc<Mutex<MockModuleState>> {
        self.state.clone()
    }

    /// Settles the version of a new channel end: an empty proposal gets the
    /// module's version, anything else must be exactly that version.
    fn negotiate(version: &Version) -> Result<Version, ChannelError> {
        if version.is_empty() {
            return Ok(Self::version());
        }

        if version != &Self::version() {
            return Err(ChannelError::AppModule {
                description: format!("unsupported version `{version}`, expected `{MOCK_APP_VERSION}`"),
            });
        }

        Ok(version.clone())
    }

    fn extras(kind: &str, port_id: &PortId, channel_id: &ChannelId) -> ModuleExtras {
        ModuleExtras {
            events: vec![ModuleEvent {
                kind: kind.to_string(),
                attributes: vec![("port_id", port_id).into(), ("channel_id", channel_id).into()],
            }],
            log: vec![format!("mock: {kind} on {port_id}/{channel_id}")],
        }
    }
}

impl Module for MockModule {
    fn on_chan_open_init_validate(
        &self,
        _order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        version: &Version,
    ) -> Result<Version, ChannelError> {
        Self::negotiate(version)
    }

    fn on_chan_open_init_execute(
        &mut self,
        _order: Order,
        _connection_hops: &[ConnectionId],
        port_id: &PortId,
        channel_id: &ChannelId,
        _counterparty: &Counterparty,
        version: &Version,
    ) -> Result<(ModuleExtras, Version), ChannelError> {
        let version = Self::negotiate(version)?;

        Ok((Self::extras("chan_open_init", port_id, channel_id), version))
    }

    fn on_chan_open_try_validate(
        &self,
        _order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        counterparty_version: &Version,
    ) -> Result<Version, ChannelError> {
        Self::negotiate(counterparty_version)
    }

    fn on_chan_open_try_execute(
        &mut self,
        _order: Order,
        _connection_hops: &[ConnectionId],
        port_id: &PortId,
        channel_id: &ChannelId,
        _counterparty: &Counterparty,
        counterparty_version: &Version,
    ) -> Result<(ModuleExtras, Version), ChannelError> {
        let version = Self::negotiate(counterparty_version)?;

        Ok((Self::extras("chan_open_try", port_id, channel_id), version))
    }

    fn on_chan_open_ack_validate(
        &self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        counterparty_version: &Version,
    ) -> Result<(), ChannelError> {
        Self::negotiate(counterparty_version).map(|_| ())
    }

    fn on_chan_open_ack_execute(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
        _counterparty_version: &Version,
    ) -> Result<ModuleExtras, ChannelError> {
        self.state
            .lock()
            .opened_channels
            .push((port_id.clone(), channel_id.clone()));

        Ok(Self::extras("chan_open_ack", port_id, channel_id))
    }

    fn on_chan_open_confirm_execute(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        self.state
            .lock()
            .opened_channels
            .push((port_id.clone(), channel_id.clone()));

        Ok(Self::extras("chan_open_confirm", port_id, channel_id))
    }

    fn on_chan_close_init_execute(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        self.state
            .lock()
            .closed_channels
            .push((port_id.clone(), channel_id.clone()));

        Ok(Self::extras("chan_close_init", port_id, channel_id))
    }

    fn on_chan_close_confirm_execute(
        &mut self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        self.state
            .lock()
            .closed_channels
            .push((port_id.clone(), channel_id.clone()));

        Ok(Self::extras("chan_close_confirm", port_id, channel_id))
    }

    fn on_recv_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Option<Acknowledgement>) {
        self.state.lock().received.push(packet.clone());

        let ack = match self.ack_mode {
            AckMode::Echo => Some(Acknowledgement::from(packet.data.clone())),
            AckMode::Async => None,
            AckMode::Empty => Some(Acknowledgement::default()),
        };

        (
            Self::extras("recv_packet", &packet.port_id_on_b, &packet.chan_id_on_b),
            ack,
        )
    }

    fn on_acknowledgement_packet_execute(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        self.state
            .lock()
            .acknowledged
            .push((packet.clone(), acknowledgement.clone()));

        (
            Self::extras("acknowledge_packet", &packet.port_id_on_a, &packet.chan_id_on_a),
            Ok(()),
        )
    }

    fn on_timeout_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        self.state.lock().timed_out.push(packet.clone());

        (
            Self::extras("timeout_packet", &packet.port_id_on_a, &packet.chan_id_on_a),
            Ok(()),
        )
    }
}
