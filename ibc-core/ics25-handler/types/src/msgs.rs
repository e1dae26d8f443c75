use ibc_core_channel_types::msgs::{
    ChannelMsg, PacketMsg, ACKNOWLEDGEMENT_TYPE_URL, CHAN_CLOSE_CONFIRM_TYPE_URL,
    CHAN_CLOSE_INIT_TYPE_URL, CHAN_OPEN_ACK_TYPE_URL, CHAN_OPEN_CONFIRM_TYPE_URL,
    CHAN_OPEN_INIT_TYPE_URL, CHAN_OPEN_TRY_TYPE_URL, RECV_PACKET_TYPE_URL,
    TIMEOUT_ON_CLOSE_TYPE_URL, TIMEOUT_TYPE_URL,
};
use ibc_core_client_types::msgs::{ClientMsg, CREATE_CLIENT_TYPE_URL, UPDATE_CLIENT_TYPE_URL};
use ibc_core_connection_types::msgs::{
    ConnectionMsg, CONN_OPEN_ACK_TYPE_URL, CONN_OPEN_CONFIRM_TYPE_URL, CONN_OPEN_INIT_TYPE_URL,
    CONN_OPEN_TRY_TYPE_URL,
};
use ibc_primitives::Signer;

/// Enumeration of all messages that the IBC handler is capable of routing.
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum MsgEnvelope {
    Client(ClientMsg),
    Connection(ConnectionMsg),
    Channel(ChannelMsg),
    Packet(PacketMsg),
}

impl MsgEnvelope {
    pub fn signer(&self) -> &Signer {
        match self {
            MsgEnvelope::Client(msg) => match msg {
                ClientMsg::CreateClient(msg) => &msg.signer,
                ClientMsg::UpdateClient(msg) => &msg.signer,
            },
            MsgEnvelope::Connection(msg) => match msg {
                ConnectionMsg::OpenInit(msg) => &msg.signer,
                ConnectionMsg::OpenTry(msg) => &msg.signer,
                ConnectionMsg::OpenAck(msg) => &msg.signer,
                ConnectionMsg::OpenConfirm(msg) => &msg.signer,
            },
            MsgEnvelope::Channel(msg) => match msg {
                ChannelMsg::OpenInit(msg) => &msg.signer,
                ChannelMsg::OpenTry(msg) => &msg.signer,
                ChannelMsg::OpenAck(msg) => &msg.signer,
                ChannelMsg::OpenConfirm(msg) => &msg.signer,
                ChannelMsg::CloseInit(msg) => &msg.signer,
                ChannelMsg::CloseConfirm(msg) => &msg.signer,
            },
            MsgEnvelope::Packet(msg) => match msg {
                PacketMsg::Recv(msg) => &msg.signer,
                PacketMsg::Ack(msg) => &msg.signer,
                PacketMsg::Timeout(msg) => &msg.signer,
                PacketMsg::TimeoutOnClose(msg) => &msg.signer,
            },
        }
    }

    pub fn type_url(&self) -> &'static str {
        match self {
            MsgEnvelope::Client(msg) => match msg {
                ClientMsg::CreateClient(_) => CREATE_CLIENT_TYPE_URL,
                ClientMsg::UpdateClient(_) => UPDATE_CLIENT_TYPE_URL,
            },
            MsgEnvelope::Connection(msg) => match msg {
                ConnectionMsg::OpenInit(_) => CONN_OPEN_INIT_TYPE_URL,
                ConnectionMsg::OpenTry(_) => CONN_OPEN_TRY_TYPE_URL,
                ConnectionMsg::OpenAck(_) => CONN_OPEN_ACK_TYPE_URL,
                ConnectionMsg::OpenConfirm(_) => CONN_OPEN_CONFIRM_TYPE_URL,
            },
            MsgEnvelope::Channel(msg) => match msg {
                ChannelMsg::OpenInit(_) => CHAN_OPEN_INIT_TYPE_URL,
                ChannelMsg::OpenTry(_) => CHAN_OPEN_TRY_TYPE_URL,
                ChannelMsg::OpenAck(_) => CHAN_OPEN_ACK_TYPE_URL,
                ChannelMsg::OpenConfirm(_) => CHAN_OPEN_CONFIRM_TYPE_URL,
                ChannelMsg::CloseInit(_) => CHAN_CLOSE_INIT_TYPE_URL,
                ChannelMsg::CloseConfirm(_) => CHAN_CLOSE_CONFIRM_TYPE_URL,
            },
            MsgEnvelope::Packet(msg) => match msg {
                PacketMsg::Recv(_) => RECV_PACKET_TYPE_URL,
                PacketMsg::Ack(_) => ACKNOWLEDGEMENT_TYPE_URL,
                PacketMsg::Timeout(_) => TIMEOUT_TYPE_URL,
                PacketMsg::TimeoutOnClose(_) => TIMEOUT_ON_CLOSE_TYPE_URL,
            },
        }
    }

    /// Whether the message can be part of a transaction checked by the
    /// proof-verification pre-pass: client updates and packet messages.
    pub fn is_pre_pass_eligible(&self) -> bool {
        matches!(
            self,
            MsgEnvelope::Client(ClientMsg::UpdateClient(_)) | MsgEnvelope::Packet(_)
        )
    }
}
