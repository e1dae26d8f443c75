//! Channel end and packet state queries.

use alloc::string::ToString;
use core::str::FromStr;

use ibc_core::client::context::prelude::*;
use ibc_core::client::types::error::ClientError;
use ibc_core::client::types::Height;
use ibc_core::host::types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_core::host::types::path::{
    AckPath, ChannelEndPath, ClientConsensusStatePath, ClientStatePath, CommitmentPath,
    ReceiptPath, SeqRecvPath, SeqSendPath,
};
use ibc_core::host::{ClientStateRef, ConsensusStateRef, ValidationContext};
use ibc_core::primitives::proto::Any;
use ibc_proto::ibc::core::channel::v1::{
    QueryChannelClientStateRequest, QueryChannelClientStateResponse,
    QueryChannelConsensusStateRequest, QueryChannelConsensusStateResponse, QueryChannelRequest,
    QueryChannelResponse, QueryChannelsRequest, QueryChannelsResponse,
    QueryConnectionChannelsRequest, QueryConnectionChannelsResponse,
    QueryNextSequenceReceiveRequest, QueryNextSequenceReceiveResponse,
    QueryNextSequenceSendRequest, QueryNextSequenceSendResponse,
    QueryPacketAcknowledgementRequest, QueryPacketAcknowledgementResponse,
    QueryPacketAcknowledgementsRequest, QueryPacketAcknowledgementsResponse,
    QueryPacketCommitmentRequest, QueryPacketCommitmentResponse, QueryPacketCommitmentsRequest,
    QueryPacketCommitmentsResponse, QueryPacketReceiptRequest, QueryPacketReceiptResponse,
    QueryUnreceivedAcksRequest, QueryUnreceivedAcksResponse, QueryUnreceivedPacketsRequest,
    QueryUnreceivedPacketsResponse,
};
use ibc_proto::ibc::core::client::v1::IdentifiedClientState;

use crate::core::context::{ProvableContext, QueryContext};
use crate::core::pagination::paginate;
use crate::core::proof::prove_at_host_height;
use crate::error::QueryError;

fn parse_channel(port_id: &str, channel_id: &str) -> Result<(PortId, ChannelId), QueryError> {
    Ok((PortId::from_str(port_id)?, ChannelId::from_str(channel_id)?))
}

fn channel_end_path(port_id: &str, channel_id: &str) -> Result<ChannelEndPath, QueryError> {
    let (port_id, channel_id) = parse_channel(port_id, channel_id)?;
    Ok(ChannelEndPath::new(&port_id, &channel_id))
}

pub fn query_channel<I>(
    ibc_ctx: &I,
    request: &QueryChannelRequest,
) -> Result<QueryChannelResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let channel_end_path = channel_end_path(&request.port_id, &request.channel_id)?;

    let channel_end = ibc_ctx.channel_end(&channel_end_path)?;

    let (proof, proof_height) = prove_at_host_height(ibc_ctx, channel_end_path)?;

    Ok(QueryChannelResponse {
        channel: Some(channel_end.into()),
        proof,
        proof_height,
    })
}

pub fn query_channels<I>(
    ibc_ctx: &I,
    _request: &QueryChannelsRequest,
) -> Result<QueryChannelsResponse, QueryError>
where
    I: QueryContext,
{
    let channels = ibc_ctx
        .channel_ends()?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(QueryChannelsResponse {
        channels,
        pagination: None,
        height: Some(ibc_ctx.host_height()?.into()),
    })
}

/// Lists the channels whose single connection hop is the requested
/// connection.
pub fn query_connection_channels<I>(
    ibc_ctx: &I,
    request: &QueryConnectionChannelsRequest,
) -> Result<QueryConnectionChannelsResponse, QueryError>
where
    I: QueryContext,
{
    let connection_id = ConnectionId::from_str(&request.connection)?;

    let channels = ibc_ctx
        .channel_ends()?
        .into_iter()
        .filter(|identified| {
            identified
                .channel_end
                .connection_hops()
                .contains(&connection_id)
        })
        .map(Into::into)
        .collect();

    Ok(QueryConnectionChannelsResponse {
        channels,
        pagination: None,
        height: Some(ibc_ctx.host_height()?.into()),
    })
}

/// Queries the state of the client underneath a channel's connection.
pub fn query_channel_client_state<I>(
    ibc_ctx: &I,
    request: &QueryChannelClientStateRequest,
) -> Result<QueryChannelClientStateResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
    ClientStateRef<I>: Into<Any>,
{
    let channel_end_path = channel_end_path(&request.port_id, &request.channel_id)?;

    let channel_end = ibc_ctx.channel_end(&channel_end_path)?;
    let connection_end = ibc_ctx.connection_end(channel_end.connection_hop()?)?;
    let client_id = connection_end.client_id().clone();
    let client_state = ibc_ctx
        .get_client_validation_context()
        .client_state(&client_id)?;

    let (proof, proof_height) =
        prove_at_host_height(ibc_ctx, ClientStatePath::new(client_id.clone()))?;

    Ok(QueryChannelClientStateResponse {
        identified_client_state: Some(IdentifiedClientState {
            client_id: client_id.to_string(),
            client_state: Some(client_state.into()),
        }),
        proof,
        proof_height,
    })
}

/// Queries the consensus state, at the requested height, of the client
/// underneath a channel's connection.
pub fn query_channel_consensus_state<I>(
    ibc_ctx: &I,
    request: &QueryChannelConsensusStateRequest,
) -> Result<QueryChannelConsensusStateResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
    ConsensusStateRef<I>: Into<Any>,
{
    let channel_end_path = channel_end_path(&request.port_id, &request.channel_id)?;

    let channel_end = ibc_ctx.channel_end(&channel_end_path)?;
    let connection_end = ibc_ctx.connection_end(channel_end.connection_hop()?)?;
    let client_id = connection_end.client_id().clone();

    if request.revision_number != 0 {
        return Err(ClientError::InvalidHeight.into());
    }
    let height = Height::new(request.revision_height)?;

    let consensus_state_path = ClientConsensusStatePath::new(client_id.clone(), height.value());
    let consensus_state = ibc_ctx
        .get_client_validation_context()
        .consensus_state(&consensus_state_path)?;

    let (proof, proof_height) = prove_at_host_height(ibc_ctx, consensus_state_path)?;

    Ok(QueryChannelConsensusStateResponse {
        consensus_state: Some(consensus_state.into()),
        client_id: client_id.to_string(),
        proof,
        proof_height,
    })
}

pub fn query_packet_commitment<I>(
    ibc_ctx: &I,
    request: &QueryPacketCommitmentRequest,
) -> Result<QueryPacketCommitmentResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let (port_id, channel_id) = parse_channel(&request.port_id, &request.channel_id)?;
    let commitment_path =
        CommitmentPath::new(&port_id, &channel_id, Sequence::from(request.sequence));

    let commitment = ibc_ctx.get_packet_commitment(&commitment_path)?;

    let (proof, proof_height) = prove_at_host_height(ibc_ctx, commitment_path)?;

    Ok(QueryPacketCommitmentResponse {
        commitment: commitment.into_vec(),
        proof,
        proof_height,
    })
}

/// Lists the packet commitments still stored for a channel, in sequence
/// order, one page at a time.
pub fn query_packet_commitments<I>(
    ibc_ctx: &I,
    request: &QueryPacketCommitmentsRequest,
) -> Result<QueryPacketCommitmentsResponse, QueryError>
where
    I: QueryContext,
{
    let channel_end_path = channel_end_path(&request.port_id, &request.channel_id)?;

    let (commitments, pagination) = paginate(
        ibc_ctx.packet_commitments(&channel_end_path)?,
        request.pagination.as_ref(),
    )?;

    Ok(QueryPacketCommitmentsResponse {
        commitments: commitments.into_iter().map(Into::into).collect(),
        pagination: Some(pagination),
        height: Some(ibc_ctx.host_height()?.into()),
    })
}

/// Reports whether a packet was received on an unordered channel. The proof
/// is a non-membership proof when it was not.
pub fn query_packet_receipt<I>(
    ibc_ctx: &I,
    request: &QueryPacketReceiptRequest,
) -> Result<QueryPacketReceiptResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let (port_id, channel_id) = parse_channel(&request.port_id, &request.channel_id)?;
    let receipt_path = ReceiptPath::new(&port_id, &channel_id, Sequence::from(request.sequence));

    let receipt = ibc_ctx.get_packet_receipt(&receipt_path)?;

    let (proof, proof_height) = prove_at_host_height(ibc_ctx, receipt_path)?;

    Ok(QueryPacketReceiptResponse {
        received: receipt.is_ok(),
        proof,
        proof_height,
    })
}

pub fn query_packet_acknowledgement<I>(
    ibc_ctx: &I,
    request: &QueryPacketAcknowledgementRequest,
) -> Result<QueryPacketAcknowledgementResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let (port_id, channel_id) = parse_channel(&request.port_id, &request.channel_id)?;
    let ack_path = AckPath::new(&port_id, &channel_id, Sequence::from(request.sequence));

    let acknowledgement = ibc_ctx.get_packet_acknowledgement(&ack_path)?;

    let (proof, proof_height) = prove_at_host_height(ibc_ctx, ack_path)?;

    Ok(QueryPacketAcknowledgementResponse {
        acknowledgement: acknowledgement.into_vec(),
        proof,
        proof_height,
    })
}

/// Lists the acknowledgement hashes of the requested sequences, or of every
/// acknowledged sequence when none are given, one page at a time.
pub fn query_packet_acknowledgements<I>(
    ibc_ctx: &I,
    request: &QueryPacketAcknowledgementsRequest,
) -> Result<QueryPacketAcknowledgementsResponse, QueryError>
where
    I: QueryContext,
{
    let channel_end_path = channel_end_path(&request.port_id, &request.channel_id)?;
    let sequences = request
        .packet_commitment_sequences
        .iter()
        .copied()
        .map(Sequence::from);

    let (acknowledgements, pagination) = paginate(
        ibc_ctx.packet_acknowledgements(&channel_end_path, sequences)?,
        request.pagination.as_ref(),
    )?;

    Ok(QueryPacketAcknowledgementsResponse {
        acknowledgements: acknowledgements.into_iter().map(Into::into).collect(),
        pagination: Some(pagination),
        height: Some(ibc_ctx.host_height()?.into()),
    })
}

/// Filters the given sequences, sent by the counterparty, down to those
/// this chain has not received.
pub fn query_unreceived_packets<I>(
    ibc_ctx: &I,
    request: &QueryUnreceivedPacketsRequest,
) -> Result<QueryUnreceivedPacketsResponse, QueryError>
where
    I: QueryContext,
{
    let channel_end_path = channel_end_path(&request.port_id, &request.channel_id)?;
    let sequences = request
        .packet_commitment_sequences
        .iter()
        .copied()
        .map(Sequence::from);

    let unreceived = ibc_ctx.unreceived_packets(&channel_end_path, sequences)?;

    Ok(QueryUnreceivedPacketsResponse {
        sequences: unreceived.iter().map(Sequence::value).collect(),
        height: Some(ibc_ctx.host_height()?.into()),
    })
}

/// Filters the given sequences, acknowledged by the counterparty, down to
/// those whose acknowledgement this chain has not processed.
pub fn query_unreceived_acks<I>(
    ibc_ctx: &I,
    request: &QueryUnreceivedAcksRequest,
) -> Result<QueryUnreceivedAcksResponse, QueryError>
where
    I: QueryContext,
{
    let channel_end_path = channel_end_path(&request.port_id, &request.channel_id)?;
    let sequences = request
        .packet_ack_sequences
        .iter()
        .copied()
        .map(Sequence::from);

    let unreceived = ibc_ctx.unreceived_acks(&channel_end_path, sequences)?;

    Ok(QueryUnreceivedAcksResponse {
        sequences: unreceived.iter().map(Sequence::value).collect(),
        height: Some(ibc_ctx.host_height()?.into()),
    })
}

pub fn query_next_sequence_send<I>(
    ibc_ctx: &I,
    request: &QueryNextSequenceSendRequest,
) -> Result<QueryNextSequenceSendResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let (port_id, channel_id) = parse_channel(&request.port_id, &request.channel_id)?;
    let seq_send_path = SeqSendPath::new(&port_id, &channel_id);

    let next_sequence_send = ibc_ctx.get_next_sequence_send(&seq_send_path)?;

    let (proof, proof_height) = prove_at_host_height(ibc_ctx, seq_send_path)?;

    Ok(QueryNextSequenceSendResponse {
        next_sequence_send: next_sequence_send.value(),
        proof,
        proof_height,
    })
}

pub fn query_next_sequence_receive<I>(
    ibc_ctx: &I,
    request: &QueryNextSequenceReceiveRequest,
) -> Result<QueryNextSequenceReceiveResponse, QueryError>
where
    I: ValidationContext + ProvableContext,
{
    let (port_id, channel_id) = parse_channel(&request.port_id, &request.channel_id)?;
    let seq_recv_path = SeqRecvPath::new(&port_id, &channel_id);

    let next_sequence_receive = ibc_ctx.get_next_sequence_recv(&seq_recv_path)?;

    let (proof, proof_height) = prove_at_host_height(ibc_ctx, seq_recv_path)?;

    Ok(QueryNextSequenceReceiveResponse {
        next_sequence_receive: next_sequence_receive.value(),
        proof,
        proof_height,
    })
}
