use ibc_core::channel::types::channel::Order;
use ibc_core::host::types::error::ErrorKind;
use ibc_proto::cosmos::base::query::v1beta1::PageRequest;
use ibc_proto::ibc::core::channel::v1::{
    QueryChannelClientStateRequest, QueryChannelConsensusStateRequest, QueryChannelRequest, QueryChannelsRequest,
    QueryConnectionChannelsRequest, QueryNextSequenceReceiveRequest,
    QueryNextSequenceSendRequest, QueryPacketAcknowledgementRequest,
    QueryPacketAcknowledgementsRequest, QueryPacketCommitmentRequest,
    QueryPacketCommitmentsRequest, QueryPacketReceiptRequest, QueryUnreceivedAcksRequest,
    QueryUnreceivedPacketsRequest,
};
use ibc_proto::ibc::core::client::v1::{
    QueryClientStateRequest, QueryClientStatesRequest, QueryClientStatusRequest,
    QueryConsensusStateHeightsRequest, QueryConsensusStateRequest,
};
use ibc_proto::ibc::core::connection::v1::{
    QueryClientConnectionsRequest, QueryConnectionClientStateRequest, QueryConnectionRequest,
    QueryConnectionsRequest,
};
use ibc_query::core::channel::{
    query_channel, query_channel_client_state, query_channel_consensus_state, query_channels, query_connection_channels,
    query_next_sequence_receive, query_next_sequence_send, query_packet_acknowledgement,
    query_packet_acknowledgements, query_packet_commitment, query_packet_commitments,
    query_packet_receipt, query_unreceived_acks, query_unreceived_packets,
};
use ibc_query::core::client::{
    query_client_state, query_client_states, query_client_status, query_consensus_state,
    query_consensus_state_heights,
};
use ibc_query::core::connection::{
    query_client_connections, query_connection, query_connection_client_state,
    query_connections,
};
use ibc_query::core::pagination::DEFAULT_LIMIT;
use ibc_query::error::QueryError;
use ibc_testkit::relayer::utils::RelayerOps;
use ibc_testkit::testapp::ibc::applications::mock::{AckMode, MockModule};
use ibc_testkit::testapp::ibc::clients::mock::client_state::MOCK_CLIENT_STATE_TYPE_URL;
use ibc_testkit::testapp::ibc::clients::mock::consensus_state::MOCK_CONSENSUS_STATE_TYPE_URL;
use sha2::{Digest, Sha256};

use super::LinkedChains;

/// Chains where `A` sent four packets: the first two were received and
/// acknowledged back, the third only received by `B`, the fourth is still
/// in flight.
fn fixture() -> LinkedChains {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);
    let timeout_height = chains.far_height_on_b();

    for seq in 1..=2 {
        let packet = chains.packet_to_b(seq, b"acked", timeout_height);
        chains.relayer.send_packet_on_a_and_relay(
            &chains.client_id_on_a,
            &chains.client_id_on_b,
            packet,
        );
    }

    let received = chains.packet_to_b(3, b"received", timeout_height);
    chains
        .relayer
        .send_packet_on_a(&chains.client_id_on_b, received.clone());
    let msg = RelayerOps::msg_recv_packet(chains.relayer.get_ctx_a(), received);
    chains
        .relayer
        .get_ctx_b_mut()
        .deliver(msg)
        .expect("success");

    let in_flight = chains.packet_to_b(4, b"in flight", timeout_height);
    chains
        .relayer
        .send_packet_on_a(&chains.client_id_on_b, in_flight);

    chains
}

fn port() -> String {
    MockModule::port_id().to_string()
}

#[test_log::test]
fn client_queries() {
    let chains = fixture();
    let ctx_a = chains.relayer.get_ctx_a();
    let client_id = chains.client_id_on_a.to_string();

    let res = query_client_state(
        ctx_a.ibc_store(),
        &QueryClientStateRequest {
            client_id: client_id.clone(),
        },
    )
    .expect("success");
    assert_eq!(
        res.client_state.expect("client state").type_url,
        MOCK_CLIENT_STATE_TYPE_URL
    );
    assert!(!res.proof.is_empty());
    assert_eq!(res.proof_height, Some(ctx_a.latest_height().into()));

    let res = query_client_states(ctx_a.ibc_store(), &QueryClientStatesRequest::default())
        .expect("success");
    assert_eq!(res.client_states.len(), 1);
    assert_eq!(res.client_states[0].client_id, client_id);

    let res = query_consensus_state(
        ctx_a.ibc_store(),
        &QueryConsensusStateRequest {
            client_id: client_id.clone(),
            revision_number: 0,
            revision_height: 0,
            latest_height: true,
        },
    )
    .expect("success");
    assert_eq!(
        res.consensus_state.expect("consensus state").type_url,
        MOCK_CONSENSUS_STATE_TYPE_URL
    );

    let res = query_consensus_state_heights(
        ctx_a.ibc_store(),
        &QueryConsensusStateHeightsRequest {
            client_id: client_id.clone(),
            pagination: None,
        },
    )
    .expect("success");
    assert!(res.consensus_state_heights.len() > 1);
    assert!(res
        .consensus_state_heights
        .windows(2)
        .all(|pair| pair[0].revision_height < pair[1].revision_height));

    let res = query_client_status(ctx_a.ibc_store(), &QueryClientStatusRequest { client_id })
        .expect("success");
    assert_eq!(res.status, "ACTIVE");
}

#[test_log::test]
fn connection_queries() {
    let chains = fixture();
    let ctx_a = chains.relayer.get_ctx_a();

    let res = query_connection(
        ctx_a.ibc_store(),
        &QueryConnectionRequest {
            connection_id: chains.conn_id_on_a.to_string(),
        },
    )
    .expect("success");
    let connection = res.connection.expect("connection");
    assert_eq!(connection.client_id, chains.client_id_on_a.to_string());
    assert_eq!(
        connection.counterparty.expect("counterparty").connection_id,
        chains.conn_id_on_b.to_string()
    );
    assert!(!res.proof.is_empty());

    let res = query_connections(ctx_a.ibc_store(), &QueryConnectionsRequest::default())
        .expect("success");
    assert_eq!(res.connections.len(), 1);

    let res = query_client_connections(
        ctx_a.ibc_store(),
        &QueryClientConnectionsRequest {
            client_id: chains.client_id_on_a.to_string(),
        },
    )
    .expect("success");
    assert_eq!(res.connection_paths, vec![chains.conn_id_on_a.to_string()]);

    let res = query_connection_client_state(
        ctx_a.ibc_store(),
        &QueryConnectionClientStateRequest {
            connection_id: chains.conn_id_on_a.to_string(),
        },
    )
    .expect("success");
    assert_eq!(
        res.identified_client_state
            .expect("client state")
            .client_id,
        chains.client_id_on_a.to_string()
    );
}

#[test_log::test]
fn channel_queries() {
    let chains = fixture();
    let ctx_a = chains.relayer.get_ctx_a();

    let res = query_channel(
        ctx_a.ibc_store(),
        &QueryChannelRequest {
            port_id: port(),
            channel_id: chains.chan_id_on_a.to_string(),
        },
    )
    .expect("success");
    let channel = res.channel.expect("channel");
    assert_eq!(channel.connection_hops, vec![chains.conn_id_on_a.to_string()]);
    assert_eq!(channel.version, MockModule::version().to_string());

    let res =
        query_channels(ctx_a.ibc_store(), &QueryChannelsRequest::default()).expect("success");
    assert_eq!(res.channels.len(), 1);

    let res = query_connection_channels(
        ctx_a.ibc_store(),
        &QueryConnectionChannelsRequest {
            connection: chains.conn_id_on_a.to_string(),
            pagination: None,
        },
    )
    .expect("success");
    assert_eq!(res.channels.len(), 1);
    assert_eq!(res.channels[0].channel_id, chains.chan_id_on_a.to_string());

    let res = query_channel_client_state(
        ctx_a.ibc_store(),
        &QueryChannelClientStateRequest {
            port_id: port(),
            channel_id: chains.chan_id_on_a.to_string(),
        },
    )
    .expect("success");
    assert_eq!(
        res.identified_client_state
            .expect("client state")
            .client_id,
        chains.client_id_on_a.to_string()
    );

    let latest_height = query_consensus_state_heights(
        ctx_a.ibc_store(),
        &QueryConsensusStateHeightsRequest {
            client_id: chains.client_id_on_a.to_string(),
            pagination: None,
        },
    )
    .expect("success")
    .consensus_state_heights
    .last()
    .expect("at least one consensus state")
    .revision_height;

    let res = query_channel_consensus_state(
        ctx_a.ibc_store(),
        &QueryChannelConsensusStateRequest {
            port_id: port(),
            channel_id: chains.chan_id_on_a.to_string(),
            revision_number: 0,
            revision_height: latest_height,
        },
    )
    .expect("success");
    assert_eq!(res.client_id, chains.client_id_on_a.to_string());
    assert_eq!(
        res.consensus_state.expect("consensus state").type_url,
        MOCK_CONSENSUS_STATE_TYPE_URL
    );
    assert!(!res.proof.is_empty());

    // The client on `A` was created after `B` passed height 1.
    let err = query_channel_consensus_state(
        ctx_a.ibc_store(),
        &QueryChannelConsensusStateRequest {
            port_id: port(),
            channel_id: chains.chan_id_on_a.to_string(),
            revision_number: 0,
            revision_height: 1,
        },
    )
    .expect_err("no consensus state at height 1");
    match err {
        QueryError::Context(e) => assert_eq!(e.kind(), ErrorKind::NotFound),
        e => panic!("unexpected error: {e}"),
    }
}

#[test_log::test]
fn packet_queries_on_the_sending_end() {
    let chains = fixture();
    let ctx_a = chains.relayer.get_ctx_a();
    let channel_id = chains.chan_id_on_a.to_string();

    let res = query_packet_commitments(
        ctx_a.ibc_store(),
        &QueryPacketCommitmentsRequest {
            port_id: port(),
            channel_id: channel_id.clone(),
            pagination: None,
        },
    )
    .expect("success");
    let sequences: Vec<u64> = res.commitments.iter().map(|state| state.sequence).collect();
    assert_eq!(sequences, vec![3, 4]);

    let res = query_packet_commitment(
        ctx_a.ibc_store(),
        &QueryPacketCommitmentRequest {
            port_id: port(),
            channel_id: channel_id.clone(),
            sequence: 4,
        },
    )
    .expect("success");
    assert_eq!(res.commitment.len(), 32);
    assert!(!res.proof.is_empty());

    // `B` reports which of the outstanding commitments it never received,
    // and `A` which acknowledgements it has yet to process.
    let res = query_unreceived_packets(
        chains.relayer.get_ctx_b().ibc_store(),
        &QueryUnreceivedPacketsRequest {
            port_id: port(),
            channel_id: chains.chan_id_on_b.to_string(),
            packet_commitment_sequences: sequences,
        },
    )
    .expect("success");
    assert_eq!(res.sequences, vec![4]);

    let res = query_unreceived_acks(
        ctx_a.ibc_store(),
        &QueryUnreceivedAcksRequest {
            port_id: port(),
            channel_id: channel_id.clone(),
            packet_ack_sequences: vec![1, 2, 3],
        },
    )
    .expect("success");
    assert_eq!(res.sequences, vec![3]);

    let res = query_next_sequence_send(
        ctx_a.ibc_store(),
        &QueryNextSequenceSendRequest {
            port_id: port(),
            channel_id,
        },
    )
    .expect("success");
    assert_eq!(res.next_sequence_send, 5);
    assert!(!res.proof.is_empty());
}

#[test_log::test]
fn packet_queries_on_the_receiving_end() {
    let chains = fixture();
    let ctx_b = chains.relayer.get_ctx_b();
    let channel_id = chains.chan_id_on_b.to_string();

    let res = query_packet_receipt(
        ctx_b.ibc_store(),
        &QueryPacketReceiptRequest {
            port_id: port(),
            channel_id: channel_id.clone(),
            sequence: 3,
        },
    )
    .expect("success");
    assert!(res.received);
    assert!(!res.proof.is_empty());

    // Absence comes with a proof too.
    let res = query_packet_receipt(
        ctx_b.ibc_store(),
        &QueryPacketReceiptRequest {
            port_id: port(),
            channel_id: channel_id.clone(),
            sequence: 4,
        },
    )
    .expect("success");
    assert!(!res.received);
    assert!(!res.proof.is_empty());

    let res = query_packet_acknowledgement(
        ctx_b.ibc_store(),
        &QueryPacketAcknowledgementRequest {
            port_id: port(),
            channel_id: channel_id.clone(),
            sequence: 3,
        },
    )
    .expect("success");
    assert_eq!(res.acknowledgement, Sha256::digest(b"received").to_vec());

    let res = query_packet_acknowledgements(
        ctx_b.ibc_store(),
        &QueryPacketAcknowledgementsRequest {
            port_id: port(),
            channel_id: channel_id.clone(),
            pagination: None,
            packet_commitment_sequences: vec![],
        },
    )
    .expect("success");
    let sequences: Vec<u64> = res
        .acknowledgements
        .iter()
        .map(|state| state.sequence)
        .collect();
    assert_eq!(sequences, vec![1, 2, 3]);

    let res = query_packet_acknowledgements(
        ctx_b.ibc_store(),
        &QueryPacketAcknowledgementsRequest {
            port_id: port(),
            channel_id: channel_id.clone(),
            pagination: None,
            packet_commitment_sequences: vec![2, 4],
        },
    )
    .expect("success");
    assert_eq!(res.acknowledgements.len(), 1);
    assert_eq!(res.acknowledgements[0].sequence, 2);

    let res = query_next_sequence_receive(
        ctx_b.ibc_store(),
        &QueryNextSequenceReceiveRequest {
            port_id: port(),
            channel_id,
        },
    )
    .expect("success");
    // Unordered channels do not track the receive sequence.
    assert_eq!(res.next_sequence_receive, 1);
}

#[test_log::test]
fn missing_entries_and_malformed_identifiers() {
    let chains = fixture();
    let ctx_a = chains.relayer.get_ctx_a();

    let err = query_connection(
        ctx_a.ibc_store(),
        &QueryConnectionRequest {
            connection_id: "connection-9".to_string(),
        },
    )
    .expect_err("no such connection");
    match err {
        QueryError::Context(e) => assert_eq!(e.kind(), ErrorKind::NotFound),
        e => panic!("unexpected error: {e}"),
    }

    let err = query_channel(
        ctx_a.ibc_store(),
        &QueryChannelRequest {
            port_id: port(),
            channel_id: "not a channel".to_string(),
        },
    )
    .expect_err("malformed identifier");
    assert!(matches!(err, QueryError::Decoding(_)));
}

#[test_log::test]
fn packet_commitments_are_paged_in_sequence_order() {
    let mut chains = LinkedChains::new(Order::Unordered, AckMode::Echo);
    let timeout_height = chains.far_height_on_b();

    for seq in 1..=12 {
        let packet = chains.packet_to_b(seq, b"queued", timeout_height);
        chains
            .relayer
            .get_ctx_a_mut()
            .send_packet(packet)
            .expect("success");
    }

    let page = |offset: u64, limit: u64| {
        query_packet_commitments(
            chains.relayer.get_ctx_a().ibc_store(),
            &QueryPacketCommitmentsRequest {
                port_id: port(),
                channel_id: chains.chan_id_on_a.to_string(),
                pagination: Some(PageRequest {
                    offset,
                    limit,
                    count_total: true,
                    ..Default::default()
                }),
            },
        )
        .expect("success")
    };

    // The window spans the 9 to 10 boundary.
    let res = page(6, 5);
    let sequences: Vec<u64> = res.commitments.iter().map(|state| state.sequence).collect();
    assert_eq!(sequences, vec![7, 8, 9, 10, 11]);
    assert_eq!(res.pagination.expect("page response").total, 12);

    let res = page(10, 5);
    let sequences: Vec<u64> = res.commitments.iter().map(|state| state.sequence).collect();
    assert_eq!(sequences, vec![11, 12]);

    // A zero limit falls back to the default page size, which holds them all.
    let res = page(0, 0);
    assert_eq!(res.commitments.len() as u64, DEFAULT_LIMIT.min(12));
}

#[test_log::test]
fn packet_acknowledgements_are_paged() {
    let chains = fixture();

    let res = query_packet_acknowledgements(
        chains.relayer.get_ctx_b().ibc_store(),
        &QueryPacketAcknowledgementsRequest {
            port_id: port(),
            channel_id: chains.chan_id_on_b.to_string(),
            pagination: Some(PageRequest {
                offset: 1,
                limit: 1,
                count_total: true,
                ..Default::default()
            }),
            packet_commitment_sequences: vec![],
        },
    )
    .expect("success");

    let sequences: Vec<u64> = res
        .acknowledgements
        .iter()
        .map(|state| state.sequence)
        .collect();
    assert_eq!(sequences, vec![2]);
    assert_eq!(res.pagination.expect("page response").total, 3);

    let err = query_packet_acknowledgements(
        chains.relayer.get_ctx_b().ibc_store(),
        &QueryPacketAcknowledgementsRequest {
            port_id: port(),
            channel_id: chains.chan_id_on_b.to_string(),
            pagination: Some(PageRequest {
                key: b"next".to_vec(),
                ..Default::default()
            }),
            packet_commitment_sequences: vec![],
        },
    )
    .expect_err("keys are not supported");
    assert!(matches!(err, QueryError::InvalidPagination(_)));
}
