//! Routing einzelner Events durch den Dispatcher

use nunuk_core::types::Rolle;
use nunuk_protocol::events::{AckEvent, AnswerEvent, OfferEvent};
use nunuk_protocol::ServerEvent;
use serde_json::json;
use std::sync::Arc;

use super::{senden, state_mit_codes, verbinden, TestClient};
use crate::dispatcher::MessageDispatcher;
use crate::server_state::SignalingState;

fn raum(
    state: &Arc<SignalingState>,
    dispatcher: &MessageDispatcher,
    viewer: usize,
) -> (TestClient, Vec<TestClient>) {
    let mut host = verbinden(state);
    senden(dispatcher, &host, r#"{"event":"create-nunuk"}"#);
    let mut viewers: Vec<TestClient> = (0..viewer).map(|_| verbinden(state)).collect();
    for v in &mut viewers {
        senden(dispatcher, v, r#"{"event":"join-nunuk","data":{"nunuk":"TEST01"}}"#);
        v.empfangen();
    }
    host.empfangen();
    (host, viewers)
}

#[test]
fn test_beitritt_unbekannter_code_ack() {
    let state = state_mit_codes(Vec::<&str>::new());
    let dispatcher = MessageDispatcher::neu(Arc::clone(&state));
    let viewer = verbinden(&state);

    let ack = senden(&dispatcher, &viewer, r#"{"event":"join-nunuk","data":{"nunuk":"NOPE00"},"ack":5}"#);

    assert_eq!(
        ack,
        Some(ServerEvent::Ack(AckEvent {
            id: 5,
            success: false,
            nunuk: None,
            message: Some("Nunuk nicht gefunden: NOPE00".into()),
        }))
    );
    assert_eq!(state.aktive_raeume(), 0);
    assert_eq!(state.gebundene_verbindungen(), 0);
}

#[test]
fn test_ohne_ack_keine_antwort() {
    let state = state_mit_codes(["TEST01"]);
    let dispatcher = MessageDispatcher::neu(Arc::clone(&state));
    let host = verbinden(&state);

    assert!(senden(&dispatcher, &host, r#"{"event":"create-nunuk"}"#).is_none());
    assert_eq!(state.aktive_raeume(), 1);
}

#[test]
fn test_zweites_erstellen_per_ack_abgelehnt() {
    let state = state_mit_codes(["TEST01", "TEST02"]);
    let dispatcher = MessageDispatcher::neu(Arc::clone(&state));
    let host = verbinden(&state);

    senden(&dispatcher, &host, r#"{"event":"create-nunuk"}"#);
    let ack = senden(&dispatcher, &host, r#"{"event":"create-nunuk","ack":2}"#);

    assert!(matches!(ack, Some(ServerEvent::Ack(AckEvent { success: false, .. }))));
    assert_eq!(state.aktive_raeume(), 1);
}

#[test]
fn test_offer_und_answer_zwischen_host_und_viewer() {
    let state = state_mit_codes(["TEST01"]);
    let dispatcher = MessageDispatcher::neu(Arc::clone(&state));
    let (mut host, mut viewers) = raum(&state, &dispatcher, 1);
    let viewer = &mut viewers[0];

    let offer = format!(
        r#"{{"event":"offer","data":{{"offer":{{"type":"offer","sdp":"v=0"}},"targetId":"{}"}}}}"#,
        viewer.id
    );
    senden(&dispatcher, &host, &offer);
    assert_eq!(
        viewer.empfangen(),
        vec![ServerEvent::Offer(OfferEvent {
            offer: json!({"type": "offer", "sdp": "v=0"}),
            sender_id: host.id,
        })]
    );

    let answer = format!(
        r#"{{"event":"answer","data":{{"answer":{{"type":"answer"}},"targetId":"{}"}}}}"#,
        host.id
    );
    senden(&dispatcher, viewer, &answer);
    assert_eq!(
        host.empfangen(),
        vec![ServerEvent::Answer(AnswerEvent {
            answer: json!({"type": "answer"}),
            sender_id: viewer.id,
        })]
    );
}

#[test]
fn test_renegotiate_offer_ignoriert_target_id() {
    let state = state_mit_codes(["TEST01"]);
    let dispatcher = MessageDispatcher::neu(Arc::clone(&state));
    let (mut host, mut viewers) = raum(&state, &dispatcher, 2);

    let offer = format!(
        r#"{{"event":"renegotiate-offer","data":{{"offer":{{"sdp":"neu"}},"targetId":"{}"}}}}"#,
        viewers[1].id
    );
    senden(&dispatcher, &viewers[0], &offer);

    assert_eq!(
        host.empfangen(),
        vec![ServerEvent::RenegotiateOffer(OfferEvent {
            offer: json!({"sdp": "neu"}),
            sender_id: viewers[0].id,
        })]
    );
    assert!(viewers[1].empfangen().is_empty());
}

#[test]
fn test_chat_vom_viewer_nie_zurueck_an_absender() {
    let state = state_mit_codes(["TEST01"]);
    let dispatcher = MessageDispatcher::neu(Arc::clone(&state));
    let (mut host, mut viewers) = raum(&state, &dispatcher, 3);

    senden(
        &dispatcher,
        &viewers[1],
        r#"{"event":"chat-message","data":{"message":"selam","senderName":"Can","senderRole":"viewer"}}"#,
    );

    assert!(viewers[1].empfangen().is_empty());
    for client in [&mut host, &mut viewers[0]] {
        match client.empfangen().as_slice() {
            [ServerEvent::ChatMessage(msg)] => {
                assert_eq!(msg.sender_name, "Can");
                assert_eq!(msg.sender_role, Rolle::Viewer);
            }
            andere => panic!("Erwartet genau eine Chat-Nachricht, erhalten {:?}", andere),
        }
    }
    assert_eq!(viewers[2].empfangen().len(), 1);
}

#[test]
fn test_sharing_nur_vom_host() {
    let state = state_mit_codes(["TEST01"]);
    let dispatcher = MessageDispatcher::neu(Arc::clone(&state));
    let (mut host, mut viewers) = raum(&state, &dispatcher, 1);

    senden(&dispatcher, &viewers[0], r#"{"event":"start-sharing","data":{"settings":{}}}"#);
    assert!(host.empfangen().is_empty());

    senden(&dispatcher, &host, r#"{"event":"stop-sharing"}"#);
    assert_eq!(viewers[0].empfangen(), vec![ServerEvent::SharingStopped]);
}

#[test]
fn test_ungebundene_events_werden_verworfen() {
    let state = state_mit_codes(["TEST01"]);
    let dispatcher = MessageDispatcher::neu(Arc::clone(&state));
    let (mut host, _viewers) = raum(&state, &dispatcher, 1);
    let fremd = verbinden(&state);

    for json in [
        r#"{"event":"typing","data":{}}"#,
        r#"{"event":"audio-state-changed","data":{"isMuted":true}}"#,
        r#"{"event":"speaking-state","data":{"isSpeaking":true,"level":0.5}}"#,
        r#"{"event":"chat-message","data":{"message":"?"}}"#,
    ] {
        assert!(senden(&dispatcher, &fremd, json).is_none());
    }
    assert!(host.empfangen().is_empty());
}
