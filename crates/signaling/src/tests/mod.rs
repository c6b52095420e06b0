//! Ende-zu-Ende-Tests ueber den MessageDispatcher

mod dispatcher_tests;

use nunuk_core::types::ConnectionId;
use nunuk_protocol::{ClientFrame, ServerEvent};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::code::FesteCodes;
use crate::dispatcher::MessageDispatcher;
use crate::server_state::{SignalingConfig, SignalingState};

/// Eine simulierte Verbindung mit eigener Send-Queue
pub(crate) struct TestClient {
    pub id: ConnectionId,
    rx: mpsc::Receiver<ServerEvent>,
}

impl TestClient {
    /// Alle bisher eingereihten Events
    pub fn empfangen(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

pub(crate) fn state_mit_codes<'a>(codes: impl IntoIterator<Item = &'a str>) -> Arc<SignalingState> {
    SignalingState::mit_code_quelle(SignalingConfig::default(), Box::new(FesteCodes::neu(codes)))
}

pub(crate) fn verbinden(state: &Arc<SignalingState>) -> TestClient {
    let id = ConnectionId::new();
    let rx = state.broadcaster.client_registrieren(id);
    TestClient { id, rx }
}

pub(crate) fn frame(json: &str) -> ClientFrame {
    ClientFrame::from_json(json).expect("Test-Frame muss gueltig sein")
}

pub(crate) fn senden(
    dispatcher: &MessageDispatcher,
    client: &TestClient,
    json: &str,
) -> Option<ServerEvent> {
    dispatcher.dispatch(frame(json), client.id)
}
