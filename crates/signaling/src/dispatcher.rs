//! Message-Dispatcher – Routet Client-Events an die richtigen Handler
//!
//! Der Dispatcher empfaengt dekodierte Frames einer ClientConnection,
//! ruft den passenden Handler auf und gibt die Ack-Antwort zurueck.
//!
//! ## Lock-Disziplin
//! Alle Handler die Registries lesen oder aendern laufen unter dem
//! gemeinsamen Lock aus `SignalingState::registries()`; ihre Events werden
//! noch unter dem Lock eingereiht. Reine Punkt-zu-Punkt-Signale brauchen
//! den Lock nicht.

use nunuk_core::types::{ConnectionId, RoomCode};
use nunuk_core::NunukError;
use nunuk_protocol::events::AckEvent;
use nunuk_protocol::{ClientEvent, ClientFrame, ServerEvent, SignalArt};
use std::sync::Arc;

use crate::handlers::disconnect_handler::{self, Trennung};
use crate::handlers::{room_event_handler, room_handler, signal_handler};
use crate::server_state::SignalingState;

/// Zentraler Message-Dispatcher
pub struct MessageDispatcher {
    state: Arc<SignalingState>,
}

impl MessageDispatcher {
    /// Erstellt einen neuen Dispatcher
    pub fn neu(state: Arc<SignalingState>) -> Self {
        Self { state }
    }

    /// Verarbeitet einen eingehenden Frame und gibt die Ack-Antwort zurueck
    ///
    /// Gibt `None` zurueck wenn der Client keine Antwort angefordert hat
    /// oder das Event keine Antwort kennt.
    pub fn dispatch(&self, frame: ClientFrame, conn_id: ConnectionId) -> Option<ServerEvent> {
        let ClientFrame { event, ack } = frame;
        tracing::trace!(conn_id = %conn_id, event = event.name(), "Event empfangen");

        let broadcaster = &self.state.broadcaster;

        match event {
            // -------------------------------------------------------------------
            // Raum-Lebenszyklus (mit Ack)
            // -------------------------------------------------------------------
            ClientEvent::CreateNunuk => {
                let ergebnis = room_handler::handle_create(&mut self.state.registries(), conn_id);
                self.ack_oder_loggen(ack, ergebnis, conn_id)
            }

            ClientEvent::JoinNunuk(req) => {
                let ergebnis = room_handler::handle_join(
                    &mut self.state.registries(),
                    broadcaster,
                    conn_id,
                    req.nunuk,
                );
                self.ack_oder_loggen(ack, ergebnis, conn_id)
            }

            // -------------------------------------------------------------------
            // WebRTC-Signaling
            // -------------------------------------------------------------------
            ClientEvent::Offer(req) => {
                self.signal(SignalArt::Offer, req.offer, conn_id, req.target_id);
                None
            }

            ClientEvent::Answer(req) => {
                self.signal(SignalArt::Answer, req.answer, conn_id, req.target_id);
                None
            }

            ClientEvent::IceCandidate(req) => {
                self.signal(SignalArt::IceCandidate, req.candidate, conn_id, req.target_id);
                None
            }

            ClientEvent::RenegotiateAnswer(req) => {
                self.signal(SignalArt::RenegotiateAnswer, req.answer, conn_id, req.target_id);
                None
            }

            ClientEvent::RenegotiateOffer(req) => {
                let ergebnis = signal_handler::handle_renegotiate_offer(
                    &self.state.registries(),
                    broadcaster,
                    req.offer,
                    conn_id,
                );
                if let Err(e) = ergebnis {
                    verworfen(conn_id, "renegotiate-offer", &e);
                }
                None
            }

            // -------------------------------------------------------------------
            // Raum-Events
            // -------------------------------------------------------------------
            ClientEvent::StartSharing(req) => {
                let ergebnis = room_event_handler::handle_start_sharing(
                    &self.state.registries(),
                    broadcaster,
                    conn_id,
                    req.settings,
                );
                self.raum_event_loggen(conn_id, "start-sharing", ergebnis)
            }

            ClientEvent::StopSharing => {
                let ergebnis = room_event_handler::handle_stop_sharing(
                    &self.state.registries(),
                    broadcaster,
                    conn_id,
                );
                self.raum_event_loggen(conn_id, "stop-sharing", ergebnis)
            }

            ClientEvent::AudioStateChanged(req) => {
                let ergebnis = room_event_handler::handle_audio_state(
                    &self.state.registries(),
                    broadcaster,
                    conn_id,
                    req.is_muted,
                );
                self.raum_event_loggen(conn_id, "audio-state-changed", ergebnis)
            }

            ClientEvent::SpeakingState(req) => {
                let ergebnis = room_event_handler::handle_speaking_state(
                    &self.state.registries(),
                    broadcaster,
                    conn_id,
                    req.is_speaking,
                    req.level,
                );
                self.raum_event_loggen(conn_id, "speaking-state", ergebnis)
            }

            ClientEvent::ChatMessage(req) => {
                let ergebnis = room_event_handler::handle_chat_message(
                    &mut self.state.registries(),
                    broadcaster,
                    conn_id,
                    req,
                );
                self.raum_event_loggen(conn_id, "chat-message", ergebnis)
            }

            ClientEvent::Typing(req) => {
                let ergebnis = room_event_handler::handle_typing(
                    &self.state.registries(),
                    broadcaster,
                    conn_id,
                    req,
                );
                self.raum_event_loggen(conn_id, "typing", ergebnis)
            }

            // -------------------------------------------------------------------
            // Transport
            // -------------------------------------------------------------------
            ClientEvent::Disconnect => {
                self.client_cleanup(conn_id);
                None
            }
        }
    }

    /// Raeumt alle Ressourcen einer getrennten Verbindung auf
    ///
    /// Idempotent: ein zweiter Aufruf fuer dieselbe Verbindung ist ein No-op.
    pub fn client_cleanup(&self, conn_id: ConnectionId) -> Trennung {
        let trennung = {
            let mut reg = self.state.registries();
            disconnect_handler::handle_disconnect(&mut reg, &self.state.broadcaster, conn_id)
        };
        self.state.broadcaster.client_entfernen(&conn_id);

        tracing::debug!(conn_id = %conn_id, "Client-Ressourcen bereinigt");
        trennung
    }

    fn signal(
        &self,
        art: SignalArt,
        payload: serde_json::Value,
        sender: ConnectionId,
        ziel: ConnectionId,
    ) {
        if !signal_handler::handle_signal(&self.state.broadcaster, art, payload, sender, ziel) {
            verworfen(sender, art.name(), &NunukError::UnbekanntesZiel(ziel));
        }
    }

    fn ack_oder_loggen(
        &self,
        ack: Option<u64>,
        ergebnis: Result<RoomCode, NunukError>,
        conn_id: ConnectionId,
    ) -> Option<ServerEvent> {
        match ack {
            Some(id) => Some(ack_antwort(id, ergebnis)),
            None => {
                if let Err(e) = ergebnis {
                    verworfen(conn_id, "ack", &e);
                }
                None
            }
        }
    }

    fn raum_event_loggen(
        &self,
        conn_id: ConnectionId,
        event: &'static str,
        ergebnis: Result<usize, NunukError>,
    ) -> Option<ServerEvent> {
        if let Err(e) = ergebnis {
            verworfen(conn_id, event, &e);
        }
        None
    }
}

/// Baut die Ack-Antwort fuer `create-nunuk` / `join-nunuk`
pub fn ack_antwort(id: u64, ergebnis: Result<RoomCode, NunukError>) -> ServerEvent {
    let ack = match ergebnis {
        Ok(code) => AckEvent {
            id,
            success: true,
            nunuk: Some(code),
            message: None,
        },
        Err(e) => AckEvent {
            id,
            success: false,
            nunuk: None,
            message: Some(e.to_string()),
        },
    };
    ServerEvent::Ack(ack)
}

fn verworfen(conn_id: ConnectionId, event: &str, fehler: &NunukError) {
    if fehler.ist_meldepflichtig() {
        tracing::info!(conn_id = %conn_id, event, fehler = %fehler, "Anfrage abgelehnt");
    } else {
        tracing::debug!(conn_id = %conn_id, event, fehler = %fehler, "Event verworfen");
    }
}
