//! Client-Connection – Verwaltet eine einzelne WebSocket-Verbindung
//!
//! Jede WebSocket-Verbindung bekommt eine `ClientConnection` in einem
//! eigenen tokio-Task. Eingehende Frames werden nacheinander vollstaendig
//! verarbeitet, bevor der naechste Frame gelesen wird.
//!
//! ## Ablauf
//! ```text
//! Upgrade -> connected{id} -> Lese-/Sende-Schleife -> Disconnect-Cleanup
//! ```
//! Die Schleife endet bei `disconnect`, Close-Frame, Socket-Fehler oder
//! Shutdown-Signal. Das Aufraeumen laeuft in jedem Fall genau einmal.

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use nunuk_core::types::ConnectionId;
use nunuk_protocol::events::ConnectedEvent;
use nunuk_protocol::{ClientEvent, ClientFrame, ServerEvent};
use std::sync::Arc;

use crate::dispatcher::MessageDispatcher;
use crate::error::SignalingResult;
use crate::server_state::SignalingState;

/// Verarbeitet eine einzelne WebSocket-Verbindung
pub struct ClientConnection {
    state: Arc<SignalingState>,
    conn_id: ConnectionId,
}

impl ClientConnection {
    /// Erstellt eine neue ClientConnection mit frischer Verbindungs-ID
    pub fn neu(state: Arc<SignalingState>) -> Self {
        Self {
            state,
            conn_id: ConnectionId::new(),
        }
    }

    pub fn conn_id(&self) -> ConnectionId {
        self.conn_id
    }

    /// Startet die Verbindungs-Verarbeitungsschleife
    ///
    /// Laeuft bis die Verbindung getrennt wird oder ein Shutdown-Signal
    /// eingeht.
    pub async fn verarbeiten(self, socket: WebSocket) {
        let conn_id = self.conn_id;
        let (mut sink, mut stream) = socket.split();

        // Broadcaster -> Socket
        let mut ausgehend = self.state.broadcaster.client_registrieren(conn_id);
        let mut shutdown_rx = self.state.shutdown_abonnieren();
        let dispatcher = MessageDispatcher::neu(Arc::clone(&self.state));

        tracing::info!(conn_id = %conn_id, "Neue Verbindung");

        let begruessung = ServerEvent::Connected(ConnectedEvent { id: conn_id });
        if let Err(e) = senden(&mut sink, &begruessung).await {
            tracing::warn!(conn_id = %conn_id, fehler = %e, "Begruessung fehlgeschlagen");
            dispatcher.client_cleanup(conn_id);
            return;
        }

        loop {
            if *shutdown_rx.borrow() {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }

            tokio::select! {
                // Eingehender Frame vom Client
                nachricht = stream.next() => {
                    match nachricht {
                        Some(Ok(Message::Text(text))) => {
                            let frame = match ClientFrame::from_json(&text) {
                                Ok(frame) => frame,
                                Err(e) => {
                                    tracing::warn!(
                                        conn_id = %conn_id,
                                        fehler = %e,
                                        "Ungueltiger Frame ignoriert"
                                    );
                                    continue;
                                }
                            };

                            let trennen = matches!(frame.event, ClientEvent::Disconnect);

                            if let Some(antwort) = dispatcher.dispatch(frame, conn_id) {
                                if let Err(e) = senden(&mut sink, &antwort).await {
                                    tracing::warn!(
                                        conn_id = %conn_id,
                                        fehler = %e,
                                        "Senden fehlgeschlagen"
                                    );
                                    break;
                                }
                            }

                            if trennen {
                                tracing::info!(conn_id = %conn_id, "Disconnect vom Client angefordert");
                                let _ = sink.send(Message::Close(None)).await;
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            tracing::info!(conn_id = %conn_id, "Verbindung vom Client getrennt");
                            break;
                        }
                        // Ping/Pong beantwortet axum selbst, Binaer-Frames sind nicht Teil des Protokolls
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::warn!(conn_id = %conn_id, fehler = %e, "Frame-Lesefehler");
                            break;
                        }
                    }
                }

                // Ausgehendes Event aus dem Broadcaster
                Some(event) = ausgehend.recv() => {
                    if let Err(e) = senden(&mut sink, &event).await {
                        tracing::warn!(
                            conn_id = %conn_id,
                            event = event.name(),
                            fehler = %e,
                            "Broadcast-Senden fehlgeschlagen"
                        );
                        break;
                    }
                }

                // Shutdown-Signal
                Ok(()) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::info!(conn_id = %conn_id, "Shutdown-Signal – Verbindung wird getrennt");
                    }
                }
            }
        }

        // Cleanup beim Verbindungsende
        dispatcher.client_cleanup(conn_id);

        tracing::info!(conn_id = %conn_id, "Verbindungs-Task beendet");
    }
}

/// Serialisiert ein Event und schreibt es als Text-Frame
async fn senden(
    sink: &mut SplitSink<WebSocket, Message>,
    event: &ServerEvent,
) -> SignalingResult<()> {
    let json = event.to_json()?;
    sink.send(Message::Text(json)).await?;
    Ok(())
}
