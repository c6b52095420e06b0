//! WebSocket-Endpunkt – Upgrade und Start der Verbindungs-Tasks
//!
//! `GET /ws` wird auf eine WebSocket-Verbindung hochgestuft. axum fuehrt
//! jede hochgestufte Verbindung in einem eigenen Task aus.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::connection::ClientConnection;
use crate::server_state::SignalingState;

/// Erstellt den Router fuer den Event-Transport
pub fn signaling_router(state: Arc<SignalingState>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state)
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<SignalingState>>) -> Response {
    ws.on_upgrade(move |socket| async move {
        ClientConnection::neu(state).verarbeiten(socket).await;
    })
}
