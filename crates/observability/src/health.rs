//! Health-Check-Endpunkt fuer Nunuk
//!
//! Endpoint: `GET /health`
//! Response: JSON mit Status, Raum- und Verbindungszahlen, Version und Uptime

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Liefert die Zaehler fuer den Health-Check
///
/// Wird vom Server fuer den Signaling-Zustand implementiert.
pub trait AktivitaetsQuelle: Send + Sync {
    /// Anzahl aktiver Raeume
    fn aktive_raeume(&self) -> usize;
    /// Anzahl der als Host oder Viewer gebundenen Verbindungen
    fn gebundene_verbindungen(&self) -> usize;
    /// Anzahl offener Verbindungen (auch ungebundene)
    fn offene_verbindungen(&self) -> usize;
    /// Uptime in Sekunden
    fn uptime_sek(&self) -> u64;
}

/// Antwort des Health-Check-Endpunkts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub active_rooms: usize,
    pub active_users: usize,
    pub active_connections: usize,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn aus_quelle(quelle: &dyn AktivitaetsQuelle) -> Self {
        Self {
            status: "OK".to_string(),
            active_rooms: quelle.aktive_raeume(),
            active_users: quelle.gebundene_verbindungen(),
            active_connections: quelle.offene_verbindungen(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: quelle.uptime_sek(),
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }
}

/// Axum-Router fuer den `/health`-Endpunkt
pub fn health_router(quelle: Arc<dyn AktivitaetsQuelle>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(quelle)
}

/// `GET /health` – gibt den Serverstatus zurueck
async fn health_handler(State(quelle): State<Arc<dyn AktivitaetsQuelle>>) -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::aus_quelle(quelle.as_ref())))
}
