//! Fehlertypen fuer den Signaling-Service

use nunuk_core::NunukError;
use thiserror::Error;

/// Fehlertyp fuer den Signaling-Service
#[derive(Debug, Error)]
pub enum SignalingError {
    /// Fehler aus der Raum-/Relay-Logik
    #[error(transparent)]
    Kern(#[from] NunukError),

    /// IO-Fehler (Listener, Socket)
    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),

    /// WebSocket-Fehler
    #[error("WebSocket-Fehler: {0}")]
    WebSocket(#[from] axum::Error),

    /// Frame konnte nicht (de)serialisiert werden
    #[error("Protokollfehler: {0}")]
    Protokoll(#[from] serde_json::Error),
}

/// Result-Typ fuer den Signaling-Service
pub type SignalingResult<T> = Result<T, SignalingError>;
