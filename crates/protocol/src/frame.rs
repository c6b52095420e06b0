//! Transport-Frame fuer eingehende Events
//!
//! Ein Frame ist ein JSON-Objekt `{"event": ..., "data": ..., "ack": ...}`.
//! Das optionale `ack` ersetzt den Completion-Callback von socket.io:
//! der Relay antwortet darauf mit einem `ack`-Event gleicher ID.

use serde_json::Value;

use crate::events::ClientEvent;

/// Dekodierter Frame eines Clients
#[derive(Debug, Clone)]
pub struct ClientFrame {
    pub event: ClientEvent,
    /// Vom Client vergebene Ack-ID (None = keine Antwort erwuenscht)
    pub ack: Option<u64>,
}

impl ClientFrame {
    /// Dekodiert einen Text-Frame
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let wert: Value = serde_json::from_str(text)?;
        let ack = wert.get("ack").and_then(Value::as_u64);
        let event = serde_json::from_value(wert)?;
        Ok(Self { event, ack })
    }
}
