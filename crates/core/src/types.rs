//! Gemeinsame Identifikationstypen fuer Nunuk
//!
//! Verbindungs-IDs und Raum-Codes verwenden das Newtype-Pattern um
//! Verwechslungen zur Compilezeit auszuschliessen.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Eindeutige ID einer Transport-Verbindung
///
/// Wird vom Transport beim Verbindungsaufbau vergeben und ist fuer die
/// Gegenstellen die einzige Adresse eines Teilnehmers (`senderId`,
/// `targetId`, `viewerId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Erstellt eine neue zufaellige ConnectionId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Gibt die innere UUID zurueck
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kurzer, teilbarer Raum-Code ("Nunuk")
///
/// Einziger externer Schluessel eines aktiven Raums. Eindeutig nur unter
/// den aktuell aktiven Raeumen; freigegebene Codes duerfen wiederkehren.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl RoomCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// Rolle einer gebundenen Verbindung
///
/// "Ungebunden" ist kein eigener Zustand, sondern das Fehlen einer
/// Bindung im Verbindungsregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rolle {
    /// Hat den Raum erstellt, einzige Quelle des geteilten Inhalts
    Host,
    /// Ist einem bestehenden Raum beigetreten
    Viewer,
}

impl Rolle {
    /// Anzeigename wenn der Absender keinen eigenen mitschickt
    pub fn standard_name(&self) -> &'static str {
        match self {
            Rolle::Host => "Host",
            Rolle::Viewer => "Viewer",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rolle::Host => "host",
            Rolle::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for Rolle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_ids_sind_eindeutig() {
        let a = ConnectionId::new();
        let b = ConnectionId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn connection_id_als_string_serialisiert() {
        let id = ConnectionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.inner()));
        let zurueck: ConnectionId = serde_json::from_str(&json).unwrap();
        assert_eq!(zurueck, id);
    }

    #[test]
    fn room_code_transparent() {
        let code = RoomCode::from("AB12CD");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"AB12CD\"");
        assert_eq!(code.to_string(), "AB12CD");
    }

    #[test]
    fn rolle_kleingeschrieben() {
        assert_eq!(serde_json::to_string(&Rolle::Host).unwrap(), "\"host\"");
        let r: Rolle = serde_json::from_str("\"viewer\"").unwrap();
        assert_eq!(r, Rolle::Viewer);
    }

    #[test]
    fn standard_namen() {
        assert_eq!(Rolle::Host.standard_name(), "Host");
        assert_eq!(Rolle::Viewer.standard_name(), "Viewer");
    }
}
