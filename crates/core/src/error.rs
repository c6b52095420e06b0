//! Fehlertypen fuer Nunuk
//!
//! Kein Fehler in diesem System ist fuer den Prozess fatal: jeder Fehler
//! wird lokal behandelt, entweder durch Verwerfen des Events oder durch
//! eine Rueckmeldung an den direkten Aufrufer.

use crate::types::{ConnectionId, RoomCode};
use thiserror::Error;

/// Globaler Result-Alias fuer Nunuk
pub type Result<T> = std::result::Result<T, NunukError>;

/// Alle Fehlerzustaende des Raum- und Relay-Kerns
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NunukError {
    /// Join-Anfrage fuer einen unbekannten Code
    #[error("Nunuk nicht gefunden: {0}")]
    RaumNichtGefunden(RoomCode),

    /// Event von einer Verbindung ohne aktuelle Raum-Bindung
    #[error("Verbindung {0} ist keinem Raum zugeordnet")]
    VeralteterAbsender(ConnectionId),

    /// Ziel-Verbindung existiert nicht mehr
    #[error("Unbekannte Ziel-Verbindung: {0}")]
    UnbekanntesZiel(ConnectionId),

    /// Verbindung ist bereits als Host oder Viewer gebunden
    #[error("Verbindung {0} ist bereits einem Raum zugeordnet")]
    BereitsGebunden(ConnectionId),
}

impl NunukError {
    /// Fehler die dem Aufrufer gemeldet werden (statt still verworfen)
    pub fn ist_meldepflichtig(&self) -> bool {
        matches!(
            self,
            Self::RaumNichtGefunden(_) | Self::BereitsGebunden(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fehler_anzeige() {
        let e = NunukError::RaumNichtGefunden(RoomCode::from("XYZ123"));
        assert_eq!(e.to_string(), "Nunuk nicht gefunden: XYZ123");
    }

    #[test]
    fn meldepflicht() {
        let id = ConnectionId::new();
        assert!(NunukError::RaumNichtGefunden(RoomCode::from("A")).ist_meldepflichtig());
        assert!(NunukError::BereitsGebunden(id).ist_meldepflichtig());
        assert!(!NunukError::VeralteterAbsender(id).ist_meldepflichtig());
        assert!(!NunukError::UnbekanntesZiel(id).ist_meldepflichtig());
    }
}
