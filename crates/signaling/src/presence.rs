//! Verbindungs-Registry – Rolle und Raum-Bindung pro Verbindung
//!
//! Die Verbindungen selbst gehoeren dem Transport; diese Registry haelt
//! nur die Annotation (Rolle, Raum-Code). Eine Verbindung ohne Eintrag
//! ist ungebunden.
//!
//! Eine Bindung wird genau einmal gesetzt (`ungebunden -> host` oder
//! `ungebunden -> viewer`) und danach nicht mehr geaendert.

use nunuk_core::types::{ConnectionId, Rolle, RoomCode};
use nunuk_core::NunukError;
use std::collections::HashMap;

/// Rolle und Raum einer gebundenen Verbindung
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindung {
    pub rolle: Rolle,
    pub raum: RoomCode,
}

/// Bindungen aller gebundenen Verbindungen
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    bindungen: HashMap<ConnectionId, Bindung>,
}

impl ConnectionRegistry {
    pub fn neu() -> Self {
        Self::default()
    }

    /// Bindet eine ungebundene Verbindung an einen Raum
    pub fn binden(
        &mut self,
        conn_id: ConnectionId,
        rolle: Rolle,
        raum: RoomCode,
    ) -> Result<(), NunukError> {
        if self.bindungen.contains_key(&conn_id) {
            return Err(NunukError::BereitsGebunden(conn_id));
        }
        tracing::debug!(conn_id = %conn_id, rolle = %rolle, nunuk = %raum, "Verbindung gebunden");
        self.bindungen.insert(conn_id, Bindung { rolle, raum });
        Ok(())
    }

    /// Ueberschreibt eine Bindung ohne Pruefung
    ///
    /// Nur fuer die Wiederherstellung veralteter Chat-Absender.
    pub fn neu_binden(&mut self, conn_id: ConnectionId, rolle: Rolle, raum: RoomCode) {
        tracing::warn!(conn_id = %conn_id, rolle = %rolle, nunuk = %raum, "Bindung wiederhergestellt");
        self.bindungen.insert(conn_id, Bindung { rolle, raum });
    }

    /// Loest eine Bindung (idempotent)
    pub fn loesen(&mut self, conn_id: &ConnectionId) -> Option<Bindung> {
        self.bindungen.remove(conn_id)
    }

    /// `None` bedeutet ungebunden
    pub fn nachschlagen(&self, conn_id: &ConnectionId) -> Option<&Bindung> {
        self.bindungen.get(conn_id)
    }

    /// Anzahl gebundener Verbindungen
    pub fn anzahl(&self) -> usize {
        self.bindungen.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbekannte_verbindung_ist_ungebunden() {
        let reg = ConnectionRegistry::neu();
        assert!(reg.nachschlagen(&ConnectionId::new()).is_none());
    }

    #[test]
    fn binden_und_nachschlagen() {
        let mut reg = ConnectionRegistry::neu();
        let id = ConnectionId::new();
        reg.binden(id, Rolle::Host, RoomCode::from("AB12CD")).unwrap();

        let bindung = reg.nachschlagen(&id).unwrap();
        assert_eq!(bindung.rolle, Rolle::Host);
        assert_eq!(bindung.raum.as_str(), "AB12CD");
        assert_eq!(reg.anzahl(), 1);
    }

    #[test]
    fn rolle_wird_nur_einmal_gesetzt() {
        let mut reg = ConnectionRegistry::neu();
        let id = ConnectionId::new();
        reg.binden(id, Rolle::Viewer, RoomCode::from("AB12CD")).unwrap();

        assert_eq!(
            reg.binden(id, Rolle::Host, RoomCode::from("ZZ99ZZ")),
            Err(NunukError::BereitsGebunden(id))
        );
        assert_eq!(reg.nachschlagen(&id).unwrap().rolle, Rolle::Viewer);
    }

    #[test]
    fn loesen_ist_idempotent() {
        let mut reg = ConnectionRegistry::neu();
        let id = ConnectionId::new();
        reg.binden(id, Rolle::Viewer, RoomCode::from("AB12CD")).unwrap();

        assert!(reg.loesen(&id).is_some());
        assert!(reg.loesen(&id).is_none());
        assert!(reg.nachschlagen(&id).is_none());
    }

    #[test]
    fn neu_binden_ueberschreibt() {
        let mut reg = ConnectionRegistry::neu();
        let id = ConnectionId::new();
        reg.binden(id, Rolle::Viewer, RoomCode::from("AAAAAA")).unwrap();
        reg.neu_binden(id, Rolle::Viewer, RoomCode::from("BBBBBB"));
        assert_eq!(reg.nachschlagen(&id).unwrap().raum.as_str(), "BBBBBB");
    }
}
