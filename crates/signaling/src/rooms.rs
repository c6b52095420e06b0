//! Raum-Registry – Besitzt alle aktiven Raeume
//!
//! Ein Raum hat genau einen Host und eine geordnete Liste von Viewern
//! ohne Duplikate. Die Registry mutiert nur ihren eigenen Zustand;
//! Benachrichtigungen verschicken die Aufrufer.

use nunuk_core::types::{ConnectionId, Rolle, RoomCode};
use nunuk_core::NunukError;
use std::collections::HashMap;

use crate::code::CodeGenerator;

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// Eine aktive Screen-Sharing-Session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub code: RoomCode,
    pub host: ConnectionId,
    /// Beitrittsreihenfolge, nur fuer Diagnose relevant
    pub viewers: Vec<ConnectionId>,
}

impl Room {
    pub fn viewer_anzahl(&self) -> usize {
        self.viewers.len()
    }

    pub fn hat_viewer(&self, conn_id: &ConnectionId) -> bool {
        self.viewers.contains(conn_id)
    }

    /// Rolle einer Verbindung in diesem Raum, falls Mitglied
    pub fn rolle_von(&self, conn_id: &ConnectionId) -> Option<Rolle> {
        if self.host == *conn_id {
            Some(Rolle::Host)
        } else if self.hat_viewer(conn_id) {
            Some(Rolle::Viewer)
        } else {
            None
        }
    }
}

/// Ergebnis von `RoomRegistry::zuschauer_hinzufuegen`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerHinzugefuegt {
    /// Viewer-Anzahl nach dem Aufruf
    pub anzahl: usize,
    /// false wenn die Verbindung bereits Viewer war
    pub neu: bool,
}

// ---------------------------------------------------------------------------
// RoomRegistry
// ---------------------------------------------------------------------------

/// Alle aktiven Raeume, indiziert nach Code
pub struct RoomRegistry {
    raeume: HashMap<RoomCode, Room>,
    codes: CodeGenerator,
}

impl RoomRegistry {
    pub fn neu(codes: CodeGenerator) -> Self {
        Self {
            raeume: HashMap::new(),
            codes,
        }
    }

    /// Legt einen Raum mit leerer Viewer-Liste an und gibt seinen Code zurueck
    pub fn raum_erstellen(&mut self, host: ConnectionId) -> RoomCode {
        let raeume = &self.raeume;
        let code = self.codes.generieren(|c| raeume.contains_key(c));
        self.raeume.insert(
            code.clone(),
            Room {
                code: code.clone(),
                host,
                viewers: Vec::new(),
            },
        );
        code
    }

    pub fn raum_holen(&self, code: &RoomCode) -> Option<&Room> {
        self.raeume.get(code)
    }

    /// Fuegt einen Viewer hinzu (idempotent)
    ///
    /// Unbekannter Code: `RaumNichtGefunden`, die Registry bleibt unveraendert.
    /// Der Host kann nicht Viewer seines eigenen Raums werden.
    pub fn zuschauer_hinzufuegen(
        &mut self,
        code: &RoomCode,
        conn_id: ConnectionId,
    ) -> Result<ViewerHinzugefuegt, NunukError> {
        let raum = self
            .raeume
            .get_mut(code)
            .ok_or_else(|| NunukError::RaumNichtGefunden(code.clone()))?;

        if raum.host == conn_id {
            return Err(NunukError::BereitsGebunden(conn_id));
        }

        let neu = !raum.hat_viewer(&conn_id);
        if neu {
            raum.viewers.push(conn_id);
        }

        Ok(ViewerHinzugefuegt {
            anzahl: raum.viewers.len(),
            neu,
        })
    }

    /// Entfernt einen Viewer und gibt die neue Anzahl zurueck
    ///
    /// `None` wenn der Raum nicht existiert. Ist die Verbindung kein
    /// Viewer, bleibt der Raum unveraendert.
    pub fn zuschauer_entfernen(&mut self, code: &RoomCode, conn_id: &ConnectionId) -> Option<usize> {
        let raum = self.raeume.get_mut(code)?;
        raum.viewers.retain(|id| id != conn_id);
        Some(raum.viewers.len())
    }

    /// Entfernt einen Raum, der Code wird damit wieder frei
    pub fn raum_loeschen(&mut self, code: &RoomCode) -> Option<Room> {
        self.raeume.remove(code)
    }

    /// Sucht den Raum in dem eine Verbindung Host oder Viewer ist
    ///
    /// Lineare Suche ueber alle Raeume.
    pub fn raum_von_verbindung(&self, conn_id: &ConnectionId) -> Option<(RoomCode, Rolle)> {
        self.raeume
            .values()
            .find_map(|raum| raum.rolle_von(conn_id).map(|rolle| (raum.code.clone(), rolle)))
    }

    /// Anzahl aktiver Raeume
    pub fn anzahl(&self) -> usize {
        self.raeume.len()
    }

    pub fn ist_leer(&self) -> bool {
        self.raeume.is_empty()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::neu(CodeGenerator::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
