//! Gemeinsamer Server-Zustand fuer den Signaling-Service
//!
//! Raum- und Verbindungs-Registry liegen gemeinsam hinter einem einzigen
//! Mutex. Jeder Handler liest, mutiert und versendet unter diesem Lock,
//! damit Aenderungen an der Viewer-Liste und der Fan-out darueber
//! atomar zueinander sind.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

use crate::broadcast::{EventBroadcaster, SEND_QUEUE_GROESSE};
use crate::code::{CodeGenerator, CodeQuelle, ZufallsCodes, STANDARD_CODE_LAENGE};
use crate::presence::ConnectionRegistry;
use crate::rooms::RoomRegistry;

/// Konfiguration fuer den Signaling-Service
#[derive(Debug, Clone)]
pub struct SignalingConfig {
    /// Groesse der Send-Queue pro Verbindung
    pub send_queue_groesse: usize,
    /// Laenge der generierten Raum-Codes
    pub code_laenge: usize,
}

impl Default for SignalingConfig {
    fn default() -> Self {
        Self {
            send_queue_groesse: SEND_QUEUE_GROESSE,
            code_laenge: STANDARD_CODE_LAENGE,
        }
    }
}

/// Raum- und Verbindungs-Registry unter einem gemeinsamen Lock
pub struct Registries {
    pub raeume: RoomRegistry,
    pub verbindungen: ConnectionRegistry,
}

impl Registries {
    pub fn neu(codes: CodeGenerator) -> Self {
        Self {
            raeume: RoomRegistry::neu(codes),
            verbindungen: ConnectionRegistry::neu(),
        }
    }
}

/// Gemeinsamer Server-Zustand (thread-safe, Arc-geteilt)
pub struct SignalingState {
    /// Signaling-Konfiguration
    pub config: Arc<SignalingConfig>,
    /// Event-Broadcaster (Transport zu den Clients)
    pub broadcaster: EventBroadcaster,
    registries: Mutex<Registries>,
    shutdown_tx: watch::Sender<bool>,
    start_time: Instant,
}

impl SignalingState {
    /// Erstellt einen neuen SignalingState mit zufaelligen Raum-Codes
    pub fn neu(config: SignalingConfig) -> Arc<Self> {
        let quelle = ZufallsCodes::neu(config.code_laenge);
        Self::mit_code_quelle(config, Box::new(quelle))
    }

    /// Erstellt einen SignalingState mit eigener Code-Quelle
    pub fn mit_code_quelle(config: SignalingConfig, quelle: Box<dyn CodeQuelle>) -> Arc<Self> {
        let (shutdown_tx, _) = watch::channel(false);
        Arc::new(Self {
            broadcaster: EventBroadcaster::mit_queue_groesse(config.send_queue_groesse),
            config: Arc::new(config),
            registries: Mutex::new(Registries::neu(CodeGenerator::neu(quelle))),
            shutdown_tx,
            start_time: Instant::now(),
        })
    }

    /// Sperrt die Registries fuer die Dauer eines Handlers
    pub fn registries(&self) -> MutexGuard<'_, Registries> {
        self.registries.lock()
    }

    /// Anzahl aktiver Raeume
    pub fn aktive_raeume(&self) -> usize {
        self.registries.lock().raeume.anzahl()
    }

    /// Anzahl der als Host oder Viewer gebundenen Verbindungen
    pub fn gebundene_verbindungen(&self) -> usize {
        self.registries.lock().verbindungen.anzahl()
    }

    /// Anzahl offener Transport-Verbindungen (auch ungebundene)
    pub fn offene_verbindungen(&self) -> usize {
        self.broadcaster.client_anzahl()
    }

    /// Signalisiert allen Verbindungs-Tasks das Herunterfahren
    pub fn herunterfahren(&self) {
        self.shutdown_tx.send_replace(true);
    }

    pub fn shutdown_abonnieren(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// Gibt die Uptime in Sekunden zurueck
    pub fn uptime_sek(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nunuk_core::types::ConnectionId;

    #[test]
    fn leerer_zustand() {
        let state = SignalingState::neu(SignalingConfig::default());
        assert_eq!(state.aktive_raeume(), 0);
        assert_eq!(state.gebundene_verbindungen(), 0);
        assert_eq!(state.offene_verbindungen(), 0);
    }

    #[test]
    fn zaehler_folgen_den_registries() {
        let state = SignalingState::neu(SignalingConfig::default());
        let host = ConnectionId::new();
        let _rx = state.broadcaster.client_registrieren(host);
        {
            let mut reg = state.registries();
            let code = reg.raeume.raum_erstellen(host);
            reg.verbindungen
                .binden(host, nunuk_core::Rolle::Host, code)
                .unwrap();
        }
        assert_eq!(state.aktive_raeume(), 1);
        assert_eq!(state.gebundene_verbindungen(), 1);
        assert_eq!(state.offene_verbindungen(), 1);
    }

    #[test]
    fn code_laenge_aus_config() {
        let state = SignalingState::neu(SignalingConfig {
            code_laenge: 8,
            ..Default::default()
        });
        let code = state.registries().raeume.raum_erstellen(ConnectionId::new());
        assert_eq!(code.as_str().len(), 8);
    }

    #[test]
    fn shutdown_signal() {
        let state = SignalingState::neu(SignalingConfig::default());
        let rx = state.shutdown_abonnieren();
        assert!(!*rx.borrow());
        state.herunterfahren();
        assert!(*rx.borrow());
    }
}
