//! Event-Broadcaster – Send-Queues aller verbundenen Clients
//!
//! Der EventBroadcaster ist die Transport-Abstraktion des Relays: jede
//! Verbindung bekommt beim Aufbau eine Send-Queue, Handler adressieren
//! Events nur ueber die `ConnectionId`.
//!
//! ## Zustellung
//! Best-Effort ohne Bestaetigung. Unbekannte Ziele, volle oder
//! geschlossene Queues verwerfen das Event still (nur geloggt).

use dashmap::DashMap;
use nunuk_core::types::ConnectionId;
use nunuk_protocol::ServerEvent;
use std::sync::Arc;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Konfiguration
// ---------------------------------------------------------------------------

/// Standardgroesse der Send-Queue pro Client
pub const SEND_QUEUE_GROESSE: usize = 64;

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Ausgehende Seite des Transports aus Sicht der Handler
pub trait Transport {
    /// Reiht ein Event fuer eine Verbindung ein
    ///
    /// Gibt `false` zurueck wenn das Event verworfen wurde.
    fn senden(&self, ziel: &ConnectionId, event: ServerEvent) -> bool;

    /// Sendet dasselbe Event an mehrere Ziele, in der gegebenen Reihenfolge
    ///
    /// Gibt die Anzahl der eingereihten Events zurueck.
    fn an_mehrere_senden(&self, ziele: &[ConnectionId], event: &ServerEvent) -> usize {
        ziele
            .iter()
            .filter(|ziel| self.senden(ziel, event.clone()))
            .count()
    }
}

// ---------------------------------------------------------------------------
// ClientSender
// ---------------------------------------------------------------------------

/// Handle auf die Send-Queue eines verbundenen Clients
#[derive(Clone, Debug)]
pub struct ClientSender {
    pub conn_id: ConnectionId,
    pub tx: mpsc::Sender<ServerEvent>,
}

impl ClientSender {
    /// Sendet ein Event nicht-blockierend an den Client
    ///
    /// Gibt `false` zurueck wenn die Queue voll oder geschlossen ist.
    pub fn senden(&self, event: ServerEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::warn!(
                    conn_id = %self.conn_id,
                    event = event.name(),
                    "Send-Queue voll – Event verworfen"
                );
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(conn_id = %self.conn_id, "Send-Queue geschlossen (Client getrennt)");
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// EventBroadcaster
// ---------------------------------------------------------------------------

/// Zentraler Event-Broadcaster fuer alle verbundenen Clients
///
/// Thread-safe via Arc + DashMap. Clone teilt den inneren Zustand.
#[derive(Clone)]
pub struct EventBroadcaster {
    inner: Arc<EventBroadcasterInner>,
}

struct EventBroadcasterInner {
    /// Client-Sender, indiziert nach ConnectionId
    clients: DashMap<ConnectionId, ClientSender>,
    queue_groesse: usize,
}

impl EventBroadcaster {
    /// Erstellt einen neuen EventBroadcaster
    pub fn neu() -> Self {
        Self::mit_queue_groesse(SEND_QUEUE_GROESSE)
    }

    pub fn mit_queue_groesse(queue_groesse: usize) -> Self {
        Self {
            inner: Arc::new(EventBroadcasterInner {
                clients: DashMap::new(),
                queue_groesse: queue_groesse.max(1),
            }),
        }
    }

    /// Registriert eine neue Verbindung und gibt ihre Empfangs-Queue zurueck
    ///
    /// Die `ClientConnection` liest aus dieser Queue und schreibt auf den Socket.
    pub fn client_registrieren(&self, conn_id: ConnectionId) -> mpsc::Receiver<ServerEvent> {
        let (tx, rx) = mpsc::channel(self.inner.queue_groesse);
        self.inner.clients.insert(conn_id, ClientSender { conn_id, tx });
        tracing::debug!(conn_id = %conn_id, "Client im Broadcaster registriert");
        rx
    }

    /// Entfernt eine Verbindung aus dem Broadcaster
    pub fn client_entfernen(&self, conn_id: &ConnectionId) {
        if self.inner.clients.remove(conn_id).is_some() {
            tracing::debug!(conn_id = %conn_id, "Client aus Broadcaster entfernt");
        }
    }

    /// Gibt die Anzahl der registrierten Verbindungen zurueck
    pub fn client_anzahl(&self) -> usize {
        self.inner.clients.len()
    }

    /// Prueft ob eine Verbindung registriert ist
    pub fn ist_registriert(&self, conn_id: &ConnectionId) -> bool {
        self.inner.clients.contains_key(conn_id)
    }
}

impl Transport for EventBroadcaster {
    fn senden(&self, ziel: &ConnectionId, event: ServerEvent) -> bool {
        match self.inner.clients.get(ziel) {
            Some(sender) => sender.senden(event),
            None => {
                tracing::debug!(conn_id = %ziel, event = event.name(), "Senden an unbekannte Verbindung");
                false
            }
        }
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::neu()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
