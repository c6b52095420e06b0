//! nunuk-core – Gemeinsame Typen und Fehlertypen
//!
//! Dieses Crate stellt die fundamentalen Bausteine bereit, die von allen
//! anderen Nunuk-Crates gemeinsam genutzt werden: Verbindungs-IDs,
//! Raum-Codes und die Teilnehmer-Rolle.

pub mod error;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use error::{NunukError, Result};
pub use types::{ConnectionId, Rolle, RoomCode};
