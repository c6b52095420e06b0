//! nunuk-protocol – Event-Definitionen
//!
//! Dieses Crate definiert alle Events die zwischen Client und Relay
//! ausgetauscht werden, sowie das JSON-Frame-Format des Transports.
//!
//! Verhandlungs-Payloads (Offer, Answer, ICE-Candidate) und
//! Sharing-Einstellungen sind fuer den Relay opak und werden als
//! `serde_json::Value` unveraendert durchgereicht.

pub mod events;
pub mod frame;

pub use events::{ClientEvent, ServerEvent, SignalArt};
pub use frame::ClientFrame;
