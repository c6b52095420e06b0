//! nunuk-signaling – Raum-Registry und Event-Relay
//!
//! Dieser Crate implementiert den Signaling-Service fuer Nunuk. Er
//! verwaltet WebSocket-Verbindungen, Raeume mit Host und Viewern und
//! leitet WebRTC-Verhandlungen sowie Raum-Events zwischen ihnen weiter.
//! Medien laufen nie ueber den Relay.
//!
//! ## Architektur
//!
//! ```text
//! WebSocket-Router (/ws)
//!     |
//!     v
//! ClientConnection (pro Verbindung ein Task)
//!     |
//!     v
//! MessageDispatcher
//!     |
//!     +-- RoomHandler        (create-nunuk, join-nunuk)
//!     +-- SignalHandler      (offer, answer, ice-candidate, renegotiate-*)
//!     +-- RoomEventHandler   (sharing, audio, speaking, chat, typing)
//!     +-- DisconnectHandler  (Aufraeumen beim Verbindungsabbau)
//!
//! Registries       – RoomRegistry + ConnectionRegistry unter einem Lock
//! EventBroadcaster – Send-Queues aller verbundenen Clients
//! ```

pub mod broadcast;
pub mod code;
pub mod connection;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod presence;
pub mod rooms;
pub mod server_state;
pub mod ws;

#[cfg(test)]
mod tests;

// Bequeme Re-Exporte
pub use broadcast::{EventBroadcaster, Transport};
pub use connection::ClientConnection;
pub use dispatcher::MessageDispatcher;
pub use error::{SignalingError, SignalingResult};
pub use presence::ConnectionRegistry;
pub use rooms::RoomRegistry;
pub use server_state::{SignalingConfig, SignalingState};
pub use ws::signaling_router;
