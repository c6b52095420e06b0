//! Handler fuer alle Client-Events
//!
//! Jeder Handler ist fuer eine Gruppe von Events zustaendig. Handler
//! arbeiten auf den gesperrten `Registries` und versenden ueber einen
//! `Transport`, damit sie ohne Sockets testbar sind.

pub mod disconnect_handler;
pub mod room_event_handler;
pub mod room_handler;
pub mod signal_handler;
