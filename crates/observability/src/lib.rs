//! # nunuk-observability
//!
//! Observability-Crate fuer Nunuk:
//! - Health-Check-Endpunkt (`/health`) mit Raum- und Verbindungszahlen
//! - Structured Logging via tracing-subscriber (text/json)
//! - Request-Tracing fuer die HTTP-Routen

pub mod health;
pub mod logging;
pub mod middleware;

pub use health::{health_router, AktivitaetsQuelle, HealthResponse};
pub use logging::logging_initialisieren;
pub use middleware::request_timing_layer;
