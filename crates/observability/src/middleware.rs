//! Request-Tracing fuer Axum
//!
//! Jede HTTP-Anfrage (auch das WebSocket-Upgrade) bekommt einen
//! Tracing-Span mit Methode und Pfad; Antwortstatus und Dauer werden beim
//! Abschluss geloggt.

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Erstellt den Tracing-Layer fuer alle HTTP-Routen
pub fn request_timing_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG))
}
