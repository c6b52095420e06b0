//! nunuk-server – Bibliotheks-Root
//!
//! Baut den gemeinsamen Signaling-Zustand und den HTTP-Router
//! (WebSocket, Health, Banner) und betreibt ihn bis zum Shutdown-Signal.

pub mod config;

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use config::ServerConfig;
use nunuk_observability::{health_router, request_timing_layer, AktivitaetsQuelle};
use nunuk_signaling::{signaling_router, SignalingState};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Stellt die Zaehler des Signaling-Zustands fuer den Health-Check bereit
struct SignalingAktivitaet(Arc<SignalingState>);

impl AktivitaetsQuelle for SignalingAktivitaet {
    fn aktive_raeume(&self) -> usize {
        self.0.aktive_raeume()
    }

    fn gebundene_verbindungen(&self) -> usize {
        self.0.gebundene_verbindungen()
    }

    fn offene_verbindungen(&self) -> usize {
        self.0.offene_verbindungen()
    }

    fn uptime_sek(&self) -> u64 {
        self.0.uptime_sek()
    }
}

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
    state: Arc<SignalingState>,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        let state = SignalingState::neu(config.signaling_config());
        Self { config, state }
    }

    /// Gemeinsamer Signaling-Zustand
    pub fn state(&self) -> Arc<SignalingState> {
        Arc::clone(&self.state)
    }

    /// Baut den vollstaendigen HTTP-Router
    pub fn router(&self) -> Router {
        let banner = format!("{} laeuft", self.config.server.name);
        Router::new()
            .route("/", get(move || std::future::ready(banner.clone())))
            .merge(signaling_router(self.state()))
            .merge(health_router(Arc::new(SignalingAktivitaet(self.state()))))
            .layer(CorsLayer::permissive())
            .layer(request_timing_layer())
    }

    /// Startet den Listener und laeuft bis zum Shutdown-Signal
    ///
    /// Bei Ctrl-C werden alle Verbindungs-Tasks ueber den Shutdown-Kanal
    /// beendet; ihr Aufraeumen laeuft wie bei einer normalen Trennung.
    pub async fn starten(self) -> Result<()> {
        let adresse = self.config.bind_adresse();
        let listener = tokio::net::TcpListener::bind(&adresse).await?;

        tracing::info!(
            server_name = %self.config.server.name,
            adresse = %adresse,
            "Nunuk Signaling Server gestartet"
        );

        let state = self.state();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(fehler = %e, "Ctrl-C-Handler fehlgeschlagen");
                }
                tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
                state.herunterfahren();
            })
            .await?;

        Ok(())
    }
}
