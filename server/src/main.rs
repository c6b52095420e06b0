//! Nunuk Server – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und startet den Server.

use anyhow::Result;
use nunuk_observability::logging_initialisieren;
use nunuk_server::{config::ServerConfig, Server};

#[tokio::main]
async fn main() -> Result<()> {
    // Konfigurationsdatei-Pfad aus Umgebungsvariable oder Standard
    let config_pfad = std::env::var("NUNUK_CONFIG").unwrap_or_else(|_| "config.toml".into());

    // Konfiguration laden (Standardwerte falls Datei fehlt)
    let geladen = ServerConfig::laden_falls_vorhanden(&config_pfad)?;
    let datei_gefunden = geladen.is_some();
    let mut config = geladen.unwrap_or_default();
    config.port_uebernehmen(std::env::var("PORT").ok().as_deref())?;

    logging_initialisieren(&config.logging.level, &config.logging.format);

    if !datei_gefunden {
        tracing::warn!(
            pfad = %config_pfad,
            "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
        );
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        "Nunuk Server wird initialisiert"
    );

    Server::neu(config).starten().await?;

    Ok(())
}
