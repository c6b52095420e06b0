//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist.

use nunuk_observability::logging::{log_filter_gueltig, log_format_gueltig};
use nunuk_signaling::SignalingConfig;
use serde::{Deserialize, Serialize};

/// Standard-Port des Relays
pub const STANDARD_PORT: u16 = 3001;

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Allgemeine Server-Einstellungen
    pub server: ServerEinstellungen,
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Raum- und Relay-Einstellungen
    pub signaling: SignalingEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Anzeigename des Servers (Banner und Logs)
    pub name: String,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            name: "Nunuk Signaling Server".into(),
        }
    }
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    /// Bind-Adresse fuer HTTP und WebSocket
    pub bind_adresse: String,
    /// Port fuer HTTP und WebSocket
    pub port: u16,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: STANDARD_PORT,
        }
    }
}

/// Raum- und Relay-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalingEinstellungen {
    /// Groesse der Send-Queue pro Verbindung
    pub send_queue_groesse: usize,
    /// Laenge der Raum-Codes
    pub code_laenge: usize,
}

impl Default for SignalingEinstellungen {
    fn default() -> Self {
        let standard = SignalingConfig::default();
        Self {
            send_queue_groesse: standard.send_queue_groesse,
            code_laenge: standard.code_laenge,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        Ok(Self::laden_falls_vorhanden(pfad)?.unwrap_or_default())
    }

    /// Laedt die Konfiguration, `None` wenn die Datei nicht existiert.
    ///
    /// Ungueltige Werte (Log-Level, Log-Format, Code-Laenge) werden
    /// abgelehnt statt still ersetzt.
    pub fn laden_falls_vorhanden(pfad: &str) -> anyhow::Result<Option<Self>> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                config
                    .validieren()
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(Some(config))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Prueft die Werte die serde allein nicht einschraenkt
    pub fn validieren(&self) -> anyhow::Result<()> {
        if !log_filter_gueltig(&self.logging.level) {
            anyhow::bail!(
                "Ungueltiger Log-Level '{}' (erwartet trace/debug/info/warn/error oder eine Filter-Direktive)",
                self.logging.level
            );
        }
        if !log_format_gueltig(&self.logging.format) {
            anyhow::bail!(
                "Ungueltiges Log-Format '{}' (erwartet text oder json)",
                self.logging.format
            );
        }
        if self.signaling.code_laenge == 0 {
            anyhow::bail!("code_laenge muss groesser als 0 sein");
        }
        Ok(())
    }

    /// Uebernimmt einen Port aus der Umgebung (`PORT`)
    pub fn port_uebernehmen(&mut self, port: Option<&str>) -> anyhow::Result<()> {
        if let Some(wert) = port {
            self.netzwerk.port = wert
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Ungueltiger Port '{wert}': {e}"))?;
        }
        Ok(())
    }

    /// Gibt die vollstaendige Bind-Adresse zurueck
    pub fn bind_adresse(&self) -> String {
        format!("{}:{}", self.netzwerk.bind_adresse, self.netzwerk.port)
    }

    /// Konfiguration fuer den Signaling-Service
    pub fn signaling_config(&self) -> SignalingConfig {
        SignalingConfig {
            send_queue_groesse: self.signaling.send_queue_groesse,
            code_laenge: self.signaling.code_laenge,
        }
    }
}
