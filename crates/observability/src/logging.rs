//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable:
//! - `NUNUK_LOG_LEVEL`: Log-Level oder Filter-Direktive, Standard: info
//! - `NUNUK_LOG_FORMAT`: Format (text/json), Standard: text
//!
//! Umgebungsvariablen haben Vorrang vor der Konfigurationsdatei.

use tracing_subscriber::{fmt, EnvFilter};

/// Umgebungsvariable fuer den Log-Level
pub const LOG_LEVEL_ENV: &str = "NUNUK_LOG_LEVEL";
/// Umgebungsvariable fuer das Log-Format
pub const LOG_FORMAT_ENV: &str = "NUNUK_LOG_FORMAT";

/// Initialisiert das Logging-System.
///
/// Liest `NUNUK_LOG_LEVEL` und `NUNUK_LOG_FORMAT` aus der Umgebung.
/// Faellt auf `level` / `format` aus der Konfiguration zurueck.
pub fn logging_initialisieren(level: &str, format: &str) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let format_env = log_format_aus_env().unwrap_or_else(|| format.to_string());

    match format_env.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Log-Format aus der Umgebung, falls gesetzt
pub fn log_format_aus_env() -> Option<String> {
    std::env::var(LOG_FORMAT_ENV).ok()
}

/// Validiert ob ein Log-Level-String gueltig ist.
pub fn log_level_gueltig(level: &str) -> bool {
    matches!(level, "trace" | "debug" | "info" | "warn" | "error")
}

/// Validiert einen Log-Level oder eine Filter-Direktive.
///
/// Einfache Namen muessen ein bekannter Level sein; Direktiven mit `=`
/// oder `,` (z.B. `nunuk_signaling=debug,info`) prueft `EnvFilter`.
pub fn log_filter_gueltig(filter: &str) -> bool {
    if filter.contains('=') || filter.contains(',') {
        EnvFilter::try_new(filter).is_ok()
    } else {
        log_level_gueltig(filter)
    }
}

/// Validiert ob ein Log-Format-String gueltig ist.
pub fn log_format_gueltig(format: &str) -> bool {
    matches!(format, "text" | "json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_gueltige_werte() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(log_level_gueltig(level), "{level} muss gueltig sein");
        }
    }

    #[test]
    fn log_level_ungueltige_werte() {
        assert!(!log_level_gueltig("verbose"));
        assert!(!log_level_gueltig("INFO")); // Gross-/Kleinschreibung
        assert!(!log_level_gueltig(""));
    }

    #[test]
    fn log_format_werte() {
        assert!(log_format_gueltig("text"));
        assert!(log_format_gueltig("json"));
        assert!(!log_format_gueltig("xml"));
        assert!(!log_format_gueltig("JSON"));
    }

    #[test]
    fn log_filter_direktiven() {
        assert!(log_filter_gueltig("debug"));
        assert!(log_filter_gueltig("nunuk_signaling=debug,info"));
        assert!(log_filter_gueltig("tower_http=trace"));
        // Ein unbekannter Name waere fuer EnvFilter ein Target, kein Level
        assert!(!log_filter_gueltig("verbose"));
        assert!(!log_filter_gueltig(""));
        assert!(!log_filter_gueltig("nunuk=laut"));
    }

    #[test]
    fn log_format_aus_env_json() {
        std::env::set_var(LOG_FORMAT_ENV, "json");
        assert_eq!(log_format_aus_env().as_deref(), Some("json"));
        std::env::remove_var(LOG_FORMAT_ENV);
    }
}
