//! Raum-Handler – Raum erstellen und beitreten
//!
//! Beide Operationen binden die anfragende Verbindung genau einmal:
//! als Host des neuen Raums bzw. als Viewer eines bestehenden Raums.

use nunuk_core::types::{ConnectionId, Rolle, RoomCode};
use nunuk_core::NunukError;
use nunuk_protocol::events::ViewerJoinedEvent;
use nunuk_protocol::ServerEvent;

use crate::broadcast::Transport;
use crate::server_state::Registries;

/// Erstellt einen Raum mit der Verbindung als Host
pub fn handle_create(reg: &mut Registries, conn_id: ConnectionId) -> Result<RoomCode, NunukError> {
    if reg.verbindungen.nachschlagen(&conn_id).is_some() {
        return Err(NunukError::BereitsGebunden(conn_id));
    }

    let code = reg.raeume.raum_erstellen(conn_id);
    reg.verbindungen.binden(conn_id, Rolle::Host, code.clone())?;

    tracing::info!(conn_id = %conn_id, nunuk = %code, "Nunuk erstellt");
    Ok(code)
}

/// Tritt einem bestehenden Raum als Viewer bei
///
/// Ein erneuter Beitritt zum selben Raum ist ein No-op ohne erneute
/// Benachrichtigung des Hosts.
pub fn handle_join<T: Transport>(
    reg: &mut Registries,
    transport: &T,
    conn_id: ConnectionId,
    code: RoomCode,
) -> Result<RoomCode, NunukError> {
    match reg.verbindungen.nachschlagen(&conn_id) {
        Some(bindung) if bindung.rolle == Rolle::Viewer && bindung.raum == code => {}
        Some(_) => return Err(NunukError::BereitsGebunden(conn_id)),
        None => {}
    }

    let ergebnis = match reg.raeume.zuschauer_hinzufuegen(&code, conn_id) {
        Ok(ergebnis) => ergebnis,
        Err(e) => {
            tracing::info!(conn_id = %conn_id, nunuk = %code, "Nunuk nicht gefunden");
            return Err(e);
        }
    };

    if ergebnis.neu {
        reg.verbindungen.binden(conn_id, Rolle::Viewer, code.clone())?;

        if let Some(raum) = reg.raeume.raum_holen(&code) {
            transport.senden(
                &raum.host,
                ServerEvent::ViewerJoined(ViewerJoinedEvent {
                    viewer_id: conn_id,
                    viewer_count: ergebnis.anzahl,
                }),
            );
        }

        tracing::info!(
            conn_id = %conn_id,
            nunuk = %code,
            viewer = ergebnis.anzahl,
            "Viewer beigetreten"
        );
    }

    Ok(code)
}
