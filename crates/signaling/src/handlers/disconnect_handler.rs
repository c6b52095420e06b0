//! Disconnect-Handler – Aufraeumen beim Verbindungsabbau
//!
//! Trennt sich ein Host, wird sein Raum geschlossen und jeder Viewer genau
//! einmal mit `host-disconnected` benachrichtigt. Trennt sich ein Viewer,
//! bekommt der Host `viewer-left` mit der neuen Viewer-Anzahl. Die Bindung
//! der getrennten Verbindung wird in jedem Fall entfernt.

use nunuk_core::types::{ConnectionId, Rolle, RoomCode};
use nunuk_protocol::events::ViewerLeftEvent;
use nunuk_protocol::ServerEvent;

use crate::broadcast::Transport;
use crate::server_state::Registries;

/// Ergebnis des Aufraeumens einer Verbindung
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trennung {
    /// Verbindung war an keinen (existierenden) Raum gebunden
    Ungebunden,
    /// Host getrennt, Raum geloescht
    RaumGeschlossen { code: RoomCode, viewer: usize },
    /// Viewer getrennt, Raum bleibt bestehen
    ViewerEntfernt { code: RoomCode, verbleibend: usize },
}

pub fn handle_disconnect<T: Transport>(
    reg: &mut Registries,
    transport: &T,
    conn_id: ConnectionId,
) -> Trennung {
    let Some(bindung) = reg.verbindungen.loesen(&conn_id) else {
        tracing::debug!(conn_id = %conn_id, "Ungebundene Verbindung getrennt");
        return Trennung::Ungebunden;
    };

    match bindung.rolle {
        Rolle::Host => {
            let Some(raum) = reg.raeume.raum_loeschen(&bindung.raum) else {
                return Trennung::Ungebunden;
            };

            transport.an_mehrere_senden(&raum.viewers, &ServerEvent::HostDisconnected);
            for viewer in &raum.viewers {
                reg.verbindungen.loesen(viewer);
            }

            tracing::info!(
                conn_id = %conn_id,
                nunuk = %raum.code,
                viewer = raum.viewer_anzahl(),
                "Host getrennt, Nunuk geschlossen"
            );
            Trennung::RaumGeschlossen {
                viewer: raum.viewer_anzahl(),
                code: raum.code,
            }
        }
        Rolle::Viewer => {
            let Some(verbleibend) = reg.raeume.zuschauer_entfernen(&bindung.raum, &conn_id) else {
                return Trennung::Ungebunden;
            };

            if let Some(raum) = reg.raeume.raum_holen(&bindung.raum) {
                transport.senden(
                    &raum.host,
                    ServerEvent::ViewerLeft(ViewerLeftEvent {
                        viewer_id: conn_id,
                        viewer_count: verbleibend,
                    }),
                );
            }

            tracing::info!(
                conn_id = %conn_id,
                nunuk = %bindung.raum,
                viewer = verbleibend,
                "Viewer getrennt"
            );
            Trennung::ViewerEntfernt {
                code: bindung.raum,
                verbleibend,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::CodeGenerator;
    use crate::handlers::room_handler::{handle_create, handle_join};
    use crate::handlers::tests::Aufzeichnung;

    fn raum(
        reg: &mut Registries,
        transport: &Aufzeichnung,
        viewer: usize,
    ) -> (RoomCode, ConnectionId, Vec<ConnectionId>) {
        let host = ConnectionId::new();
        let code = handle_create(reg, host).unwrap();
        let viewers: Vec<ConnectionId> = (0..viewer).map(|_| ConnectionId::new()).collect();
        for v in &viewers {
            handle_join(reg, transport, *v, code.clone()).unwrap();
        }
        transport.leeren();
        (code, host, viewers)
    }

    #[test]
    fn ungebundene_verbindung() {
        let mut reg = Registries::neu(CodeGenerator::default());
        let transport = Aufzeichnung::default();

        assert_eq!(
            handle_disconnect(&mut reg, &transport, ConnectionId::new()),
            Trennung::Ungebunden
        );
        assert!(transport.alle().is_empty());
    }

    #[test]
    fn host_trennung_schliesst_raum() {
        let mut reg = Registries::neu(CodeGenerator::default());
        let transport = Aufzeichnung::default();
        let (code, host, viewers) = raum(&mut reg, &transport, 2);

        let ergebnis = handle_disconnect(&mut reg, &transport, host);

        assert_eq!(
            ergebnis,
            Trennung::RaumGeschlossen {
                code: code.clone(),
                viewer: 2
            }
        );
        assert!(reg.raeume.raum_holen(&code).is_none());
        for v in &viewers {
            assert_eq!(transport.fuer(v), vec![ServerEvent::HostDisconnected]);
            assert!(reg.verbindungen.nachschlagen(v).is_none());
        }
        assert_eq!(reg.verbindungen.anzahl(), 0);
    }

    #[test]
    fn viewer_nach_host_trennung_ohne_weitere_meldung() {
        let mut reg = Registries::neu(CodeGenerator::default());
        let transport = Aufzeichnung::default();
        let (_, host, viewers) = raum(&mut reg, &transport, 1);

        handle_disconnect(&mut reg, &transport, host);
        assert_eq!(
            handle_disconnect(&mut reg, &transport, viewers[0]),
            Trennung::Ungebunden
        );
        assert_eq!(transport.alle().len(), 1);
    }

    #[test]
    fn viewer_trennung_meldet_an_host() {
        let mut reg = Registries::neu(CodeGenerator::default());
        let transport = Aufzeichnung::default();
        let (code, host, viewers) = raum(&mut reg, &transport, 2);

        let ergebnis = handle_disconnect(&mut reg, &transport, viewers[0]);

        assert_eq!(
            ergebnis,
            Trennung::ViewerEntfernt {
                code: code.clone(),
                verbleibend: 1
            }
        );
        assert_eq!(
            transport.fuer(&host),
            vec![ServerEvent::ViewerLeft(ViewerLeftEvent {
                viewer_id: viewers[0],
                viewer_count: 1,
            })]
        );
        assert!(transport.fuer(&viewers[1]).is_empty());
        assert_eq!(reg.raeume.raum_holen(&code).unwrap().viewers, vec![viewers[1]]);
    }

    #[test]
    fn doppelte_trennung_ist_idempotent() {
        let mut reg = Registries::neu(CodeGenerator::default());
        let transport = Aufzeichnung::default();
        let (_, _, viewers) = raum(&mut reg, &transport, 1);

        handle_disconnect(&mut reg, &transport, viewers[0]);
        assert_eq!(
            handle_disconnect(&mut reg, &transport, viewers[0]),
            Trennung::Ungebunden
        );
        assert_eq!(transport.alle().len(), 1);
    }
}
