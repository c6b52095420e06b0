//! Signal-Handler – Punkt-zu-Punkt-Weiterleitung von WebRTC-Verhandlungen
//!
//! Offer, Answer, ICE-Candidate und Renegotiation werden unveraendert an
//! genau ein Ziel weitergeleitet und um die Absender-ID ergaenzt. Der
//! Payload wird nicht geprueft, das Ziel nicht auf Existenz; ein totes Ziel
//! verwirft der Transport.

use nunuk_core::types::{ConnectionId, Rolle};
use nunuk_core::NunukError;
use nunuk_protocol::{ServerEvent, SignalArt};
use serde_json::Value;

use crate::broadcast::Transport;
use crate::server_state::Registries;

/// Leitet einen Verhandlungs-Payload an ein explizites Ziel weiter
pub fn handle_signal<T: Transport>(
    transport: &T,
    art: SignalArt,
    payload: Value,
    sender: ConnectionId,
    ziel: ConnectionId,
) -> bool {
    tracing::debug!(art = art.name(), sender = %sender, ziel = %ziel, "Signal weitergeleitet");
    transport.senden(&ziel, ServerEvent::signal(art, payload, sender))
}

/// Leitet ein Renegotiation-Offer eines Viewers an den Host seines Raums
///
/// Das Ziel wird aus der Bindung des Absenders bestimmt. Offers von
/// Hosts werden verworfen (`Ok(false)`).
pub fn handle_renegotiate_offer<T: Transport>(
    reg: &Registries,
    transport: &T,
    payload: Value,
    sender: ConnectionId,
) -> Result<bool, NunukError> {
    let bindung = reg
        .verbindungen
        .nachschlagen(&sender)
        .ok_or(NunukError::VeralteterAbsender(sender))?;

    match bindung.rolle {
        Rolle::Host => {
            tracing::debug!(sender = %sender, "Renegotiate-Offer vom Host verworfen");
            Ok(false)
        }
        Rolle::Viewer => {
            let raum = reg
                .raeume
                .raum_holen(&bindung.raum)
                .ok_or(NunukError::VeralteterAbsender(sender))?;
            Ok(handle_signal(
                transport,
                SignalArt::RenegotiateOffer,
                payload,
                sender,
                raum.host,
            ))
        }
    }
}
