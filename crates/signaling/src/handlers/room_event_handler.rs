//! Raum-Event-Handler – Fan-out raumweiter Events nach Absender-Rolle
//!
//! | Event            | Host sendet  | Viewer sendet                 |
//! |------------------|--------------|-------------------------------|
//! | sharing-*        | alle Viewer  | ignoriert                     |
//! | audio-state      | alle Viewer  | Host + alle anderen Viewer    |
//! | speaking-state   | alle Viewer  | nur Host                      |
//! | chat-message     | alle Viewer  | Host + alle anderen Viewer    |
//! | typing           | alle Viewer  | nur Host                      |
//!
//! Ein Absender ohne gueltige Raum-Bindung fuehrt zum stillen Verwerfen
//! (`VeralteterAbsender`). Nur `chat-message` versucht vorher, den Raum
//! ueber eine Suche in der Raum-Registry wiederzufinden.

use nunuk_core::types::{ConnectionId, Rolle};
use nunuk_core::NunukError;
use nunuk_protocol::events::{
    AudioChangedEvent, ChatMessageEvent, ChatMessageRequest, SharingStartedEvent, SpeakingEvent,
    TypingEvent, TypingRequest,
};
use nunuk_protocol::ServerEvent;
use serde_json::Value;

use crate::broadcast::Transport;
use crate::rooms::Room;
use crate::server_state::Registries;

/// Event-Familien mit eigener Zielregel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFamilie {
    Sharing,
    Audio,
    Speaking,
    Chat,
    Typing,
}

/// Bestimmt die Empfaenger eines raumweiten Events
///
/// Der Absender ist nie unter den Empfaengern.
pub fn ziele_berechnen(
    raum: &Room,
    sender: &ConnectionId,
    rolle: Rolle,
    familie: EventFamilie,
) -> Vec<ConnectionId> {
    match rolle {
        Rolle::Host => raum.viewers.clone(),
        Rolle::Viewer => match familie {
            EventFamilie::Sharing => Vec::new(),
            EventFamilie::Speaking | EventFamilie::Typing => vec![raum.host],
            EventFamilie::Audio | EventFamilie::Chat => std::iter::once(raum.host)
                .chain(raum.viewers.iter().copied().filter(|id| id != sender))
                .collect(),
        },
    }
}

/// Raum und Rolle des Absenders aus seiner Bindung
fn absender_aufloesen<'a>(
    reg: &'a Registries,
    sender: &ConnectionId,
) -> Result<(&'a Room, Rolle), NunukError> {
    reg.verbindungen
        .nachschlagen(sender)
        .and_then(|bindung| {
            reg.raeume
                .raum_holen(&bindung.raum)
                .map(|raum| (raum, bindung.rolle))
        })
        .ok_or(NunukError::VeralteterAbsender(*sender))
}

fn verteilen<T: Transport>(
    reg: &Registries,
    transport: &T,
    sender: &ConnectionId,
    familie: EventFamilie,
    event: impl FnOnce(Rolle) -> ServerEvent,
) -> Result<usize, NunukError> {
    let (raum, rolle) = absender_aufloesen(reg, sender)?;
    let ziele = ziele_berechnen(raum, sender, rolle, familie);
    if ziele.is_empty() {
        return Ok(0);
    }
    Ok(transport.an_mehrere_senden(&ziele, &event(rolle)))
}

/// Anzeigename mit Rollen-Fallback (leere Namen zaehlen als fehlend)
fn anzeigename(name: Option<String>, rolle: Rolle) -> String {
    name.filter(|n| !n.is_empty())
        .unwrap_or_else(|| rolle.standard_name().to_string())
}

pub fn handle_start_sharing<T: Transport>(
    reg: &Registries,
    transport: &T,
    sender: ConnectionId,
    settings: Value,
) -> Result<usize, NunukError> {
    let gesendet = verteilen(reg, transport, &sender, EventFamilie::Sharing, |_| {
        ServerEvent::SharingStarted(SharingStartedEvent { settings })
    })?;
    tracing::info!(sender = %sender, viewer = gesendet, "Bildschirmfreigabe gestartet");
    Ok(gesendet)
}

pub fn handle_stop_sharing<T: Transport>(
    reg: &Registries,
    transport: &T,
    sender: ConnectionId,
) -> Result<usize, NunukError> {
    let gesendet = verteilen(reg, transport, &sender, EventFamilie::Sharing, |_| {
        ServerEvent::SharingStopped
    })?;
    tracing::info!(sender = %sender, viewer = gesendet, "Bildschirmfreigabe gestoppt");
    Ok(gesendet)
}

pub fn handle_audio_state<T: Transport>(
    reg: &Registries,
    transport: &T,
    sender: ConnectionId,
    is_muted: bool,
) -> Result<usize, NunukError> {
    tracing::debug!(sender = %sender, is_muted, "Audio-Status geaendert");
    verteilen(reg, transport, &sender, EventFamilie::Audio, |role| {
        ServerEvent::ParticipantAudioChanged(AudioChangedEvent {
            user_id: sender,
            is_muted,
            role,
        })
    })
}

pub fn handle_speaking_state<T: Transport>(
    reg: &Registries,
    transport: &T,
    sender: ConnectionId,
    is_speaking: bool,
    level: Option<f64>,
) -> Result<usize, NunukError> {
    verteilen(reg, transport, &sender, EventFamilie::Speaking, |role| {
        ServerEvent::ParticipantSpeaking(SpeakingEvent {
            user_id: sender,
            is_speaking,
            level,
            role,
        })
    })
}

/// Stempelt und verteilt eine Chat-Nachricht
///
/// `id`, `senderId` und `timestamp` vergibt der Relay. Ist der Absender
/// nicht (mehr) an einen existierenden Raum gebunden, wird er ueber eine
/// Suche in der Raum-Registry neu gebunden.
pub fn handle_chat_message<T: Transport>(
    reg: &mut Registries,
    transport: &T,
    sender: ConnectionId,
    request: ChatMessageRequest,
) -> Result<usize, NunukError> {
    if absender_aufloesen(reg, &sender).is_err() {
        // TODO: entfernen sobald keine Clients mehr ohne Bindung chatten
        let (code, rolle) = reg.raeume.raum_von_verbindung(&sender).ok_or_else(|| {
            tracing::warn!(sender = %sender, "Chat-Absender in keinem Raum gefunden");
            NunukError::VeralteterAbsender(sender)
        })?;
        reg.verbindungen.neu_binden(sender, rolle, code);
    }

    let ChatMessageRequest {
        message,
        sender_name,
        ..
    } = request;

    let gesendet = verteilen(reg, transport, &sender, EventFamilie::Chat, |rolle| {
        ServerEvent::ChatMessage(ChatMessageEvent {
            id: uuid::Uuid::new_v4().to_string(),
            message,
            sender_name: anzeigename(sender_name, rolle),
            sender_role: rolle,
            sender_id: sender,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        })
    })?;

    tracing::debug!(sender = %sender, empfaenger = gesendet, "Chat-Nachricht verteilt");
    Ok(gesendet)
}

pub fn handle_typing<T: Transport>(
    reg: &Registries,
    transport: &T,
    sender: ConnectionId,
    request: TypingRequest,
) -> Result<usize, NunukError> {
    verteilen(reg, transport, &sender, EventFamilie::Typing, |rolle| {
        ServerEvent::Typing(TypingEvent {
            sender_name: anzeigename(request.sender_name, rolle),
            sender_role: rolle,
            sender_id: sender,
        })
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
