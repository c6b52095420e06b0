//! Client- und Server-Events
//!
//! ## Design
//! - Adjacently Tagged Enums: `{"event": "<name>", "data": {...}}`
//! - Event-Namen in kebab-case, Felder in camelCase (wie die Web-Clients)
//! - Events ohne Payload lassen `data` weg

use nunuk_core::types::{ConnectionId, Rolle, RoomCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Eingehende Payloads (Client -> Relay)
// ---------------------------------------------------------------------------

/// Beitritt zu einem bestehenden Raum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    #[serde(alias = "code")]
    pub nunuk: RoomCode,
}

/// Offer an eine explizit benannte Verbindung
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRequest {
    pub offer: Value,
    pub target_id: ConnectionId,
}

/// Answer an eine explizit benannte Verbindung
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub answer: Value,
    pub target_id: ConnectionId,
}

/// ICE-Candidate an eine explizit benannte Verbindung
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRequest {
    pub candidate: Value,
    pub target_id: ConnectionId,
}

/// Renegotiation-Offer eines Viewers
///
/// `targetId` wird ignoriert: das Ziel ist immer der Host des Raums.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenegotiateOfferRequest {
    pub offer: Value,
    #[serde(default)]
    pub target_id: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartSharingRequest {
    #[serde(default)]
    pub settings: Value,
}

/// Mute/Unmute-Meldung
///
/// `userId` und `role` sind rein informativ; massgeblich sind die
/// Verbindungs-ID und die gebundene Rolle des Absenders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioStateRequest {
    pub is_muted: bool,
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingStateRequest {
    pub is_speaking: bool,
    #[serde(default)]
    pub level: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    pub message: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub sender_role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingRequest {
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub sender_role: Option<String>,
}

/// Alle Events die ein Client senden kann
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    // Raum-Lebenszyklus
    CreateNunuk,
    JoinNunuk(JoinRequest),

    // WebRTC-Signaling
    Offer(OfferRequest),
    Answer(AnswerRequest),
    IceCandidate(CandidateRequest),
    RenegotiateOffer(RenegotiateOfferRequest),
    RenegotiateAnswer(AnswerRequest),

    // Raum-Events
    StartSharing(StartSharingRequest),
    StopSharing,
    AudioStateChanged(AudioStateRequest),
    SpeakingState(SpeakingStateRequest),
    ChatMessage(ChatMessageRequest),
    Typing(TypingRequest),

    // Transport
    Disconnect,
}

impl ClientEvent {
    /// Event-Name wie auf dem Draht (fuer Logs)
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateNunuk => "create-nunuk",
            Self::JoinNunuk(_) => "join-nunuk",
            Self::Offer(_) => "offer",
            Self::Answer(_) => "answer",
            Self::IceCandidate(_) => "ice-candidate",
            Self::RenegotiateOffer(_) => "renegotiate-offer",
            Self::RenegotiateAnswer(_) => "renegotiate-answer",
            Self::StartSharing(_) => "start-sharing",
            Self::StopSharing => "stop-sharing",
            Self::AudioStateChanged(_) => "audio-state-changed",
            Self::SpeakingState(_) => "speaking-state",
            Self::ChatMessage(_) => "chat-message",
            Self::Typing(_) => "typing",
            Self::Disconnect => "disconnect",
        }
    }
}

// ---------------------------------------------------------------------------
// Ausgehende Payloads (Relay -> Client)
// ---------------------------------------------------------------------------

/// Teilt dem Client nach dem Verbindungsaufbau seine eigene ID mit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedEvent {
    pub id: ConnectionId,
}

/// Antwort auf `create-nunuk` / `join-nunuk` mit Ack-ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckEvent {
    pub id: u64,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nunuk: Option<RoomCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerJoinedEvent {
    pub viewer_id: ConnectionId,
    pub viewer_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerLeftEvent {
    pub viewer_id: ConnectionId,
    pub viewer_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferEvent {
    pub offer: Value,
    pub sender_id: ConnectionId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEvent {
    pub answer: Value,
    pub sender_id: ConnectionId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateEvent {
    pub candidate: Value,
    pub sender_id: ConnectionId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharingStartedEvent {
    pub settings: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioChangedEvent {
    pub user_id: ConnectionId,
    pub is_muted: bool,
    pub role: Rolle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingEvent {
    pub user_id: ConnectionId,
    pub is_speaking: bool,
    pub level: Option<f64>,
    pub role: Rolle,
}

/// Vom Relay gestempelte Chat-Nachricht
///
/// `id`, `senderId` und `timestamp` setzt ausschliesslich der Relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageEvent {
    pub id: String,
    pub message: String,
    pub sender_name: String,
    pub sender_role: Rolle,
    pub sender_id: ConnectionId,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingEvent {
    pub sender_name: String,
    pub sender_role: Rolle,
    pub sender_id: ConnectionId,
}

/// Alle Events die der Relay an Clients sendet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    Connected(ConnectedEvent),
    Ack(AckEvent),

    // Praesenz
    ViewerJoined(ViewerJoinedEvent),
    ViewerLeft(ViewerLeftEvent),
    HostDisconnected,

    // WebRTC-Signaling
    Offer(OfferEvent),
    Answer(AnswerEvent),
    IceCandidate(CandidateEvent),
    RenegotiateOffer(OfferEvent),
    RenegotiateAnswer(AnswerEvent),

    // Raum-Events
    SharingStarted(SharingStartedEvent),
    SharingStopped,
    ParticipantAudioChanged(AudioChangedEvent),
    ParticipantSpeaking(SpeakingEvent),
    ChatMessage(ChatMessageEvent),
    Typing(TypingEvent),
}

impl ServerEvent {
    /// Event-Name wie auf dem Draht (fuer Logs)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected(_) => "connected",
            Self::Ack(_) => "ack",
            Self::ViewerJoined(_) => "viewer-joined",
            Self::ViewerLeft(_) => "viewer-left",
            Self::HostDisconnected => "host-disconnected",
            Self::Offer(_) => "offer",
            Self::Answer(_) => "answer",
            Self::IceCandidate(_) => "ice-candidate",
            Self::RenegotiateOffer(_) => "renegotiate-offer",
            Self::RenegotiateAnswer(_) => "renegotiate-answer",
            Self::SharingStarted(_) => "sharing-started",
            Self::SharingStopped => "sharing-stopped",
            Self::ParticipantAudioChanged(_) => "participant-audio-changed",
            Self::ParticipantSpeaking(_) => "participant-speaking",
            Self::ChatMessage(_) => "chat-message",
            Self::Typing(_) => "typing",
        }
    }

    /// Baut das ausgehende Signaling-Event einer Art
    ///
    /// Der Payload wird unveraendert uebernommen und um die
    /// Absender-ID ergaenzt.
    pub fn signal(art: SignalArt, payload: Value, sender_id: ConnectionId) -> Self {
        match art {
            SignalArt::Offer => Self::Offer(OfferEvent {
                offer: payload,
                sender_id,
            }),
            SignalArt::Answer => Self::Answer(AnswerEvent {
                answer: payload,
                sender_id,
            }),
            SignalArt::IceCandidate => Self::IceCandidate(CandidateEvent {
                candidate: payload,
                sender_id,
            }),
            SignalArt::RenegotiateOffer => Self::RenegotiateOffer(OfferEvent {
                offer: payload,
                sender_id,
            }),
            SignalArt::RenegotiateAnswer => Self::RenegotiateAnswer(AnswerEvent {
                answer: payload,
                sender_id,
            }),
        }
    }

    /// Serialisiert das Event als JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialisiert ein Event aus JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Arten von Verhandlungs-Nachrichten die Punkt-zu-Punkt weitergeleitet werden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalArt {
    Offer,
    Answer,
    IceCandidate,
    RenegotiateOffer,
    RenegotiateAnswer,
}

impl SignalArt {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::IceCandidate => "ice-candidate",
            Self::RenegotiateOffer => "renegotiate-offer",
            Self::RenegotiateAnswer => "renegotiate-answer",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
