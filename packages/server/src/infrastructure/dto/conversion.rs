//! Conversion logic between DTOs and domain types.

use thiserror::Error;

use crate::domain::{
    ConnectionId, LanguageCode, MessageText, Notification, Room, RoomName, SignalKind,
    SignalPayload, TranslatedMessage,
};
use crate::infrastructure::dto::{http as http_dto, websocket as dto};
use parley_shared::time::timestamp_to_rfc3339;

// ========================================
// Inbound: DTO → Domain
// ========================================

/// A validated inbound event
#[derive(Debug, Clone, PartialEq)]
pub enum PeerCommand {
    JoinRoom {
        room: RoomName,
        language: LanguageCode,
    },
    RelaySignal {
        kind: SignalKind,
        target: ConnectionId,
        payload: SignalPayload,
    },
    TranslateMessage {
        text: MessageText,
    },
}

/// An inbound event with a missing or invalid required field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed '{event}' event: {reason}")]
pub struct MalformedEvent {
    pub event: &'static str,
    pub reason: String,
}

impl MalformedEvent {
    fn new(event: &'static str, reason: impl ToString) -> Self {
        Self {
            event,
            reason: reason.to_string(),
        }
    }
}

fn relay_command(
    event: &'static str,
    kind: SignalKind,
    target: Option<String>,
    payload: Option<serde_json::Value>,
) -> Result<PeerCommand, MalformedEvent> {
    let target = target.ok_or_else(|| MalformedEvent::new(event, "missing target"))?;
    let target = ConnectionId::new(target).map_err(|e| MalformedEvent::new(event, e))?;
    let payload = payload.ok_or_else(|| MalformedEvent::new(event, "missing payload"))?;
    Ok(PeerCommand::RelaySignal {
        kind,
        target,
        payload: SignalPayload::new(payload),
    })
}

impl TryFrom<dto::ClientEvent> for PeerCommand {
    type Error = MalformedEvent;

    fn try_from(event: dto::ClientEvent) -> Result<Self, Self::Error> {
        match event {
            dto::ClientEvent::JoinRoom {
                room,
                target_language,
            } => {
                let room = room.ok_or_else(|| MalformedEvent::new("join_room", "missing room"))?;
                let room = RoomName::new(room).map_err(|e| MalformedEvent::new("join_room", e))?;
                Ok(PeerCommand::JoinRoom {
                    room,
                    language: LanguageCode::or_fallback(target_language),
                })
            }
            dto::ClientEvent::RelaySdp { target, sdp } => {
                relay_command("relay_sdp", SignalKind::SessionDescription, target, sdp)
            }
            dto::ClientEvent::RelayIce { target, ice } => {
                relay_command("relay_ice", SignalKind::IceCandidate, target, ice)
            }
            dto::ClientEvent::TranslateMessage { text } => {
                let text = text
                    .ok_or_else(|| MalformedEvent::new("translate_message", "missing text"))?;
                let text =
                    MessageText::new(text).map_err(|e| MalformedEvent::new("translate_message", e))?;
                Ok(PeerCommand::TranslateMessage { text })
            }
        }
    }
}

// ========================================
// Outbound: Domain → DTO
// ========================================

impl From<&TranslatedMessage> for dto::TranslatedMessageDto {
    fn from(model: &TranslatedMessage) -> Self {
        Self {
            r#type: dto::MessageType::TranslatedMessage,
            original: model.original.as_str().to_string(),
            translated: model.translated.clone(),
            source: model.source.as_str().to_string(),
            target_lang: model.target_language.as_str().to_string(),
            is_sender: model.is_sender,
        }
    }
}

/// Encode a notification as a JSON text frame
pub fn encode_notification(notification: &Notification) -> Result<String, serde_json::Error> {
    match notification {
        Notification::Connected { connection_id } => serde_json::to_string(&dto::ConnectedMessage {
            r#type: dto::MessageType::Connected,
            sid: connection_id.as_str().to_string(),
        }),
        Notification::PeerJoined { peer } => serde_json::to_string(&dto::PeerJoinedMessage {
            r#type: dto::MessageType::PeerJoined,
            peer: peer.as_str().to_string(),
        }),
        Notification::PeerLeft { peer } => serde_json::to_string(&dto::PeerLeftMessage {
            r#type: dto::MessageType::PeerLeft,
            peer: peer.as_str().to_string(),
        }),
        Notification::Signal {
            kind: SignalKind::SessionDescription,
            payload,
            source,
        } => serde_json::to_string(&dto::SdpMessage {
            r#type: dto::MessageType::Sdp,
            sdp: payload.as_value().clone(),
            source: source.as_str().to_string(),
        }),
        Notification::Signal {
            kind: SignalKind::IceCandidate,
            payload,
            source,
        } => serde_json::to_string(&dto::IceMessage {
            r#type: dto::MessageType::Ice,
            ice: payload.as_value().clone(),
            source: source.as_str().to_string(),
        }),
        Notification::TranslatedMessage(message) => {
            serde_json::to_string(&dto::TranslatedMessageDto::from(message))
        }
        Notification::Error { message } => serde_json::to_string(&dto::ErrorMessage {
            r#type: dto::MessageType::Error,
            message: message.clone(),
        }),
    }
}

impl From<&Room> for http_dto::RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            room: room.name.as_str().to_string(),
            members: room
                .members
                .iter()
                .map(|member| member.as_str().to_string())
                .collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}
