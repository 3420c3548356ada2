//! WebSocket event frames.
//!
//! Every frame is a JSON text frame carrying a `type` discriminator.

use serde::{Deserialize, Serialize};

/// Outbound message types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Connected,
    PeerJoined,
    PeerLeft,
    Sdp,
    Ice,
    TranslatedMessage,
    Error,
}

/// Inbound events sent by a peer
///
/// Fields are optional here so that a frame with a missing field still parses
/// and can be dropped as a malformed event by the conversion layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinRoom {
        room: Option<String>,
        target_language: Option<String>,
    },
    RelaySdp {
        target: Option<String>,
        sdp: Option<serde_json::Value>,
    },
    RelayIce {
        target: Option<String>,
        ice: Option<serde_json::Value>,
    },
    TranslateMessage {
        text: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedMessage {
    pub r#type: MessageType,
    pub sid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerJoinedMessage {
    pub r#type: MessageType,
    pub peer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerLeftMessage {
    pub r#type: MessageType,
    pub peer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdpMessage {
    pub r#type: MessageType,
    pub sdp: serde_json::Value,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceMessage {
    pub r#type: MessageType,
    pub ice: serde_json::Value,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedMessageDto {
    pub r#type: MessageType,
    pub original: String,
    pub translated: String,
    pub source: String,
    pub target_lang: String,
    pub is_sender: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub r#type: MessageType,
    pub message: String,
}
