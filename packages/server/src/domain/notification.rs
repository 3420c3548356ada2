//! 接続に送られる通知
//!
//! ワイヤフォーマットへの変換は Infrastructure 層（DTO）が担当します。

use super::value_object::{ConnectionId, LanguageCode, MessageText, SignalKind, SignalPayload};

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// 接続直後に本人へ送る、採番された接続 ID
    Connected { connection_id: ConnectionId },
    /// 新しいメンバーがルームに参加した
    PeerJoined { peer: ConnectionId },
    /// メンバーがルームから抜けた（切断・ルーム移動）
    PeerLeft { peer: ConnectionId },
    /// SDP / ICE candidate の中継
    Signal {
        kind: SignalKind,
        payload: SignalPayload,
        source: ConnectionId,
    },
    /// 受信者の言語に翻訳されたルームメッセージ
    TranslatedMessage(TranslatedMessage),
    /// 送信者へのエラー通知
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedMessage {
    pub original: MessageText,
    pub translated: String,
    pub source: ConnectionId,
    pub target_language: LanguageCode,
    pub is_sender: bool,
}
