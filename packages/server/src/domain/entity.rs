//! エンティティ

use std::collections::BTreeSet;

use super::value_object::{ConnectionId, LanguageCode, RoomName, Timestamp};

/// 接続（1 つのトランスポートセッション）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    /// 参加中のルーム（join するまでは None）
    pub room: Option<RoomName>,
    /// 受信メッセージの翻訳先言語（未設定ならフォールバック言語）
    pub target_language: Option<LanguageCode>,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            room: None,
            target_language: None,
            connected_at,
        }
    }

    /// 翻訳先言語（未設定の場合はフォールバック言語）
    pub fn language(&self) -> LanguageCode {
        self.target_language.clone().unwrap_or_default()
    }
}

/// ルーム
///
/// メンバーが 1 人以上いる間だけ存在します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: RoomName,
    pub members: BTreeSet<ConnectionId>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self {
            name,
            members: BTreeSet::new(),
            created_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
