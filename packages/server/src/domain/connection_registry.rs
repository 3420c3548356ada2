//! ConnectionRegistry: 接続中のコネクションの管理
//!
//! 各接続の参加ルームと翻訳先言語を保持します。
//! RoomIndex との整合性は `RelayState` が両方をまとめて更新することで保証します。

use std::collections::HashMap;

use super::{
    entity::Connection,
    error::RepositoryError,
    value_object::{ConnectionId, LanguageCode, RoomName, Timestamp},
};

#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 接続を登録する（ルームなし、翻訳先言語はフォールバック）
    ///
    /// 同じ ID の二重登録は呼び出し側のバグなので、既存のレコードは変更せずにエラーを返す。
    pub fn register(
        &mut self,
        id: ConnectionId,
        connected_at: Timestamp,
    ) -> Result<(), RepositoryError> {
        if self.connections.contains_key(&id) {
            return Err(RepositoryError::DuplicateConnection(id.into_string()));
        }
        self.connections
            .insert(id.clone(), Connection::new(id, connected_at));
        Ok(())
    }

    pub fn set_room_and_language(
        &mut self,
        id: &ConnectionId,
        room: RoomName,
        language: LanguageCode,
    ) -> Result<(), RepositoryError> {
        let connection = self
            .connections
            .get_mut(id)
            .ok_or_else(|| RepositoryError::UnknownConnection(id.as_str().to_string()))?;
        connection.room = Some(room);
        connection.target_language = Some(language);
        Ok(())
    }

    /// 翻訳先言語（未登録の接続の場合は None）
    pub fn language_of(&self, id: &ConnectionId) -> Option<LanguageCode> {
        self.connections.get(id).map(Connection::language)
    }

    pub fn room_of(&self, id: &ConnectionId) -> Option<&RoomName> {
        self.connections.get(id).and_then(|c| c.room.as_ref())
    }

    /// 接続を削除し、直前に参加していたルームを返す
    ///
    /// 未登録の ID の削除は何もしない（切断処理が他の後始末と競合しても問題ないように）。
    pub fn remove(&mut self, id: &ConnectionId) -> Option<RoomName> {
        self.connections.remove(id).and_then(|c| c.room)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
