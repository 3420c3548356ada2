//! RelayState: ConnectionRegistry と RoomIndex の組
//!
//! ## 不変条件
//!
//! - 接続が記録しているルームのメンバー集合には、その接続 ID が必ず含まれる
//! - 接続 ID は、記録しているルーム以外のメンバー集合には含まれない
//! - メンバーが 0 人のルームは RoomIndex に存在しない
//!
//! 両方の構造を変更する操作（join, disconnect）は、このモジュールのメソッド 1 回で完結させます。
//! 呼び出し側（Repository 実装）は `RelayState` 全体を 1 つのロックで保護します。

use super::{
    connection_registry::ConnectionRegistry,
    entity::Room,
    error::RepositoryError,
    room_index::RoomIndex,
    value_object::{ConnectionId, LanguageCode, RoomName, Timestamp},
};

/// ルームから抜けた接続についての情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room: RoomName,
    /// 抜けた後も残っているメンバー（通知対象）
    pub remaining_members: Vec<ConnectionId>,
}

/// join の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub room: RoomName,
    /// join 前からルームにいたメンバー（join した本人は含まない）
    pub existing_members: Vec<ConnectionId>,
    /// 既に同じルームにいた場合は true（言語のみ更新）
    pub rejoined: bool,
    /// 別のルームから移動してきた場合、移動元ルームの情報
    pub previous: Option<Departure>,
}

/// ブロードキャスト時の宛先（メンバーとその翻訳先言語）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRoute {
    pub id: ConnectionId,
    pub language: LanguageCode,
}

/// ある時点でのルームのスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room: RoomName,
    pub members: Vec<MemberRoute>,
}

#[derive(Debug, Default)]
pub struct RelayState {
    registry: ConnectionRegistry,
    rooms: RoomIndex,
}

impl RelayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn rooms(&self) -> &RoomIndex {
        &self.rooms
    }

    pub fn register(&mut self, id: ConnectionId, now: Timestamp) -> Result<(), RepositoryError> {
        self.registry.register(id, now)
    }

    /// 接続をルームに参加させ、翻訳先言語を設定する
    ///
    /// 別のルームに参加中の場合は、先にそのルームから抜ける。
    pub fn join_room(
        &mut self,
        id: &ConnectionId,
        room: RoomName,
        language: LanguageCode,
        now: Timestamp,
    ) -> Result<JoinOutcome, RepositoryError> {
        let previous_room = self.registry.room_of(id).cloned();
        // 未登録の接続はここで弾かれ、RoomIndex は変更されない
        self.registry
            .set_room_and_language(id, room.clone(), language)?;

        let rejoined = previous_room.as_ref() == Some(&room);
        let previous = match previous_room {
            Some(prev) if prev != room => {
                self.rooms.leave(&prev, id);
                Some(Departure {
                    remaining_members: self.rooms.members_of(&prev).into_iter().collect(),
                    room: prev,
                })
            }
            _ => None,
        };

        let existing_members = self
            .rooms
            .members_of(&room)
            .into_iter()
            .filter(|member| member != id)
            .collect();
        self.rooms.join(&room, id.clone(), now);

        Ok(JoinOutcome {
            room,
            existing_members,
            rejoined,
            previous,
        })
    }

    /// 接続を削除し、参加していたルームからも抜ける
    ///
    /// 未登録の接続、またはルーム未参加の接続の場合は None。
    pub fn disconnect(&mut self, id: &ConnectionId) -> Option<Departure> {
        let room = self.registry.remove(id)?;
        self.rooms.leave(&room, id);
        Some(Departure {
            remaining_members: self.rooms.members_of(&room).into_iter().collect(),
            room,
        })
    }

    /// 送信者のルームと、各メンバーの翻訳先言語
    pub fn room_snapshot(&self, id: &ConnectionId) -> Option<RoomSnapshot> {
        let room = self.registry.room_of(id)?;
        let members = self
            .rooms
            .members_of(room)
            .into_iter()
            .map(|member| MemberRoute {
                language: self.registry.language_of(&member).unwrap_or_default(),
                id: member,
            })
            .collect();
        Some(RoomSnapshot {
            room: room.clone(),
            members,
        })
    }

    pub fn list_rooms(&self) -> Vec<Room> {
        self.rooms.rooms()
    }

    /// 不変条件がすべて成り立っているか
    pub fn is_consistent(&self) -> bool {
        let connections_consistent = self.registry.iter().all(|connection| {
            match &connection.room {
                Some(room) => self.rooms.members_of(room).contains(&connection.id),
                None => true,
            }
        });
        let rooms_consistent = self.rooms.rooms().iter().all(|room| {
            !room.is_empty()
                && room
                    .members
                    .iter()
                    .all(|member| self.registry.room_of(member) == Some(&room.name))
        });
        connections_consistent && rooms_consistent
    }
}
