//! RoomIndex: ルーム名からメンバー集合へのマッピング
//!
//! メンバーが 0 人になったルームは即座に削除されます。

use std::collections::{BTreeSet, HashMap};

use super::{
    entity::Room,
    value_object::{ConnectionId, RoomName, Timestamp},
};

#[derive(Debug, Default)]
pub struct RoomIndex {
    rooms: HashMap<RoomName, Room>,
}

impl RoomIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// メンバーを追加する（ルームがなければ作成する）
    pub fn join(&mut self, room: &RoomName, id: ConnectionId, now: Timestamp) {
        self.rooms
            .entry(room.clone())
            .or_insert_with(|| Room::new(room.clone(), now))
            .members
            .insert(id);
    }

    /// メンバーを削除する。空になったルームは削除する。
    ///
    /// 実際に削除された場合は true を返す。
    pub fn leave(&mut self, room: &RoomName, id: &ConnectionId) -> bool {
        let Some(entry) = self.rooms.get_mut(room) else {
            return false;
        };
        let removed = entry.members.remove(id);
        if entry.is_empty() {
            self.rooms.remove(room);
        }
        removed
    }

    /// 呼び出し時点のメンバー集合（ルームがなければ空）
    pub fn members_of(&self, room: &RoomName) -> BTreeSet<ConnectionId> {
        self.rooms
            .get(room)
            .map(|r| r.members.clone())
            .unwrap_or_default()
    }

    pub fn get(&self, room: &RoomName) -> Option<&Room> {
        self.rooms.get(room)
    }

    pub fn contains_room(&self, room: &RoomName) -> bool {
        self.rooms.contains_key(room)
    }

    /// 全ルーム（ルーム名順）
    pub fn rooms(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn room(value: &str) -> RoomName {
        RoomName::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_join_creates_room_implicitly() {
        // テスト項目: 最初の join でルームが作成される
        // given (前提条件):
        let mut index = RoomIndex::new();

        // when (操作):
        index.join(&room("r1"), id("alice"), Timestamp::new(1000));

        // then (期待する結果):
        assert!(index.contains_room(&room("r1")));
        assert_eq!(index.members_of(&room("r1")).len(), 1);
        assert_eq!(index.get(&room("r1")).unwrap().created_at, Timestamp::new(1000));
    }

    #[test]
    fn test_join_does_not_duplicate_members() {
        // テスト項目: 同じメンバーを二度追加しても重複しない
        // given (前提条件):
        let mut index = RoomIndex::new();
        index.join(&room("r1"), id("alice"), Timestamp::new(1000));

        // when (操作):
        index.join(&room("r1"), id("alice"), Timestamp::new(2000));

        // then (期待する結果):
        assert_eq!(index.members_of(&room("r1")).len(), 1);
        assert_eq!(index.get(&room("r1")).unwrap().created_at, Timestamp::new(1000));
    }

    #[test]
    fn test_leave_last_member_deletes_room() {
        // テスト項目: 最後のメンバーが抜けるとルームが削除される
        // given (前提条件):
        let mut index = RoomIndex::new();
        index.join(&room("r1"), id("alice"), Timestamp::new(1000));
        index.join(&room("r1"), id("bob"), Timestamp::new(1000));

        // when (操作):
        let first = index.leave(&room("r1"), &id("alice"));
        let still_exists = index.contains_room(&room("r1"));
        let second = index.leave(&room("r1"), &id("bob"));

        // then (期待する結果):
        assert!(first);
        assert!(still_exists);
        assert!(second);
        assert!(!index.contains_room(&room("r1")));
        assert!(index.is_empty());
    }

    #[test]
    fn test_members_of_unknown_room_is_empty() {
        // テスト項目: 存在しないルームのメンバーは空集合
        // given (前提条件):
        let index = RoomIndex::new();

        // when (操作):
        let members = index.members_of(&room("nowhere"));

        // then (期待する結果):
        assert!(members.is_empty());
    }

    #[test]
    fn test_leave_non_member_keeps_room() {
        // テスト項目: メンバーでない ID の leave はルームに影響しない
        // given (前提条件):
        let mut index = RoomIndex::new();
        index.join(&room("r1"), id("alice"), Timestamp::new(1000));

        // when (操作):
        let removed = index.leave(&room("r1"), &id("bob"));

        // then (期待する結果):
        assert!(!removed);
        assert_eq!(index.members_of(&room("r1")).len(), 1);
    }

    #[test]
    fn test_rooms_sorted_by_name() {
        // テスト項目: ルーム一覧はルーム名順で返される
        // given (前提条件):
        let mut index = RoomIndex::new();
        index.join(&room("zeta"), id("alice"), Timestamp::new(1000));
        index.join(&room("alpha"), id("bob"), Timestamp::new(1000));

        // when (操作):
        let rooms = index.rooms();

        // then (期待する結果):
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].name, room("alpha"));
        assert_eq!(rooms[1].name, room("zeta"));
    }
}
