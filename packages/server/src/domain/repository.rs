//! Repository trait 定義
//!
//! 接続とルームの状態へのアクセスを抽象化します。
//! 実装は ConnectionRegistry と RoomIndex を 1 つの排他制御の下で更新しなければなりません。

use async_trait::async_trait;

use super::{
    ConnectionId, Departure, JoinOutcome, LanguageCode, RepositoryError, Room, RoomName,
    RoomSnapshot, Timestamp,
};

#[async_trait]
pub trait RelayRepository: Send + Sync {
    /// 接続を登録し、登録時刻を返す
    async fn register_connection(
        &self,
        connection_id: ConnectionId,
    ) -> Result<Timestamp, RepositoryError>;

    /// ルームへの参加と翻訳先言語の設定をまとめて行う
    async fn join_room(
        &self,
        connection_id: &ConnectionId,
        room: RoomName,
        language: LanguageCode,
    ) -> Result<JoinOutcome, RepositoryError>;

    /// 接続を削除し、ルームからも抜ける
    async fn disconnect(&self, connection_id: &ConnectionId) -> Option<Departure>;

    /// 接続が登録されているか
    async fn contains_connection(&self, connection_id: &ConnectionId) -> bool;

    /// 翻訳先言語（未登録の接続は None）
    async fn language_of(&self, connection_id: &ConnectionId) -> Option<LanguageCode>;

    /// 参加中のルーム
    async fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomName>;

    /// ルームのメンバー（ルームがなければ空）
    async fn members_of(&self, room: &RoomName) -> Vec<ConnectionId>;

    /// 接続が参加しているルームと、各メンバーの翻訳先言語
    async fn room_snapshot(&self, connection_id: &ConnectionId) -> Option<RoomSnapshot>;

    /// 全ルーム
    async fn list_rooms(&self) -> Vec<Room>;

    /// 指定したルーム
    async fn get_room(&self, room: &RoomName) -> Option<Room>;

    /// 接続数
    async fn count_connections(&self) -> usize;
}
