//! InMemory Relay Repository 実装
//!
//! ドメイン層が定義する RelayRepository trait の具体的な実装。
//! `RelayState`（ConnectionRegistry + RoomIndex）全体を 1 つの Mutex で保護し、
//! 両方を変更する操作がアトミックになるようにします。
//!
//! サーバー起動時に生成され、UseCase に注入されます。再起動をまたいだ永続化は行いません。

use std::sync::Arc;

use async_trait::async_trait;
use parley_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Departure, JoinOutcome, LanguageCode, RelayRepository, RelayState,
    RepositoryError, Room, RoomName, RoomSnapshot, Timestamp,
};

/// インメモリ Relay Repository 実装
pub struct InMemoryRelayRepository {
    state: Mutex<RelayState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRelayRepository {
    /// システム時刻を使う Repository を作成
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 任意の Clock を使う Repository を作成（テスト用）
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(RelayState::new()),
            clock,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    /// 不変条件が成り立っているか（テスト・デバッグ用）
    pub async fn is_consistent(&self) -> bool {
        self.state.lock().await.is_consistent()
    }
}

impl Default for InMemoryRelayRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RelayRepository for InMemoryRelayRepository {
    async fn register_connection(
        &self,
        connection_id: ConnectionId,
    ) -> Result<Timestamp, RepositoryError> {
        let now = self.now();
        let mut state = self.state.lock().await;
        state.register(connection_id, now)?;
        Ok(now)
    }

    async fn join_room(
        &self,
        connection_id: &ConnectionId,
        room: RoomName,
        language: LanguageCode,
    ) -> Result<JoinOutcome, RepositoryError> {
        let now = self.now();
        let mut state = self.state.lock().await;
        state.join_room(connection_id, room, language, now)
    }

    async fn disconnect(&self, connection_id: &ConnectionId) -> Option<Departure> {
        let mut state = self.state.lock().await;
        state.disconnect(connection_id)
    }

    async fn contains_connection(&self, connection_id: &ConnectionId) -> bool {
        let state = self.state.lock().await;
        state.registry().contains(connection_id)
    }

    async fn language_of(&self, connection_id: &ConnectionId) -> Option<LanguageCode> {
        let state = self.state.lock().await;
        state.registry().language_of(connection_id)
    }

    async fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomName> {
        let state = self.state.lock().await;
        state.registry().room_of(connection_id).cloned()
    }

    async fn members_of(&self, room: &RoomName) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state.rooms().members_of(room).into_iter().collect()
    }

    async fn room_snapshot(&self, connection_id: &ConnectionId) -> Option<RoomSnapshot> {
        let state = self.state.lock().await;
        state.room_snapshot(connection_id)
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let state = self.state.lock().await;
        state.list_rooms()
    }

    async fn get_room(&self, room: &RoomName) -> Option<Room> {
        let state = self.state.lock().await;
        state.rooms().get(room).cloned()
    }

    async fn count_connections(&self) -> usize {
        let state = self.state.lock().await;
        state.registry().len()
    }
}
