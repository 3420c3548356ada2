//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{RelayRepository, Room};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RelayRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RelayRepository>) -> Self {
        Self { repository }
    }

    /// メンバーのいるルームをルーム名順に返す
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.list_rooms().await
    }
}
