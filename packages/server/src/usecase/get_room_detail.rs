//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{RelayRepository, Room, RoomName};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RelayRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RelayRepository>) -> Self {
        Self { repository }
    }

    /// ルーム名からルームを取得する
    ///
    /// 空のルーム名も、存在しないルームとして扱う。
    pub async fn execute(&self, room_name: String) -> Result<Room, GetRoomDetailError> {
        let room_name =
            RoomName::new(room_name).map_err(|_| GetRoomDetailError::RoomNotFound)?;
        self.repository
            .get_room(&room_name)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}
