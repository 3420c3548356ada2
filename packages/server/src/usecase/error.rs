//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::RepositoryError;

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// ルーム参加処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    /// 切断済みの接続からの join（トランスポートとの競合で起こりうる）
    #[error("Connection '{0}' is not registered")]
    UnknownConnection(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for JoinRoomError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::UnknownConnection(id) => Self::UnknownConnection(id),
            other => Self::Repository(other),
        }
    }
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room not found")]
    RoomNotFound,
}
