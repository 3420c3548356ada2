//! UseCase: 接続処理
//!
//! トランスポート層が新しい接続を受け付けたときに呼ばれます。
//! 接続を登録し、採番された接続 ID を本人に通知します。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Notification, PusherChannel, RelayRepository, RepositoryError,
    Timestamp,
};

use super::error::ConnectError;

/// 接続のユースケース
pub struct ConnectUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RelayRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectUseCase {
    pub fn new(
        repository: Arc<dyn RelayRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 接続を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 接続時刻
    /// * `Err(ConnectError)` - 同じ ID が既に登録されている
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Timestamp, ConnectError> {
        // 1. Repository に接続を登録
        let connected_at = self
            .repository
            .register_connection(connection_id.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateConnection(id) => ConnectError::DuplicateConnection(id),
                other => ConnectError::Repository(other),
            })?;

        // 2. MessagePusher に送信チャンネルを登録
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        // 3. 採番された ID を本人に通知
        let notification = Notification::Connected {
            connection_id: connection_id.clone(),
        };
        if let Err(e) = self.message_pusher.push_to(&connection_id, &notification).await {
            tracing::warn!("Failed to notify '{}' of its connection id: {}", connection_id, e);
        }

        Ok(connected_at)
    }
}
