//! UseCase: 切断処理
//!
//! 接続を削除し、参加していたルームから抜けます。
//! ルームに残ったメンバーには `peer_left` を通知します。
//! 未登録の接続の切断は何もしません（冪等）。

use std::sync::Arc;

use crate::domain::{ConnectionId, Departure, MessagePusher, Notification, RelayRepository};

/// 切断のユースケース
pub struct DisconnectUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RelayRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUseCase {
    pub fn new(
        repository: Arc<dyn RelayRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 参加していたルームと残りのメンバー（ルーム未参加・未登録の場合は None）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Departure> {
        // 1. 送信チャンネルを先に外し、以降の配送を no-op にする
        self.message_pusher.unregister_client(connection_id).await;

        // 2. 接続とルームのメンバーシップを削除
        let departure = self.repository.disconnect(connection_id).await?;

        // 3. 残りのメンバーに通知
        let notification = Notification::PeerLeft {
            peer: connection_id.clone(),
        };
        match self
            .message_pusher
            .broadcast(&departure.remaining_members, &notification)
            .await
        {
            Ok(delivered) => tracing::debug!(
                "Notified {} member(s) of room '{}' that '{}' left",
                delivered.len(),
                departure.room,
                connection_id
            ),
            Err(e) => tracing::warn!("Failed to broadcast peer_left: {}", e),
        }

        Some(departure)
    }
}
