//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - 通知を JSON フレームにエンコードして送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の受付と sender の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! 各接続の送信タスクがチャンネルを順に読み出すため、同じ送信元から同じ宛先への
//! 通知は送信した順に届きます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, Notification, PusherChannel},
    infrastructure::dto::conversion::encode_notification,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let clients = Arc::new(Mutex::new(HashMap::new()));
/// let pusher = WebSocketMessagePusher::new(clients.clone());
///
/// pusher.push_to(&connection_id, &Notification::PeerJoined { peer }).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let frame = encode_notification(notification)
            .map_err(|e| MessagePushError::Encoding(e.to_string()))?;

        let clients = self.clients.lock().await;
        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        notification: &Notification,
    ) -> Result<Vec<ConnectionId>, MessagePushError> {
        let frame = encode_notification(notification)
            .map_err(|e| MessagePushError::Encoding(e.to_string()))?;

        let clients = self.clients.lock().await;
        let mut delivered = Vec::with_capacity(targets.len());

        for target in targets {
            match clients.get(target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => match sender.send(frame.clone()) {
                    Ok(()) => delivered.push(target.clone()),
                    Err(e) => {
                        tracing::warn!("Failed to push message to connection '{}': {}", target, e)
                    }
                },
                None => tracing::debug!(
                    "Connection '{}' not found during broadcast, skipping",
                    target
                ),
            }
        }

        Ok(delivered)
    }
}
