//! UseCase テスト用の MessagePusher

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, Notification, PusherChannel};

/// 送信された通知を記録する MessagePusher
///
/// `connect` で登録された接続にだけ送信でき、それ以外は `ClientNotFound` になる。
#[derive(Default)]
pub struct RecordingPusher {
    clients: Mutex<HashSet<ConnectionId>>,
    pushed: Mutex<Vec<(ConnectionId, Notification)>>,
}

impl RecordingPusher {
    pub async fn connect(&self, connection_id: &ConnectionId) {
        self.clients.lock().await.insert(connection_id.clone());
    }

    pub async fn disconnect(&self, connection_id: &ConnectionId) {
        self.clients.lock().await.remove(connection_id);
    }

    /// 指定した接続に送られた通知（送信順）
    pub async fn pushed_to(&self, connection_id: &ConnectionId) -> Vec<Notification> {
        self.pushed
            .lock()
            .await
            .iter()
            .filter(|(target, _)| target == connection_id)
            .map(|(_, notification)| notification.clone())
            .collect()
    }

    pub async fn total_pushed(&self) -> usize {
        self.pushed.lock().await.len()
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, connection_id: ConnectionId, _sender: PusherChannel) {
        self.connect(&connection_id).await;
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        self.disconnect(connection_id).await;
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        if !self.clients.lock().await.contains(connection_id) {
            return Err(MessagePushError::ClientNotFound(connection_id.to_string()));
        }
        self.pushed
            .lock()
            .await
            .push((connection_id.clone(), notification.clone()));
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        notification: &Notification,
    ) -> Result<Vec<ConnectionId>, MessagePushError> {
        let mut delivered = Vec::new();
        for target in targets {
            if self.push_to(target, notification).await.is_ok() {
                delivered.push(target.clone());
            }
        }
        Ok(delivered)
    }
}

pub fn id(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}
