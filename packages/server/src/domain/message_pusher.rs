//! MessagePusher trait 定義
//!
//! 接続への通知（送信）を抽象化します。
//! UseCase 層はこの trait に依存し、WebSocket などの具体的な送信手段には依存しません。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, Notification};

/// 接続ごとの送信チャンネル（エンコード済みのフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを削除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続に通知を送信
    ///
    /// 接続が既に存在しない場合は `MessagePushError::ClientNotFound` を返す。
    /// 呼び出し側はこれを「切断済み」として扱い、無視してよい。
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続に同じ通知を送信
    ///
    /// 一部の宛先への送信失敗は許容し、送信できた宛先を返す。
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        notification: &Notification,
    ) -> Result<Vec<ConnectionId>, MessagePushError>;
}
