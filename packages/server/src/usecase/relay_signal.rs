//! UseCase: シグナリングの中継（SDP / ICE candidate）
//!
//! 2 つの接続の間でネゴシエーションメッセージを中継します。ルームは参照しません。
//! payload は解釈せずにそのまま渡します。
//!
//! 宛先が既に切断されている場合は黙って破棄します（ネゴシエーション中の切断は想定内）。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePushError, MessagePusher, Notification, RelayRepository, SignalKind,
    SignalPayload,
};

/// 中継の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered,
    /// 宛先が存在しないため破棄した
    Dropped,
}

/// シグナリング中継のユースケース
pub struct RelaySignalUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RelayRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(
        repository: Arc<dyn RelayRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(
        &self,
        kind: SignalKind,
        source: &ConnectionId,
        target: &ConnectionId,
        payload: SignalPayload,
    ) -> RelayOutcome {
        if !self.repository.contains_connection(target).await {
            tracing::debug!(
                "Dropping {:?} from '{}': target '{}' is not connected",
                kind,
                source,
                target
            );
            return RelayOutcome::Dropped;
        }

        let notification = Notification::Signal {
            kind,
            payload,
            source: source.clone(),
        };
        match self.message_pusher.push_to(target, &notification).await {
            Ok(()) => {
                tracing::debug!("Relayed {:?} from '{}' to '{}'", kind, source, target);
                RelayOutcome::Delivered
            }
            // 確認後に切断された
            Err(MessagePushError::ClientNotFound(_)) => RelayOutcome::Dropped,
            Err(e) => {
                tracing::warn!("Failed to relay {:?} to '{}': {}", kind, target, e);
                RelayOutcome::Dropped
            }
        }
    }
}
