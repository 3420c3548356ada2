//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルーム参加と翻訳先言語の設定、既存メンバーへの `peer_joined` 通知
//!
//! ### なぜこのテストが必要か
//! - 既存メンバーに 1 回ずつ通知され、参加した本人には通知されないことを保証
//! - ルーム移動時に元のルームのメンバーへ `peer_left` が届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームへの参加、既存ルームへの参加
//! - エッジケース：同じルームへの再参加（言語のみ更新、通知なし）、ルーム移動
//! - 異常系：切断済みの接続からの join

use std::sync::Arc;

use crate::domain::{
    ConnectionId, JoinOutcome, LanguageCode, MessagePusher, Notification, RelayRepository,
    RoomName,
};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RelayRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn RelayRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続
    /// * `room` - 参加するルーム（なければ作成される）
    /// * `language` - この接続が受け取るメッセージの翻訳先言語
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room: RoomName,
        language: LanguageCode,
    ) -> Result<JoinOutcome, JoinRoomError> {
        // 1. 接続の記録とルームのメンバー集合をまとめて更新
        let outcome = self
            .repository
            .join_room(connection_id, room, language)
            .await
            .map_err(JoinRoomError::from)?;

        // 2. ルームを移動した場合は、元のルームのメンバーに通知
        if let Some(previous) = &outcome.previous {
            let left = Notification::PeerLeft {
                peer: connection_id.clone(),
            };
            if let Err(e) = self
                .message_pusher
                .broadcast(&previous.remaining_members, &left)
                .await
            {
                tracing::warn!("Failed to broadcast peer_left: {}", e);
            }
        }

        // 3. 既存メンバーに新しいピアを通知（同じルームへの再参加では通知しない）
        if !outcome.rejoined {
            let joined = Notification::PeerJoined {
                peer: connection_id.clone(),
            };
            match self
                .message_pusher
                .broadcast(&outcome.existing_members, &joined)
                .await
            {
                Ok(delivered) => tracing::debug!(
                    "Notified {} member(s) of room '{}' that '{}' joined",
                    delivered.len(),
                    outcome.room,
                    connection_id
                ),
                Err(e) => tracing::warn!("Failed to broadcast peer_joined: {}", e),
            }
        }

        Ok(outcome)
    }
}
