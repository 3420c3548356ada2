//! UseCase: ルームメッセージの翻訳ブロードキャスト
//!
//! 送信者のルームのメンバー全員（送信者を含む）に、各メンバーの翻訳先言語へ翻訳した
//! メッセージを届けます。
//!
//! ## 方針
//!
//! - メンバーと言語はロックを 1 回取ってスナップショットし、以降は共有状態に触れない
//! - メンバーごとの翻訳は並行に実行し、それぞれにタイムアウトを設ける
//! - あるメンバーの翻訳が失敗しても他のメンバーへの配送は続ける
//! - 翻訳に失敗したメンバーには何も届かない。送信者にだけエラーを 1 回通知する
//! - 配送時に切断済みのメンバーは飛ばす
//!
//! ## テスト実装の作業記録
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 人のルームで各自の言語に翻訳されて届く
//! - 異常系：一部メンバーの翻訳失敗・タイムアウト
//! - エッジケース：ルーム未参加の送信者、ブロードキャスト中の切断

use std::{sync::Arc, time::Duration};

use futures_util::future::join_all;

use crate::domain::{
    ConnectionId, LanguageCode, MemberRoute, MessagePushError, MessagePusher, MessageText,
    Notification, RelayRepository, RoomName, TranslatedMessage, TranslationError, Translator,
};

/// 翻訳失敗時に送信者へ送るメッセージ
pub const TRANSLATION_FAILED_MESSAGE: &str = "Translation failed";

/// ブロードキャストの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    pub room: RoomName,
    /// 翻訳済みメッセージが届いたメンバー
    pub delivered: Vec<ConnectionId>,
    /// 配送時に切断済みだったメンバー
    pub skipped: Vec<ConnectionId>,
    /// 翻訳に失敗したメンバー
    pub failed: Vec<(ConnectionId, TranslationError)>,
}

enum DeliveryOutcome {
    Delivered,
    Skipped,
    Failed(TranslationError),
}

/// 翻訳ブロードキャストのユースケース
pub struct BroadcastTranslationUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RelayRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// Translator（翻訳サービスの抽象化）
    translator: Arc<dyn Translator>,
    /// 1 メンバーあたりの翻訳の待ち時間の上限
    translation_timeout: Duration,
}

impl BroadcastTranslationUseCase {
    pub fn new(
        repository: Arc<dyn RelayRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        translator: Arc<dyn Translator>,
        translation_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            translator,
            translation_timeout,
        }
    }

    /// ブロードキャストを実行
    ///
    /// # Returns
    ///
    /// * `Some(BroadcastReport)` - メンバーごとの配送結果
    /// * `None` - 送信者がルームに参加していない（イベントは破棄）
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        text: MessageText,
    ) -> Option<BroadcastReport> {
        // 1. 送信者のルームとメンバーの言語をスナップショット
        let Some(snapshot) = self.repository.room_snapshot(sender).await else {
            tracing::debug!("Dropping message from '{}': not in a room", sender);
            return None;
        };
        tracing::info!(
            "Broadcasting message from '{}' to {} member(s) of room '{}'",
            sender,
            snapshot.members.len(),
            snapshot.room
        );

        // 2. メンバーごとに翻訳して配送（並行）
        let source_language = LanguageCode::auto();
        let outcomes = join_all(
            snapshot
                .members
                .iter()
                .map(|member| self.deliver_to(member, sender, &text, &source_language)),
        )
        .await;

        let mut report = BroadcastReport {
            room: snapshot.room,
            delivered: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
        };
        for (member, outcome) in snapshot.members.into_iter().zip(outcomes) {
            match outcome {
                DeliveryOutcome::Delivered => report.delivered.push(member.id),
                DeliveryOutcome::Skipped => report.skipped.push(member.id),
                DeliveryOutcome::Failed(e) => report.failed.push((member.id, e)),
            }
        }

        // 3. 翻訳に失敗したメンバーがいれば送信者にだけ通知
        if !report.failed.is_empty() {
            let notification = Notification::Error {
                message: TRANSLATION_FAILED_MESSAGE.to_string(),
            };
            if let Err(e) = self.message_pusher.push_to(sender, &notification).await {
                tracing::debug!("Could not report translation failure to '{}': {}", sender, e);
            }
        }

        Some(report)
    }

    async fn deliver_to(
        &self,
        member: &MemberRoute,
        sender: &ConnectionId,
        text: &MessageText,
        source_language: &LanguageCode,
    ) -> DeliveryOutcome {
        tracing::debug!("Translating to '{}' for '{}'", member.language, member.id);
        let translation = tokio::time::timeout(
            self.translation_timeout,
            self.translator
                .translate(text, source_language, &member.language),
        )
        .await;

        let translated = match translation {
            Ok(Ok(translated)) => translated,
            Ok(Err(e)) => {
                tracing::warn!("Translation for '{}' failed: {}", member.id, e);
                return DeliveryOutcome::Failed(e);
            }
            Err(_) => {
                tracing::warn!(
                    "Translation for '{}' timed out after {:?}",
                    member.id,
                    self.translation_timeout
                );
                return DeliveryOutcome::Failed(TranslationError::Unavailable(
                    "translation timed out".to_string(),
                ));
            }
        };

        let notification = Notification::TranslatedMessage(TranslatedMessage {
            original: text.clone(),
            translated,
            source: sender.clone(),
            target_language: member.language.clone(),
            is_sender: &member.id == sender,
        });
        match self.message_pusher.push_to(&member.id, &notification).await {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(MessagePushError::ClientNotFound(_)) => {
                tracing::debug!("Member '{}' disconnected before delivery", member.id);
                DeliveryOutcome::Skipped
            }
            Err(e) => {
                tracing::warn!("Failed to deliver translation to '{}': {}", member.id, e);
                DeliveryOutcome::Skipped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockTranslator, RoomName},
        infrastructure::repository::InMemoryRelayRepository,
        usecase::test_support::{RecordingPusher, id},
    };
    use async_trait::async_trait;

    fn room(value: &str) -> RoomName {
        RoomName::new(value.to_string()).unwrap()
    }

    fn lang(value: &str) -> LanguageCode {
        LanguageCode::new(value.to_string()).unwrap()
    }

    fn text(value: &str) -> MessageText {
        MessageText::new(value.to_string()).unwrap()
    }

    /// "[lang] text" を返し、"de" だけ失敗する翻訳
    fn translator_failing_for_german() -> MockTranslator {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|text, _source, target| match target.as_str() {
                "de" => Err(TranslationError::Unavailable("backend down".to_string())),
                lang => Ok(format!("[{lang}] {}", text.as_str())),
            });
        translator
    }

    async fn setup_room(
        members: &[(&str, &str)],
        translator: Arc<dyn Translator>,
        timeout: Duration,
    ) -> (
        BroadcastTranslationUseCase,
        Arc<InMemoryRelayRepository>,
        Arc<RecordingPusher>,
    ) {
        let repository = Arc::new(InMemoryRelayRepository::new());
        let pusher = Arc::new(RecordingPusher::default());
        for (member, language) in members {
            repository.register_connection(id(member)).await.unwrap();
            repository
                .join_room(&id(member), room("r1"), lang(language))
                .await
                .unwrap();
            pusher.connect(&id(member)).await;
        }
        let usecase =
            BroadcastTranslationUseCase::new(repository.clone(), pusher.clone(), translator, timeout);
        (usecase, repository, pusher)
    }

    fn translated(
        original: &str,
        translated: &str,
        source: &str,
        target: &str,
        is_sender: bool,
    ) -> Notification {
        Notification::TranslatedMessage(TranslatedMessage {
            original: text(original),
            translated: translated.to_string(),
            source: id(source),
            target_language: lang(target),
            is_sender,
        })
    }

    #[tokio::test]
    async fn test_each_member_receives_own_language() {
        // テスト項目: 送信者を含む全メンバーに、それぞれの言語の翻訳が届く
        // given (前提条件):
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .times(3)
            .returning(|text, source, target| {
                assert_eq!(source.as_str(), "auto");
                Ok(format!("[{}] {}", target.as_str(), text.as_str()))
            });
        let (usecase, _repository, pusher) = setup_room(
            &[("alice", "en"), ("bob", "fr"), ("charlie", "de")],
            Arc::new(translator),
            Duration::from_secs(1),
        )
        .await;

        // when (操作):
        let report = usecase
            .execute(&id("alice"), text("Good morning"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(report.room, room("r1"));
        assert_eq!(report.delivered.len(), 3);
        assert!(report.failed.is_empty());
        assert_eq!(
            pusher.pushed_to(&id("alice")).await,
            vec![translated("Good morning", "[en] Good morning", "alice", "en", true)]
        );
        assert_eq!(
            pusher.pushed_to(&id("bob")).await,
            vec![translated("Good morning", "[fr] Good morning", "alice", "fr", false)]
        );
        assert_eq!(
            pusher.pushed_to(&id("charlie")).await,
            vec![translated("Good morning", "[de] Good morning", "alice", "de", false)]
        );
    }

    #[tokio::test]
    async fn test_failed_translation_does_not_block_others() {
        // テスト項目: 1 人の翻訳が失敗しても他のメンバーには届き、送信者にだけエラーが通知される
        // given (前提条件):
        let (usecase, _repository, pusher) = setup_room(
            &[("alice", "en"), ("bob", "fr"), ("charlie", "de")],
            Arc::new(translator_failing_for_german()),
            Duration::from_secs(1),
        )
        .await;

        // when (操作):
        let report = usecase
            .execute(&id("alice"), text("Good morning"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(report.delivered, vec![id("alice"), id("bob")]);
        assert_eq!(
            report.failed,
            vec![(
                id("charlie"),
                TranslationError::Unavailable("backend down".to_string())
            )]
        );
        // charlie には何も届かない
        assert!(pusher.pushed_to(&id("charlie")).await.is_empty());
        assert_eq!(
            pusher.pushed_to(&id("bob")).await,
            vec![translated("Good morning", "[fr] Good morning", "alice", "fr", false)]
        );
        // 送信者には自分の翻訳とエラー通知が届く
        let to_sender = pusher.pushed_to(&id("alice")).await;
        assert_eq!(to_sender.len(), 2);
        assert!(to_sender.contains(&translated(
            "Good morning",
            "[en] Good morning",
            "alice",
            "en",
            true
        )));
        assert!(to_sender.contains(&Notification::Error {
            message: TRANSLATION_FAILED_MESSAGE.to_string()
        }));
    }

    #[tokio::test]
    async fn test_sender_notified_once_even_if_many_fail() {
        // テスト項目: 複数のメンバーで翻訳が失敗しても、送信者へのエラー通知は 1 回
        // given (前提条件):
        let (usecase, _repository, pusher) = setup_room(
            &[("alice", "en"), ("bob", "de"), ("charlie", "de")],
            Arc::new(translator_failing_for_german()),
            Duration::from_secs(1),
        )
        .await;

        // when (操作):
        let report = usecase.execute(&id("bob"), text("Hallo")).await.unwrap();

        // then (期待する結果):
        assert_eq!(report.failed.len(), 2);
        assert_eq!(
            pusher.pushed_to(&id("bob")).await,
            vec![Notification::Error {
                message: TRANSLATION_FAILED_MESSAGE.to_string()
            }]
        );
        assert_eq!(pusher.pushed_to(&id("alice")).await.len(), 1);
    }

    #[tokio::test]
    async fn test_sender_without_room_is_dropped() {
        // テスト項目: ルームに参加していない送信者のメッセージは破棄される
        // given (前提条件):
        let mut translator = MockTranslator::new();
        translator.expect_translate().never();
        let (usecase, repository, pusher) =
            setup_room(&[("alice", "en")], Arc::new(translator), Duration::from_secs(1)).await;
        repository.register_connection(id("loner")).await.unwrap();
        pusher.connect(&id("loner")).await;

        // when (操作):
        let report = usecase.execute(&id("loner"), text("Hello")).await;

        // then (期待する結果):
        assert!(report.is_none());
        assert_eq!(pusher.total_pushed().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_language_is_reported_to_sender() {
        // テスト項目: 翻訳サービスが受け付けない言語で参加したメンバーには何も届かず、送信者にエラーが届く
        // given (前提条件):
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|text, _source, target| match target.as_str() {
                "en" => Ok(format!("[en] {}", text.as_str())),
                other => Err(TranslationError::UnsupportedLanguage(other.to_string())),
            });
        let (usecase, _repository, pusher) = setup_room(
            &[("alice", "en"), ("bob", "français")],
            Arc::new(translator),
            Duration::from_secs(1),
        )
        .await;

        // when (操作):
        let report = usecase.execute(&id("alice"), text("Hello")).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            report.failed,
            vec![(
                id("bob"),
                TranslationError::UnsupportedLanguage("français".to_string())
            )]
        );
        assert!(pusher.pushed_to(&id("bob")).await.is_empty());
        assert!(pusher.pushed_to(&id("alice")).await.contains(&Notification::Error {
            message: TRANSLATION_FAILED_MESSAGE.to_string()
        }));
    }

    #[tokio::test]
    async fn test_text_over_service_limit_is_reported_to_sender() {
        // テスト項目: 翻訳サービスの上限を超えるテキストは誰にも届かず、送信者にエラーが 1 回届く
        // given (前提条件):
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .times(2)
            .returning(|text, _source, _target| {
                if text.char_count() > 5000 {
                    Err(TranslationError::TextTooLong { max: 5000 })
                } else {
                    Ok(text.as_str().to_string())
                }
            });
        let (usecase, _repository, pusher) = setup_room(
            &[("alice", "en"), ("bob", "fr")],
            Arc::new(translator),
            Duration::from_secs(1),
        )
        .await;

        // when (操作):
        let report = usecase
            .execute(&id("alice"), text(&"a".repeat(5001)))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(report.delivered.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert!(pusher.pushed_to(&id("bob")).await.is_empty());
        assert_eq!(
            pusher.pushed_to(&id("alice")).await,
            vec![Notification::Error {
                message: TRANSLATION_FAILED_MESSAGE.to_string()
            }]
        );
    }

    /// 指定した時間だけ待ってから翻訳する Translator
    struct SlowTranslator {
        delay: Duration,
        slow_language: &'static str,
    }

    #[async_trait]
    impl Translator for SlowTranslator {
        async fn translate(
            &self,
            text: &MessageText,
            _source: &LanguageCode,
            target: &LanguageCode,
        ) -> Result<String, TranslationError> {
            if target.as_str() == self.slow_language {
                tokio::time::sleep(self.delay).await;
            }
            Ok(format!("[{}] {}", target.as_str(), text.as_str()))
        }
    }

    #[tokio::test]
    async fn test_slow_translation_times_out_independently() {
        // テスト項目: 遅い翻訳はタイムアウトし、他のメンバーへの配送は待たされない
        // given (前提条件):
        let translator = SlowTranslator {
            delay: Duration::from_secs(30),
            slow_language: "ja",
        };
        let (usecase, _repository, pusher) = setup_room(
            &[("alice", "en"), ("bob", "ja")],
            Arc::new(translator),
            Duration::from_millis(50),
        )
        .await;

        // when (操作):
        let started = std::time::Instant::now();
        let report = usecase.execute(&id("alice"), text("Hello")).await.unwrap();

        // then (期待する結果):
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(report.delivered, vec![id("alice")]);
        assert!(matches!(
            report.failed.as_slice(),
            [(member, TranslationError::Unavailable(_))] if member == &id("bob")
        ));
        assert!(pusher.pushed_to(&id("bob")).await.is_empty());
    }

    /// 翻訳中に指定したメンバーを切断させる Translator
    struct DisconnectingTranslator {
        repository: Arc<InMemoryRelayRepository>,
        pusher: Arc<RecordingPusher>,
        victim: ConnectionId,
        victim_language: &'static str,
    }

    #[async_trait]
    impl Translator for DisconnectingTranslator {
        async fn translate(
            &self,
            text: &MessageText,
            _source: &LanguageCode,
            target: &LanguageCode,
        ) -> Result<String, TranslationError> {
            if target.as_str() == self.victim_language {
                self.pusher.disconnect(&self.victim).await;
                self.repository.disconnect(&self.victim).await;
            }
            Ok(format!("[{}] {}", target.as_str(), text.as_str()))
        }
    }

    #[tokio::test]
    async fn test_member_disconnecting_mid_broadcast_is_skipped() {
        // テスト項目: ブロードキャスト中に切断したメンバーは飛ばされ、他のメンバーには届く
        // given (前提条件):
        let repository = Arc::new(InMemoryRelayRepository::new());
        let pusher = Arc::new(RecordingPusher::default());
        for (member, language) in [("alice", "en"), ("bob", "fr"), ("charlie", "de")] {
            repository.register_connection(id(member)).await.unwrap();
            repository
                .join_room(&id(member), room("r1"), lang(language))
                .await
                .unwrap();
            pusher.connect(&id(member)).await;
        }
        let translator = DisconnectingTranslator {
            repository: repository.clone(),
            pusher: pusher.clone(),
            victim: id("charlie"),
            victim_language: "de",
        };
        let usecase = BroadcastTranslationUseCase::new(
            repository.clone(),
            pusher.clone(),
            Arc::new(translator),
            Duration::from_secs(1),
        );

        // when (操作):
        let report = usecase.execute(&id("alice"), text("Hello")).await.unwrap();

        // then (期待する結果):
        assert_eq!(report.delivered, vec![id("alice"), id("bob")]);
        assert_eq!(report.skipped, vec![id("charlie")]);
        assert!(report.failed.is_empty());
        assert!(pusher.pushed_to(&id("charlie")).await.is_empty());
        assert!(repository.is_consistent().await);
    }
}
