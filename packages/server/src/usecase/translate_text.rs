//! UseCase: 単発のテキスト翻訳（HTTP API 用）
//!
//! ルームや接続とは無関係に、1 つのテキストを指定した言語に翻訳します。

use std::{sync::Arc, time::Duration};

use crate::domain::{LanguageCode, MessageText, TranslationError, Translator};

/// テキスト翻訳のユースケース
pub struct TranslateTextUseCase {
    /// Translator（翻訳サービスの抽象化）
    translator: Arc<dyn Translator>,
    timeout: Duration,
}

impl TranslateTextUseCase {
    pub fn new(translator: Arc<dyn Translator>, timeout: Duration) -> Self {
        Self {
            translator,
            timeout,
        }
    }

    /// 翻訳元言語を自動判定して `target` に翻訳する
    pub async fn execute(
        &self,
        text: MessageText,
        target: LanguageCode,
    ) -> Result<String, TranslationError> {
        tracing::debug!(
            "Translating {} char(s) to '{}'",
            text.as_str().chars().count(),
            target
        );
        match tokio::time::timeout(
            self.timeout,
            self.translator
                .translate(&text, &LanguageCode::auto(), &target),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    "Translation to '{}' timed out after {:?}",
                    target,
                    self.timeout
                );
                Err(TranslationError::Unavailable(
                    "translation timed out".to_string(),
                ))
            }
        }
    }
}
