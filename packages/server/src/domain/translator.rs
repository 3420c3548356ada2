//! Translator trait 定義（翻訳サービスへのゲートウェイ）
//!
//! 1 回の呼び出しは 1 回のリクエストで、キャッシュもリトライもしません。

use async_trait::async_trait;

use super::{LanguageCode, MessageText, TranslationError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// `text` を `source` から `target` に翻訳する
    ///
    /// `source` に `LanguageCode::auto()` を渡すと翻訳元言語を自動判定する。
    async fn translate(
        &self,
        text: &MessageText,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, TranslationError>;
}
