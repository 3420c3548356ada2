//! Google 翻訳互換 Web エンドポイントを使った Translator 実装
//!
//! `GET {base_url}/translate_a/single?client=gtx&sl={source}&tl={target}&dt=t&q={text}`
//!
//! レスポンスは JSON 配列で、先頭要素が翻訳セグメントのリスト、
//! 各セグメントの先頭要素が翻訳済みの断片です。断片を連結したものを翻訳結果とします。
//!
//! ## エラーの対応
//!
//! - 送信前: テキストが `MAX_TEXT_CHARS` を超えている → `TextTooLong`
//! - HTTP 400: 翻訳先言語が受け付けられなかった → `UnsupportedLanguage`
//! - その他の非成功ステータス、通信エラー、タイムアウト、想定外のレスポンス → `Unavailable`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::domain::{LanguageCode, MessageText, TranslationError, Translator};

/// HttpTranslator の設定
#[derive(Debug, Clone)]
pub struct HttpTranslatorConfig {
    /// 翻訳サービスのベース URL（例: https://translate.googleapis.com）
    pub base_url: String,
    /// 1 リクエストあたりのタイムアウト
    pub timeout: Duration,
}

impl HttpTranslatorConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://translate.googleapis.com";

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/translate_a/single", self.base_url.trim_end_matches('/'))
    }
}

impl Default for HttpTranslatorConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL, Duration::from_secs(10))
    }
}

pub struct HttpTranslator {
    config: HttpTranslatorConfig,
    http_client: reqwest::Client,
}

impl HttpTranslator {
    /// 翻訳サービスが 1 リクエストで受け付ける最大文字数
    pub const MAX_TEXT_CHARS: usize = 5000;

    pub fn new(config: HttpTranslatorConfig) -> Result<Self, TranslationError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TranslationError::Unavailable(e.to_string()))?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

/// レスポンスの JSON から翻訳結果を取り出す
pub fn parse_translation(body: &serde_json::Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| {
            TranslationError::Unavailable("unexpected response from translation service".into())
        })?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(serde_json::Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslationError::Unavailable(
            "translation service returned no text".into(),
        ));
    }
    Ok(translated)
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &MessageText,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<String, TranslationError> {
        if text.char_count() > Self::MAX_TEXT_CHARS {
            tracing::warn!(
                chars = text.char_count(),
                "Text exceeds the translation service limit"
            );
            return Err(TranslationError::TextTooLong {
                max: Self::MAX_TEXT_CHARS,
            });
        }

        let response = self
            .http_client
            .get(self.config.endpoint())
            .query(&[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(target_lang = %target, "Translation request failed: {}", e);
                TranslationError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            tracing::warn!(target_lang = %target, "Translation service rejected target language");
            return Err(TranslationError::UnsupportedLanguage(
                target.as_str().to_string(),
            ));
        }
        if !status.is_success() {
            tracing::warn!(target_lang = %target, %status, "Translation service returned an error");
            return Err(TranslationError::Unavailable(format!(
                "translation service responded with {status}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslationError::Unavailable(e.to_string()))?;
        parse_translation(&body)
    }
}
