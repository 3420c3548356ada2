//! 値オブジェクト
//!
//! 生成時にバリデーションを行い、不正な値がドメイン層に入り込まないようにします。

use std::fmt;

use super::error::ValueObjectError;

/// 接続 ID
///
/// トランスポート層が接続ごとに採番する不透明な識別子。
/// 接続が生きている間は再利用されません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub const MAX_LEN: usize = 128;

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty("ConnectionId"));
        }
        if value.chars().count() > Self::MAX_LEN {
            return Err(ValueObjectError::TooLong {
                field: "ConnectionId",
                max: Self::MAX_LEN,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ルーム名
///
/// 呼び出し側が指定する空でない名前。加工せず、等価性のみで比較します。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty("RoomName"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 言語コード（例: "en", "fr", "zh-CN"）
///
/// 空でないことだけを検査し、大文字小文字も含めてそのまま保持します。
/// サポートされている言語かどうかは翻訳サービスが判定し、
/// 未対応の言語は翻訳時の `UnsupportedLanguage` として表面化します。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// 参加者が言語を指定しなかった場合に使う言語
    pub const FALLBACK: &'static str = "en";
    /// 翻訳元言語の自動判定
    pub const AUTO: &'static str = "auto";

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty("LanguageCode"));
        }
        Ok(Self(value))
    }

    pub fn fallback() -> Self {
        Self(Self::FALLBACK.to_string())
    }

    pub fn auto() -> Self {
        Self(Self::AUTO.to_string())
    }

    /// 指定がない、または空の場合はフォールバック言語を返す
    pub fn or_fallback(value: Option<String>) -> Self {
        value
            .and_then(|v| Self::new(v).ok())
            .unwrap_or_else(Self::fallback)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ルームに送信されるテキストメッセージ
///
/// 空でないことだけを検査します。長さの上限は翻訳サービス側の制約です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::Empty("MessageText"));
        }
        Ok(Self(value))
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 中継するネゴシエーションメッセージの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    SessionDescription,
    IceCandidate,
}

/// SDP / ICE candidate の中身
///
/// 中身は解釈せず、そのまま宛先に渡します。
#[derive(Debug, Clone, PartialEq)]
pub struct SignalPayload(serde_json::Value);

impl SignalPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}
