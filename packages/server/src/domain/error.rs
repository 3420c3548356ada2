//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクトの生成時エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// 登録されていない接続を参照した
    #[error("Connection '{0}' is not registered")]
    UnknownConnection(String),

    /// 同じ ID の接続が既に登録されている
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to encode notification: {0}")]
    Encoding(String),
}

/// 翻訳サービス呼び出しのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// ネットワークエラー、タイムアウト、サービス側の障害
    #[error("Translation service unavailable: {0}")]
    Unavailable(String),

    /// 翻訳先言語がサービスに受け付けられなかった
    #[error("Unsupported language: '{0}'")]
    UnsupportedLanguage(String),

    /// テキストがサービスの受け付ける長さを超えている
    #[error("Text must be at most {max} characters")]
    TextTooLong { max: usize },
}
