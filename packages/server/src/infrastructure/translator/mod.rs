//! Translator 実装
//!
//! - `http`: Google 翻訳互換の Web エンドポイントを呼び出す実装

pub mod http;

pub use http::{HttpTranslator, HttpTranslatorConfig};
