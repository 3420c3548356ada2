//! ID の採番

use uuid::Uuid;

use super::{error::ValueObjectError, value_object::ConnectionId};

/// 接続 ID を採番する Factory
///
/// トランスポート層が接続を受け付けた時点で呼び出します。
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// UUID v4 を使って新しい接続 ID を生成
    pub fn generate() -> Result<ConnectionId, ValueObjectError> {
        ConnectionId::new(Uuid::new_v4().to_string())
    }
}
