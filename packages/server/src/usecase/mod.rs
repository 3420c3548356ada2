//! UseCase 層
//!
//! トランスポートから届いたイベントごとの処理を実装します。
//! 状態へのアクセスは RelayRepository、送信は MessagePusher、翻訳は Translator を経由します。

pub mod broadcast_translation;
pub mod connect;
pub mod disconnect;
pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod join_room;
pub mod relay_signal;
pub mod translate_text;

#[cfg(test)]
pub(crate) mod test_support;

pub use broadcast_translation::{BroadcastReport, BroadcastTranslationUseCase};
pub use connect::ConnectUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::{ConnectError, GetRoomDetailError, JoinRoomError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use relay_signal::{RelayOutcome, RelaySignalUseCase};
pub use translate_text::TranslateTextUseCase;
