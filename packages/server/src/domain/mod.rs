//! ドメイン層
//!
//! リレーの中核となるモデル（接続・ルーム・通知）と、
//! 外部への依存を抽象化する trait（Repository, MessagePusher, Translator）を定義します。

pub mod connection_registry;
pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod notification;
pub mod relay_state;
pub mod repository;
pub mod room_index;
pub mod translator;
pub mod value_object;

pub use connection_registry::ConnectionRegistry;
pub use entity::{Connection, Room};
pub use error::{MessagePushError, RepositoryError, TranslationError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use notification::{Notification, TranslatedMessage};
pub use relay_state::{Departure, JoinOutcome, MemberRoute, RelayState, RoomSnapshot};
pub use repository::RelayRepository;
pub use room_index::RoomIndex;
pub use translator::Translator;
#[cfg(test)]
pub use translator::MockTranslator;
pub use value_object::{
    ConnectionId, LanguageCode, MessageText, RoomName, SignalKind, SignalPayload, Timestamp,
};
