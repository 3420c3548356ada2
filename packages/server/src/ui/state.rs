//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    BroadcastTranslationUseCase, ConnectUseCase, DisconnectUseCase, GetRoomDetailUseCase,
    GetRoomsUseCase, JoinRoomUseCase, RelaySignalUseCase, TranslateTextUseCase,
};

/// Use cases shared by every handler
pub struct AppState {
    /// ConnectUseCase（接続のユースケース）
    pub connect_usecase: Arc<ConnectUseCase>,
    /// DisconnectUseCase（切断のユースケース）
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// RelaySignalUseCase（SDP / ICE 中継のユースケース）
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    /// BroadcastTranslationUseCase（翻訳ブロードキャストのユースケース）
    pub broadcast_translation_usecase: Arc<BroadcastTranslationUseCase>,
    /// TranslateTextUseCase（単発翻訳のユースケース）
    pub translate_text_usecase: Arc<TranslateTextUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
