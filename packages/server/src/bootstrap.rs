//! Dependency wiring for the relay server.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::{
    config::ServerConfig,
    domain::TranslationError,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryRelayRepository,
        translator::HttpTranslator,
    },
    ui::{Server, state::AppState},
    usecase::{
        BroadcastTranslationUseCase, ConnectUseCase, DisconnectUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, JoinRoomUseCase, RelaySignalUseCase, TranslateTextUseCase,
    },
};

/// Build a server with in-memory state and the HTTP translation adapter
///
/// # Errors
///
/// Returns an error if the HTTP client for the translation service cannot be built.
pub fn build_server(config: &ServerConfig) -> Result<Server, TranslationError> {
    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. Translator
    // 4. UseCases
    // 5. AppState and Server

    // 1. Create Repository (in-memory state)
    let repository = Arc::new(InMemoryRelayRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Create Translator (HTTP implementation)
    let translator = Arc::new(HttpTranslator::new(config.translator_config())?);
    tracing::info!("Using translation service at {}", config.translator_url);

    // 4. Create UseCases
    let connect_usecase = Arc::new(ConnectUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_usecase = Arc::new(DisconnectUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let relay_signal_usecase = Arc::new(RelaySignalUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let broadcast_translation_usecase = Arc::new(BroadcastTranslationUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        translator.clone(),
        config.translation_timeout,
    ));
    let translate_text_usecase = Arc::new(TranslateTextUseCase::new(
        translator,
        config.translation_timeout,
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository));

    // 5. Create AppState and the server
    Ok(Server::new(AppState {
        connect_usecase,
        disconnect_usecase,
        join_room_usecase,
        relay_signal_usecase,
        broadcast_translation_usecase,
        translate_text_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
    }))
}
