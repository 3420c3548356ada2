//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::{conversion::PeerCommand, websocket::ClientEvent},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// This is the only writer for the socket, so frames reach the peer in the order they were queued.
///
/// # Arguments
///
/// * `rx` - Channel receiver for encoded frames addressed to this connection
/// * `sender` - WebSocket sink to send frames to this connection
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = match ConnectionIdFactory::generate() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to assign a connection id: {}", e);
            return;
        }
    };

    // Create a channel for this connection to receive frames
    let (tx, rx) = mpsc::unbounded_channel();

    // Register the connection (sends `connected` with the assigned id)
    if let Err(e) = state
        .connect_usecase
        .execute(connection_id.clone(), tx)
        .await
    {
        tracing::warn!("Rejecting connection '{}': {}", connection_id, e);
        return;
    }
    tracing::info!("Connection '{}' established", connection_id);

    let (sender, mut receiver) = socket.split();

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch(&state_clone, &connection_id_clone, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to forward queued frames to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state.disconnect_usecase.execute(&connection_id).await {
        Some(departure) => tracing::info!(
            "Connection '{}' closed and left room '{}'",
            connection_id,
            departure.room
        ),
        None => tracing::info!("Connection '{}' closed", connection_id),
    }
}

/// Parse one inbound frame and run the matching use case
///
/// Malformed frames are dropped with a warning and never answered.
async fn dispatch(state: &Arc<AppState>, connection_id: &ConnectionId, frame: &str) {
    let event = match serde_json::from_str::<ClientEvent>(frame) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Dropping unparseable frame from '{}': {}", connection_id, e);
            return;
        }
    };
    let command = match PeerCommand::try_from(event) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("Dropping event from '{}': {}", connection_id, e);
            return;
        }
    };

    match command {
        PeerCommand::JoinRoom { room, language } => {
            if let Err(e) = state
                .join_room_usecase
                .execute(connection_id, room, language)
                .await
            {
                tracing::debug!("Ignoring join from '{}': {}", connection_id, e);
            }
        }
        PeerCommand::RelaySignal {
            kind,
            target,
            payload,
        } => {
            state
                .relay_signal_usecase
                .execute(kind, connection_id, &target, payload)
                .await;
        }
        PeerCommand::TranslateMessage { text } => {
            // Translation can be slow; keep reading this connection's signaling meanwhile
            let usecase = state.broadcast_translation_usecase.clone();
            let sender = connection_id.clone();
            tokio::spawn(async move {
                if let Some(report) = usecase.execute(&sender, text).await {
                    tracing::debug!(
                        "Broadcast from '{}' in room '{}': {} delivered, {} failed, {} skipped",
                        sender,
                        report.room,
                        report.delivered.len(),
                        report.failed.len(),
                        report.skipped.len()
                    );
                }
            });
        }
    }
}
