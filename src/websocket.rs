use axum::extract::ws::WebSocket;
use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tracing::{error, info, warn};

use crate::handlers::{self, Flow, ServerMessage};
use crate::state::AppState;
use crate::translate::ViewSession;

pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let session_id = state.generate_session_id();
    info!("New WebSocket connection: {}", session_id);
    state.register_session(&session_id);

    // Mount the view; dropping it at the end of this function unmounts it
    let session = ViewSession::mount(state.translator.clone());
    let mut snapshots = session.subscribe();

    let (mut sender, mut receiver) = socket.split();

    let initial_messages = [
        ServerMessage::language_pairs(),
        ServerMessage::ViewState(session.snapshot()),
    ];
    let mut connected = true;
    for msg in initial_messages {
        if let Err(e) = sender.send(Message::Text(msg.to_json())).await {
            error!("Failed to send initial message: {}", e);
            connected = false;
            break;
        }
    }

    while connected {
        tokio::select! {
            msg = receiver.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    match handlers::handle_message(&session, &session_id, &text) {
                        Ok(Flow::Continue) => {}
                        Ok(Flow::Close) => {
                            let _ = sender.send(Message::Close(None)).await;
                            break;
                        }
                        Err(e) => {
                            warn!("Error handling message from {}: {}", session_id, e);
                            let reply = ServerMessage::Error { message: e.to_string() };
                            if sender.send(Message::Text(reply.to_json())).await.is_err() {
                                break;
                            }
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    info!("Client {} disconnected", session_id);
                    break;
                }
                Some(Err(e)) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                Some(Ok(_)) => {}
            },
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                let msg = ServerMessage::ViewState(snapshot);
                if let Err(e) = sender.send(Message::Text(msg.to_json())).await {
                    error!("Failed to send view state to {}: {}", session_id, e);
                    break;
                }
            }
        }
    }

    session.unmount().await;
    if let Some(mounted_for) = state.release_session(&session_id) {
        info!("Cleaned up session {} after {:?}", session_id, mounted_for);
    }
}
