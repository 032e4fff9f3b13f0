//! WebSocket connection handlers.
//!
//! Each connection runs two tasks: a receive task that dispatches inbound
//! frames one at a time, and a push task that drains the connection's
//! outbound channel into the socket. When either ends, the other is aborted
//! and the participant is disconnected exactly once.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use thiserror::Error;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, DisplayName, RoomId, SignalPayload, ValueObjectError},
    infrastructure::dto::websocket::{ClientEvent, ErrorPayload, ServerEvent},
    ui::state::AppState,
    usecase::LobbyError,
};

/// A single inbound frame that could not be handled
#[derive(Debug, Error)]
enum DispatchError {
    #[error("malformed event: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid event payload: {0}")]
    Invalid(#[from] ValueObjectError),

    #[error(transparent)]
    Lobby(#[from] LobbyError),
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    let connection_id = match state
        .connect_participant_usecase
        .execute(tx.clone())
        .await
    {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return;
        }
    };

    let (sender, mut receiver) = socket.split();

    // Spawn a task to send queued events to this client
    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_id = connection_id.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    if let Err(e) = dispatch(&recv_state, &recv_id, text.as_str()).await {
                        tracing::warn!("Rejected frame from '{}': {}", recv_id, e);
                        report_error(&tx, &e);
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", recv_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    wait_for_either(&mut recv_task, &mut send_task).await;

    if let Err(e) = state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await
    {
        tracing::warn!("Failed to disconnect participant: {}", e);
    }
}

/// Wait until one task completes, then abort the other and wait for it to stop.
///
/// An aborted task only stops at its next yield point, so a frame that is
/// mid-dispatch finishes before this returns and cannot touch state after
/// the disconnect cleanup.
async fn wait_for_either(recv_task: &mut JoinHandle<()>, send_task: &mut JoinHandle<()>) {
    tokio::select! {
        _ = &mut *recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut *send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    };
}

/// Route one inbound event to its use case
async fn dispatch(
    state: &AppState,
    from: &ConnectionId,
    text: &str,
) -> Result<(), DispatchError> {
    let event: ClientEvent = serde_json::from_str(text)?;
    tracing::debug!("Received '{}' from '{}'", event.name(), from);

    match event {
        ClientEvent::DoctorJoinRoom(room_id) => {
            let room_id = RoomId::new(room_id)?;
            state.join_as_doctor_usecase.execute(from, room_id).await?;
        }
        ClientEvent::PatientCheckIn(payload) => {
            let room_id = RoomId::new(payload.doctor_room_id)?;
            let name = DisplayName::new(payload.patient_info.name)?;
            state
                .check_in_patient_usecase
                .execute(from, room_id, name)
                .await?;
        }
        ClientEvent::OfferToPatient(payload) => {
            let to = ConnectionId::new(payload.to_patient_id)?;
            let offer = SignalPayload::new(payload.offer)?;
            state.relay_signal_usecase.offer(from, &to, offer).await;
        }
        ClientEvent::AnswerToDoctor(payload) => {
            let to = ConnectionId::new(payload.to_doctor_id)?;
            let answer = SignalPayload::new(payload.answer)?;
            state.relay_signal_usecase.answer(from, &to, answer).await;
        }
        ClientEvent::SendIceCandidate(payload) => {
            let to = ConnectionId::new(payload.to_id)?;
            let candidate = SignalPayload::new(payload.candidate)?;
            state
                .relay_signal_usecase
                .ice_candidate(from, &to, candidate)
                .await;
        }
        ClientEvent::CallDeclinedByPatient(payload) => {
            let to = ConnectionId::new(payload.to_doctor_id)?;
            state.relay_signal_usecase.decline(from, &to).await;
        }
        ClientEvent::HangUp(payload) => {
            let to = ConnectionId::new(payload.to_id)?;
            state.relay_signal_usecase.hang_up(from, &to).await;
        }
    }

    Ok(())
}

/// Tell the sender its frame was rejected; the connection stays open
fn report_error(tx: &mpsc::UnboundedSender<String>, error: &DispatchError) {
    let event = ServerEvent::Error(ErrorPayload {
        message: error.to_string(),
    });
    match serde_json::to_string(&event) {
        Ok(json) => {
            let _ = tx.send(json);
        }
        Err(e) => tracing::error!("Failed to encode error event: {}", e),
    }
}
