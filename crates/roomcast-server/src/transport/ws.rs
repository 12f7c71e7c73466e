//! WebSocket upgrade handlers and the per-connection loop.
//!
//! Room validation and ticket auth happen before the upgrade, so bad
//! connects are plain HTTP rejections and never register anything. After
//! the upgrade one task owns the socket: it fans in group events from the
//! session's inbox, decodes inbound frames, keeps the heartbeat, and runs
//! the session finalizer on every exit path.

use std::borrow::Cow;

use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};

use roomcast_core::error::RoomcastError;
use roomcast_core::RoomId;

use crate::app_state::AppState;
use crate::registry::Inbox;
use crate::session::{ChatSession, PresenceSession, SessionHandler};

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub ticket: String,
}

/// Transport knobs copied out of config at upgrade time.
#[derive(Debug, Clone, Copy)]
struct SessionTiming {
    ping_interval: Duration,
    idle_timeout: Duration,
    max_frame_bytes: usize,
}

impl SessionTiming {
    fn from_state(app: &AppState) -> Self {
        let cfg = app.cfg();
        Self {
            ping_interval: Duration::from_millis(cfg.server.ping_interval_ms),
            idle_timeout: Duration::from_millis(cfg.server.idle_timeout_ms),
            max_frame_bytes: cfg.relay.max_frame_bytes,
        }
    }
}

pub async fn chat_upgrade(
    State(app): State<AppState>,
    Path(room): Path<String>,
    Query(q): Query<ChatQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    let room = match RoomId::parse(&room) {
        Ok(r) => r,
        Err(e) => return reject(e),
    };
    let username = match app.tickets().consume(&q.ticket) {
        Ok(u) => u,
        Err(e) => return reject(e),
    };
    let timing = SessionTiming::from_state(&app);
    ws.on_upgrade(move |socket| async move {
        let registry = app.registry();
        let (conn, inbox) = registry.register().await;
        let session = ChatSession::new(registry, app.tracker(), conn, room, username);
        run_session(socket, inbox, session, timing).await;
    })
}

pub async fn presence_upgrade(
    State(app): State<AppState>,
    Path(room): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    let room = match RoomId::parse(&room) {
        Ok(r) => r,
        Err(e) => return reject(e),
    };
    let timing = SessionTiming::from_state(&app);
    ws.on_upgrade(move |socket| async move {
        let registry = app.registry();
        let (conn, inbox) = registry.register().await;
        let session = PresenceSession::new(registry, app.tracker(), conn, room);
        run_session(socket, inbox, session, timing).await;
    })
}

/// Pre-upgrade rejection: plain HTTP carrying the stable client code.
fn reject(err: RoomcastError) -> Response {
    let status = match err {
        RoomcastError::InvalidRoomIdentifier(_) => StatusCode::BAD_REQUEST,
        RoomcastError::AuthFailed => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = Json(json!({
        "error": err.client_code().as_str(),
        "message": err.to_string(),
    }));
    (status, body).into_response()
}

async fn run_session<S: SessionHandler>(
    socket: WebSocket,
    mut inbox: Inbox,
    mut session: S,
    timing: SessionTiming,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    match session.on_connect().await {
        Ok(()) => {
            if let Some(err) =
                drive(&mut ws_tx, &mut ws_rx, &mut inbox, &mut session, timing).await
            {
                tracing::warn!(code = err.client_code().as_str(), "session ended with error: {err}");
                let _ = ws_tx.send(close_frame(&err)).await;
            }
        }
        Err(err) => {
            tracing::warn!(code = err.client_code().as_str(), "session join failed: {err}");
            let _ = ws_tx.send(close_frame(&err)).await;
        }
    }

    // Finalizer on every path: leave, presence close-out, deregister.
    session.on_disconnect().await;
}

/// Session loop. Returns the error that ended the session, if any.
async fn drive<S: SessionHandler>(
    ws_tx: &mut SplitSink<WebSocket, Message>,
    ws_rx: &mut SplitStream<WebSocket>,
    inbox: &mut Inbox,
    session: &mut S,
    timing: SessionTiming,
) -> Option<RoomcastError> {
    let mut last_seen = Instant::now();
    let mut ping = interval(timing.ping_interval);
    ping.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            event = inbox.recv() => {
                let Some(event) = event else { return None };
                match session.on_group_event(&event) {
                    Ok(Some(text)) => {
                        if ws_tx.send(Message::Text(text)).await.is_err() {
                            return None;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => return Some(e),
                }
            }

            _ = ping.tick() => {
                if last_seen.elapsed() > timing.idle_timeout {
                    tracing::debug!("idle timeout");
                    return None;
                }
                if ws_tx.send(Message::Ping(Vec::new())).await.is_err() {
                    return None;
                }
            }

            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { return None };
                let Ok(msg) = incoming else { return None };
                last_seen = Instant::now();

                match msg {
                    Message::Text(text) => {
                        if text.len() > timing.max_frame_bytes {
                            return Some(RoomcastError::PayloadTooLarge);
                        }
                        if let Err(e) = session.on_message(&text).await {
                            return Some(e);
                        }
                    }
                    Message::Binary(_) => {
                        return Some(RoomcastError::MalformedPayload(
                            "binary frames are not part of this protocol".into(),
                        ));
                    }
                    Message::Ping(payload) => {
                        let _ = ws_tx.send(Message::Pong(payload)).await;
                    }
                    Message::Pong(_) => {}
                    Message::Close(_) => return None,
                }
            }
        }
    }
}

fn close_frame(err: &RoomcastError) -> Message {
    Message::Close(Some(CloseFrame {
        code: err.close_code(),
        reason: Cow::Borrowed(err.client_code().as_str()),
    }))
}
