//! Sketch Duel 게임 세션 서버

mod config;
mod error;
mod game;
mod handlers;
mod protocol;
mod state;

use anyhow::Context;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::HeaderValue,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use config::Config;
use futures::{SinkExt, StreamExt};
use protocol::{ClientMessage, ServerMessage};
use state::AppState;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = Arc::new(AppState::new(config.clone()));
    let app = build_router(state, &config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("🎨 Sketch Duel server started");
    tracing::info!("Address: {}", addr);
    tracing::info!("WebSocket: ws://{}/ws", addr);
    tracing::info!("Game room: {}", config.game.room_id);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn build_router(state: Arc<AppState>, config: &Config) -> Router {
    // CORS 설정
    let origins = if config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
        )
    };
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/reset", post(reset_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler() -> Html<&'static str> {
    Html("<h1>Sketch Duel Server</h1><p>WebSocket endpoint: /ws</p>")
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let coordinator = state.coordinator.lock().await;
    Json(serde_json::json!({
        "status": "ok",
        "server": "sketch-duel-server",
        "participants": coordinator.room().participants.len(),
        "messages": coordinator.room().log.len(),
        "state": coordinator.state(),
        "timestamp": unix_timestamp(),
    }))
}

/// 관리용 초기화 (게임 프로토콜 외부)
async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    handlers::handle_reset(state).await;
    Json(serde_json::json!({
        "status": "ok",
        "message": "Game state reset",
        "participants": 0,
        "state": "waiting",
    }))
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    // 연결 처리
    let peer_id = handlers::handle_connection(state.clone(), tx.clone()).await;

    // 송신 태스크
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::error!("Failed to encode server message: {}", e),
            }
        }
    });

    // 수신 처리
    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(msg) => handle_client_message(&state, &peer_id, &tx, msg).await,
                Err(e) => {
                    tracing::debug!(peer_id = %peer_id, "Malformed client message: {}", e);
                    let _ = tx.send(ServerMessage::Error {
                        message: format!("Malformed message: {e}"),
                    });
                }
            },
            Ok(Message::Close(_)) => break,
            Err(e) => {
                tracing::warn!(peer_id = %peer_id, "WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    // 연결 해제
    handlers::handle_disconnect(state, &peer_id).await;
    send_task.abort();
}

async fn handle_client_message(
    state: &Arc<AppState>,
    peer_id: &str,
    sender: &mpsc::UnboundedSender<ServerMessage>,
    msg: ClientMessage,
) {
    match msg {
        ClientMessage::Heartbeat => {
            handlers::handle_heartbeat(sender);
        }
        ClientMessage::Join { room_id, name } => {
            handlers::handle_join_room(state.clone(), peer_id, &room_id, &name).await;
        }
        ClientMessage::DrawingEvent(event) => {
            handlers::handle_drawing_event(state.clone(), peer_id, event).await;
        }
        ClientMessage::ClearCanvas => {
            handlers::handle_clear_canvas(state.clone(), peer_id).await;
        }
        ClientMessage::SendGuess { text } => {
            handlers::handle_send_guess(state.clone(), peer_id, &text).await;
        }
        ClientMessage::SendMessage { text } => {
            handlers::handle_send_message(state.clone(), peer_id, &text).await;
        }
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
