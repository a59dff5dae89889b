//! 방 관리 핸들러

use crate::error::GameError;
use crate::handlers::dispatch::{broadcast_to_all, dispatch, send_to_peer};
use crate::protocol::ServerMessage;
use crate::state::AppState;
use std::sync::Arc;

/// 방 참여 처리
pub async fn handle_join_room(state: Arc<AppState>, peer_id: &str, room_id: &str, name: &str) {
    let room_id = room_id.trim();

    // 방은 하나뿐이므로 다른 ID로 요청해도 같은 방에 참여시킨다
    if !room_id.is_empty() && room_id != state.config.game.room_id {
        tracing::debug!(
            peer_id = %peer_id,
            requested = %room_id,
            "Unknown room id, joining the shared room"
        );
    }

    let mut coordinator = state.coordinator.lock().await;
    match coordinator.join(peer_id, name) {
        Ok(outcome) => dispatch(&state, outcome),
        Err(GameError::RoomFull) => {
            send_to_peer(&state, peer_id, ServerMessage::RoomFull);
            tracing::warn!(peer_id = %peer_id, "Room full, rejected join");
        }
        Err(e) => {
            send_to_peer(
                &state,
                peer_id,
                ServerMessage::Error {
                    message: e.to_string(),
                },
            );
            tracing::warn!(peer_id = %peer_id, error = %e, "Join rejected");
        }
    }
}

/// 관리용 방 초기화. 연결된 모든 피어에게 알린다.
pub async fn handle_reset(state: Arc<AppState>) {
    let mut coordinator = state.coordinator.lock().await;
    let outcome = coordinator.reset_all();
    dispatch(&state, outcome);
    broadcast_to_all(&state, ServerMessage::GameReset);
}
