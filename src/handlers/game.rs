//! 게임 진행 핸들러 (그리기, 추측, 채팅)

use crate::game::relay_drawing;
use crate::handlers::dispatch::dispatch;
use crate::protocol::DrawingEvent;
use crate::state::AppState;
use std::sync::Arc;

/// 그리기 이벤트 중계
pub async fn handle_drawing_event(state: Arc<AppState>, from_peer_id: &str, event: DrawingEvent) {
    let coordinator = state.coordinator.lock().await;
    let outcome = relay_drawing(&coordinator, from_peer_id, event);
    dispatch(&state, outcome);
}

/// 캔버스 지우기
pub async fn handle_clear_canvas(state: Arc<AppState>, from_peer_id: &str) {
    let mut coordinator = state.coordinator.lock().await;
    let outcome = coordinator.clear_canvas(from_peer_id);
    dispatch(&state, outcome);
}

/// 추측 제출
pub async fn handle_send_guess(state: Arc<AppState>, from_peer_id: &str, text: &str) {
    let mut coordinator = state.coordinator.lock().await;
    let outcome = coordinator.submit_guess(from_peer_id, text);
    dispatch(&state, outcome);
}

/// 일반 채팅
pub async fn handle_send_message(state: Arc<AppState>, from_peer_id: &str, text: &str) {
    let mut coordinator = state.coordinator.lock().await;
    let outcome = coordinator.send_chat(from_peer_id, text);
    dispatch(&state, outcome);
}
