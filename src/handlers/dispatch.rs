//! 코디네이터 처리 결과 전달

use crate::game::{Outcome, TimerCommand};
use crate::handlers::timer::{arm_timer, disarm_timer};
use crate::protocol::ServerMessage;
use crate::state::AppState;
use std::sync::Arc;

/// `Outcome`을 피어 채널과 타이머 태스크에 반영
///
/// 코디네이터 잠금을 쥔 채로 호출해야 메시지 순서가 처리 순서와 같아진다.
pub fn dispatch(state: &Arc<AppState>, outcome: Outcome) {
    for command in outcome.timers {
        match command {
            TimerCommand::Arm { kind, epoch } => arm_timer(state, kind, epoch),
            TimerCommand::Disarm { kind } => disarm_timer(state, kind),
        }
    }

    for envelope in outcome.envelopes {
        send_to_peer(state, &envelope.to, envelope.message);
    }
}

/// 특정 피어에게 메시지 전송
pub fn send_to_peer(state: &AppState, peer_id: &str, message: ServerMessage) {
    if let Some(session) = state.peers.get(peer_id) {
        if let Err(e) = session.sender.send(message) {
            tracing::warn!(peer_id = %peer_id, "Failed to deliver message: {}", e);
        }
    }
}

/// 방 참가 여부와 무관하게 연결된 모든 피어에게 전송
pub fn broadcast_to_all(state: &AppState, message: ServerMessage) {
    for session in state.peers.iter() {
        if let Err(e) = session.sender.send(message.clone()) {
            tracing::warn!(peer_id = %session.key(), "Failed to deliver message: {}", e);
        }
    }
}
