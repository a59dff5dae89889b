//! 타이머 틱 스케줄러

use crate::game::TimerKind;
use crate::handlers::dispatch::dispatch;
use crate::state::AppState;
use std::sync::Arc;
use tokio::time::{interval_at, Duration, Instant};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// 새 틱 태스크를 띄우고 같은 종류의 이전 태스크는 취소
///
/// 첫 틱은 한 주기 뒤에 발생한다.
pub fn arm_timer(state: &Arc<AppState>, kind: TimerKind, epoch: u64) {
    let task_state = state.clone();
    let handle = tokio::spawn(async move {
        run_ticker(task_state, kind, epoch).await;
    });

    if let Some(previous) = state.timers.insert(kind, handle) {
        previous.abort();
    }

    tracing::debug!(timer = ?kind, epoch = epoch, "Timer armed");
}

/// 대기 중인 틱 태스크 취소 (없으면 아무 일도 하지 않음)
pub fn disarm_timer(state: &AppState, kind: TimerKind) {
    if let Some((_, handle)) = state.timers.remove(&kind) {
        handle.abort();
        tracing::debug!(timer = ?kind, "Timer disarmed");
    }
}

async fn run_ticker(state: Arc<AppState>, kind: TimerKind, epoch: u64) {
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

    loop {
        interval.tick().await;

        let mut coordinator = state.coordinator.lock().await;
        let outcome = coordinator.tick(kind, epoch);
        let live = coordinator.timer(kind).is_armed(epoch);
        dispatch(&state, outcome);
        drop(coordinator);

        if !live {
            break;
        }
    }

    tracing::debug!(timer = ?kind, epoch = epoch, "Ticker finished");
}
