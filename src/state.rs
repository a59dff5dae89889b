//! 애플리케이션 상태 관리

use crate::config::Config;
use crate::game::{RandomWords, SessionCoordinator, TimerKind};
use crate::protocol::ServerMessage;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc::UnboundedSender, Mutex};
use tokio::task::JoinHandle;

/// 전역 애플리케이션 상태
pub struct AppState {
    /// 방 상태 머신. 모든 이벤트와 타이머 틱은 이 잠금을 거쳐 순서대로 처리된다.
    pub coordinator: Mutex<SessionCoordinator>,
    /// 피어 세션 (peer_id -> PeerSession)
    pub peers: DashMap<String, PeerSession>,
    /// 동작 중인 타이머 틱 태스크
    pub timers: DashMap<TimerKind, JoinHandle<()>>,
    /// 설정
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let coordinator = SessionCoordinator::new(&config.game, Box::new(RandomWords::new()));
        Self::with_coordinator(config, coordinator)
    }

    pub fn with_coordinator(config: Config, coordinator: SessionCoordinator) -> Self {
        Self {
            coordinator: Mutex::new(coordinator),
            peers: DashMap::new(),
            timers: DashMap::new(),
            config: Arc::new(config),
        }
    }
}

/// 피어 세션 정보
pub struct PeerSession {
    #[allow(dead_code)]
    pub id: String,
    pub sender: UnboundedSender<ServerMessage>,
    #[allow(dead_code)]
    pub connected_at: Instant,
}
