//! 방과 참가자 모델

use super::message_log::MessageLog;
use serde::{Deserialize, Serialize};

/// 방 최대 인원
pub const MAX_PARTICIPANTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Drawer,
    Guesser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomState {
    Waiting,
    Playing,
    RoundEnd,
}

/// 참가자 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub score: u32,
    pub role: Role,
    pub connected: bool,
}

impl Participant {
    pub fn new(id: &str, name: &str, role: Role) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            score: 0,
            role,
            connected: true,
        }
    }
}

/// 게임 방
///
/// 참가자는 입장 순서대로 보관한다. 역할 배정과 상태 전이는 `SessionCoordinator`만 수행한다.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub participants: Vec<Participant>,
    pub secret_word: Option<String>,
    pub drawer_id: Option<String>,
    pub guesser_id: Option<String>,
    pub state: RoomState,
    pub log: MessageLog,
}

impl Room {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            log: MessageLog::new(id.clone()),
            id,
            participants: Vec::new(),
            secret_word: None,
            drawer_id: None,
            guesser_id: None,
            state: RoomState::Waiting,
        }
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= MAX_PARTICIPANTS
    }

    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn participant_mut(&mut self, id: &str) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    /// 참가자를 제거하고 반환
    pub fn remove_participant(&mut self, id: &str) -> Option<Participant> {
        let index = self.participants.iter().position(|p| p.id == id)?;
        Some(self.participants.remove(index))
    }

    #[cfg(test)]
    pub fn participant_ids(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.id.clone()).collect()
    }
}
