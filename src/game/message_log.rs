//! 추가 전용 메시지 로그

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// 시스템 메시지 작성자 ID
pub const SYSTEM_AUTHOR_ID: &str = "system";
const SYSTEM_AUTHOR_NAME: &str = "System";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Chat,
    System,
    Guess,
}

/// 로그 항목 (추가 후 변경 불가)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub room_id: String,
    pub author_id: String,
    pub author_name: String,
    pub text: String,
    /// Unix 타임스탬프 (밀리초)
    pub created_at: u64,
    pub kind: MessageKind,
}

/// 방의 채팅/시스템/추측 기록
///
/// 삽입 순서가 곧 표시 순서이며, 항목을 삭제하거나 재정렬하는 API는 없다.
#[derive(Debug, Clone)]
pub struct MessageLog {
    room_id: String,
    next_id: u64,
    entries: Vec<Message>,
}

impl MessageLog {
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// 항목을 추가하고 추가된 항목을 반환
    pub fn append(
        &mut self,
        author_id: &str,
        author_name: &str,
        text: &str,
        kind: MessageKind,
    ) -> &Message {
        let message = Message {
            id: self.next_id,
            room_id: self.room_id.clone(),
            author_id: author_id.to_string(),
            author_name: author_name.to_string(),
            text: text.to_string(),
            created_at: now_millis(),
            kind,
        };
        self.next_id += 1;
        let index = self.entries.len();
        self.entries.push(message);
        &self.entries[index]
    }

    pub fn append_system(&mut self, text: &str) -> &Message {
        self.append(SYSTEM_AUTHOR_ID, SYSTEM_AUTHOR_NAME, text, MessageKind::System)
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
