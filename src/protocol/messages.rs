//! 클라이언트-서버 메시지 프로토콜 정의

use crate::game::{Message, Participant, RoomState};
use serde::{Deserialize, Serialize};

/// 클라이언트 → 서버 메시지
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum ClientMessage {
    // Connection
    Heartbeat,

    // Room Management
    Join { room_id: String, name: String },

    // Drawing
    DrawingEvent(DrawingEvent),
    ClearCanvas,

    // Chat & Guess
    SendGuess { text: String },
    SendMessage { text: String },
}

/// 서버 → 클라이언트 메시지
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum ServerMessage {
    // Connection
    Connected { socket_id: String },
    HeartbeatAck,
    Error { message: String },

    // Room Events
    RoomFull,
    ParticipantJoined { participant: Participant },
    ParticipantLeft { id: String },
    RoomUpdated { room: RoomSnapshot },
    GameState(GameStateData),
    GameReset,

    // Drawing
    UpdateCanvas(DrawingEvent),
    ClearCanvas,

    // Chat & Guess
    ChatMessage { message: Message },
    SystemMessage { text: String },
    GuessEvaluated {
        guesser_id: String,
        text: String,
        is_correct: bool,
    },
    CorrectGuess {
        guesser_id: String,
        word: String,
        points: u32,
    },
    RoundEnded {
        correct_word: String,
        next_drawer: Option<String>,
    },

    // Timers
    TimerUpdate { time_left: u32 },
    GuesserTimerUpdate { guess_time_left: u32 },
}

/// 그리기 좌표 하나 (코디네이터는 해석하지 않음)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingPoint {
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub brush_size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingAction {
    Start,
    Draw,
    End,
    Clear,
}

/// 드로어가 보내는 그리기 이벤트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingEvent {
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub points: Vec<DrawingPoint>,
    pub action: DrawingAction,
}

/// 참가자별 방 스냅샷
///
/// `current_word`는 드로어에게 보내는 사본이거나 라운드가 끝난 뒤에만 채워진다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub id: String,
    pub participants: Vec<Participant>,
    pub state: RoomState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_word: Option<String>,
    pub drawer_id: Option<String>,
    pub guesser_id: Option<String>,
    pub time_left: u32,
    pub guess_time_left: u32,
}

/// 입장 시 전달하는 게임 상태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_word: Option<String>,
    pub drawer_id: Option<String>,
    pub messages: Vec<Message>,
    pub time_left: u32,
    pub guess_time_left: u32,
    pub round: u32,
    pub max_rounds: u32,
}
