//! 게임 도메인 에러 정의

/// 참가 요청 처리 중 발생하는 에러
///
/// 권한 위반(드로어가 아닌 참가자의 그리기 등)은 에러로 노출하지 않고 조용히 무시한다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Room is full")]
    RoomFull,

    #[error("Connection {0} has already joined the room")]
    AlreadyJoined(String),

    #[error("Player name must not be empty")]
    EmptyName,
}
