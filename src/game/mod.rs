//! 게임 코어 모듈

pub mod coordinator;
pub mod message_log;
pub mod outcome;
pub mod relay;
pub mod room;
pub mod timer;
pub mod words;

pub use coordinator::SessionCoordinator;
pub use message_log::Message;
pub use outcome::{Outcome, TimerCommand};
pub use relay::relay_drawing;
pub use room::{Participant, RoomState};
pub use timer::TimerKind;
pub use words::RandomWords;
