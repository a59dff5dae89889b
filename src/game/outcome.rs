//! 코디네이터 처리 결과

use super::timer::TimerKind;
use crate::protocol::ServerMessage;

/// 특정 피어에게 보낼 메시지
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub to: String,
    pub message: ServerMessage,
}

/// 호스트 스케줄러에 대한 타이머 명령
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// 이전 틱 소스를 취소하고 1초 주기로 `tick(kind, epoch)` 호출 시작
    Arm { kind: TimerKind, epoch: u64 },
    /// 대기 중인 틱 소스 취소
    Disarm { kind: TimerKind },
}

/// 이벤트 하나를 처리한 결과. 처리 순서대로 전달해야 한다.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Outcome {
    pub envelopes: Vec<Envelope>,
    pub timers: Vec<TimerCommand>,
}

impl Outcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, to: &str, message: ServerMessage) {
        self.envelopes.push(Envelope {
            to: to.to_string(),
            message,
        });
    }

    pub fn arm(&mut self, kind: TimerKind, epoch: u64) {
        self.timers.push(TimerCommand::Arm { kind, epoch });
    }

    pub fn disarm(&mut self, kind: TimerKind) {
        self.timers.push(TimerCommand::Disarm { kind });
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty() && self.timers.is_empty()
    }

    /// 특정 피어에게 가는 메시지만 순서대로
    #[cfg(test)]
    pub fn messages_for(&self, peer_id: &str) -> Vec<&ServerMessage> {
        self.envelopes
            .iter()
            .filter(|e| e.to == peer_id)
            .map(|e| &e.message)
            .collect()
    }
}
