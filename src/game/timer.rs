//! 라운드/추측 카운트다운 타이머
//!
//! 실제 시간은 다루지 않는다. 호스트 스케줄러가 1초마다 `tick`을 호출하고,
//! 테스트는 `tick`을 직접 호출해 시간을 진행시킨다.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    Round,
    Guess,
}

/// `tick` 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// 멈춘 타이머나 이전 세대에 예약된 틱
    Stale,
    Running(u32),
    Expired,
}

/// 초 단위 카운트다운
///
/// `start`/`stop` 할 때마다 세대(epoch)가 바뀌므로 이전 세대의 틱은 무시된다.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    running: bool,
    epoch: u64,
}

impl Countdown {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
            epoch: 0,
        }
    }

    /// 처음부터 다시 시작하고 새 세대를 반환
    pub fn start(&mut self) -> u64 {
        self.epoch += 1;
        self.remaining = self.duration;
        self.running = true;
        self.epoch
    }

    /// 이미 멈춘 타이머에는 아무 일도 하지 않는다. 실제로 멈췄으면 `true`.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.epoch += 1;
        true
    }

    /// 멈추고 남은 시간을 초기값으로 되돌림
    pub fn reset(&mut self) {
        self.stop();
        self.remaining = self.duration;
    }

    pub fn tick(&mut self, epoch: u64) -> Tick {
        if !self.is_armed(epoch) {
            return Tick::Stale;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }

    /// 주어진 세대의 틱이 아직 유효한지
    pub fn is_armed(&self, epoch: u64) -> bool {
        self.running && self.epoch == epoch
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_stopped_at_full_duration() {
        let timer = Countdown::new(10);

        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 10);
    }

    #[test]
    fn test_tick_counts_down_to_expiry() {
        let mut timer = Countdown::new(3);
        let epoch = timer.start();

        assert_eq!(timer.tick(epoch), Tick::Running(2));
        assert_eq!(timer.tick(epoch), Tick::Running(1));
        assert_eq!(timer.tick(epoch), Tick::Expired);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_tick_after_expiry_is_stale() {
        let mut timer = Countdown::new(1);
        let epoch = timer.start();

        assert_eq!(timer.tick(epoch), Tick::Expired);
        assert_eq!(timer.tick(epoch), Tick::Stale);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut timer = Countdown::new(5);
        timer.start();

        assert!(timer.stop());
        assert!(!timer.stop());
        assert!(!timer.is_running());
    }

    #[test]
    fn test_tick_from_previous_epoch_is_ignored() {
        let mut timer = Countdown::new(5);
        let old = timer.start();
        timer.tick(old);

        let new = timer.start();

        assert_eq!(timer.tick(old), Tick::Stale);
        assert_eq!(timer.remaining(), 5);
        assert_eq!(timer.tick(new), Tick::Running(4));
    }

    #[test]
    fn test_reset_stops_and_restores_duration() {
        let mut timer = Countdown::new(5);
        let epoch = timer.start();
        timer.tick(epoch);
        timer.tick(epoch);

        timer.reset();

        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 5);
        assert_eq!(timer.tick(epoch), Tick::Stale);
    }
}
