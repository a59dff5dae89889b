//! 세션 코디네이터 (방 상태 머신)
//!
//! 방 멤버십, 역할 배정, 제시어, 점수, 상태 전이, 두 타이머를 모두 소유한다.
//! 모든 연산은 호출자에게 `Outcome`을 돌려주며, 호출자는 같은 잠금 안에서 그 결과를 전달한다.

use super::message_log::MessageKind;
use super::outcome::Outcome;
use super::room::{Participant, Role, Room, RoomState};
use super::timer::{Countdown, Tick, TimerKind};
use super::words::WordSource;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::protocol::{GameStateData, RoomSnapshot, ServerMessage};

/// 한 쌍의 참가자가 진행하는 라운드 수
const ROUNDS_PER_PAIRING: u32 = 1;

pub struct SessionCoordinator {
    room: Room,
    words: Box<dyn WordSource>,
    round_timer: Countdown,
    guess_timer: Countdown,
    points_per_guess: u32,
}

impl SessionCoordinator {
    pub fn new(config: &GameConfig, words: Box<dyn WordSource>) -> Self {
        Self {
            room: Room::new(config.room_id.clone()),
            words,
            round_timer: Countdown::new(config.round_seconds),
            guess_timer: Countdown::new(config.guess_seconds),
            points_per_guess: config.points_per_guess,
        }
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn state(&self) -> RoomState {
        self.room.state
    }

    pub fn timer(&self, kind: TimerKind) -> &Countdown {
        match kind {
            TimerKind::Round => &self.round_timer,
            TimerKind::Guess => &self.guess_timer,
        }
    }

    pub fn is_drawer(&self, peer_id: &str) -> bool {
        self.room.drawer_id.as_deref() == Some(peer_id)
    }

    pub fn is_guesser(&self, peer_id: &str) -> bool {
        self.room.guesser_id.as_deref() == Some(peer_id)
    }

    /// 참가 처리
    ///
    /// 비어 있는 자리를 배정한다. 드로어 자리가 비었으면 드로어가 되어 제시어를 받고,
    /// 아니면 추측자가 된다. 두 자리가 모두 차면 라운드가 시작된다.
    pub fn join(&mut self, peer_id: &str, name: &str) -> Result<Outcome, GameError> {
        if self.room.participant(peer_id).is_some() {
            return Err(GameError::AlreadyJoined(peer_id.to_string()));
        }
        if self.room.is_full() {
            return Err(GameError::RoomFull);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }

        let mut out = Outcome::new();

        let role = if self.room.drawer_id.is_none() {
            Role::Drawer
        } else {
            Role::Guesser
        };
        let participant = Participant::new(peer_id, name, role);
        self.room.participants.push(participant.clone());

        match role {
            Role::Drawer => {
                self.room.drawer_id = Some(peer_id.to_string());
                self.room.secret_word = Some(self.words.next_word());
            }
            Role::Guesser => {
                self.room.guesser_id = Some(peer_id.to_string());
            }
        }

        let paired = self.room.drawer_id.is_some() && self.room.guesser_id.is_some();
        if paired {
            self.start_round(&mut out);
        }

        tracing::info!(
            peer_id = %peer_id,
            name = %name,
            role = ?role,
            participants = self.room.participants.len(),
            "Participant joined"
        );

        let role_label = match role {
            Role::Drawer => "drawer",
            Role::Guesser => "guesser",
        };
        let announcement = if paired {
            format!("{name} joined as the {role_label}. Game started!")
        } else {
            format!("{name} joined as the {role_label}.")
        };
        self.log_system(&mut out, &announcement);
        self.broadcast(&mut out, ServerMessage::ParticipantJoined { participant });

        out.send(peer_id, ServerMessage::GameState(self.game_state_for(peer_id)));
        if paired {
            for other in self.others(peer_id) {
                out.send(&other, ServerMessage::GameState(self.game_state_for(&other)));
            }
        }
        self.broadcast_room_snapshots(&mut out);

        Ok(out)
    }

    /// 추측 처리. 추측자가 아니거나 진행 중이 아니면 조용히 무시한다.
    pub fn submit_guess(&mut self, peer_id: &str, text: &str) -> Outcome {
        let mut out = Outcome::new();

        if !self.is_guesser(peer_id) || self.room.state != RoomState::Playing {
            tracing::debug!(peer_id = %peer_id, state = ?self.room.state, "Guess rejected");
            return out;
        }
        let Some(name) = self.room.participant(peer_id).map(|p| p.name.clone()) else {
            return out;
        };

        let is_correct = self
            .room
            .secret_word
            .as_deref()
            .is_some_and(|word| is_correct_guess(text, word));

        let message = self
            .room
            .log
            .append(peer_id, &name, text, MessageKind::Guess)
            .clone();
        self.broadcast(&mut out, ServerMessage::ChatMessage { message });
        self.broadcast(
            &mut out,
            ServerMessage::GuessEvaluated {
                guesser_id: peer_id.to_string(),
                text: text.to_string(),
                is_correct,
            },
        );

        if is_correct {
            let word = self.room.secret_word.clone().unwrap_or_default();
            let points = self.points_per_guess;
            if let Some(guesser) = self.room.participant_mut(peer_id) {
                guesser.score += points;
            }
            self.stop_timers(&mut out);

            tracing::info!(peer_id = %peer_id, word = %word, "Correct guess");

            self.log_system(&mut out, &format!("{name} guessed correctly!"));
            self.broadcast(
                &mut out,
                ServerMessage::CorrectGuess {
                    guesser_id: peer_id.to_string(),
                    word,
                    points,
                },
            );
            self.finish_round(&mut out);
        } else {
            self.log_system(
                &mut out,
                &format!("{name} guessed: \"{}\" (incorrect)", text.trim()),
            );
            let epoch = self.guess_timer.start();
            out.arm(TimerKind::Guess, epoch);
        }

        out
    }

    /// 일반 채팅. 평가하지 않는다.
    pub fn send_chat(&mut self, peer_id: &str, text: &str) -> Outcome {
        let mut out = Outcome::new();

        let text = text.trim();
        if text.is_empty() {
            return out;
        }
        let Some(name) = self.room.participant(peer_id).map(|p| p.name.clone()) else {
            tracing::debug!(peer_id = %peer_id, "Chat from non-participant dropped");
            return out;
        };

        let message = self
            .room
            .log
            .append(peer_id, &name, text, MessageKind::Chat)
            .clone();
        self.broadcast(&mut out, ServerMessage::ChatMessage { message });

        out
    }

    /// 캔버스 지우기. 드로어만 가능하며 상대에게만 전달한다.
    pub fn clear_canvas(&mut self, peer_id: &str) -> Outcome {
        let mut out = Outcome::new();

        if !self.is_drawer(peer_id) {
            tracing::debug!(peer_id = %peer_id, "Clear canvas rejected");
            return out;
        }
        for other in self.others(peer_id) {
            out.send(&other, ServerMessage::ClearCanvas);
        }

        out
    }

    /// 연결 해제 처리
    pub fn disconnect(&mut self, peer_id: &str) -> Outcome {
        let mut out = Outcome::new();

        let was_drawer = self.is_drawer(peer_id);
        let was_guesser = self.is_guesser(peer_id);
        let Some(participant) = self.room.remove_participant(peer_id) else {
            return out;
        };

        if was_drawer {
            self.room.drawer_id = None;
            self.room.secret_word = None;
        }
        if was_guesser {
            self.room.guesser_id = None;
            // 떠난 추측자가 이미 본 단어일 수 있으므로 남은 드로어에게 새 단어
            if self.room.drawer_id.is_some() {
                self.room.secret_word = Some(self.words.next_word());
            }
        }
        self.room.state = RoomState::Waiting;
        self.reset_timers(&mut out);

        tracing::info!(
            peer_id = %peer_id,
            was_drawer,
            was_guesser,
            remaining = self.room.participants.len(),
            "Participant left"
        );

        self.log_system(&mut out, &format!("{} left the game", participant.name));
        self.broadcast(
            &mut out,
            ServerMessage::ParticipantLeft {
                id: peer_id.to_string(),
            },
        );
        self.broadcast_room_snapshots(&mut out);

        out
    }

    /// 관리용 전체 초기화
    pub fn reset_all(&mut self) -> Outcome {
        let mut out = Outcome::new();

        self.reset_timers(&mut out);
        self.room = Room::new(self.room.id.clone());

        tracing::warn!(room_id = %self.room.id, "Room reset");
        out
    }

    /// 타이머 틱 진입점. 이전 세대의 틱이나 멈춘 타이머의 틱은 아무 일도 하지 않는다.
    pub fn tick(&mut self, kind: TimerKind, epoch: u64) -> Outcome {
        let mut out = Outcome::new();

        match kind {
            TimerKind::Round => match self.round_timer.tick(epoch) {
                Tick::Stale => {}
                Tick::Running(time_left) => {
                    self.broadcast(&mut out, ServerMessage::TimerUpdate { time_left });
                }
                Tick::Expired => {
                    self.broadcast(&mut out, ServerMessage::TimerUpdate { time_left: 0 });
                    self.expire_round(&mut out);
                }
            },
            TimerKind::Guess => match self.guess_timer.tick(epoch) {
                Tick::Stale => {}
                Tick::Running(guess_time_left) => {
                    self.broadcast(
                        &mut out,
                        ServerMessage::GuesserTimerUpdate { guess_time_left },
                    );
                }
                Tick::Expired => {
                    self.broadcast(
                        &mut out,
                        ServerMessage::GuesserTimerUpdate { guess_time_left: 0 },
                    );
                    self.log_system(&mut out, "Time's up for this guess! Make another guess.");
                    let epoch = self.guess_timer.start();
                    out.arm(TimerKind::Guess, epoch);
                }
            },
        }

        out
    }

    /// 참가자별 방 스냅샷
    pub fn snapshot_for(&self, peer_id: &str) -> RoomSnapshot {
        RoomSnapshot {
            id: self.room.id.clone(),
            participants: self.room.participants.clone(),
            state: self.room.state,
            current_word: self.visible_word(peer_id),
            drawer_id: self.room.drawer_id.clone(),
            guesser_id: self.room.guesser_id.clone(),
            time_left: self.round_timer.remaining(),
            guess_time_left: self.guess_timer.remaining(),
        }
    }

    pub fn game_state_for(&self, peer_id: &str) -> GameStateData {
        GameStateData {
            current_word: self.visible_word(peer_id),
            drawer_id: self.room.drawer_id.clone(),
            messages: self.room.log.entries().to_vec(),
            time_left: self.round_timer.remaining(),
            guess_time_left: self.guess_timer.remaining(),
            round: ROUNDS_PER_PAIRING,
            max_rounds: ROUNDS_PER_PAIRING,
        }
    }

    /// `peer_id`를 제외한 참가자 ID
    pub fn others(&self, peer_id: &str) -> Vec<String> {
        self.room
            .participants
            .iter()
            .filter(|p| p.id != peer_id)
            .map(|p| p.id.clone())
            .collect()
    }

    // 제시어는 드로어에게만, 라운드가 끝난 뒤에는 모두에게 공개
    fn visible_word(&self, peer_id: &str) -> Option<String> {
        if self.is_drawer(peer_id) || self.room.state == RoomState::RoundEnd {
            self.room.secret_word.clone()
        } else {
            None
        }
    }

    fn start_round(&mut self, out: &mut Outcome) {
        self.room.state = RoomState::Playing;
        let round_epoch = self.round_timer.start();
        let guess_epoch = self.guess_timer.start();
        out.arm(TimerKind::Round, round_epoch);
        out.arm(TimerKind::Guess, guess_epoch);

        tracing::info!(room_id = %self.room.id, "Round started");
    }

    fn expire_round(&mut self, out: &mut Outcome) {
        if self.room.state != RoomState::Playing {
            return;
        }
        if self.guess_timer.stop() {
            out.disarm(TimerKind::Guess);
        }

        tracing::info!(room_id = %self.room.id, "Round timer expired");

        self.log_system(out, "Time's up! The word was not guessed.");
        self.finish_round(out);
    }

    fn finish_round(&mut self, out: &mut Outcome) {
        self.room.state = RoomState::RoundEnd;
        let correct_word = self.room.secret_word.clone().unwrap_or_default();
        self.broadcast(
            out,
            ServerMessage::RoundEnded {
                correct_word,
                next_drawer: None,
            },
        );
        self.broadcast_room_snapshots(out);
    }

    fn stop_timers(&mut self, out: &mut Outcome) {
        if self.round_timer.stop() {
            out.disarm(TimerKind::Round);
        }
        if self.guess_timer.stop() {
            out.disarm(TimerKind::Guess);
        }
    }

    fn reset_timers(&mut self, out: &mut Outcome) {
        self.round_timer.reset();
        self.guess_timer.reset();
        out.disarm(TimerKind::Round);
        out.disarm(TimerKind::Guess);
    }

    fn log_system(&mut self, out: &mut Outcome, text: &str) {
        self.room.log.append_system(text);
        self.broadcast(
            out,
            ServerMessage::SystemMessage {
                text: text.to_string(),
            },
        );
    }

    fn broadcast(&self, out: &mut Outcome, message: ServerMessage) {
        for participant in &self.room.participants {
            out.send(&participant.id, message.clone());
        }
    }

    fn broadcast_room_snapshots(&self, out: &mut Outcome) {
        for participant in &self.room.participants {
            out.send(
                &participant.id,
                ServerMessage::RoomUpdated {
                    room: self.snapshot_for(&participant.id),
                },
            );
        }
    }
}

/// 앞뒤 공백을 제거하고 대소문자 구분 없이 정확히 일치하는지
pub fn is_correct_guess(guess: &str, secret: &str) -> bool {
    let secret = secret.trim();
    !secret.is_empty() && guess.trim().to_lowercase() == secret.to_lowercase()
}
