//! 핸들러 모듈

pub mod connection;
pub mod dispatch;
pub mod game;
pub mod room;
pub mod timer;

pub use connection::*;
pub use game::*;
pub use room::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::game::words::FixedWord;
    use crate::game::{RoomState, SessionCoordinator};
    use crate::protocol::{DrawingAction, DrawingEvent, ServerMessage};
    use crate::state::AppState;
    use std::sync::Arc;
    use tokio::sync::mpsc::{self, UnboundedReceiver};
    use tokio::time::Duration;

    fn test_state() -> Arc<AppState> {
        let config = Config::default();
        let coordinator = SessionCoordinator::new(&config.game, Box::new(FixedWord("cat")));
        Arc::new(AppState::with_coordinator(config, coordinator))
    }

    async fn connect(state: &Arc<AppState>) -> (String, UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let peer_id = handle_connection(state.clone(), tx).await;
        (peer_id, rx)
    }

    fn drain(rx: &mut UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = rx.try_recv() {
            messages.push(message);
        }
        messages
    }

    fn current_word(messages: &[ServerMessage]) -> Option<Option<String>> {
        messages.iter().find_map(|m| match m {
            ServerMessage::GameState(state) => Some(state.current_word.clone()),
            _ => None,
        })
    }

    fn stroke() -> DrawingEvent {
        DrawingEvent {
            room_id: "main-room".to_string(),
            points: Vec::new(),
            action: DrawingAction::Start,
        }
    }

    #[tokio::test]
    async fn test_connection_receives_socket_id_first() {
        let state = test_state();

        let (peer_id, mut rx) = connect(&state).await;

        assert_eq!(
            drain(&mut rx),
            vec![ServerMessage::Connected { socket_id: peer_id }]
        );
    }

    #[tokio::test]
    async fn test_join_flow_sends_personalised_game_state() {
        // given
        let state = test_state();
        let (a, mut rx_a) = connect(&state).await;
        let (b, mut rx_b) = connect(&state).await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        // when
        handle_join_room(state.clone(), &a, "main-room", "alice").await;
        handle_join_room(state.clone(), &b, "main-room", "bob").await;

        // then
        let to_a = drain(&mut rx_a);
        let to_b = drain(&mut rx_b);
        assert_eq!(current_word(&to_a), Some(Some("cat".to_string())));
        assert_eq!(current_word(&to_b), Some(None));
        assert_eq!(state.coordinator.lock().await.state(), RoomState::Playing);
        assert_eq!(state.timers.len(), 2);
    }

    #[tokio::test]
    async fn test_room_full_is_surfaced_only_to_joiner() {
        // given
        let state = test_state();
        let (a, mut rx_a) = connect(&state).await;
        let (b, mut rx_b) = connect(&state).await;
        let (c, mut rx_c) = connect(&state).await;
        handle_join_room(state.clone(), &a, "main-room", "alice").await;
        handle_join_room(state.clone(), &b, "main-room", "bob").await;
        drain(&mut rx_a);
        drain(&mut rx_b);
        drain(&mut rx_c);

        // when
        handle_join_room(state.clone(), &c, "main-room", "carol").await;

        // then
        assert_eq!(drain(&mut rx_c), vec![ServerMessage::RoomFull]);
        assert!(drain(&mut rx_a).is_empty());
        assert!(drain(&mut rx_b).is_empty());
        assert_eq!(state.coordinator.lock().await.room().participants.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_name_is_answered_with_error() {
        let state = test_state();
        let (a, mut rx_a) = connect(&state).await;
        drain(&mut rx_a);

        handle_join_room(state.clone(), &a, "main-room", "  ").await;

        assert!(matches!(
            drain(&mut rx_a).as_slice(),
            [ServerMessage::Error { .. }]
        ));
    }

    #[tokio::test]
    async fn test_only_drawer_strokes_are_relayed() {
        // given
        let state = test_state();
        let (a, mut rx_a) = connect(&state).await;
        let (b, mut rx_b) = connect(&state).await;
        handle_join_room(state.clone(), &a, "main-room", "alice").await;
        handle_join_room(state.clone(), &b, "main-room", "bob").await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        // when
        handle_drawing_event(state.clone(), &b, stroke()).await;
        handle_drawing_event(state.clone(), &a, stroke()).await;

        // then
        assert!(drain(&mut rx_a).is_empty());
        assert_eq!(drain(&mut rx_b), vec![ServerMessage::UpdateCanvas(stroke())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_tick_until_correct_guess() {
        // given
        let state = test_state();
        let (a, mut rx_a) = connect(&state).await;
        let (b, mut rx_b) = connect(&state).await;
        handle_join_room(state.clone(), &a, "main-room", "alice").await;
        handle_join_room(state.clone(), &b, "main-room", "bob").await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        // when
        tokio::time::sleep(Duration::from_millis(3500)).await;

        // then
        let to_b = drain(&mut rx_b);
        let round: Vec<u32> = to_b
            .iter()
            .filter_map(|m| match m {
                ServerMessage::TimerUpdate { time_left } => Some(*time_left),
                _ => None,
            })
            .collect();
        let guess: Vec<u32> = to_b
            .iter()
            .filter_map(|m| match m {
                ServerMessage::GuesserTimerUpdate { guess_time_left } => Some(*guess_time_left),
                _ => None,
            })
            .collect();
        assert_eq!(round, vec![59, 58, 57]);
        assert_eq!(guess, vec![9, 8, 7]);

        // 정답 이후에는 틱이 더 이상 오지 않는다
        handle_send_guess(state.clone(), &b, "CAT").await;
        drain(&mut rx_b);
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(drain(&mut rx_b).is_empty());
        assert!(state.timers.is_empty());
        assert_eq!(state.coordinator.lock().await.state(), RoomState::RoundEnd);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drawer_disconnect_cancels_timers() {
        // given
        let state = test_state();
        let (a, _rx_a) = connect(&state).await;
        let (b, mut rx_b) = connect(&state).await;
        handle_join_room(state.clone(), &a, "main-room", "alice").await;
        handle_join_room(state.clone(), &b, "main-room", "bob").await;
        drain(&mut rx_b);

        // when
        handle_disconnect(state.clone(), &a).await;

        // then
        let to_b = drain(&mut rx_b);
        assert!(to_b.contains(&ServerMessage::ParticipantLeft { id: a.clone() }));
        assert!(state.timers.is_empty());
        assert!(state.peers.get(&a).is_none());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(drain(&mut rx_b).is_empty());
        assert_eq!(state.coordinator.lock().await.state(), RoomState::Waiting);
    }

    #[tokio::test]
    async fn test_reset_notifies_every_connection() {
        // given
        let state = test_state();
        let (a, mut rx_a) = connect(&state).await;
        let (_spectator, mut rx_s) = connect(&state).await;
        handle_join_room(state.clone(), &a, "main-room", "alice").await;
        drain(&mut rx_a);
        drain(&mut rx_s);

        // when
        handle_reset(state.clone()).await;

        // then
        assert_eq!(drain(&mut rx_a), vec![ServerMessage::GameReset]);
        assert_eq!(drain(&mut rx_s), vec![ServerMessage::GameReset]);
        assert!(state.coordinator.lock().await.room().participants.is_empty());
    }

    #[tokio::test]
    async fn test_chat_reaches_both_participants() {
        let state = test_state();
        let (a, mut rx_a) = connect(&state).await;
        let (b, mut rx_b) = connect(&state).await;
        handle_join_room(state.clone(), &a, "main-room", "alice").await;
        handle_join_room(state.clone(), &b, "main-room", "bob").await;
        drain(&mut rx_a);
        drain(&mut rx_b);

        handle_send_message(state.clone(), &b, "hello").await;
        handle_clear_canvas(state.clone(), &a).await;

        let to_a = drain(&mut rx_a);
        let to_b = drain(&mut rx_b);
        assert!(matches!(
            to_a.as_slice(),
            [ServerMessage::ChatMessage { message }] if message.text == "hello"
        ));
        assert!(matches!(to_b[0], ServerMessage::ChatMessage { .. }));
        assert_eq!(to_b[1], ServerMessage::ClearCanvas);
    }
}
