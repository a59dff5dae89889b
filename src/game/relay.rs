//! 그리기 이벤트 중계

use super::coordinator::SessionCoordinator;
use super::outcome::Outcome;
use super::room::RoomState;
use crate::protocol::{DrawingEvent, ServerMessage};

/// 드로어의 그리기 이벤트를 나머지 참가자에게 그대로 전달
///
/// 드로어가 아니거나 라운드 진행 중이 아니면 아무것도 보내지 않는다.
/// 이벤트를 저장하지 않으므로 나중에 입장한 참가자는 이전 획을 받지 못한다.
pub fn relay_drawing(
    coordinator: &SessionCoordinator,
    from_peer_id: &str,
    event: DrawingEvent,
) -> Outcome {
    let mut out = Outcome::new();

    if !coordinator.is_drawer(from_peer_id) || coordinator.state() != RoomState::Playing {
        tracing::debug!(from = %from_peer_id, "Drawing event rejected");
        return out;
    }

    for target in coordinator.others(from_peer_id) {
        out.send(&target, ServerMessage::UpdateCanvas(event.clone()));
    }

    tracing::trace!(
        from = %from_peer_id,
        action = ?event.action,
        points = event.points.len(),
        "Relayed drawing event"
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::words::FixedWord;
    use crate::protocol::{DrawingAction, DrawingPoint};

    fn stroke(action: DrawingAction) -> DrawingEvent {
        DrawingEvent {
            room_id: "main-room".to_string(),
            points: vec![
                DrawingPoint {
                    x: 1.0,
                    y: 2.0,
                    color: "#000000".to_string(),
                    brush_size: 3.0,
                },
                DrawingPoint {
                    x: 4.5,
                    y: 6.5,
                    color: "#ff0000".to_string(),
                    brush_size: 3.0,
                },
            ],
            action,
        }
    }

    fn playing() -> SessionCoordinator {
        let mut c = SessionCoordinator::new(&GameConfig::default(), Box::new(FixedWord("cat")));
        c.join("a", "alice").unwrap();
        c.join("b", "bob").unwrap();
        c
    }

    #[test]
    fn test_drawer_events_reach_other_participant_unmodified() {
        // given
        let c = playing();
        let event = stroke(DrawingAction::Draw);

        // when
        let out = relay_drawing(&c, "a", event.clone());

        // then
        assert_eq!(
            out.messages_for("b"),
            vec![&ServerMessage::UpdateCanvas(event)]
        );
        assert!(out.messages_for("a").is_empty());
    }

    #[test]
    fn test_non_drawer_events_are_never_relayed() {
        let c = playing();

        assert!(relay_drawing(&c, "b", stroke(DrawingAction::Start)).is_empty());
        assert!(relay_drawing(&c, "intruder", stroke(DrawingAction::Draw)).is_empty());
    }

    #[test]
    fn test_drawing_outside_round_is_dropped() {
        let mut c = SessionCoordinator::new(&GameConfig::default(), Box::new(FixedWord("cat")));
        c.join("a", "alice").unwrap();

        assert!(relay_drawing(&c, "a", stroke(DrawingAction::Draw)).is_empty());
    }

    #[test]
    fn test_empty_end_event_is_relayed() {
        let c = playing();
        let event = DrawingEvent {
            room_id: "main-room".to_string(),
            points: Vec::new(),
            action: DrawingAction::End,
        };

        let out = relay_drawing(&c, "a", event);

        assert_eq!(out.envelopes.len(), 1);
    }
}
