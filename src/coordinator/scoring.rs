//! Score handling - reacts to the ball entering the active hoop

use bevy::prelude::*;

use crate::ball::{Ball, Possession};
use crate::coordinator::MatchCoordinator;
use crate::events::{EventBus, GameEvent};
use crate::physics::{BodyMut, GravityScale, Velocity};

/// Collision signal: `ball` started overlapping the trigger region of `hoop`
#[derive(Message, Debug, Clone, Copy)]
pub struct HoopEntered {
    pub ball: Entity,
    pub hoop: Entity,
}

/// Hand possession back out when the ball goes through the active hoop.
/// Entries into the inactive hoop are ignored.
pub fn handle_hoop_entries(
    mut entries: MessageReader<HoopEntered>,
    mut coordinator: ResMut<MatchCoordinator>,
    mut event_bus: ResMut<EventBus>,
    mut ball_query: Query<
        (&mut Possession, &mut Transform, &mut Velocity, &mut GravityScale),
        With<Ball>,
    >,
) {
    for entry in entries.read() {
        let Some(active) = coordinator.active_hoop() else {
            continue;
        };
        if entry.hoop != active.entity {
            continue;
        }

        let Ok((mut possession, mut transform, mut velocity, mut gravity)) =
            ball_query.get_mut(entry.ball)
        else {
            continue;
        };

        let mut body = BodyMut::new(&mut transform, &mut velocity, &mut gravity);
        let Some(recipient) = coordinator.on_score(&mut possession, &mut body) else {
            warn!("Scored on {:?} hoop but roster is empty", active.side);
            continue;
        };

        event_bus.emit(GameEvent::Goal { hoop: active.side });
        event_bus.emit(GameEvent::PossessionGranted { player: recipient });
        info!("SCORE on {:?} hoop, possession to {}", active.side, recipient);
    }
}
