//! Ball-holder interaction

use bevy::prelude::*;

use crate::ball::components::*;
use crate::ball::possession::Possession;
use crate::coordinator::MatchCoordinator;
use crate::physics::{GravityScale, Velocity};
use crate::player::Player;

/// Keep a held ball pinned to its holder. Free balls fall under full gravity.
pub fn ball_follow_holder(
    coordinator: Res<MatchCoordinator>,
    mut ball_query: Query<
        (
            &Possession,
            &BallConfig,
            &mut Transform,
            &mut Velocity,
            &mut GravityScale,
        ),
        With<Ball>,
    >,
    player_query: Query<&Transform, (With<Player>, Without<Ball>)>,
) {
    for (possession, config, mut transform, mut velocity, mut gravity) in &mut ball_query {
        let Some(holder) = possession.holder() else {
            gravity.0 = 1.0;
            continue;
        };

        velocity.0 = Vec2::ZERO;
        gravity.0 = 0.0;

        let Some(entry) = coordinator.get_actor_by_index(holder) else {
            continue;
        };
        if let Ok(player_transform) = player_query.get(entry.entity) {
            let anchor = player_transform.translation.truncate() + config.offset;
            transform.translation.x = anchor.x;
            transform.translation.y = anchor.y;
        }
    }
}
