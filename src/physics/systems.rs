//! Point-mass integration systems (stand-in for a full physics engine)

use bevy::prelude::*;

use crate::ball::Ball;
use crate::constants::*;
use crate::physics::body::{GravityScale, PhysicsSettings, Velocity};

/// Apply scaled gravity to every body that has a gravity scale
pub fn apply_gravity(
    settings: Res<PhysicsSettings>,
    mut query: Query<(&mut Velocity, &GravityScale)>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (mut velocity, scale) in &mut query {
        if scale.0 != 0.0 {
            velocity.0.y -= settings.gravity * scale.0 * dt;
        }
    }
}

/// Apply velocity to all entities with Velocity component
pub fn apply_velocity(mut query: Query<(&mut Transform, &Velocity)>, time: Res<Time>) {
    let dt = time.delta_secs();
    for (mut transform, velocity) in &mut query {
        transform.translation.x += velocity.0.x * dt;
        transform.translation.y += velocity.0.y * dt;
    }
}

/// Keep free balls inside the arena, bouncing off the floor and side walls
pub fn ball_arena_bounds(mut query: Query<(&mut Transform, &mut Velocity, &GravityScale), With<Ball>>) {
    let half = BALL_SIZE / 2.0;
    let floor = ARENA_FLOOR_Y + half.y;
    let wall = ARENA_WIDTH / 2.0 - half.x;

    for (mut transform, mut velocity, scale) in &mut query {
        // Held balls ride with their holder
        if scale.0 == 0.0 {
            continue;
        }

        if transform.translation.y < floor {
            transform.translation.y = floor;
            if velocity.0.y < 0.0 {
                velocity.0.y = -velocity.0.y * BALL_BOUNCE;
            }
        }

        if transform.translation.x.abs() > wall {
            transform.translation.x = wall * transform.translation.x.signum();
            velocity.0.x = -velocity.0.x * BALL_BOUNCE;
        }
    }
}

/// Keep players on the court
pub fn clamp_players_to_arena(
    mut query: Query<&mut Transform, (With<crate::player::Player>, Without<Ball>)>,
) {
    let half = PLAYER_SIZE / 2.0;
    let max_x = ARENA_WIDTH / 2.0 - half.x;
    let min_y = ARENA_FLOOR_Y + half.y;
    let max_y = ARENA_HEIGHT / 2.0 - half.y;

    for mut transform in &mut query {
        transform.translation.x = transform.translation.x.clamp(-max_x, max_x);
        transform.translation.y = transform.translation.y.clamp(min_y, max_y);
    }
}
