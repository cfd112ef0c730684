//! World components for the arena floor and hoops

use bevy::prelude::*;

use crate::ball::{Ball, HoopContact};
use crate::constants::*;
use crate::coordinator::{HoopEntered, HoopSide, HoopTarget, MatchCoordinator};

/// Hoop scoring trigger. The side lives alongside it as a `HoopSide` component.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hoop {
    /// Trigger region, centered on the hoop's transform
    pub trigger_size: Vec2,
}

impl Default for Hoop {
    fn default() -> Self {
        Self {
            trigger_size: HOOP_TRIGGER_SIZE,
        }
    }
}

// ============================================================================
// Arena spawning functions (shared between main game and test runner)
// ============================================================================

/// Spawn the arena floor
pub fn spawn_floor(commands: &mut Commands, color: Color) {
    commands.spawn((
        Sprite::from_color(color, Vec2::new(ARENA_WIDTH, 0.4)),
        Transform::from_xyz(0.0, ARENA_FLOOR_Y - 0.2, -0.2),
    ));
}

/// Spawn one hoop and register it with the coordinator
pub fn spawn_hoop(
    commands: &mut Commands,
    coordinator: &mut MatchCoordinator,
    side: HoopSide,
    position: Vec2,
) -> Entity {
    let hoop = Hoop::default();
    let entity = commands
        .spawn((
            Sprite::from_color(HOOP_COLOR, hoop.trigger_size),
            Transform::from_xyz(position.x, position.y, -0.1),
            hoop,
            side,
        ))
        .id();

    coordinator.set_hoop(HoopTarget {
        entity,
        side,
        position,
    });
    entity
}

/// Spawn both hoops at ±HOOP_X
pub fn spawn_hoops(commands: &mut Commands, coordinator: &mut MatchCoordinator) {
    spawn_hoop(commands, coordinator, HoopSide::Left, Vec2::new(-HOOP_X, HOOP_Y));
    spawn_hoop(commands, coordinator, HoopSide::Right, Vec2::new(HOOP_X, HOOP_Y));
}

fn overlaps(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    let diff = (a_center - b_center).abs();
    diff.x < a_half.x + b_half.x && diff.y < a_half.y + b_half.y
}

/// Emit `HoopEntered` on the first frame a ball overlaps a hoop trigger
pub fn detect_hoop_entry(
    mut entered: MessageWriter<HoopEntered>,
    mut balls: Query<(Entity, &Transform, &mut HoopContact), With<Ball>>,
    hoops: Query<(Entity, &Transform, &Hoop), Without<Ball>>,
) {
    let ball_half = BALL_SIZE / 2.0;

    for (ball, ball_transform, mut contact) in &mut balls {
        let ball_pos = ball_transform.translation.truncate();

        let touching = hoops.iter().find_map(|(entity, transform, hoop)| {
            overlaps(
                ball_pos,
                ball_half,
                transform.translation.truncate(),
                hoop.trigger_size / 2.0,
            )
            .then_some(entity)
        });

        if let Some(hoop) = touching
            && contact.0 != Some(hoop)
        {
            entered.write(HoopEntered { ball, hoop });
        }
        contact.0 = touching;
    }
}

/// Tint the hoop currently being attacked
pub fn highlight_active_hoop(
    coordinator: Res<MatchCoordinator>,
    mut hoops: Query<(Entity, &mut Sprite), With<Hoop>>,
) {
    let active = coordinator.active_hoop().map(|hoop| hoop.entity);
    for (entity, mut sprite) in &mut hoops {
        sprite.color = if Some(entity) == active {
            ACTIVE_HOOP_COLOR
        } else {
            HOOP_COLOR
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let half = Vec2::splat(0.25);
        assert!(overlaps(Vec2::ZERO, half, Vec2::new(0.4, 0.0), half));
        assert!(!overlaps(Vec2::ZERO, half, Vec2::new(0.6, 0.0), half));
        assert!(!overlaps(Vec2::ZERO, half, Vec2::new(0.0, -0.5), half));
    }
}
