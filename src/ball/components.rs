//! Ball-related components

use bevy::prelude::*;

use crate::constants::BALL_OFFSET;
use crate::shooting::LaunchMode;

/// Marker for ball entities
#[derive(Component)]
pub struct Ball;

/// Per-ball shot settings
#[derive(Component, Debug, Clone, Copy)]
pub struct BallConfig {
    /// Ball position relative to its holder
    pub offset: Vec2,
    pub launch_mode: LaunchMode,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            offset: BALL_OFFSET,
            launch_mode: LaunchMode::default(),
        }
    }
}

/// Hoop trigger the ball is currently overlapping, for enter-edge detection
#[derive(Component, Default, Debug)]
pub struct HoopContact(pub Option<Entity>);
