//! Player-related components

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Marker for player entities
#[derive(Component)]
pub struct Player;

/// Roster index of a player. Fixed at spawn; negative means not yet assigned.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerIndex(pub i32);

impl PlayerIndex {
    pub const UNASSIGNED: PlayerIndex = PlayerIndex(-1);

    pub fn is_assigned(self) -> bool {
        self.0 >= 0
    }
}

impl Default for PlayerIndex {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl std::fmt::Display for PlayerIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Which team a player belongs to.
/// Left attacks the right hoop, Right attacks the left hoop.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Team {
    Left,
    Right,
}

impl Team {
    pub fn attacks_right(self) -> bool {
        self == Team::Left
    }
}

/// Movement tuning for one actor
#[derive(Component, Debug, Clone, Copy)]
pub struct MovementConfig {
    pub move_speed: f32,
    /// Units/sec removed from the velocity while movement is locked
    pub velocity_decay_rate: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            velocity_decay_rate: VELOCITY_DECAY_RATE,
        }
    }
}

/// Whether releasing a charge launches the ball or only plays the meter
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotRelease {
    #[default]
    Ball,
    /// Meter runs without possession checks and never touches the ball
    Cosmetic,
}

/// Marker for the player driven by keyboard/gamepad
#[derive(Component)]
pub struct HumanControlled;
