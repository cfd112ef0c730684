//! Tunable constants for courtside
//!
//! Gameplay defaults live here; `config/gameplay_tuning.json` overrides them at startup.
//! World units are meters, UI units are logical pixels.

use bevy::prelude::*;

// =============================================================================
// COLORS
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::srgb(0.12, 0.11, 0.13);
pub const FLOOR_COLOR: Color = Color::srgb(0.55, 0.36, 0.2);
pub const LEFT_TEAM_COLOR: Color = Color::srgb(0.25, 0.55, 0.9);
pub const RIGHT_TEAM_COLOR: Color = Color::srgb(0.9, 0.35, 0.3);
pub const BALL_COLOR: Color = Color::srgb(0.95, 0.5, 0.1);
pub const HOOP_COLOR: Color = Color::srgb(0.85, 0.85, 0.85);
pub const ACTIVE_HOOP_COLOR: Color = Color::srgb(1.0, 0.85, 0.2);

pub const METER_TRACK_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 0.85);
pub const METER_FILL_COLOR: Color = Color::srgba(0.95, 0.95, 0.95, 0.9);
pub const METER_YELLOW_COLOR: Color = Color::srgba(1.0, 0.85, 0.0, 0.6);
pub const METER_GREEN_COLOR: Color = Color::srgba(0.1, 0.9, 0.2, 0.75);

// =============================================================================
// ARENA
// =============================================================================

pub const ARENA_WIDTH: f32 = 24.0;
pub const ARENA_HEIGHT: f32 = 13.5; // 16:9 with ARENA_WIDTH
pub const ARENA_FLOOR_Y: f32 = -5.5;
pub const HOOP_X: f32 = 10.5; // Hoops sit at ±HOOP_X
pub const HOOP_Y: f32 = 1.5;
pub const HOOP_TRIGGER_SIZE: Vec2 = Vec2::new(0.9, 0.4);

// =============================================================================
// SIZES
// =============================================================================

pub const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.6);
pub const BALL_SIZE: Vec2 = Vec2::new(0.5, 0.5);

// =============================================================================
// PHYSICS
// =============================================================================

pub const GRAVITY: f32 = 9.81; // Magnitude, applied downward
pub const BALL_BOUNCE: f32 = 0.6; // Restitution against floor and walls
pub const FIXED_HZ: f64 = 60.0;

// =============================================================================
// MOVEMENT
// =============================================================================

pub const MOVE_SPEED: f32 = 5.0;
pub const VELOCITY_DECAY_RATE: f32 = 10.0; // Roughly double the move speed
pub const STICK_DEADZONE: f32 = 0.2;

// =============================================================================
// SHOT METER
// =============================================================================

pub const CHARGE_SPEED: f32 = 1.0; // Fill units per second
pub const METER_MIN: f32 = 0.0;
pub const METER_MAX: f32 = 1.0;
pub const METER_DISPLAY_TIME: f32 = 0.5; // Seconds the achieved fill stays visible after release
pub const YELLOW_HEIGHT: f32 = 0.4; // Fraction of track height
pub const GREEN_HEIGHT: f32 = 0.15;
pub const WINDOW_OFFSET: f32 = 0.0; // Fraction of track height, halved and measured from the midpoint

pub const METER_X_OFFSET: f32 = 75.0; // Pixels right of the actor's screen position
pub const METER_WIDTH: f32 = 14.0;
pub const METER_HEIGHT: f32 = 110.0;

// =============================================================================
// SHOOTING
// =============================================================================

pub const LAUNCH_ANGLE_DEG: f32 = 45.0;
pub const TIME_OF_FLIGHT: f32 = 2.0;
pub const BALL_OFFSET: Vec2 = Vec2::new(0.5, 0.0); // Ball position relative to holder
pub const NEAR_VERTICAL_COS: f32 = 0.01; // |cos θ| below this is treated as a vertical launch
pub const MIN_SIN_TWO_THETA: f32 = 0.01; // Floor for the symmetric-range divisor

// =============================================================================
// SPAWNS
// =============================================================================

pub const LEFT_SPAWN: Vec2 = Vec2::new(-4.0, -4.0);
pub const RIGHT_SPAWN: Vec2 = Vec2::new(4.0, -4.0);
