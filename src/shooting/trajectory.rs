//! Launch velocity solver for shots
//!
//! Given a start, a target and gravity magnitude, computes the initial velocity
//! that carries a point mass from start to target, either at a fixed launch
//! angle or over a fixed time of flight.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_SIN_TWO_THETA, NEAR_VERTICAL_COS};

/// How the shot velocity is derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LaunchMode {
    /// Fixed elevation angle in degrees (0 = flat, 90 = straight up)
    Angle { degrees: f32 },
    /// Fixed time of flight in seconds (must be > 0)
    TimeOfFlight { seconds: f32 },
}

impl Default for LaunchMode {
    fn default() -> Self {
        Self::Angle {
            degrees: crate::constants::LAUNCH_ANGLE_DEG,
        }
    }
}

/// Solve for the launch velocity that reaches `target` from `start`.
///
/// `gravity` is a magnitude (> 0) pulling along -Y. Angle mode falls back to the
/// symmetric-range formula for near-vertical angles and for targets the angle
/// cannot reach, so the result is always finite for finite inputs.
pub fn solve_launch_velocity(start: Vec2, target: Vec2, gravity: f32, mode: LaunchMode) -> Vec2 {
    let displacement = target - start;
    match mode {
        LaunchMode::TimeOfFlight { seconds } => velocity_for_time(displacement, gravity, seconds),
        LaunchMode::Angle { degrees } => {
            velocity_for_angle(displacement, gravity, degrees.to_radians())
        }
    }
}

/// vx = dx / T, vy = (dy + g T² / 2) / T
fn velocity_for_time(displacement: Vec2, gravity: f32, t: f32) -> Vec2 {
    let vx = displacement.x / t;
    let vy = (displacement.y + 0.5 * gravity * t * t) / t;
    Vec2::new(vx, vy)
}

fn velocity_for_angle(displacement: Vec2, gravity: f32, angle: f32) -> Vec2 {
    // Solve in a frame where the target is to the right, then mirror back
    let direction = if displacement.x < 0.0 { -1.0 } else { 1.0 };
    let x = displacement.x.abs();
    let y = displacement.y;

    let cos_a = angle.cos();
    let tan_a = angle.tan();
    let denominator = 2.0 * cos_a * cos_a * (x * tan_a - y);

    let speed = if denominator <= 0.0 || cos_a.abs() < NEAR_VERTICAL_COS {
        symmetric_range_speed(displacement.length(), gravity, angle)
    } else {
        let speed_sq = gravity * x * x / denominator;
        if speed_sq >= 0.0 && speed_sq.is_finite() {
            speed_sq.sqrt()
        } else {
            symmetric_range_speed(displacement.length(), gravity, angle)
        }
    };

    Vec2::new(direction * speed * cos_a, speed * angle.sin())
}

/// v0 = sqrt(g·d / sin 2θ), with the divisor floored so vertical launches stay finite
fn symmetric_range_speed(distance: f32, gravity: f32, angle: f32) -> f32 {
    let sin_two = (2.0 * angle).sin().abs().max(MIN_SIN_TWO_THETA);
    (gravity * distance / sin_two).sqrt()
}

/// Position of a point mass launched from `start` with `velocity` after `t` seconds
pub fn position_at(start: Vec2, velocity: Vec2, gravity: f32, t: f32) -> Vec2 {
    Vec2::new(
        start.x + velocity.x * t,
        start.y + velocity.y * t - 0.5 * gravity * t * t,
    )
}
