//! Utility functions for courtside

use bevy::prelude::*;

/// Move a vector toward a target by at most `max_delta` in length.
/// Lands exactly on the target instead of overshooting it.
pub fn move_toward_vec2(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let to_target = target - current;
    let distance = to_target.length();
    if distance <= max_delta || distance == 0.0 {
        target
    } else {
        current + to_target / distance * max_delta
    }
}

/// Apply a stick deadzone to a single axis
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() > deadzone { value } else { 0.0 }
}
