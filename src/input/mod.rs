//! Input module - per-actor input samples and the capture_input system

use bevy::prelude::*;

use crate::constants::*;
use crate::helpers::apply_deadzone;
use crate::player::HumanControlled;

/// One frame of a binary button with its edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSample {
    pub held: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

impl ButtonSample {
    /// Derive this frame's edges from the previous sample and the current held state
    pub fn advance(self, held_now: bool) -> Self {
        Self {
            held: held_now,
            just_pressed: held_now && !self.held,
            just_released: !held_now && self.held,
        }
    }
}

/// Input driving one actor, sampled once per frame.
/// Human input is captured here; scripted tests write it directly.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ActorInput {
    /// Movement axes, each roughly in [-1, 1]
    pub axes: Vec2,
    /// Shot charge button
    pub charge: ButtonSample,
}

/// Runs in Update to sample keyboard and gamepads into the human actor's input
pub fn capture_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut actors: Query<&mut ActorInput, With<HumanControlled>>,
) {
    let mut move_x = 0.0;
    let mut move_y = 0.0;

    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        move_x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        move_x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        move_y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        move_y += 1.0;
    }

    for gamepad in &gamepads {
        if let Some(stick_x) = gamepad.get(GamepadAxis::LeftStickX) {
            move_x += apply_deadzone(stick_x, STICK_DEADZONE);
        }
        if let Some(stick_y) = gamepad.get(GamepadAxis::LeftStickY) {
            move_y += apply_deadzone(stick_y, STICK_DEADZONE);
        }
    }

    let charge_held = keyboard.pressed(KeyCode::Space)
        || gamepads
            .iter()
            .any(|gp| gp.pressed(GamepadButton::RightTrigger) || gp.pressed(GamepadButton::South));

    for mut input in &mut actors {
        input.axes = Vec2::new(move_x.clamp(-1.0, 1.0), move_y.clamp(-1.0, 1.0));
        input.charge = input.charge.advance(charge_held);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_edges() {
        let idle = ButtonSample::default();
        let pressed = idle.advance(true);
        assert!(pressed.held && pressed.just_pressed && !pressed.just_released);

        let holding = pressed.advance(true);
        assert!(holding.held && !holding.just_pressed);

        let released = holding.advance(false);
        assert!(!released.held && released.just_released);

        let after = released.advance(false);
        assert_eq!(after, ButtonSample::default());
    }
}
