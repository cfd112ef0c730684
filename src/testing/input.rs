//! Scripted input injection for tests

use bevy::prelude::*;
use std::collections::HashMap;

use super::parser::{FrameInput, InputSnapshot};

/// Component to track test entity IDs
#[derive(Component, Debug, Clone)]
pub struct TestEntityId(pub String);

/// Resource holding scripted inputs for a test
#[derive(Resource, Default)]
pub struct ScriptedInputs {
    /// Map of frame -> (entity_id -> input_snapshot)
    pub frames: HashMap<u64, HashMap<String, InputSnapshot>>,
    /// Current input state per entity (persists between frames)
    pub current_state: HashMap<String, CurrentInputState>,
    /// Current frame number
    pub current_frame: u64,
    /// Maximum frame to run
    pub max_frame: u64,
}

/// Current input state for an entity (with persistence)
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentInputState {
    pub axes: Vec2,
    pub charge_held: bool,
}

impl ScriptedInputs {
    /// Create from parsed frame inputs
    pub fn from_inputs(inputs: &[FrameInput]) -> Self {
        let mut frames: HashMap<u64, HashMap<String, InputSnapshot>> = HashMap::new();
        let mut max_frame = 0u64;

        for fi in inputs {
            max_frame = max_frame.max(fi.frame);
            frames.insert(fi.frame, fi.inputs.clone());
        }

        Self {
            frames,
            current_state: HashMap::new(),
            current_frame: 0,
            max_frame,
        }
    }

    /// Set max frame (for state assertions)
    pub fn set_max_frame(&mut self, frame: u64) {
        self.max_frame = self.max_frame.max(frame);
    }

    /// Apply this frame's inputs, advance to the next frame and return the state per entity
    pub fn advance_frame(&mut self) -> HashMap<String, CurrentInputState> {
        if let Some(frame_inputs) = self.frames.get(&self.current_frame) {
            for (entity_id, snapshot) in frame_inputs {
                let state = self.current_state.entry(entity_id.clone()).or_default();

                // Movement is restated by every entry; the charge button persists
                state.axes = Vec2::new(snapshot.effective_move_x(), snapshot.move_y.unwrap_or(0.0));
                if let Some(charge) = snapshot.charge {
                    state.charge_held = charge;
                }
            }
        }

        self.current_frame += 1;
        self.current_state.clone()
    }

    /// Check if simulation should continue
    pub fn should_continue(&self) -> bool {
        self.current_frame <= self.max_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(frame: u64, id: &str, snapshot: InputSnapshot) -> FrameInput {
        FrameInput {
            frame,
            inputs: HashMap::from([(id.to_string(), snapshot)]),
        }
    }

    #[test]
    fn test_charge_persists_between_frames() {
        let mut scripted = ScriptedInputs::from_inputs(&[
            frame(
                1,
                "p0",
                InputSnapshot {
                    charge: Some(true),
                    move_x: Some(1.0),
                    ..default()
                },
            ),
            frame(
                3,
                "p0",
                InputSnapshot {
                    charge: Some(false),
                    ..default()
                },
            ),
        ]);
        assert_eq!(scripted.max_frame, 3);

        let f0 = scripted.advance_frame();
        assert!(!f0.contains_key("p0"));

        let f1 = scripted.advance_frame();
        assert!(f1["p0"].charge_held);
        assert_eq!(f1["p0"].axes, Vec2::X);

        let f2 = scripted.advance_frame();
        assert!(f2["p0"].charge_held);

        let f3 = scripted.advance_frame();
        assert!(!f3["p0"].charge_held);
        assert_eq!(f3["p0"].axes, Vec2::ZERO);
        assert!(!scripted.should_continue());
    }
}
