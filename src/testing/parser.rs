//! TOML test file parsing

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::coordinator::ScoringPolicy;
use crate::shooting::{FrozenRepress, LaunchMode};

/// Complete test definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Test setup configuration
#[derive(Debug, Deserialize)]
pub struct TestSetup {
    /// Spawn both hoops (false leaves the hoop targets unconfigured)
    #[serde(default = "default_true")]
    pub hoops: bool,
    #[serde(default = "default_true")]
    pub facing_right: bool,
    #[serde(default)]
    pub scoring_policy: ScoringPolicy,
    pub launch_mode: Option<LaunchMode>,
    pub frozen_repress: Option<FrozenRepress>,
    #[serde(default)]
    pub entities: Vec<EntityDef>,
}

fn default_true() -> bool {
    true
}

/// Entity definition for spawning
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum EntityDef {
    #[serde(rename = "player")]
    Player {
        id: String,
        index: i32,
        team: String,
        x: f32,
        y: f32,
        #[serde(default)]
        holding_ball: bool,
        /// Meter-only actor that never touches the ball
        #[serde(default)]
        cosmetic: bool,
    },
    #[serde(rename = "ball")]
    Ball {
        x: f32,
        y: f32,
        #[serde(default)]
        velocity_x: f32,
        #[serde(default)]
        velocity_y: f32,
    },
}

/// Input state at a specific frame
#[derive(Debug, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    #[serde(flatten)]
    pub inputs: HashMap<String, InputSnapshot>,
}

/// Snapshot of input state for one entity
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputSnapshot {
    #[serde(default)]
    pub move_x: Option<f32>,
    #[serde(default)]
    pub move_y: Option<f32>,
    #[serde(default)]
    pub move_left: Option<bool>,
    #[serde(default)]
    pub move_right: Option<bool>,
    /// Charge button held; persists until set again
    #[serde(default)]
    pub charge: Option<bool>,
}

impl InputSnapshot {
    /// Convert to effective move_x value
    pub fn effective_move_x(&self) -> f32 {
        if let Some(x) = self.move_x {
            return x;
        }
        let mut x = 0.0;
        if self.move_left.unwrap_or(false) {
            x -= 1.0;
        }
        if self.move_right.unwrap_or(false) {
            x += 1.0;
        }
        x
    }
}

/// Expected test outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
    /// Event names that must never be captured
    #[serde(default)]
    pub absent: Vec<String>,
}

/// Expected event in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    pub player: Option<String>,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after simulation
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Parse a test file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let toml = r#"
name = "Test"
[setup]
[[setup.entities]]
type = "player"
id = "p0"
index = 0
team = "left"
x = -4.0
y = -4.0
holding_ball = true

[[input]]
frame = 1
p0 = { charge = true }

[expect]
"#;
        let def: TestDefinition = toml::from_str(toml).unwrap();
        assert_eq!(def.name, "Test");
        assert!(def.setup.hoops);
        assert_eq!(def.setup.scoring_policy, ScoringPolicy::FirstActor);
        assert_eq!(def.input[0].inputs["p0"].charge, Some(true));
    }

    #[test]
    fn test_parse_launch_mode_override() {
        let toml = r#"
name = "Timed"
[setup]
hoops = false
launch_mode = { mode = "time_of_flight", seconds = 1.5 }
frozen_repress = "recharge"
[expect]
"#;
        let def: TestDefinition = toml::from_str(toml).unwrap();
        assert!(!def.setup.hoops);
        assert_eq!(
            def.setup.launch_mode,
            Some(LaunchMode::TimeOfFlight { seconds: 1.5 })
        );
        assert_eq!(def.setup.frozen_repress, Some(FrozenRepress::Recharge));
    }
}
