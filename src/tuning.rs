//! Global gameplay tuning settings loaded from JSON

use bevy::log::{info, warn};
use bevy::prelude::{Resource, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ball::BallConfig;
use crate::constants::*;
use crate::coordinator::ScoringPolicy;
use crate::physics::PhysicsSettings;
use crate::player::MovementConfig;
use crate::shooting::{FrozenRepress, LaunchMode, ShotMeterConfig};

/// Path to global gameplay tuning config
pub const GAMEPLAY_TUNING_FILE: &str = "config/gameplay_tuning.json";

/// Which launch solver the ball uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchModeKind {
    #[default]
    Angle,
    TimeOfFlight,
}

/// Serializable tuning values. Missing fields take their defaults.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayTuning {
    // Movement
    pub move_speed: f32,
    pub velocity_decay_rate: f32,
    // Meter
    pub charge_speed: f32,
    pub meter_min: f32,
    pub meter_max: f32,
    pub display_duration: f32,
    pub yellow_height: f32,
    pub green_height: f32,
    pub window_offset: f32,
    pub frozen_repress: FrozenRepress,
    // Shooting
    pub launch_mode: LaunchModeKind,
    pub launch_angle_deg: f32,
    pub time_of_flight: f32,
    pub ball_offset: [f32; 2],
    pub gravity: f32,
    // Presentation
    pub meter_x_offset: f32,
    // Match
    pub scoring_policy: ScoringPolicy,
}

impl Default for GameplayTuning {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            velocity_decay_rate: VELOCITY_DECAY_RATE,
            charge_speed: CHARGE_SPEED,
            meter_min: METER_MIN,
            meter_max: METER_MAX,
            display_duration: METER_DISPLAY_TIME,
            yellow_height: YELLOW_HEIGHT,
            green_height: GREEN_HEIGHT,
            window_offset: WINDOW_OFFSET,
            frozen_repress: FrozenRepress::Ignore,
            launch_mode: LaunchModeKind::Angle,
            launch_angle_deg: LAUNCH_ANGLE_DEG,
            time_of_flight: TIME_OF_FLIGHT,
            ball_offset: [BALL_OFFSET.x, BALL_OFFSET.y],
            gravity: GRAVITY,
            meter_x_offset: METER_X_OFFSET,
            scoring_policy: ScoringPolicy::FirstActor,
        }
    }
}

/// Why a tuning file was not used
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

impl GameplayTuning {
    /// Reject values the gameplay code cannot work with
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), TuningError> {
        // Comparisons are written so NaN fails them
        if !(self.time_of_flight > 0.0) {
            return Err(TuningError::Invalid(format!(
                "time_of_flight must be positive, got {}",
                self.time_of_flight
            )));
        }
        if !(self.meter_min < self.meter_max) {
            return Err(TuningError::Invalid(format!(
                "meter_min ({}) must be below meter_max ({})",
                self.meter_min, self.meter_max
            )));
        }
        if !(self.gravity > 0.0) {
            return Err(TuningError::Invalid(format!(
                "gravity must be positive, got {}",
                self.gravity
            )));
        }
        let non_negative = [
            ("move_speed", self.move_speed),
            ("velocity_decay_rate", self.velocity_decay_rate),
            ("charge_speed", self.charge_speed),
            ("display_duration", self.display_duration),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, value)| !(*value >= 0.0)) {
            return Err(TuningError::Invalid(format!(
                "{} must not be negative, got {}",
                name, value
            )));
        }
        let finite = [
            ("launch_angle_deg", self.launch_angle_deg),
            ("yellow_height", self.yellow_height),
            ("green_height", self.green_height),
            ("window_offset", self.window_offset),
            ("ball_offset.x", self.ball_offset[0]),
            ("ball_offset.y", self.ball_offset[1]),
            ("meter_x_offset", self.meter_x_offset),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(TuningError::Invalid(format!("{} must be finite, got {}", name, value)));
        }
        Ok(())
    }

    pub fn launch_mode(&self) -> LaunchMode {
        match self.launch_mode {
            LaunchModeKind::Angle => LaunchMode::Angle {
                degrees: self.launch_angle_deg,
            },
            LaunchModeKind::TimeOfFlight => LaunchMode::TimeOfFlight {
                seconds: self.time_of_flight,
            },
        }
    }

    pub fn movement_config(&self) -> MovementConfig {
        MovementConfig {
            move_speed: self.move_speed,
            velocity_decay_rate: self.velocity_decay_rate,
        }
    }

    pub fn meter_config(&self) -> ShotMeterConfig {
        ShotMeterConfig {
            charge_speed: self.charge_speed,
            min_value: self.meter_min,
            max_value: self.meter_max,
            display_duration: self.display_duration,
            yellow_height: self.yellow_height,
            green_height: self.green_height,
            window_offset: self.window_offset,
            frozen_repress: self.frozen_repress,
        }
    }

    pub fn ball_config(&self) -> BallConfig {
        BallConfig {
            offset: Vec2::from_array(self.ball_offset),
            launch_mode: self.launch_mode(),
        }
    }

    pub fn physics_settings(&self) -> PhysicsSettings {
        PhysicsSettings {
            gravity: self.gravity,
        }
    }
}

pub fn load_gameplay_tuning_from_file(path: &str) -> Result<GameplayTuning, TuningError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TuningError::Read {
        path: path.to_string(),
        source,
    })?;
    let tuning: GameplayTuning =
        serde_json::from_str(&contents).map_err(|source| TuningError::Parse {
            path: path.to_string(),
            source,
        })?;
    tuning.validate()?;
    Ok(tuning)
}

/// Replace `tuning` with the global config file. On failure `tuning` is reset to defaults.
pub fn apply_global_tuning(tuning: &mut GameplayTuning) -> Result<(), TuningError> {
    match load_gameplay_tuning_from_file(GAMEPLAY_TUNING_FILE) {
        Ok(loaded) => {
            *tuning = loaded;
            Ok(())
        }
        Err(err) => {
            *tuning = GameplayTuning::default();
            Err(err)
        }
    }
}

/// Load the global tuning, falling back to defaults with a warning
pub fn load_global_tuning() -> GameplayTuning {
    let mut tuning = GameplayTuning::default();
    match apply_global_tuning(&mut tuning) {
        Ok(()) => info!("Loaded gameplay tuning from {}", GAMEPLAY_TUNING_FILE),
        Err(err) => warn!("{}; using defaults", err),
    }
    tuning
}
