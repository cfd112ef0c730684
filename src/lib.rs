//! Courtside - arcade basketball gameplay core built with Bevy
//!
//! Movement, ball possession, a timing-based shot meter and a projectile
//! shot solver, wired together by a match coordinator.

// Core modules
pub mod constants;
pub mod events;
pub mod helpers;
pub mod physics;
pub mod simulation;
pub mod testing;
pub mod tuning;

// Game logic modules
pub mod ball;
pub mod coordinator;
pub mod input;
pub mod player;
pub mod shooting;
pub mod ui;
pub mod world;

use bevy::prelude::*;

// Re-export commonly used types for convenience
pub use ball::{Ball, BallConfig, HoopContact, Possession, ShotError, shoot};
pub use constants::*;
pub use coordinator::{
    HoopEntered, HoopSide, HoopTarget, MatchCoordinator, RosterEntry, ScoringPolicy,
};
pub use events::{BusEvent, EventBus, GameEvent};
pub use input::{ActorInput, ButtonSample};
pub use physics::{
    BodyMut, GravityScale, PhysicsSettings, PointBody, RigidBody2d, Velocity,
};
pub use player::{
    HumanControlled, MovementConfig, Player, PlayerIndex, ShotRelease, Team, movement_velocity,
};
pub use shooting::{
    AccuracyWindow, AccuracyWindows, FrozenRepress, LaunchMode, MeterSignal, MeterState,
    ShotGrade, ShotMeter, ShotMeterConfig, solve_launch_velocity,
};
pub use simulation::{ActorSpawn, HeadlessAppBuilder, setup_match, spawn_actor, spawn_ball};
pub use tuning::{GameplayTuning, TuningError};
pub use ui::{MeterPresentation, ScreenProjection};

/// Registers gameplay resources, messages and systems.
///
/// Input capture is left to the caller: the windowed game adds
/// `input::capture_input`, the scenario harness injects scripted input.
/// Either must run before `player::drive_shot_meters`.
#[derive(Default)]
pub struct GameplayPlugin {
    pub tuning: GameplayTuning,
}

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.tuning.clone())
            .insert_resource(self.tuning.physics_settings())
            .insert_resource(MatchCoordinator::new(self.tuning.scoring_policy))
            .insert_resource(EventBus::new())
            .add_message::<HoopEntered>()
            .add_systems(
                FixedUpdate,
                (
                    player::apply_movement,
                    physics::apply_gravity,
                    physics::apply_velocity,
                    physics::ball_arena_bounds,
                    physics::clamp_players_to_arena,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    events::update_event_bus_time,
                    player::drive_shot_meters,
                    ball::ball_follow_holder,
                    world::detect_hoop_entry,
                    coordinator::handle_hoop_entries,
                    coordinator::refresh_active_hoop,
                    ui::update_meter_presentation,
                )
                    .chain(),
            );
    }
}
