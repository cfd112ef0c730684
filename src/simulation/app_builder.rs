//! Headless App Builder
//!
//! Builds windowless Bevy apps with a fixed, manually advanced clock, so every
//! `app.update()` is exactly one 60 Hz frame. Used by tests and the scenario harness.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::GameplayPlugin;
use crate::tuning::GameplayTuning;

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    tuning: GameplayTuning,
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAppBuilder {
    /// Create a new builder with default tuning
    pub fn new() -> Self {
        Self {
            tuning: GameplayTuning::default(),
        }
    }

    /// Use the given tuning instead of the defaults
    pub fn with_tuning(mut self, tuning: GameplayTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Build the app with minimal plugins and the gameplay plugin
    ///
    /// Callers add their own Startup systems (usually `setup_match`) and
    /// an input source running before `player::drive_shot_meters`.
    pub fn build(self) -> App {
        let frame = Duration::from_secs_f64(1.0 / crate::constants::FIXED_HZ);
        let mut app = App::new();
        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame)));

        // Transform plugin for GlobalTransform propagation
        app.add_plugins(bevy::transform::TransformPlugin);

        // One fixed step per update
        app.insert_resource(TimeUpdateStrategy::ManualDuration(frame));
        app.insert_resource(Time::<Fixed>::from_duration(frame));

        app.add_plugins(GameplayPlugin {
            tuning: self.tuning,
        });

        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::Possession;
    use crate::coordinator::MatchCoordinator;
    use crate::events::{EventBus, GameEvent};
    use crate::input::ActorInput;
    use crate::physics::{PhysicsSettings, Velocity};
    use crate::player::{PlayerIndex, Team};
    use crate::shooting::{MeterState, ShotMeter};
    use crate::simulation::setup_match;

    fn match_app() -> App {
        let mut app = HeadlessAppBuilder::new().build();
        app.add_systems(Startup, setup_match);
        app.update();
        app
    }

    fn actor(app: &App, index: i32) -> Entity {
        app.world()
            .resource::<MatchCoordinator>()
            .get_actor_by_index(PlayerIndex(index))
            .map(|entry| entry.entity)
            .unwrap()
    }

    fn ball(app: &App) -> Entity {
        app.world().resource::<MatchCoordinator>().ball().unwrap()
    }

    fn set_charge(app: &mut App, player: Entity, held: bool) {
        let mut input = app.world_mut().get_mut::<ActorInput>(player).unwrap();
        input.charge = input.charge.advance(held);
    }

    fn set_axes(app: &mut App, player: Entity, axes: Vec2) {
        app.world_mut().get_mut::<ActorInput>(player).unwrap().axes = axes;
    }

    #[test]
    fn test_builder_creates_app() {
        let app = HeadlessAppBuilder::new().build();
        assert!(app.world().contains_resource::<MatchCoordinator>());
        assert!(app.world().contains_resource::<EventBus>());
        assert!(app.world().contains_resource::<PhysicsSettings>());
    }

    #[test]
    fn test_fixed_step_is_one_frame() {
        let app = HeadlessAppBuilder::new().build();
        let step = app.world().resource::<Time<Fixed>>().timestep();
        assert!((step.as_secs_f64() - 1.0 / crate::constants::FIXED_HZ).abs() < 1e-9);
    }

    #[test]
    fn test_setup_registers_roster() {
        let app = match_app();
        let coordinator = app.world().resource::<MatchCoordinator>();
        assert_eq!(coordinator.roster().len(), 2);
        assert_eq!(coordinator.roster()[1].team, Team::Right);
        assert!(coordinator.active_hoop().is_some());

        let possession = app.world().get::<Possession>(ball(&app)).unwrap();
        assert!(possession.is_holder(PlayerIndex(0)));
    }

    #[test]
    fn test_charge_and_release_launches_ball() {
        let mut app = match_app();
        let p0 = actor(&app, 0);

        for _ in 0..20 {
            set_charge(&mut app, p0, true);
            app.update();
        }
        assert_eq!(app.world().get::<ShotMeter>(p0).unwrap().state, MeterState::Charging);

        set_charge(&mut app, p0, false);
        app.update();

        let meter = app.world().get::<ShotMeter>(p0).unwrap();
        assert_eq!(meter.state, MeterState::Frozen);
        assert!(meter.fill > 0.2);

        let ball = ball(&app);
        assert_eq!(app.world().get::<Possession>(ball).unwrap().holder(), None);
        let velocity = app.world().get::<Velocity>(ball).unwrap().0;
        assert!(velocity.x > 0.0 && velocity.y > 0.0);

        let bus = app.world().resource::<EventBus>();
        assert!(bus.peek().iter().any(|e| matches!(
            e.event,
            GameEvent::ShotReleased {
                player: PlayerIndex(0),
                velocity: Some(_),
                ..
            }
        )));
    }

    #[test]
    fn test_release_without_hoop_keeps_ball() {
        let mut app = match_app();
        app.world_mut().resource_mut::<MatchCoordinator>().clear_hoops();
        let p0 = actor(&app, 0);

        for _ in 0..10 {
            set_charge(&mut app, p0, true);
            app.update();
        }
        set_charge(&mut app, p0, false);
        app.update();

        assert_eq!(app.world().get::<ShotMeter>(p0).unwrap().state, MeterState::Frozen);
        let possession = app.world().get::<Possession>(ball(&app)).unwrap();
        assert!(possession.is_holder(PlayerIndex(0)));

        let bus = app.world().resource::<EventBus>();
        assert!(bus
            .peek()
            .iter()
            .any(|e| e.event == GameEvent::ShotAborted { player: PlayerIndex(0) }));
    }

    #[test]
    fn test_movement_locked_while_charging() {
        let mut app = match_app();
        let p0 = actor(&app, 0);

        set_axes(&mut app, p0, Vec2::X);
        app.update();
        assert!((app.world().get::<Velocity>(p0).unwrap().0.x - 5.0).abs() < 1e-4);

        for _ in 0..3 {
            set_charge(&mut app, p0, true);
            app.update();
        }
        let speed = app.world().get::<Velocity>(p0).unwrap().0.x;
        assert!(speed < 5.0 && speed >= 0.0);
    }

    #[test]
    fn test_non_holder_cannot_charge() {
        let mut app = match_app();
        let p1 = actor(&app, 1);

        for _ in 0..5 {
            set_charge(&mut app, p1, true);
            app.update();
        }
        assert_eq!(app.world().get::<ShotMeter>(p1).unwrap().state, MeterState::Idle);
        assert!(!app.world().get::<ShotMeter>(p1).unwrap().visible);
    }
}
