//! Test execution engine

use bevy::prelude::*;
use std::collections::HashMap;

use crate::ball::{Ball, Possession};
use crate::constants::*;
use crate::coordinator::MatchCoordinator;
use crate::events::EventBus;
use crate::input::ActorInput;
use crate::physics::Velocity;
use crate::player::{PlayerIndex, ShotRelease, Team, drive_shot_meters};
use crate::shooting::{LaunchMode, ShotMeter};
use crate::simulation::{ActorSpawn, HeadlessAppBuilder, spawn_actor, spawn_ball};
use crate::tuning::{GameplayTuning, LaunchModeKind};
use crate::ui::update_meter_presentation;
use crate::world::{spawn_floor, spawn_hoops};

use super::assertions::{
    AssertionError, BallState, CapturedEvent, EntityState, WorldState, check_absent,
    check_sequence, check_state,
};
use super::input::{ScriptedInputs, TestEntityId};
use super::parser::{EntityDef, TestDefinition, TestSetup};

/// Result of running a test
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

/// Resource to track test state
#[derive(Resource, Default)]
struct TestControl {
    /// Frame currently being simulated
    current_frame: u64,
}

/// Resource to capture events during test
#[derive(Resource, Default)]
struct EventCapture {
    events: Vec<CapturedEvent>,
    /// Roster index -> test id
    ids: HashMap<PlayerIndex, String>,
}

/// Tuning for a test: defaults plus the setup overrides
fn test_tuning(setup: &TestSetup) -> GameplayTuning {
    let mut tuning = GameplayTuning {
        scoring_policy: setup.scoring_policy,
        ..default()
    };
    match setup.launch_mode {
        Some(LaunchMode::Angle { degrees }) => {
            tuning.launch_mode = LaunchModeKind::Angle;
            tuning.launch_angle_deg = degrees;
        }
        Some(LaunchMode::TimeOfFlight { seconds }) => {
            tuning.launch_mode = LaunchModeKind::TimeOfFlight;
            tuning.time_of_flight = seconds;
        }
        None => {}
    }
    if let Some(frozen_repress) = setup.frozen_repress {
        tuning.frozen_repress = frozen_repress;
    }
    tuning
}

/// Run a single test and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    let tuning = test_tuning(&test.setup);
    if let Err(err) = tuning.validate() {
        return TestResult::Error {
            message: err.to_string(),
        };
    }

    // Create scripted inputs
    let mut scripted_inputs = ScriptedInputs::from_inputs(&test.input);

    // Run until the last state assertion
    for state in &test.expect.state {
        scripted_inputs.set_max_frame(state.after_frame);
    }

    // Ensure we run at least some frames
    if scripted_inputs.max_frame == 0 {
        scripted_inputs.max_frame = 60; // Default 1 second
    }
    let max_frame = scripted_inputs.max_frame;

    let mut app = HeadlessAppBuilder::new().with_tuning(tuning).build();

    app.insert_resource(scripted_inputs);
    app.init_resource::<TestControl>();
    app.init_resource::<EventCapture>();

    // Startup
    let entities = test.setup.entities.clone();
    let hoops = test.setup.hoops;
    let facing_right = test.setup.facing_right;
    app.add_systems(
        Startup,
        move |mut commands: Commands,
              mut coordinator: ResMut<MatchCoordinator>,
              tuning: Res<GameplayTuning>,
              mut capture: ResMut<EventCapture>| {
            if hoops {
                spawn_hoops(&mut commands, &mut coordinator);
            }
            coordinator.set_facing_right(facing_right);
            test_setup(&mut commands, &mut coordinator, &tuning, &entities, &mut capture);
        },
    );

    app.add_systems(Update, input_injection.before(drive_shot_meters));
    app.add_systems(Update, event_capture.after(update_meter_presentation));

    // Sorted, deduplicated assertion frames
    let mut state_check_frames: Vec<u64> = test.expect.state.iter().map(|s| s.after_frame).collect();
    state_check_frames.sort();
    state_check_frames.dedup();
    let mut next_state_check = 0;

    loop {
        app.update();
        let frame = app.world().resource::<TestControl>().current_frame;

        while next_state_check < state_check_frames.len() && state_check_frames[next_state_check] <= frame {
            let check_frame = state_check_frames[next_state_check];
            let world_state = extract_world_state(app.world_mut());
            for assertion in test.expect.state.iter().filter(|a| a.after_frame == check_frame) {
                if let Err(error) = check_state(assertion, &world_state) {
                    return TestResult::Fail {
                        error: AssertionError {
                            message: format!("[frame {}] {}", frame, error.message),
                            ..error
                        },
                    };
                }
            }
            next_state_check += 1;
        }

        if frame >= max_frame {
            break;
        }
    }

    let captured = &app.world().resource::<EventCapture>().events;
    if let Err(error) = check_sequence(&test.expect.sequence, captured) {
        return TestResult::Fail { error };
    }
    if let Err(error) = check_absent(&test.expect.absent, captured) {
        return TestResult::Fail { error };
    }

    TestResult::Pass { frames: max_frame }
}

/// Spawn the entities a test asks for
fn test_setup(
    commands: &mut Commands,
    coordinator: &mut MatchCoordinator,
    tuning: &GameplayTuning,
    entities: &[EntityDef],
    capture: &mut EventCapture,
) {
    spawn_floor(commands, FLOOR_COLOR);

    let mut ball_holder: Option<(PlayerIndex, Vec2)> = None;

    for entity_def in entities {
        match entity_def {
            EntityDef::Player {
                id,
                index,
                team,
                x,
                y,
                holding_ball,
                cosmetic,
            } => {
                let team = if team == "left" { Team::Left } else { Team::Right };
                let position = Vec2::new(*x, *y);
                let spawn = ActorSpawn {
                    release: if *cosmetic {
                        ShotRelease::Cosmetic
                    } else {
                        ShotRelease::Ball
                    },
                    ..ActorSpawn::new(*index, team, position)
                };

                let entity = spawn_actor(commands, coordinator, tuning, spawn);
                commands.entity(entity).insert(TestEntityId(id.clone()));
                capture.ids.insert(spawn.index, id.clone());

                if *holding_ball {
                    ball_holder = Some((spawn.index, position));
                }
            }
            EntityDef::Ball {
                x,
                y,
                velocity_x,
                velocity_y,
            } => {
                spawn_ball(
                    commands,
                    coordinator,
                    tuning,
                    Vec2::new(*x, *y),
                    Vec2::new(*velocity_x, *velocity_y),
                    None,
                );
            }
        }
    }

    // If a player should hold the ball, spawn it attached
    if let Some((holder, position)) = ball_holder {
        spawn_ball(
            commands,
            coordinator,
            tuning,
            position + tuning.ball_config().offset,
            Vec2::ZERO,
            Some(holder),
        );
    }
}

/// System to inject scripted inputs
fn input_injection(
    mut scripted: ResMut<ScriptedInputs>,
    mut control: ResMut<TestControl>,
    mut players: Query<(&TestEntityId, &mut ActorInput)>,
) {
    control.current_frame = scripted.current_frame;
    let frame_inputs = scripted.advance_frame();

    for (test_id, mut input) in &mut players {
        let state = frame_inputs.get(&test_id.0).copied().unwrap_or_default();
        input.axes = state.axes;
        input.charge = input.charge.advance(state.charge_held);
    }
}

/// System to move this frame's bus events into the capture log
fn event_capture(control: Res<TestControl>, mut bus: ResMut<EventBus>, mut capture: ResMut<EventCapture>) {
    let frame = control.current_frame;
    let captured: Vec<CapturedEvent> = bus
        .drain()
        .iter()
        .map(|bus_event| CapturedEvent::from_game_event(frame, &bus_event.event, &capture.ids))
        .collect();
    capture.events.extend(captured);
}

/// Extract world state for assertions
fn extract_world_state(world: &mut World) -> WorldState {
    let ids = world.resource::<EventCapture>().ids.clone();
    let name_of = |index: PlayerIndex| ids.get(&index).cloned().unwrap_or_else(|| index.to_string());

    let mut ball_query = world.query_filtered::<(&Transform, &Velocity, &Possession), With<Ball>>();
    let mut holder = None;
    let ball = ball_query.iter(world).next().map(|(transform, velocity, possession)| {
        holder = possession.holder();
        BallState {
            x: transform.translation.x,
            y: transform.translation.y,
            velocity_x: velocity.0.x,
            velocity_y: velocity.0.y,
            holder: possession.holder().map(name_of).unwrap_or_else(|| "none".to_string()),
        }
    });

    let mut entities = HashMap::new();
    let mut player_query = world.query::<(&TestEntityId, &PlayerIndex, &Transform, &Velocity, &ShotMeter)>();
    for (test_id, index, transform, velocity, meter) in player_query.iter(world) {
        entities.insert(
            test_id.0.clone(),
            EntityState {
                x: transform.translation.x,
                y: transform.translation.y,
                velocity_x: velocity.0.x,
                velocity_y: velocity.0.y,
                holding_ball: holder == Some(*index),
                meter: format!("{:?}", meter.state),
                fill: meter.fill,
                meter_visible: meter.visible,
            },
        );
    }

    let active_hoop = world
        .resource::<MatchCoordinator>()
        .active_hoop()
        .map(|hoop| format!("{:?}", hoop.side).to_lowercase())
        .unwrap_or_else(|| "none".to_string());

    WorldState {
        entities,
        ball,
        active_hoop,
    }
}
