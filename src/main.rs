//! Courtside - arcade basketball built with Bevy
//!
//! Main entry point: window, camera, human input and the meter overlay.

use bevy::{camera::ScalingMode, prelude::*};
use courtside::{
    Ball, EventBus, GameEvent, GameplayPlugin, GravityScale, HumanControlled, MatchCoordinator,
    Player, PlayerIndex, Possession, Velocity, constants::*, coordinator, events, input,
    physics::BodyMut, player, setup_match, tuning::load_global_tuning, ui, world,
};

fn main() {
    let tuning = load_global_tuning();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                resolution: bevy::window::WindowResolution::new(1280, 720).with_scale_factor_override(1.0),
                title: "Courtside".into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(GameplayPlugin { tuning })
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
        .add_systems(Startup, (setup_match, setup_view).chain())
        .add_systems(
            Update,
            (
                input::capture_input.before(player::drive_shot_meters),
                debug_keys.before(player::drive_shot_meters),
                world::highlight_active_hoop.after(coordinator::refresh_active_hoop),
                ui::sync_meter_ui.after(ui::update_meter_presentation),
                events::log_bus_events.after(ui::update_meter_presentation),
            ),
        )
        .run();
}

/// Camera, human control of P0 and one meter widget per actor
fn setup_view(mut commands: Commands, players: Query<(Entity, &PlayerIndex), With<Player>>) {
    // FixedVertical keeps the full arena height visible regardless of window size
    commands.spawn((
        Camera2d,
        Transform::from_xyz(0.0, 0.0, 0.0),
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: ARENA_HEIGHT,
            },
            ..OrthographicProjection::default_2d()
        }),
    ));

    for (entity, index) in &players {
        if *index == PlayerIndex(0) {
            commands.entity(entity).insert(HumanControlled);
        }
        ui::spawn_meter_ui(&mut commands, entity);
    }
}

/// R hands the ball back to P0, Tab flips which hoop is attacked
fn debug_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut coordinator: ResMut<MatchCoordinator>,
    mut event_bus: ResMut<EventBus>,
    mut balls: Query<(&mut Possession, &mut Transform, &mut Velocity, &mut GravityScale), With<Ball>>,
) {
    if keyboard.just_pressed(KeyCode::Tab) {
        let facing_right = !coordinator.facing_right;
        coordinator.set_facing_right(facing_right);
        info!("Attacking {:?}", coordinator.active_hoop().map(|hoop| hoop.side));
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        let player = PlayerIndex(0);
        if coordinator.get_actor_by_index(player).is_none() {
            return;
        }
        let Some(Ok((mut possession, mut transform, mut velocity, mut gravity))) =
            coordinator.ball().map(|entity| balls.get_mut(entity))
        else {
            return;
        };
        let mut body = BodyMut::new(&mut transform, &mut velocity, &mut gravity);
        possession.grant(player, &mut body);
        event_bus.emit(GameEvent::PossessionGranted { player });
        info!("Ball reset to {}", player);
    }
}
