//! Actor controller - movement and shot meter drive

use bevy::prelude::*;

use crate::ball::{Ball, BallConfig, Possession, shoot};
use crate::coordinator::MatchCoordinator;
use crate::events::{EventBus, GameEvent};
use crate::helpers::move_toward_vec2;
use crate::input::ActorInput;
use crate::physics::{BodyMut, GravityScale, PhysicsSettings, Velocity};
use crate::player::components::*;
use crate::shooting::{MeterInput, MeterSignal, ShotMeter, ShotMeterConfig};

/// Velocity for one movement tick.
///
/// Free actors move at `axes * move_speed`. While the meter locks movement the
/// current velocity decays toward zero and never overshoots it.
pub fn movement_velocity(
    current: Vec2,
    axes: Vec2,
    config: &MovementConfig,
    locked: bool,
    dt: f32,
) -> Vec2 {
    if locked {
        move_toward_vec2(current, Vec2::ZERO, config.velocity_decay_rate * dt)
    } else {
        axes * config.move_speed
    }
}

/// Runs in FixedUpdate to turn input into actor velocity
pub fn apply_movement(
    mut players: Query<
        (&PlayerIndex, &ActorInput, &MovementConfig, &ShotMeter, &mut Velocity),
        With<Player>,
    >,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    for (index, input, config, meter, mut velocity) in &mut players {
        if !index.is_assigned() {
            continue;
        }
        velocity.0 = movement_velocity(velocity.0, input.axes, config, meter.locks_movement(), dt);
    }
}

/// Runs in Update: ticks every actor's meter and fires the shot on release.
/// Cosmetic actors only run the meter.
pub fn drive_shot_meters(
    coordinator: Res<MatchCoordinator>,
    physics: Res<PhysicsSettings>,
    mut event_bus: ResMut<EventBus>,
    mut players: Query<
        (
            &PlayerIndex,
            &ActorInput,
            &ShotMeterConfig,
            &ShotRelease,
            &mut ShotMeter,
        ),
        With<Player>,
    >,
    mut balls: Query<
        (
            &mut Possession,
            &BallConfig,
            &mut Transform,
            &mut Velocity,
            &mut GravityScale,
        ),
        (With<Ball>, Without<Player>),
    >,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (index, input, config, release, mut meter) in &mut players {
        if !index.is_assigned() {
            continue;
        }
        let player = *index;

        let mut ball = coordinator.ball().and_then(|entity| balls.get_mut(entity).ok());
        let holds_ball = match release {
            ShotRelease::Cosmetic => true,
            ShotRelease::Ball => ball
                .as_ref()
                .is_some_and(|(possession, ..)| possession.is_holder(player)),
        };

        let meter_input = MeterInput {
            button: input.charge,
            holds_ball,
        };
        let Some(signal) = meter.tick(config, meter_input, dt) else {
            continue;
        };

        match signal {
            MeterSignal::ChargeStarted => {
                event_bus.emit(GameEvent::ChargeStarted { player });
            }
            MeterSignal::Cancelled => {
                event_bus.emit(GameEvent::ChargeCancelled { player });
            }
            MeterSignal::Hidden => {}
            MeterSignal::Release { fill, grade } => {
                if *release == ShotRelease::Cosmetic {
                    event_bus.emit(GameEvent::ShotReleased {
                        player,
                        fill,
                        grade,
                        velocity: None,
                    });
                    continue;
                }
                let Some((mut possession, ball_config, mut transform, mut velocity, mut gravity)) =
                    ball.take()
                else {
                    continue;
                };

                let target = coordinator.active_hoop().map(|hoop| hoop.position);
                let mut body = BodyMut::new(&mut transform, &mut velocity, &mut gravity);
                match shoot(
                    &mut possession,
                    &mut body,
                    target,
                    physics.gravity,
                    ball_config.launch_mode,
                ) {
                    Ok(launch) => {
                        debug!("{} shot: fill {:.2} ({:?}), velocity {:?}", player, fill, grade, launch);
                        event_bus.emit(GameEvent::ShotReleased {
                            player,
                            fill,
                            grade,
                            velocity: Some(launch),
                        });
                    }
                    Err(err) => {
                        warn!("{} released a shot: {}", player, err);
                        event_bus.emit(GameEvent::ShotAborted { player });
                    }
                }
            }
        }
    }
}
