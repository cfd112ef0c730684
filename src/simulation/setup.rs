//! Match setup
//!
//! Entity spawning shared by the windowed game, headless apps and the scenario harness.

use bevy::prelude::*;

use crate::ball::{Ball, HoopContact, Possession};
use crate::constants::*;
use crate::coordinator::MatchCoordinator;
use crate::input::ActorInput;
use crate::physics::{GravityScale, Velocity};
use crate::player::{Player, PlayerIndex, ShotRelease, Team};
use crate::shooting::ShotMeter;
use crate::tuning::GameplayTuning;
use crate::ui::MeterPresentation;
use crate::world::{spawn_floor, spawn_hoops};

/// Everything needed to place one actor
#[derive(Debug, Clone, Copy)]
pub struct ActorSpawn {
    pub index: PlayerIndex,
    pub team: Team,
    pub position: Vec2,
    pub release: ShotRelease,
}

impl ActorSpawn {
    pub fn new(index: i32, team: Team, position: Vec2) -> Self {
        Self {
            index: PlayerIndex(index),
            team,
            position,
            release: ShotRelease::Ball,
        }
    }
}

/// Spawn an actor and register it with the coordinator
pub fn spawn_actor(
    commands: &mut Commands,
    coordinator: &mut MatchCoordinator,
    tuning: &GameplayTuning,
    spawn: ActorSpawn,
) -> Entity {
    let color = match spawn.team {
        Team::Left => LEFT_TEAM_COLOR,
        Team::Right => RIGHT_TEAM_COLOR,
    };
    let meter_config = tuning.meter_config();

    let entity = commands
        .spawn((
            Sprite::from_color(color, PLAYER_SIZE),
            Transform::from_xyz(spawn.position.x, spawn.position.y, 0.0),
            (Player, spawn.index, spawn.team, spawn.release),
            Velocity::default(),
            tuning.movement_config(),
            ShotMeter::new(&meter_config),
            meter_config,
            ActorInput::default(),
            MeterPresentation::default(),
        ))
        .id();

    coordinator.register_actor(spawn.index, entity, spawn.team);
    entity
}

/// Spawn the match ball, optionally already held
pub fn spawn_ball(
    commands: &mut Commands,
    coordinator: &mut MatchCoordinator,
    tuning: &GameplayTuning,
    position: Vec2,
    velocity: Vec2,
    holder: Option<PlayerIndex>,
) -> Entity {
    let (possession, gravity) = match holder {
        Some(index) => (Possession::held_by(index), GravityScale(0.0)),
        None => (Possession::default(), GravityScale::default()),
    };
    let velocity = if holder.is_some() { Vec2::ZERO } else { velocity };

    let entity = commands
        .spawn((
            Sprite::from_color(BALL_COLOR, BALL_SIZE),
            Transform::from_xyz(position.x, position.y, 0.5),
            Ball,
            tuning.ball_config(),
            possession,
            Velocity(velocity),
            gravity,
            HoopContact::default(),
        ))
        .id();

    coordinator.set_ball(entity);
    entity
}

/// Default match: floor, both hoops, one actor per team, P0 starts with the ball
pub fn setup_match(
    mut commands: Commands,
    mut coordinator: ResMut<MatchCoordinator>,
    tuning: Res<GameplayTuning>,
) {
    spawn_floor(&mut commands, FLOOR_COLOR);
    spawn_hoops(&mut commands, &mut coordinator);

    spawn_actor(
        &mut commands,
        &mut coordinator,
        &tuning,
        ActorSpawn::new(0, Team::Left, LEFT_SPAWN),
    );
    spawn_actor(
        &mut commands,
        &mut coordinator,
        &tuning,
        ActorSpawn::new(1, Team::Right, RIGHT_SPAWN),
    );
    spawn_ball(
        &mut commands,
        &mut coordinator,
        &tuning,
        LEFT_SPAWN + BALL_OFFSET,
        Vec2::ZERO,
        Some(PlayerIndex(0)),
    );

    info!(
        "Match ready: {} actors, attacking {:?}",
        coordinator.roster().len(),
        coordinator.active_hoop().map(|hoop| hoop.side)
    );
}
