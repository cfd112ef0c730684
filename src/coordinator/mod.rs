//! Match coordinator - roster, hoop targets, active hoop and possession resets

mod scoring;

pub use scoring::*;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ball::Possession;
use crate::physics::RigidBody2d;
use crate::player::{PlayerIndex, Team};

/// Which side of the court a hoop is on
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoopSide {
    Left,
    Right,
}

impl HoopSide {
    /// Team defending this hoop
    pub fn defending_team(self) -> Team {
        match self {
            HoopSide::Left => Team::Left,
            HoopSide::Right => Team::Right,
        }
    }
}

/// A hoop the ball can be shot at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoopTarget {
    pub entity: Entity,
    pub side: HoopSide,
    pub position: Vec2,
}

/// Registered actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterEntry {
    pub index: PlayerIndex,
    pub entity: Entity,
    pub team: Team,
}

/// Who gets the ball after a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Always the actor registered first
    #[default]
    FirstActor,
    /// The lowest-index actor of the team defending the scored hoop
    DefendingTeam,
}

/// Match-wide registry. Inserted as a resource and handed to systems as a parameter.
#[derive(Resource, Debug, Default)]
pub struct MatchCoordinator {
    roster: Vec<RosterEntry>,
    ball: Option<Entity>,
    left_hoop: Option<HoopTarget>,
    right_hoop: Option<HoopTarget>,
    active_hoop: Option<HoopTarget>,
    pub facing_right: bool,
    pub scoring_policy: ScoringPolicy,
}

impl MatchCoordinator {
    pub fn new(scoring_policy: ScoringPolicy) -> Self {
        Self {
            facing_right: true,
            scoring_policy,
            ..default()
        }
    }

    /// Add an actor to the roster. Unassigned indices are rejected.
    pub fn register_actor(&mut self, index: PlayerIndex, entity: Entity, team: Team) -> bool {
        if !index.is_assigned() || self.get_actor_by_index(index).is_some() {
            warn!("Refusing to register actor {} twice or unassigned", index);
            return false;
        }
        self.roster.push(RosterEntry { index, entity, team });
        true
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    /// Linear scan; rosters are two to four players
    pub fn get_actor_by_index(&self, index: PlayerIndex) -> Option<&RosterEntry> {
        self.roster.iter().find(|entry| entry.index == index)
    }

    pub fn set_ball(&mut self, ball: Entity) {
        self.ball = Some(ball);
    }

    pub fn ball(&self) -> Option<Entity> {
        self.ball
    }

    pub fn set_hoop(&mut self, hoop: HoopTarget) {
        match hoop.side {
            HoopSide::Left => self.left_hoop = Some(hoop),
            HoopSide::Right => self.right_hoop = Some(hoop),
        }
        self.refresh_active_hoop();
    }

    pub fn clear_hoops(&mut self) {
        self.left_hoop = None;
        self.right_hoop = None;
        self.active_hoop = None;
    }

    pub fn set_facing_right(&mut self, facing_right: bool) {
        self.facing_right = facing_right;
        self.refresh_active_hoop();
    }

    /// Right hoop when facing right, otherwise left
    pub fn refresh_active_hoop(&mut self) {
        self.active_hoop = if self.facing_right {
            self.right_hoop
        } else {
            self.left_hoop
        };
    }

    pub fn active_hoop(&self) -> Option<HoopTarget> {
        self.active_hoop
    }

    /// Actor who receives the ball after a score on the active hoop
    pub fn score_recipient(&self) -> Option<RosterEntry> {
        let first = self.roster.first().copied();
        match self.scoring_policy {
            ScoringPolicy::FirstActor => first,
            ScoringPolicy::DefendingTeam => {
                let Some(hoop) = self.active_hoop else {
                    return first;
                };
                let defenders = hoop.side.defending_team();
                self.roster
                    .iter()
                    .filter(|entry| entry.team == defenders)
                    .min_by_key(|entry| entry.index)
                    .copied()
                    .or(first)
            }
        }
    }

    /// Hand the ball to the score recipient. Returns who received it.
    pub fn on_score(
        &mut self,
        possession: &mut Possession,
        body: &mut impl RigidBody2d,
    ) -> Option<PlayerIndex> {
        let recipient = self.score_recipient()?;
        possession.grant(recipient.index, body);
        if self.scoring_policy == ScoringPolicy::DefendingTeam {
            self.set_facing_right(recipient.team.attacks_right());
        }
        Some(recipient.index)
    }
}

/// Recompute the active hoop from the facing flag every frame
pub fn refresh_active_hoop(mut coordinator: ResMut<MatchCoordinator>) {
    coordinator.refresh_active_hoop();
}
