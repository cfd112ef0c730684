//! Ball possession and the shoot operation

use bevy::prelude::*;
use thiserror::Error;

use crate::physics::RigidBody2d;
use crate::player::PlayerIndex;
use crate::shooting::{LaunchMode, solve_launch_velocity};

/// Who holds the ball. Lives on the ball entity; at most one owner at a time.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Possession {
    owner: Option<PlayerIndex>,
}

impl Possession {
    pub fn held_by(index: PlayerIndex) -> Self {
        Self { owner: Some(index) }
    }

    pub fn holder(&self) -> Option<PlayerIndex> {
        self.owner
    }

    pub fn is_holder(&self, index: PlayerIndex) -> bool {
        self.owner == Some(index)
    }

    /// Give the ball to `index`. The ball stops and rides with its holder.
    pub fn grant(&mut self, index: PlayerIndex, body: &mut impl RigidBody2d) {
        self.owner = Some(index);
        body.set_velocity(Vec2::ZERO);
        body.set_gravity_scale(0.0);
    }

    /// Free the ball under full gravity. Velocity is left to the caller.
    pub fn release(&mut self, body: &mut impl RigidBody2d) {
        self.owner = None;
        body.set_gravity_scale(1.0);
    }
}

/// Why a shot could not be taken
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ShotError {
    #[error("hoop target is not set, cannot shoot")]
    NoTarget,
}

/// Launch the ball at `target`.
///
/// Release and velocity write happen together, so nothing can pick the ball up
/// in between. With no target nothing is touched.
pub fn shoot(
    possession: &mut Possession,
    body: &mut impl RigidBody2d,
    target: Option<Vec2>,
    gravity: f32,
    mode: LaunchMode,
) -> Result<Vec2, ShotError> {
    let target = target.ok_or(ShotError::NoTarget)?;
    let velocity = solve_launch_velocity(body.position(), target, gravity, mode);
    possession.release(body);
    body.set_velocity(velocity);
    Ok(velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PointBody;
    use proptest::prelude::*;

    #[test]
    fn test_grant_pins_ball() {
        let mut possession = Possession::default();
        let mut body = PointBody::at(Vec2::ZERO);
        body.velocity = Vec2::new(3.0, -2.0);

        possession.grant(PlayerIndex(1), &mut body);
        assert!(possession.is_holder(PlayerIndex(1)));
        assert!(!possession.is_holder(PlayerIndex(0)));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.gravity_scale, 0.0);

        // Granting again to the same actor changes nothing
        possession.grant(PlayerIndex(1), &mut body);
        assert_eq!(possession.holder(), Some(PlayerIndex(1)));
    }

    #[test]
    fn test_release_keeps_velocity() {
        let mut possession = Possession::held_by(PlayerIndex(0));
        let mut body = PointBody::at(Vec2::ZERO);
        body.gravity_scale = 0.0;
        body.velocity = Vec2::new(1.0, 1.0);

        possession.release(&mut body);
        assert_eq!(possession.holder(), None);
        assert_eq!(body.gravity_scale, 1.0);
        assert_eq!(body.velocity, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_shoot_without_target_changes_nothing() {
        let mut possession = Possession::held_by(PlayerIndex(0));
        let mut body = PointBody::at(Vec2::new(1.0, 2.0));
        body.gravity_scale = 0.0;

        let result = shoot(&mut possession, &mut body, None, 9.8, LaunchMode::default());
        assert_eq!(result, Err(ShotError::NoTarget));
        assert!(possession.is_holder(PlayerIndex(0)));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.gravity_scale, 0.0);
    }

    #[test]
    fn test_shoot_releases_and_launches() {
        let mut possession = Possession::held_by(PlayerIndex(0));
        let mut body = PointBody::at(Vec2::ZERO);
        body.gravity_scale = 0.0;

        let velocity = shoot(
            &mut possession,
            &mut body,
            Some(Vec2::new(10.0, 0.0)),
            9.8,
            LaunchMode::Angle { degrees: 45.0 },
        )
        .unwrap();

        assert_eq!(possession.holder(), None);
        assert_eq!(body.gravity_scale, 1.0);
        assert_eq!(body.velocity, velocity);
        assert!((velocity.x - 7.0).abs() < 0.01);
    }

    proptest! {
        #[test]
        fn prop_at_most_one_holder(ops in proptest::collection::vec((0i32..4, any::<bool>()), 0..64)) {
            let mut possession = Possession::default();
            let mut body = PointBody::at(Vec2::ZERO);
            for (index, is_grant) in ops {
                if is_grant {
                    possession.grant(PlayerIndex(index), &mut body);
                } else {
                    possession.release(&mut body);
                }
                let holders = (0..4).filter(|i| possession.is_holder(PlayerIndex(*i))).count();
                prop_assert!(holders <= 1);
            }
        }
    }
}
