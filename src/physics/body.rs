//! Rigid-body components and the interface gameplay code writes through

use bevy::prelude::*;

use crate::constants::GRAVITY;

/// 2D velocity vector - shared by players and the ball
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// Multiplier on world gravity (0 = ignores gravity, 1 = full gravity)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GravityScale(pub f32);

impl Default for GravityScale {
    fn default() -> Self {
        Self(1.0)
    }
}

/// World physics settings
#[derive(Resource, Debug, Clone, Copy)]
pub struct PhysicsSettings {
    /// Gravity magnitude, always applied along -Y
    pub gravity: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self { gravity: GRAVITY }
    }
}

/// What gameplay code needs from a rigid body.
/// The engine integrates; gameplay only reads and writes these fields.
pub trait RigidBody2d {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn set_gravity_scale(&mut self, scale: f32);
}

/// Borrowed view over an entity's body components
pub struct BodyMut<'a> {
    pub transform: &'a mut Transform,
    pub velocity: &'a mut Velocity,
    pub gravity_scale: &'a mut GravityScale,
}

impl<'a> BodyMut<'a> {
    pub fn new(
        transform: &'a mut Transform,
        velocity: &'a mut Velocity,
        gravity_scale: &'a mut GravityScale,
    ) -> Self {
        Self {
            transform,
            velocity,
            gravity_scale,
        }
    }
}

impl RigidBody2d for BodyMut<'_> {
    fn position(&self) -> Vec2 {
        self.transform.translation.truncate()
    }

    fn set_position(&mut self, position: Vec2) {
        // Keep z so sprite layering survives
        self.transform.translation.x = position.x;
        self.transform.translation.y = position.y;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale.0 = scale;
    }
}

/// Plain point mass, used outside the ECS (tests, offline tools)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
}

impl PointBody {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
        }
    }
}

impl RigidBody2d for PointBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_mut_preserves_depth() {
        let mut transform = Transform::from_xyz(1.0, 2.0, 5.0);
        let mut velocity = Velocity::default();
        let mut gravity = GravityScale::default();
        let mut body = BodyMut::new(&mut transform, &mut velocity, &mut gravity);

        body.set_position(Vec2::new(-3.0, 4.0));
        body.set_velocity(Vec2::new(1.0, 1.0));
        body.set_gravity_scale(0.0);

        assert_eq!(body.position(), Vec2::new(-3.0, 4.0));
        assert_eq!(transform.translation.z, 5.0);
        assert_eq!(velocity.0, Vec2::new(1.0, 1.0));
        assert_eq!(gravity.0, 0.0);
    }
}
