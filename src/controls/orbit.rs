//! Orbit math
//!
//! Spherical coordinates for the moon, clamped pitch/yaw for the Earth and the
//! clamped camera distance.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::math::{EulerRot, Quat, Vec2, Vec3};

use crate::config::{camera, earth, moon};

use super::input::DirectionalFlags;

/// Convert `(radius, theta, phi)` to a Y-up Cartesian position.
///
/// `theta` is the azimuth in the XZ plane measured from +X towards +Z and
/// `phi` the polar angle measured from +Y.
pub fn spherical_to_cartesian(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Spherical angles of the moon around the Earth's center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitAngles {
    /// Azimuth, unbounded
    pub theta: f32,
    /// Polar angle, kept within `[POLE_MARGIN, PI - POLE_MARGIN]`
    pub phi: f32,
}

impl Default for OrbitAngles {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: FRAC_PI_2, // On the equator
        }
    }
}

impl OrbitAngles {
    /// Advance by one tick of held directions.
    ///
    /// Up decreases phi (towards +Y), left increases theta, right decreases
    /// it. Opposite flags cancel.
    pub fn steer(&mut self, flags: &DirectionalFlags, speed: f32) {
        if flags.up {
            self.phi -= speed;
        }
        if flags.down {
            self.phi += speed;
        }
        if flags.left {
            self.theta += speed;
        }
        if flags.right {
            self.theta -= speed;
        }
        self.phi = self.phi.clamp(moon::POLE_MARGIN, PI - moon::POLE_MARGIN);
    }

    pub fn position(&self, radius: f32) -> Vec3 {
        spherical_to_cartesian(radius, self.theta, self.phi)
    }
}

/// Accumulated pitch (X) and yaw (Y) of a body, in radians
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub pitch: f32,
    pub yaw: f32,
}

impl RotationState {
    /// Apply a pointer drag: horizontal motion yaws, vertical motion pitches.
    /// Pitch is clamped so the body never flips over the poles.
    pub fn apply_drag(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw += delta.x * sensitivity;
        self.pitch += delta.y * sensitivity;
        self.pitch = self.pitch.clamp(earth::MIN_PITCH, earth::MAX_PITCH);
    }

    /// Pitch applied before yaw, matching an XYZ Euler rotation
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}

/// Camera distance from the origin, clamped to `[MIN_DISTANCE, MAX_DISTANCE]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDistance(f32);

impl Default for CameraDistance {
    fn default() -> Self {
        Self(camera::INITIAL_DISTANCE)
    }
}

impl CameraDistance {
    pub fn new(distance: f32) -> Self {
        Self(distance.clamp(camera::MIN_DISTANCE, camera::MAX_DISTANCE))
    }

    pub fn zoom(&mut self, delta: f32) {
        *self = Self::new(self.0 + delta);
    }

    pub fn get(&self) -> f32 {
        self.0
    }
}
