//! Scene state and the per-tick update
//!
//! [`SceneState`] owns every piece of mutable scene data. Input handlers and
//! the tick both take it by reference; nothing else mutates it.

use bevy::math::Vec3;

use crate::config::{earth, moon};

use super::input::{InputEvent, InputTracker};
use super::orbit::{CameraDistance, OrbitAngles, RotationState};

/// Complete motion state of the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub input: InputTracker,
    /// Earth rotation, driven by autorotation and dragging
    pub earth: RotationState,
    /// Atmosphere rotation, locked to the Earth's
    pub atmosphere: RotationState,
    /// Cloud layer yaw, drifting on its own
    pub cloud_yaw: f32,
    pub camera_distance: CameraDistance,
    pub moon_orbit: OrbitAngles,
    pub moon_position: Vec3,
    /// Moon's own yaw about its axis
    pub moon_spin: f32,
}

impl Default for SceneState {
    fn default() -> Self {
        let moon_orbit = OrbitAngles::default();
        Self {
            input: InputTracker::default(),
            earth: RotationState::default(),
            atmosphere: RotationState::default(),
            cloud_yaw: 0.0,
            camera_distance: CameraDistance::default(),
            moon_position: moon_orbit.position(moon::ORBIT_RADIUS),
            moon_orbit,
            moon_spin: 0.0,
        }
    }
}

impl SceneState {
    /// Route an input event to the matching tracker handler.
    ///
    /// `Resize` carries no scene state and is ignored here, as are events
    /// with NaN or infinite coordinates, which would defeat every clamp.
    pub fn dispatch(&mut self, event: &InputEvent) {
        if !event.is_finite() {
            return;
        }
        match event {
            InputEvent::PointerDown { x, y } => self.input.on_pointer_down(*x, *y),
            InputEvent::PointerMove { x, y } => {
                self.input.on_pointer_move(*x, *y);
            }
            InputEvent::PointerUp => self.input.on_pointer_up(),
            InputEvent::Wheel { delta_y } => {
                self.input.on_wheel(*delta_y);
            }
            InputEvent::Key { key, pressed } => {
                self.input.on_key(key, *pressed);
            }
            InputEvent::Button { direction, pressed } => {
                self.input.on_directional_change(*direction, *pressed);
            }
            InputEvent::Resize { .. } => {}
        }
    }

    /// Advance every body by exactly one tick.
    ///
    /// Increments are per tick, not per second, so motion speed follows the
    /// frame rate.
    pub fn advance(&mut self) {
        // Earth: autorotate unless the user holds it
        if !self.input.pointer.active {
            self.earth.yaw += earth::AUTO_ROTATE_SPEED;
        }
        let drag = self.input.take_drag();
        self.earth.apply_drag(drag, earth::DRAG_SENSITIVITY);

        // Shells
        self.atmosphere = self.earth;
        self.cloud_yaw += earth::CLOUD_DRIFT_SPEED;

        // Camera
        let zoom = self.input.take_zoom();
        self.camera_distance.zoom(zoom);

        // Moon
        self.moon_orbit.steer(&self.input.flags, moon::ANGULAR_SPEED);
        self.moon_position = self.moon_orbit.position(moon::ORBIT_RADIUS);
        self.moon_spin += moon::SPIN_SPEED;
    }
}

/// Pure form of [`SceneState::advance`]: the state one tick after `state`
pub fn tick(state: &SceneState) -> SceneState {
    let mut next = state.clone();
    next.advance();
    next
}
