//! Configuration constants for the viewer
//!
//! This module contains all tunable parameters: render resolution, frame
//! rate, camera limits, body sizes and per-tick motion increments.

/// Initial width of the offscreen render target in pixels
pub const RENDER_WIDTH: u32 = 1280;

/// Initial height of the offscreen render target in pixels
pub const RENDER_HEIGHT: u32 = 720;

/// Largest render target width a viewport resize may request
pub const MAX_RENDER_WIDTH: u32 = 1280;

/// Largest render target height a viewport resize may request
pub const MAX_RENDER_HEIGHT: u32 = 720;

/// Target frames per second for the Bevy render loop
pub const TARGET_FPS: f64 = 60.0;

/// Number of pre-roll frames to skip before starting output
/// This allows the scene to fully load and stabilize
pub const PRE_ROLL_FRAMES: u32 = 30;

/// Camera settings
pub mod camera {
    /// Vertical field of view in degrees
    pub const FOV_DEGREES: f32 = 75.0;

    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;

    /// Starting distance of the camera from the origin along +Z
    pub const INITIAL_DISTANCE: f32 = 15.0;

    /// Minimum camera distance from the origin
    pub const MIN_DISTANCE: f32 = 8.0;

    /// Maximum camera distance from the origin
    pub const MAX_DISTANCE: f32 = 30.0;
}

/// Earth and its dependent shells
pub mod earth {
    use std::f32::consts::FRAC_PI_2;

    pub const RADIUS: f32 = 5.0;
    pub const CLOUD_RADIUS: f32 = 5.05;
    pub const ATMOSPHERE_RADIUS: f32 = 5.1;

    /// Sectors and stacks of every UV sphere in the scene
    pub const SPHERE_SEGMENTS: u32 = 32;

    pub const CLOUD_OPACITY: f32 = 0.5;
    pub const ATMOSPHERE_OPACITY: f32 = 0.2;

    /// Atmosphere glow color (#00aaff)
    pub const ATMOSPHERE_RGB: [u8; 3] = [0x00, 0xaa, 0xff];

    /// Yaw added per tick while nobody is dragging (radians)
    pub const AUTO_ROTATE_SPEED: f32 = 0.005;

    /// Yaw added to the cloud layer every tick (radians)
    pub const CLOUD_DRIFT_SPEED: f32 = 0.002;

    /// Radians of rotation per pixel of pointer drag
    pub const DRAG_SENSITIVITY: f32 = 0.005;

    /// Pitch limits (radians)
    pub const MAX_PITCH: f32 = FRAC_PI_2;
    pub const MIN_PITCH: f32 = -FRAC_PI_2;
}

/// Moon orbit and spin
pub mod moon {
    pub const RADIUS: f32 = 0.5;

    /// Distance of the moon from the Earth's center
    pub const ORBIT_RADIUS: f32 = 7.0;

    /// Change of theta/phi per tick while a direction is held (radians)
    pub const ANGULAR_SPEED: f32 = 0.02;

    /// Keeps phi away from the poles: phi stays in [margin, PI - margin]
    pub const POLE_MARGIN: f32 = 0.1;

    /// Yaw added to the moon's own spin every tick (radians)
    pub const SPIN_SPEED: f32 = 0.01;
}

/// Starfield background
pub mod stars {
    pub const COUNT: usize = 5000;

    /// Stars sit at a radius in [MIN_RADIUS, MIN_RADIUS + RADIUS_SPREAD)
    pub const MIN_RADIUS: f32 = 100.0;
    pub const RADIUS_SPREAD: f32 = 400.0;
}

/// Input normalization
pub mod input {
    /// Camera distance change per unit of wheel delta
    pub const ZOOM_SPEED: f32 = 0.1;
}

/// Texture asset paths, relative to the Bevy asset root
pub mod textures {
    pub const EARTH: &str = "textures/earth.jpg";
    pub const CLOUDS: &str = "textures/clouds.png";
    pub const MOON: &str = "textures/moon.jpg";
}

/// Image compression settings
pub mod compression {
    /// JPEG quality level (0-100, higher = better quality but larger size)
    pub const JPEG_QUALITY: u8 = 85;
}
