//! Bevy component definitions
//!
//! This module contains all component markers and data structures used
//! to tag and identify entities in the Bevy ECS (Entity Component System).

use bevy::prelude::*;

/// Marker component for the offscreen rendering camera
///
/// Entities with this component are cameras that render to an offscreen
/// texture instead of a window.
#[derive(Component)]
pub struct OffscreenCamera;

/// Marker component for cameras whose distance follows the scene state
///
/// The camera stays on the +Z axis looking at the origin; only its
/// distance changes with zoom input.
#[derive(Component)]
pub struct CameraController;

/// Bodies whose transform is rewritten from the scene state every tick
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneBody {
    Earth,
    Clouds,
    Atmosphere,
    Moon,
}

/// Marker component for the background star points
#[derive(Component)]
pub struct Starfield;
