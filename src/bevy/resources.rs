//! Bevy resource definitions
//!
//! This module contains all global resources used by Bevy systems.
//! Resources are singleton data that can be accessed by any system.

use bevy::{prelude::*, render::render_resource::Extent3d};
use crossbeam_channel::{Receiver, Sender};

use crate::config::{MAX_RENDER_HEIGHT, MAX_RENDER_WIDTH, RENDER_HEIGHT, RENDER_WIDTH};
use crate::controls::{InputEvent, SceneState};
use crate::tauri_bridge::shared_state::SharedFrameBuffer;

// =============================================================================
// Scene Control
// =============================================================================

/// The scene's motion state, advanced once per update
#[derive(Resource, Default, Deref, DerefMut)]
pub struct SceneStateRes(pub SceneState);

/// Input events queued by the webview, drained at the start of every update
#[derive(Resource, Deref)]
pub struct InputEventReceiver(pub Receiver<InputEvent>);

/// Texture handles paired with the material that samples them
#[derive(Resource, Default)]
pub struct SceneTextures(pub Vec<TextureBinding>);

/// A texture and the material that falls back to untextured if it fails
#[derive(Clone)]
pub struct TextureBinding {
    pub label: &'static str,
    pub texture: Handle<Image>,
    pub material: Handle<StandardMaterial>,
}

// =============================================================================
// Rendering
// =============================================================================

/// Handle to the offscreen render target texture
#[derive(Resource)]
pub struct RenderTargetHandle(pub Handle<Image>);

/// Current size of the offscreen render target
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSize {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderSize {
    fn default() -> Self {
        Self {
            width: RENDER_WIDTH,
            height: RENDER_HEIGHT,
        }
    }
}

impl RenderSize {
    /// Fit a viewport into the maximum render size, keeping its aspect ratio
    pub fn fit_viewport(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let scale = (MAX_RENDER_WIDTH as f64 / width as f64)
            .min(MAX_RENDER_HEIGHT as f64 / height as f64)
            .min(1.0);
        Self {
            width: ((width as f64 * scale).round() as u32).max(1),
            height: ((height as f64 * scale).round() as u32).max(1),
        }
    }

    pub fn extent(&self) -> Extent3d {
        Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

/// Shared frame buffer resource for Bevy
#[derive(Resource, Clone)]
pub struct FrameBufferRes(pub SharedFrameBuffer);

// =============================================================================
// Frame Management
// =============================================================================

/// Counter for total frames published
#[derive(Resource, Default)]
pub struct FrameCount(pub u32);

/// Number of pre-roll frames to skip before starting output
#[derive(Resource, Default)]
pub struct PreRollFrames(pub u32);

// =============================================================================
// Channel Communication (Main World <-> Render World)
// =============================================================================

/// Receives data from render world
#[derive(Resource, Deref)]
pub struct MainWorldReceiver(pub Receiver<Vec<u8>>);

/// Sends data to main world
#[derive(Resource, Deref)]
pub struct RenderWorldSender(pub Sender<Vec<u8>>);
