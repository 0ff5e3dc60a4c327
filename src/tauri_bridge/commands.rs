//! Tauri command handlers
//!
//! This module contains all the Tauri command functions that can be invoked
//! from the frontend JavaScript code.

use tauri::State;

use super::encoding::encode_base64;
use super::error::BridgeError;
use super::shared_state::{FrameResponse, SharedFrameBuffer, SharedInputQueue};
use crate::config::{RENDER_HEIGHT, RENDER_WIDTH};
use crate::controls::InputEvent;

/// Get the current rendered frame as Base64-encoded RGBA data
#[tauri::command]
pub fn get_frame(state: State<SharedFrameBuffer>) -> Result<FrameResponse, BridgeError> {
    let frame = state.latest()?;
    Ok(encode_base64(&frame))
}

/// Get the size of the most recent frame (the initial size before any)
#[tauri::command]
pub fn get_render_size(state: State<SharedFrameBuffer>) -> (u32, u32) {
    state
        .latest()
        .map(|frame| (frame.width, frame.height))
        .unwrap_or((RENDER_WIDTH, RENDER_HEIGHT))
}

/// Queue one input event for the next Bevy update
#[tauri::command]
pub fn send_input_event(
    queue: State<SharedInputQueue>,
    event: InputEvent,
) -> Result<(), BridgeError> {
    queue.send(event)
}
