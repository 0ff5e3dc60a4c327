//! Shared state structures for communication between Tauri and Bevy
//!
//! Input flows from the webview to Bevy through an event queue; rendered
//! frames flow back through a latest-only frame slot.

use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use super::error::BridgeError;
use crate::controls::InputEvent;

// =============================================================================
// Frame Buffer
// =============================================================================

/// One rendered frame as raw RGBA8 pixels (4 bytes per pixel)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Increments with every published frame
    pub sequence: u32,
    pub rgba: Vec<u8>,
}

/// Thread-safe slot holding the most recent frame
#[derive(Clone, Default)]
pub struct SharedFrameBuffer(pub Arc<Mutex<Option<Frame>>>);

impl SharedFrameBuffer {
    /// Replace the current frame
    pub fn publish(&self, frame: Frame) -> Result<(), BridgeError> {
        let mut guard = self.0.lock().map_err(|_| BridgeError::LockPoisoned)?;
        *guard = Some(frame);
        Ok(())
    }

    /// Copy of the latest frame, or `FrameNotReady` during startup
    pub fn latest(&self) -> Result<Frame, BridgeError> {
        let guard = self.0.lock().map_err(|_| BridgeError::LockPoisoned)?;
        guard.clone().ok_or(BridgeError::FrameNotReady)
    }
}

/// Frame response containing Base64-encoded RGBA pixel data
#[derive(Serialize, Deserialize, Debug)]
pub struct FrameResponse {
    /// Base64-encoded RGBA pixel data (avoids slow JSON array serialization)
    pub data: String,
    pub width: u32,
    pub height: u32,
    pub sequence: u32,
}

// =============================================================================
// Input Queue
// =============================================================================

/// Sending half of the input event queue, shared with Tauri command handlers
#[derive(Clone)]
pub struct SharedInputQueue(pub Sender<InputEvent>);

impl SharedInputQueue {
    /// Create the queue; the receiver goes to Bevy
    pub fn new() -> (Self, Receiver<InputEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self(tx), rx)
    }

    pub fn send(&self, event: InputEvent) -> Result<(), BridgeError> {
        self.0.send(event).map_err(|_| BridgeError::InputQueueClosed)
    }
}
