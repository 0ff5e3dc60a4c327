//! Bridge layer between Tauri and Bevy
//!
//! This module handles all communication between the Tauri frontend and
//! the Bevy rendering backend. The shared state and encoders build without
//! Tauri; the command handlers and the custom protocol need the `desktop`
//! feature.

pub mod shared_state;
pub mod error;
pub mod encoding;
#[cfg(feature = "desktop")]
pub mod commands;
#[cfg(feature = "desktop")]
pub mod protocol;

// Re-export commonly used types
pub use error::BridgeError;
pub use shared_state::{Frame, SharedFrameBuffer, SharedInputQueue};
