//! Errors surfaced to the webview
//!
//! Tauri commands return these; they serialize as their display string.

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("input queue closed (render thread stopped)")]
    InputQueueClosed,

    #[error("no frame yet (scene still loading)")]
    FrameNotReady,

    #[error("shared state lock poisoned")]
    LockPoisoned,

    #[error("frame data does not match {width}x{height} RGBA")]
    MalformedFrame { width: u32, height: u32 },

    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl Serialize for BridgeError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_message() {
        let json = serde_json::to_string(&BridgeError::FrameNotReady).unwrap();
        assert_eq!(json, r#""no frame yet (scene still loading)""#);
    }
}
