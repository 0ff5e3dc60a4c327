//! Custom protocol handlers for efficient data transfer
//!
//! This module implements the `frame://` custom protocol for direct binary
//! transfer of render frames, bypassing Tauri's IPC JSON serialization.

use bevy::log::warn;
use tauri::http::{
    header::{
        HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS,
        CONTENT_TYPE,
    },
    Response as HttpResponse, StatusCode,
};

use super::encoding::encode_jpeg;
use super::error::BridgeError;
use super::shared_state::{Frame, SharedFrameBuffer};
use crate::config::compression::JPEG_QUALITY;

type Response = HttpResponse<Vec<u8>>;

const X_FRAME_WIDTH: HeaderName = HeaderName::from_static("x-frame-width");
const X_FRAME_HEIGHT: HeaderName = HeaderName::from_static("x-frame-height");
const X_FRAME_SEQUENCE: HeaderName = HeaderName::from_static("x-frame-sequence");

/// Handle requests to the custom `frame://` protocol
///
/// Supported endpoints:
/// - `frame` or `frame.jpg`: JPEG-compressed frame
/// - `frame.raw`: Raw RGBA frame
pub fn handle_frame_protocol(uri_path: &str, buffer: &SharedFrameBuffer) -> Response {
    let resource = uri_path.trim_start_matches('/');

    let result = match resource {
        "frame" | "frame.jpg" => buffer
            .latest()
            .and_then(|frame| Ok((encode_jpeg(&frame, JPEG_QUALITY)?, frame)))
            .map(|(jpeg, frame)| frame_response(&frame, "image/jpeg", jpeg)),
        "frame.raw" => buffer.latest().map(|frame| {
            let rgba = frame.rgba.clone();
            frame_response(&frame, "application/octet-stream", rgba)
        }),
        _ => return text_response(StatusCode::NOT_FOUND, "Not Found"),
    };

    match result {
        Ok(response) => response,
        Err(BridgeError::FrameNotReady) => {
            text_response(StatusCode::SERVICE_UNAVAILABLE, "Frame not ready")
        }
        Err(err) => {
            warn!("[Protocol] {resource}: {err}");
            text_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

fn frame_response(frame: &Frame, content_type: &'static str, body: Vec<u8>) -> Response {
    let mut response = HttpResponse::new(body);
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(X_FRAME_WIDTH, HeaderValue::from(frame.width));
    headers.insert(X_FRAME_HEIGHT, HeaderValue::from(frame.height));
    headers.insert(X_FRAME_SEQUENCE, HeaderValue::from(frame.sequence));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("X-Frame-Width, X-Frame-Height, X-Frame-Sequence"),
    );
    response
}

fn text_response(status: StatusCode, message: &str) -> Response {
    let mut response = HttpResponse::new(message.as_bytes().to_vec());
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    response
}
