//! Earth–Moon Orbit Viewer: Bevy scene rendered offscreen inside a Tauri app
//!
//! A textured Earth with cloud and atmosphere shells spins in front of a
//! starfield while the user drags it around, zooms the camera and steers an
//! orbiting moon with WASD, the arrow keys or on-screen buttons.
//!
//! Architecture:
//! - The webview forwards pointer, touch, wheel, key, button and resize
//!   events as `InputEvent`s over a channel
//! - Bevy runs headless in a background thread; every update drains the
//!   channel into `SceneState`, advances it one tick and writes transforms
//! - The render target is copied back to the CPU and served to the webview
//!   through the `frame://` protocol (JPEG) or the `get_frame` command
//!
//! # Module Structure
//!
//! - `config`: Configuration constants and settings
//! - `controls`: Engine-independent input tracking and per-tick motion
//! - `tauri_bridge`: Bridge layer between Tauri and Bevy
//!   - `shared_state`: Frame slot and input queue
//!   - `encoding`: JPEG / Base64 frame encoders
//!   - `commands`: Tauri command handlers (`desktop` feature)
//!   - `protocol`: Custom protocol handlers (`desktop` feature)
//! - `bevy`: Bevy engine integration
//!   - `components`: ECS components
//!   - `resources`: Global resources
//!   - `plugins`: Custom plugins
//!   - `systems`: Scene systems
//!   - `app`: Application setup

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Module declarations
pub mod bevy;
pub mod config;
pub mod controls;
pub mod tauri_bridge;

/// Main entry point for the Tauri application
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use std::{thread, time::Duration};
    use tauri_bridge::{SharedFrameBuffer, SharedInputQueue};

    // Create shared state
    let buffer = SharedFrameBuffer::default();
    let (input_queue, input_events) = SharedInputQueue::new();

    // Start Bevy in background thread
    bevy::start_bevy(buffer.clone(), input_events);

    // Wait for Bevy to initialize
    thread::sleep(Duration::from_millis(1000));

    // Clone for the custom protocol handler
    let protocol_buffer = buffer.clone();

    // Build and run Tauri application
    let result = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(buffer)
        .manage(input_queue)
        // Register custom protocol "frame://" for direct binary transfer
        .register_asynchronous_uri_scheme_protocol("frame", move |_ctx, request, responder| {
            let buffer = protocol_buffer.clone();

            // JPEG encoding happens off the webview thread
            thread::spawn(move || {
                let response =
                    tauri_bridge::protocol::handle_frame_protocol(request.uri().path(), &buffer);
                responder.respond(response);
            });
        })
        .invoke_handler(tauri::generate_handler![
            tauri_bridge::commands::get_frame,
            tauri_bridge::commands::get_render_size,
            tauri_bridge::commands::send_input_event
        ])
        .run(tauri::generate_context!());

    if let Err(err) = result {
        ::bevy::log::error!("[Tauri] {err}");
    }
}
