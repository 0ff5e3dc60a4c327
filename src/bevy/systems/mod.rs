//! Bevy systems
//!
//! This module contains all the systems that operate on entities
//! and resources in the Bevy ECS.

pub mod scene;
pub mod input;
pub mod orbit;
pub mod textures;
pub mod viewport;
pub mod frame_extraction;

pub use scene::setup_scene;
pub use input::drain_input_events;
pub use orbit::{advance_scene, apply_body_transforms, apply_camera_distance};
pub use textures::handle_texture_loads;
pub use viewport::resize_render_target;
pub use frame_extraction::extract_and_publish_frame;
