//! Engine-independent scene controls
//!
//! Everything that decides *how* the scene moves lives here, free of ECS
//! types, so it can be driven and tested one tick at a time.
//!
//! - `input`: raw events and the input state tracker
//! - `orbit`: spherical coordinates, rotation and zoom clamps
//! - `state`: the single `SceneState` and its per-tick update

pub mod input;
pub mod orbit;
pub mod state;

pub use input::{Direction, DirectionalFlags, InputError, InputEvent, InputTracker, PointerState};
pub use orbit::{spherical_to_cartesian, CameraDistance, OrbitAngles, RotationState};
pub use state::{tick, SceneState};
