//! Input state tracking
//!
//! Pointer, touch, wheel, keyboard and on-screen button input arrive from the
//! webview as [`InputEvent`] values. [`InputTracker`] folds them into a few
//! signals that the per-tick update consumes: the pointer state, the four
//! directional flags, and pending drag/zoom deltas.

use std::str::FromStr;

use bevy::math::Vec2;
use serde::{de, Deserialize, Deserializer};
use thiserror::Error;

use crate::config::input::ZOOM_SPEED;

/// Errors raised while interpreting input from the webview
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("unknown direction `{0}` (expected up, down, left or right)")]
    UnknownDirection(String),

    #[error("non-finite coordinate or delta `{0}`")]
    NonFinite(f32),
}

/// Deserialize an `f32` that must be finite; JSON numbers beyond `f32`
/// range would otherwise arrive as infinities
fn finite_f32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    let value = f32::deserialize(deserializer)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(de::Error::custom(InputError::NonFinite(value)))
    }
}

/// One of the four moon steering directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a keyboard key identity (`KeyboardEvent.key`) to a direction.
    ///
    /// WASD and the arrow keys steer; any other key yields `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "w" | "arrowup" => Some(Self::Up),
            "s" | "arrowdown" => Some(Self::Down),
            "a" | "arrowleft" => Some(Self::Left),
            "d" | "arrowright" => Some(Self::Right),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(InputError::UnknownDirection(s.to_string())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Input events forwarded by the webview
///
/// Serialized as internally tagged JSON, e.g.
/// `{"kind": "pointer_move", "x": 120.0, "y": 48.5}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    /// Mouse button or first touch went down at `(clientX, clientY)`
    PointerDown {
        #[serde(deserialize_with = "finite_f32")]
        x: f32,
        #[serde(deserialize_with = "finite_f32")]
        y: f32,
    },
    /// Mouse or first touch moved to `(clientX, clientY)`
    PointerMove {
        #[serde(deserialize_with = "finite_f32")]
        x: f32,
        #[serde(deserialize_with = "finite_f32")]
        y: f32,
    },
    /// Mouse button or last touch released
    PointerUp,
    /// Wheel scrolled by `deltaY`
    Wheel {
        #[serde(deserialize_with = "finite_f32")]
        delta_y: f32,
    },
    /// Keyboard key pressed or released
    Key { key: String, pressed: bool },
    /// On-screen steering button pressed or released
    Button { direction: Direction, pressed: bool },
    /// Viewport resized; consumed by the render target, not the tracker
    Resize { width: u32, height: u32 },
}

impl InputEvent {
    /// `false` if any coordinate or delta is NaN or infinite
    pub fn is_finite(&self) -> bool {
        match self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } => {
                x.is_finite() && y.is_finite()
            }
            Self::Wheel { delta_y } => delta_y.is_finite(),
            _ => true,
        }
    }
}

/// Drag gesture state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub active: bool,
    pub last_x: f32,
    pub last_y: f32,
}

/// Moon steering flags
///
/// Keyboard keys and on-screen buttons write the same flag; the last writer
/// wins. Releasing a key clears its flag even while the matching button is
/// still held, and vice versa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionalFlags {
    pub fn is_set(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Set or clear a flag. Returns `true` if the flag changed.
    pub fn set(&mut self, direction: Direction, pressed: bool) -> bool {
        let slot = match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        };
        let changed = *slot != pressed;
        *slot = pressed;
        changed
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Normalizes heterogeneous input into per-tick signals
///
/// Drag and zoom deltas accumulate between ticks and are handed out exactly
/// once through [`take_drag`](Self::take_drag) / [`take_zoom`](Self::take_zoom).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputTracker {
    pub pointer: PointerState,
    pub flags: DirectionalFlags,
    pending_drag: Vec2,
    pending_zoom: f32,
}

impl InputTracker {
    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.pointer = PointerState {
            active: true,
            last_x: x,
            last_y: y,
        };
    }

    /// Returns the drag delta produced by this move, if the pointer is held
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> Option<Vec2> {
        if !self.pointer.active {
            return None;
        }
        let delta = Vec2::new(x - self.pointer.last_x, y - self.pointer.last_y);
        self.pointer.last_x = x;
        self.pointer.last_y = y;
        self.pending_drag += delta;
        Some(delta)
    }

    pub fn on_pointer_up(&mut self) {
        self.pointer.active = false;
    }

    /// Returns the zoom delta produced by this wheel step
    pub fn on_wheel(&mut self, delta_y: f32) -> f32 {
        let zoom = delta_y * ZOOM_SPEED;
        self.pending_zoom += zoom;
        zoom
    }

    /// Set or clear a steering flag. Repeating the same call is a no-op.
    pub fn on_directional_change(&mut self, direction: Direction, pressed: bool) -> bool {
        self.flags.set(direction, pressed)
    }

    /// Keys outside WASD and the arrows are ignored
    pub fn on_key(&mut self, key: &str, pressed: bool) -> bool {
        Direction::from_key(key)
            .map(|direction| self.on_directional_change(direction, pressed))
            .unwrap_or(false)
    }

    pub fn pending_drag(&self) -> Vec2 {
        self.pending_drag
    }

    pub fn pending_zoom(&self) -> f32 {
        self.pending_zoom
    }

    pub fn take_drag(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending_drag)
    }

    pub fn take_zoom(&mut self) -> f32 {
        std::mem::take(&mut self.pending_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_without_press_is_ignored() {
        let mut tracker = InputTracker::default();
        assert_eq!(tracker.on_pointer_move(10.0, 10.0), None);
        assert_eq!(tracker.pending_drag(), Vec2::ZERO);
        assert_eq!(tracker.pointer, PointerState::default());
    }

    #[test]
    fn drag_reports_delta_from_last_position() {
        let mut tracker = InputTracker::default();
        tracker.on_pointer_down(100.0, 50.0);
        assert_eq!(tracker.on_pointer_move(130.0, 40.0), Some(Vec2::new(30.0, -10.0)));
        assert_eq!(tracker.on_pointer_move(135.0, 45.0), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(tracker.pointer.last_x, 135.0);
        assert_eq!(tracker.pointer.last_y, 45.0);
        assert_eq!(tracker.take_drag(), Vec2::new(35.0, -5.0));
        assert_eq!(tracker.pending_drag(), Vec2::ZERO);
    }

    #[test]
    fn second_press_reanchors_the_drag() {
        // One of two fingers lifts; the drag continues from the other one
        let mut tracker = InputTracker::default();
        tracker.on_pointer_down(10.0, 10.0);
        tracker.on_pointer_move(20.0, 10.0);
        tracker.on_pointer_down(400.0, 300.0);
        assert!(tracker.pointer.active);
        assert_eq!(tracker.on_pointer_move(405.0, 300.0), Some(Vec2::new(5.0, 0.0)));
        assert_eq!(tracker.take_drag(), Vec2::new(15.0, 0.0));
    }

    #[test]
    fn release_stops_drag() {
        let mut tracker = InputTracker::default();
        tracker.on_pointer_down(0.0, 0.0);
        tracker.on_pointer_up();
        assert!(!tracker.pointer.active);
        assert_eq!(tracker.on_pointer_move(50.0, 50.0), None);
    }

    #[test]
    fn wheel_scales_by_zoom_speed() {
        let mut tracker = InputTracker::default();
        assert!((tracker.on_wheel(100.0) - 10.0).abs() < 1e-5);
        tracker.on_wheel(-40.0);
        assert!((tracker.pending_zoom() - 6.0).abs() < 1e-5);
        assert!((tracker.take_zoom() - 6.0).abs() < 1e-5);
        assert_eq!(tracker.pending_zoom(), 0.0);
    }

    #[test]
    fn directional_change_is_idempotent() {
        let mut once = InputTracker::default();
        assert!(once.on_directional_change(Direction::Up, true));
        assert!(once.flags.is_set(Direction::Up));

        let mut twice = InputTracker::default();
        twice.on_directional_change(Direction::Up, true);
        assert!(!twice.on_directional_change(Direction::Up, true));

        assert_eq!(once, twice);
        assert!(!twice.on_directional_change(Direction::Down, false));
        assert_eq!(once, twice);
    }

    #[test]
    fn key_and_button_share_a_flag() {
        let mut tracker = InputTracker::default();
        tracker.on_directional_change(Direction::Left, true);
        tracker.on_key("a", true);
        // Releasing the key clears the flag the button still "holds"
        tracker.on_key("A", false);
        assert!(!tracker.flags.is_set(Direction::Left));
    }

    #[test]
    fn keys_map_to_directions() {
        assert_eq!(Direction::from_key("W"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("q"), None);

        let mut tracker = InputTracker::default();
        assert!(!tracker.on_key("Shift", true));
        assert!(!tracker.flags.any());
    }

    #[test]
    fn parses_direction_names() {
        assert_eq!("Up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!(" right ".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!(
            "north".parse::<Direction>(),
            Err(InputError::UnknownDirection("north".into()))
        );
    }

    #[test]
    fn deserializes_tagged_events() {
        let event: InputEvent =
            serde_json::from_str(r#"{"kind":"pointer_move","x":12.5,"y":-3.0}"#).unwrap();
        assert_eq!(event, InputEvent::PointerMove { x: 12.5, y: -3.0 });

        let event: InputEvent =
            serde_json::from_str(r#"{"kind":"button","direction":"LEFT","pressed":true}"#)
                .unwrap();
        assert_eq!(
            event,
            InputEvent::Button {
                direction: Direction::Left,
                pressed: true
            }
        );

        let event: InputEvent = serde_json::from_str(r#"{"kind":"pointer_up"}"#).unwrap();
        assert_eq!(event, InputEvent::PointerUp);

        let event: InputEvent =
            serde_json::from_str(r#"{"kind":"resize","width":800,"height":600}"#).unwrap();
        assert_eq!(
            event,
            InputEvent::Resize {
                width: 800,
                height: 600
            }
        );
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        for json in [
            r#"{"kind":"wheel","delta_y":1e39}"#,
            r#"{"kind":"wheel","delta_y":-1e39}"#,
            r#"{"kind":"pointer_down","x":0.0,"y":1e39}"#,
            r#"{"kind":"pointer_move","x":-1e39,"y":0.0}"#,
        ] {
            let err = serde_json::from_str::<InputEvent>(json).unwrap_err();
            assert!(err.to_string().contains("non-finite"), "{json}: {err}");
        }
    }

    #[test]
    fn finiteness_of_constructed_events() {
        assert!(InputEvent::Wheel { delta_y: -3.0 }.is_finite());
        assert!(InputEvent::PointerUp.is_finite());
        assert!(!InputEvent::Wheel {
            delta_y: f32::INFINITY
        }
        .is_finite());
        assert!(!InputEvent::PointerMove { x: f32::NAN, y: 0.0 }.is_finite());
    }

    #[test]
    fn rejects_unknown_button_direction() {
        let result = serde_json::from_str::<InputEvent>(
            r#"{"kind":"button","direction":"sideways","pressed":true}"#,
        );
        assert!(result.is_err());
    }
}
