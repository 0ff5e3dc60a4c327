//! Input dispatch system
//!
//! Drains the events the webview queued since the last update and routes
//! them into the scene state, in arrival order.

use bevy::prelude::*;

use crate::bevy::resources::{InputEventReceiver, RenderSize, SceneStateRes};
use crate::controls::InputEvent;

/// Dispatch queued input events before the tick runs
pub fn drain_input_events(
    receiver: Option<Res<InputEventReceiver>>,
    mut scene: ResMut<SceneStateRes>,
    mut render_size: ResMut<RenderSize>,
) {
    let Some(receiver) = receiver else {
        return;
    };

    for event in receiver.try_iter() {
        match event {
            InputEvent::Resize { width, height } => {
                let fitted = RenderSize::fit_viewport(width, height);
                if render_size.set_if_neq(fitted) {
                    debug!(
                        "[Input] Viewport {}x{} -> render target {}x{}",
                        width, height, fitted.width, fitted.height
                    );
                }
            }
            other => scene.dispatch(&other),
        }
    }
}
