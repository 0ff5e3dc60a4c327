//! Bevy application setup and execution
//!
//! This module handles the creation and configuration of the Bevy app,
//! including plugin registration and system scheduling.

use bevy::{
    app::{App, ScheduleRunnerPlugin},
    prelude::*,
    window::ExitCondition,
};
use crossbeam_channel::Receiver;
use std::thread;
use std::time::Duration;

use crate::bevy::plugins::ImageCopyPlugin;
use crate::bevy::resources::*;
use crate::bevy::systems::*;
use crate::config::{PRE_ROLL_FRAMES, TARGET_FPS};
use crate::controls::InputEvent;
use crate::tauri_bridge::shared_state::SharedFrameBuffer;

/// Scene motion: input dispatch, the tick, and transform write-back
///
/// Needs no renderer, so it also runs in a bare `App`.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneStateRes>()
            .init_resource::<RenderSize>()
            .add_systems(
                Update,
                (
                    drain_input_events,
                    advance_scene,
                    (apply_body_transforms, apply_camera_distance),
                )
                    .chain(),
            );
    }
}

/// Create and configure the Bevy application
pub fn create_app(frame_buffer: SharedFrameBuffer, input_events: Receiver<InputEvent>) -> App {
    let mut app = App::new();

    // Use DefaultPlugins but configure for headless operation
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: None,
                exit_condition: ExitCondition::DontExit,
                ..default()
            })
            .set(ImagePlugin::default_linear()),
    );

    // Add schedule runner for controlled frame rate
    app.add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
        1.0 / TARGET_FPS,
    )));

    // Add custom plugins
    app.add_plugins((ImageCopyPlugin, ScenePlugin));

    // Register systems
    app.add_systems(Startup, setup_scene);
    app.add_systems(
        Update,
        (
            handle_texture_loads,
            resize_render_target.after(drain_input_events),
        ),
    );
    app.add_systems(Last, extract_and_publish_frame);

    // Insert resources
    app.insert_resource(FrameBufferRes(frame_buffer));
    app.insert_resource(InputEventReceiver(input_events));
    app.insert_resource(FrameCount::default());
    app.insert_resource(PreRollFrames(PRE_ROLL_FRAMES));

    info!("[Bevy] App configured (headless, offscreen render target)");
    app
}

/// Start Bevy in a background thread
pub fn start_bevy(buffer: SharedFrameBuffer, input_events: Receiver<InputEvent>) {
    thread::spawn(move || {
        let mut app = create_app(buffer, input_events);
        info!("[Bevy] Running render loop...");
        app.run();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bevy::components::{CameraController, SceneBody};

    #[test]
    fn queued_input_drives_the_scene() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut app = App::new();
        app.add_plugins(ScenePlugin).insert_resource(InputEventReceiver(rx));

        let earth = app
            .world_mut()
            .spawn((SceneBody::Earth, Transform::default()))
            .id();
        let camera = app
            .world_mut()
            .spawn((CameraController, Transform::from_xyz(0.0, 0.0, 15.0)))
            .id();

        // Grab the Earth and drag it 100 px to the right, zoom out
        tx.send(InputEvent::PointerDown { x: 0.0, y: 0.0 }).unwrap();
        tx.send(InputEvent::PointerMove { x: 100.0, y: 0.0 }).unwrap();
        tx.send(InputEvent::Wheel { delta_y: 40.0 }).unwrap();
        app.update();

        let scene = app.world().resource::<SceneStateRes>();
        assert!((scene.earth.yaw - 0.5).abs() < 1e-4);
        assert!((scene.camera_distance.get() - 19.0).abs() < 1e-4);

        let earth = app.world().get::<Transform>(earth).unwrap();
        assert!(earth.rotation.angle_between(Quat::from_rotation_y(0.5)) < 1e-3);
        let camera = app.world().get::<Transform>(camera).unwrap();
        assert!((camera.translation.z - 19.0).abs() < 1e-4);
    }

    #[test]
    fn runs_without_an_input_queue() {
        let mut app = App::new();
        app.add_plugins(ScenePlugin);
        for _ in 0..100 {
            app.update();
        }
        let scene = app.world().resource::<SceneStateRes>();
        assert!((scene.earth.yaw - 0.5).abs() < 1e-4);
    }
}
