//! Orbit and transform systems
//!
//! `advance_scene` moves the scene state forward one tick; the transform
//! systems then copy the result onto the entities the renderer draws.

use bevy::prelude::*;

use crate::bevy::components::{CameraController, SceneBody};
use crate::bevy::resources::SceneStateRes;
use crate::controls::SceneState;

/// Advance the scene state by one tick
pub fn advance_scene(mut scene: ResMut<SceneStateRes>) {
    scene.advance();
}

/// Write body rotations and the moon's position
pub fn apply_body_transforms(
    scene: Res<SceneStateRes>,
    mut bodies: Query<(&SceneBody, &mut Transform)>,
) {
    for (body, mut transform) in bodies.iter_mut() {
        write_body_transform(&scene, *body, &mut transform);
    }
}

/// Keep the camera on +Z at the current zoom distance
pub fn apply_camera_distance(
    scene: Res<SceneStateRes>,
    mut camera_query: Query<&mut Transform, (With<CameraController>, Without<SceneBody>)>,
) {
    for mut transform in camera_query.iter_mut() {
        transform.translation.z = scene.camera_distance.get();
    }
}

fn write_body_transform(state: &SceneState, body: SceneBody, transform: &mut Transform) {
    match body {
        SceneBody::Earth => transform.rotation = state.earth.to_quat(),
        SceneBody::Atmosphere => transform.rotation = state.atmosphere.to_quat(),
        SceneBody::Clouds => transform.rotation = Quat::from_rotation_y(state.cloud_yaw),
        SceneBody::Moon => {
            transform.translation = state.moon_position;
            transform.rotation = Quat::from_rotation_y(state.moon_spin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{Direction, InputEvent};

    const EPS: f32 = 1e-4;

    fn scene_app() -> App {
        let mut app = App::new();
        app.init_resource::<SceneStateRes>().add_systems(
            Update,
            (advance_scene, (apply_body_transforms, apply_camera_distance)).chain(),
        );
        app
    }

    fn spawn_body(app: &mut App, body: SceneBody) -> Entity {
        app.world_mut().spawn((body, Transform::default())).id()
    }

    #[test]
    fn moon_follows_held_direction() {
        let mut app = scene_app();
        let moon = spawn_body(&mut app, SceneBody::Moon);
        app.world_mut()
            .resource_mut::<SceneStateRes>()
            .dispatch(&InputEvent::Button {
                direction: Direction::Up,
                pressed: true,
            });

        for _ in 0..10 {
            app.update();
        }

        let transform = app.world().get::<Transform>(moon).unwrap();
        assert!((transform.translation.y - 1.391).abs() < 1e-3);
        assert!(transform.translation.z.abs() < EPS);
        let expected_spin = Quat::from_rotation_y(0.1);
        assert!(transform.rotation.angle_between(expected_spin) < 1e-3);
    }

    #[test]
    fn earth_and_atmosphere_turn_together() {
        let mut app = scene_app();
        let earth = spawn_body(&mut app, SceneBody::Earth);
        let atmosphere = spawn_body(&mut app, SceneBody::Atmosphere);
        let clouds = spawn_body(&mut app, SceneBody::Clouds);

        for _ in 0..100 {
            app.update();
        }

        let earth = *app.world().get::<Transform>(earth).unwrap();
        let atmosphere = *app.world().get::<Transform>(atmosphere).unwrap();
        let clouds = *app.world().get::<Transform>(clouds).unwrap();
        assert!(earth.rotation.angle_between(Quat::from_rotation_y(0.5)) < 1e-3);
        assert!(earth.rotation.angle_between(atmosphere.rotation) < EPS);
        assert!(clouds.rotation.angle_between(Quat::from_rotation_y(0.2)) < 1e-3);
    }

    #[test]
    fn camera_tracks_zoom() {
        let mut app = scene_app();
        let camera = app
            .world_mut()
            .spawn((CameraController, Transform::from_xyz(0.0, 0.0, 15.0)))
            .id();
        app.world_mut()
            .resource_mut::<SceneStateRes>()
            .dispatch(&InputEvent::Wheel { delta_y: -50.0 });
        app.update();

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert!((transform.translation.z - 10.0).abs() < EPS);
        assert_eq!(transform.translation.x, 0.0);
    }
}
