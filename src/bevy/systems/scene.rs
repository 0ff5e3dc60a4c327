//! Scene setup system
//!
//! This module handles the initial setup of the 3D scene: the offscreen
//! camera, Earth with its cloud and atmosphere shells, the moon, the
//! starfield and the lights.

use bevy::{
    asset::Assets,
    camera::RenderTarget,
    core_pipeline::tonemapping::Tonemapping,
    image::Image,
    math::{primitives::Sphere, Vec3},
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
    render::{
        render_resource::{Face, TextureFormat, TextureUsages},
        renderer::RenderDevice,
    },
};

use crate::bevy::components::{CameraController, OffscreenCamera, SceneBody, Starfield};
use crate::bevy::plugins::ImageCopier;
use crate::bevy::resources::{
    RenderSize, RenderTargetHandle, SceneStateRes, SceneTextures, TextureBinding,
};
use crate::bevy::starfield::{star_positions, starfield_mesh};
use crate::config::{camera, earth, moon, stars, textures};

/// Setup the 3D scene with camera, bodies, stars, and lights
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    asset_server: Res<AssetServer>,
    render_device: Res<RenderDevice>,
    render_size: Res<RenderSize>,
    scene: Res<SceneStateRes>,
) {
    info!("[Scene] Setting up scene...");

    let size = render_size.extent();

    // Create render target texture
    let mut render_target_image =
        Image::new_target_texture(size.width, size.height, TextureFormat::bevy_default());
    render_target_image.texture_descriptor.usage |= TextureUsages::COPY_SRC;
    let render_target_image_handle = images.add(render_target_image);

    commands.insert_resource(RenderTargetHandle(render_target_image_handle.clone()));

    // Spawn image copier for GPU-to-CPU transfer
    commands.spawn(ImageCopier::new(
        render_target_image_handle.clone(),
        size,
        &render_device,
    ));

    // Camera on +Z looking at the Earth; ambient light rides along
    commands.spawn((
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(render_target_image_handle.into()),
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: camera::FOV_DEGREES.to_radians(),
            near: camera::NEAR,
            far: camera::FAR,
            ..default()
        }),
        Tonemapping::None,
        Transform::from_xyz(0.0, 0.0, scene.camera_distance.get()).looking_at(Vec3::ZERO, Vec3::Y),
        AmbientLight {
            color: Color::WHITE,
            brightness: 400.0,
            ..default()
        },
        OffscreenCamera,
        CameraController,
    ));

    let sphere = |radius: f32| {
        Sphere::new(radius)
            .mesh()
            .uv(earth::SPHERE_SEGMENTS, earth::SPHERE_SEGMENTS)
    };
    let mut bindings = Vec::new();

    // Earth
    let earth_texture: Handle<Image> = asset_server.load(textures::EARTH);
    let earth_material = materials.add(StandardMaterial {
        base_color_texture: Some(earth_texture.clone()),
        perceptual_roughness: 0.9,
        ..default()
    });
    bindings.push(TextureBinding {
        label: "earth",
        texture: earth_texture,
        material: earth_material.clone(),
    });
    commands.spawn((
        Mesh3d(meshes.add(sphere(earth::RADIUS))),
        MeshMaterial3d(earth_material),
        Transform::default(),
        SceneBody::Earth,
    ));

    // Cloud layer, half transparent
    let cloud_texture: Handle<Image> = asset_server.load(textures::CLOUDS);
    let cloud_material = materials.add(StandardMaterial {
        base_color: Color::WHITE.with_alpha(earth::CLOUD_OPACITY),
        base_color_texture: Some(cloud_texture.clone()),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    bindings.push(TextureBinding {
        label: "clouds",
        texture: cloud_texture,
        material: cloud_material.clone(),
    });
    commands.spawn((
        Mesh3d(meshes.add(sphere(earth::CLOUD_RADIUS))),
        MeshMaterial3d(cloud_material),
        Transform::default(),
        SceneBody::Clouds,
    ));

    // Atmosphere glow: unlit, seen from its inside faces only
    let [r, g, b] = earth::ATMOSPHERE_RGB;
    commands.spawn((
        Mesh3d(meshes.add(sphere(earth::ATMOSPHERE_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(r, g, b).with_alpha(earth::ATMOSPHERE_OPACITY),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            cull_mode: Some(Face::Front),
            ..default()
        })),
        Transform::default(),
        SceneBody::Atmosphere,
    ));

    // Moon
    let moon_texture: Handle<Image> = asset_server.load(textures::MOON);
    let moon_material = materials.add(StandardMaterial {
        base_color_texture: Some(moon_texture.clone()),
        perceptual_roughness: 1.0,
        ..default()
    });
    bindings.push(TextureBinding {
        label: "moon",
        texture: moon_texture,
        material: moon_material.clone(),
    });
    commands.spawn((
        Mesh3d(meshes.add(sphere(moon::RADIUS))),
        MeshMaterial3d(moon_material),
        Transform::from_translation(scene.moon_position),
        SceneBody::Moon,
    ));

    commands.insert_resource(SceneTextures(bindings));

    // Starfield
    let positions = star_positions(&mut rand::rng(), stars::COUNT);
    commands.spawn((
        Mesh3d(meshes.add(starfield_mesh(positions))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Starfield,
    ));

    // Point light
    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            range: 100.0,
            color: Color::WHITE,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 10.0),
    ));

    info!("[Scene] Setup complete ({} stars)", stars::COUNT);
}
