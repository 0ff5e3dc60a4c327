//! Texture load monitoring
//!
//! A texture that fails to load is logged once and its material drops the
//! texture, so the body renders in its plain base color instead of not at
//! all. Failed loads are never retried.

use bevy::{
    asset::{AssetEvent, AssetLoadFailedEvent},
    pbr::StandardMaterial,
    prelude::*,
};

use crate::bevy::resources::SceneTextures;

/// React to finished and failed texture loads
pub fn handle_texture_loads(
    mut loaded: MessageReader<AssetEvent<Image>>,
    mut failed: MessageReader<AssetLoadFailedEvent<Image>>,
    textures: Option<Res<SceneTextures>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(textures) = textures else {
        return;
    };

    for event in loaded.read() {
        if let AssetEvent::LoadedWithDependencies { id } = event {
            for binding in textures.0.iter().filter(|b| b.texture.id() == *id) {
                info!("[Scene] {} texture loaded", binding.label);
            }
        }
    }

    for event in failed.read() {
        for binding in textures.0.iter().filter(|b| b.texture.id() == event.id) {
            warn!(
                "[Scene] Failed to load {} texture {}: {}; rendering untextured",
                binding.label, event.path, event.error
            );
            if let Some(material) = materials.get_mut(&binding.material) {
                strip_texture(material, event.id);
            }
        }
    }
}

/// Remove `failed` from the material's base color slot.
/// Returns `true` if the material referenced it.
pub fn strip_texture(material: &mut StandardMaterial, failed: AssetId<Image>) -> bool {
    let uses_failed = material
        .base_color_texture
        .as_ref()
        .is_some_and(|texture| texture.id() == failed);
    if uses_failed {
        material.base_color_texture = None;
    }
    uses_failed
}
