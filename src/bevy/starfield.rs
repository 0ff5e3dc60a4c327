//! Starfield background mesh

use std::f32::consts::TAU;

use bevy::{
    asset::RenderAssetUsages, prelude::*, render::render_resource::PrimitiveTopology,
};
use rand::Rng;

use crate::config::stars::{MIN_RADIUS, RADIUS_SPREAD};

/// Scatter `count` points uniformly over directions, at radii in
/// `[MIN_RADIUS, MIN_RADIUS + RADIUS_SPREAD)`.
pub fn star_positions<R: Rng>(rng: &mut R, count: usize) -> Vec<[f32; 3]> {
    (0..count)
        .map(|_| {
            let radius = MIN_RADIUS + rng.random::<f32>() * RADIUS_SPREAD;
            let theta = rng.random::<f32>() * TAU;
            // acos(2v - 1) keeps points from bunching at the poles
            let phi = (2.0 * rng.random::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
            [
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            ]
        })
        .collect()
}

/// Point-list mesh for the given star positions
pub fn starfield_mesh(positions: Vec<[f32; 3]>) -> Mesh {
    let normals: Vec<[f32; 3]> = positions
        .iter()
        .map(|p| Vec3::from_array(*p).normalize_or_zero().to_array())
        .collect();

    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
}
