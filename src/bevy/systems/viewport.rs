//! Viewport resize system
//!
//! When the webview reports a new size, the offscreen target is resized and
//! its CPU copy buffer recreated. Bevy recomputes the camera's aspect ratio
//! from the new target size on its own.

use bevy::{prelude::*, render::renderer::RenderDevice};

use crate::bevy::plugins::ImageCopier;
use crate::bevy::resources::{RenderSize, RenderTargetHandle};

/// Resize the render target to match `RenderSize`
pub fn resize_render_target(
    render_size: Res<RenderSize>,
    target: Option<Res<RenderTargetHandle>>,
    render_device: Option<Res<RenderDevice>>,
    mut images: ResMut<Assets<Image>>,
    mut copiers: Query<&mut ImageCopier>,
) {
    let (Some(target), Some(render_device)) = (target, render_device) else {
        return;
    };
    let Some(image) = images.get_mut(&target.0) else {
        return;
    };

    let extent = render_size.extent();
    if image.texture_descriptor.size == extent {
        return;
    }

    if image.data.is_some() {
        image.resize(extent);
    } else {
        image.texture_descriptor.size = extent;
    }

    for mut copier in copiers.iter_mut() {
        *copier = ImageCopier::new(target.0.clone(), extent, &render_device);
    }

    info!(
        "[Scene] Render target resized to {}x{}",
        extent.width, extent.height
    );
}
