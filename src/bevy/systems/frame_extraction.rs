//! Frame extraction system
//!
//! This module takes rendered frames coming back from the GPU and publishes
//! the latest one to the shared frame slot the webview reads from.

use bevy::{prelude::*, render::renderer::RenderDevice};

use crate::bevy::plugins::image_copy::BYTES_PER_PIXEL;
use crate::bevy::resources::{
    FrameBufferRes, FrameCount, MainWorldReceiver, PreRollFrames, RenderSize,
};
use crate::tauri_bridge::shared_state::Frame;

/// Publish the most recent frame from the render pipeline
pub fn extract_and_publish_frame(
    receiver: Res<MainWorldReceiver>,
    buffer: Option<Res<FrameBufferRes>>,
    render_size: Res<RenderSize>,
    mut count: ResMut<FrameCount>,
    mut pre_roll: ResMut<PreRollFrames>,
) {
    let Some(b) = buffer else { return };

    // Wait for scene to be fully rendered
    if pre_roll.0 > 0 {
        while receiver.try_recv().is_ok() {}
        pre_roll.0 -= 1;
        if pre_roll.0 % 10 == 0 && pre_roll.0 > 0 {
            debug!("[Frame] Pre-roll frames remaining: {}", pre_roll.0);
        }
        return;
    }

    // Keep only the newest frame
    let mut image_data = Vec::new();
    while let Ok(data) = receiver.try_recv() {
        image_data = data;
    }
    if image_data.is_empty() {
        return;
    }

    // Frames copied before a resize no longer match the target and are dropped
    let Some(rgba) = remove_row_padding(&image_data, render_size.width, render_size.height)
    else {
        return;
    };

    count.0 = count.0.wrapping_add(1);
    let frame = Frame {
        width: render_size.width,
        height: render_size.height,
        sequence: count.0,
        rgba,
    };
    if let Err(err) = b.0.publish(frame) {
        warn!("[Frame] Could not publish frame {}: {err}", count.0);
        return;
    }

    if count.0 == 1 {
        info!(
            "[Frame] First frame published ({}x{})",
            render_size.width, render_size.height
        );
    }
}

/// Remove GPU buffer row padding alignment, returning pure RGBA data.
///
/// Returns `None` when `data` does not hold exactly one padded
/// `width`x`height` image.
pub fn remove_row_padding(data: &[u8], width: u32, height: u32) -> Option<Vec<u8>> {
    if data.is_empty() {
        return None;
    }

    let row_bytes = width as usize * BYTES_PER_PIXEL;
    let aligned_row_bytes = RenderDevice::align_copy_bytes_per_row(row_bytes);
    if data.len() != aligned_row_bytes * height as usize {
        return None;
    }

    let rgba_data = if row_bytes == aligned_row_bytes {
        // No padding, return as-is
        data.to_vec()
    } else {
        data.chunks(aligned_row_bytes)
            .take(height as usize)
            .flat_map(|row| &row[..row_bytes.min(row.len())])
            .copied()
            .collect()
    };

    Some(rgba_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligned_rows_pass_through() {
        // 64 px * 4 bytes = 256, already aligned
        let data: Vec<u8> = (0..256 * 2).map(|i| i as u8).collect();
        assert_eq!(remove_row_padding(&data, 64, 2), Some(data.clone()));
    }

    #[test]
    fn padding_is_stripped_per_row() {
        let width = 10;
        let aligned = RenderDevice::align_copy_bytes_per_row(width * BYTES_PER_PIXEL);
        assert_eq!(aligned, 256);

        let mut data = vec![0xEE; aligned * 3];
        for row in 0..3 {
            for byte in 0..width * BYTES_PER_PIXEL {
                data[row * aligned + byte] = row as u8;
            }
        }

        let rgba = remove_row_padding(&data, width as u32, 3).unwrap();
        assert_eq!(rgba.len(), width * BYTES_PER_PIXEL * 3);
        assert!(rgba[..40].iter().all(|&b| b == 0));
        assert!(rgba[80..].iter().all(|&b| b == 2));
    }

    #[test]
    fn mismatched_sizes_are_rejected() {
        assert_eq!(remove_row_padding(&[], 10, 10), None);
        assert_eq!(remove_row_padding(&vec![0; 256 * 3], 64, 2), None);
    }
}
