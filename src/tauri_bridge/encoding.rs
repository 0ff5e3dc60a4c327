//! Frame encodings for the webview
//!
//! JPEG for the `frame://` protocol (~50-100KB instead of megabytes of raw
//! RGBA) and Base64 RGBA for the `get_frame` command.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{codecs::jpeg::JpegEncoder, ImageBuffer, ImageEncoder, Rgba};

use super::error::BridgeError;
use super::shared_state::{Frame, FrameResponse};

/// Compress a frame to JPEG at the given quality
pub fn encode_jpeg(frame: &Frame, quality: u8) -> Result<Vec<u8>, BridgeError> {
    let malformed = || BridgeError::MalformedFrame {
        width: frame.width,
        height: frame.height,
    };
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(frame.width, frame.height, frame.rgba.clone())
            .ok_or_else(malformed)?;

    // JPEG has no alpha channel
    let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();

    let mut jpeg_data = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_data, quality).write_image(
        rgb_img.as_raw(),
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(jpeg_data)
}

/// Base64-encode a frame's RGBA pixels
pub fn encode_base64(frame: &Frame) -> FrameResponse {
    FrameResponse {
        data: STANDARD.encode(&frame.rgba),
        width: frame.width,
        height: frame.height,
        sequence: frame.sequence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(width: u32, height: u32) -> Frame {
        let rgba = (0..width * height)
            .flat_map(|i| {
                let v = if i % 2 == 0 { 0 } else { 255 };
                [v, v, v, 255]
            })
            .collect();
        Frame {
            width,
            height,
            sequence: 9,
            rgba,
        }
    }

    #[test]
    fn jpeg_has_soi_marker() {
        let jpeg = encode_jpeg(&checkerboard(16, 8), 85).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn short_buffer_is_malformed() {
        let mut frame = checkerboard(4, 4);
        frame.rgba.truncate(10);
        assert!(matches!(
            encode_jpeg(&frame, 85),
            Err(BridgeError::MalformedFrame {
                width: 4,
                height: 4
            })
        ));
    }

    #[test]
    fn base64_decodes_to_the_pixels() {
        let frame = checkerboard(3, 2);
        let response = encode_base64(&frame);
        assert_eq!(response.sequence, 9);
        assert_eq!((response.width, response.height), (3, 2));
        assert_eq!(STANDARD.decode(response.data).unwrap(), frame.rgba);
    }
}
