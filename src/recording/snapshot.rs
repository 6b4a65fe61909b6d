/**
 * ============================================================================
 * FRAME SNAPSHOT MODULE
 * ============================================================================
 *
 * PURPOSE: Capture a drawable surface's current pixels as an encodable payload
 *
 * CAPTURE FLOW:
 * 1. Resolve the selector against the surface registry
 * 2. Read RGBA8 pixels and validate against the surface dimensions
 * 3. PNG-encode the pixel data
 * 4. Wrap the PNG bytes as a base64 data URL
 *
 * Capture is synchronous and side-effect free: the surface is only read,
 * and the encoding is deterministic for identical pixel content.
 *
 * ============================================================================
 */

use crate::recording::types::{ImageDataFormat, RecorderError};
use crate::surface::SurfaceRegistry;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// Prefix for text-encoded PNG payloads
const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/**
 * Self-contained, encodable capture of one frame
 * Pairs the encoded payload with the surface dimensions at capture time
 */
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub width: u32,
    pub height: u32,
    pub format: ImageDataFormat,
    pub data: String,
}

/**
 * Capture the surface registered under `selector`
 *
 * Fails with SurfaceNotFound when the selector resolves to nothing, and with
 * CaptureFailed when the surface returns a pixel buffer that does not match
 * its dimensions or cannot be PNG-encoded. Both are per-frame errors: the
 * caller skips the frame and keeps ticking.
 */
pub fn capture(registry: &SurfaceRegistry, selector: &str) -> Result<FrameSnapshot, RecorderError> {
    let surface = registry
        .resolve(selector)
        .ok_or_else(|| RecorderError::SurfaceNotFound {
            selector: selector.to_string(),
        })?;

    let (width, height) = surface.dimensions();
    let pixels = surface.read_pixels();

    let expected = width as usize * height as usize * 4;
    if width == 0 || height == 0 || pixels.len() != expected {
        return Err(RecorderError::CaptureFailed {
            message: format!(
                "surface '{}' returned {} bytes for {}x{} RGBA (expected {})",
                selector,
                pixels.len(),
                width,
                height,
                expected
            ),
        });
    }

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| RecorderError::CaptureFailed {
            message: format!("PNG encoding failed for '{}': {}", selector, e),
        })?;

    log::debug!(
        "Captured '{}': {}x{}, {} PNG bytes",
        selector,
        width,
        height,
        png.len()
    );

    Ok(FrameSnapshot {
        width,
        height,
        format: ImageDataFormat::DataUrl,
        data: format!("{}{}", DATA_URL_PREFIX, BASE64.encode(&png)),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawableSurface, PixelSurface};
    use std::sync::Arc;

    // Surface whose pixel buffer disagrees with its dimensions
    struct BrokenSurface;

    impl DrawableSurface for BrokenSurface {
        fn dimensions(&self) -> (u32, u32) {
            (8, 8)
        }

        fn read_pixels(&self) -> Vec<u8> {
            vec![0u8; 16]
        }
    }

    #[test]
    fn test_capture_missing_surface() {
        let registry = SurfaceRegistry::new();
        let result = capture(&registry, "canvas");

        match result {
            Err(RecorderError::SurfaceNotFound { selector }) => {
                assert_eq!(selector, "canvas");
            }
            other => panic!("expected SurfaceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_capture_broken_surface() {
        let registry = SurfaceRegistry::new();
        registry.register("canvas", Arc::new(BrokenSurface));

        let result = capture(&registry, "canvas");
        assert!(matches!(result, Err(RecorderError::CaptureFailed { .. })));
    }

    #[test]
    fn test_capture_solid_color_round_trip() {
        let registry = SurfaceRegistry::new();
        let surface = Arc::new(PixelSurface::new(8, 6));
        surface.fill([255, 0, 0, 255]);
        registry.register("canvas", surface);

        let snapshot = capture(&registry, "canvas").unwrap();
        assert_eq!(snapshot.width, 8);
        assert_eq!(snapshot.height, 6);
        assert_eq!(snapshot.format, ImageDataFormat::DataUrl);
        assert!(snapshot.data.starts_with(DATA_URL_PREFIX));

        // Decode the payload the way a downstream consumer would
        let encoded = snapshot.data.strip_prefix(DATA_URL_PREFIX).unwrap();
        let png = BASE64.decode(encoded).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();

        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 6);
        for pixel in decoded.pixels() {
            assert_eq!(pixel.0, [255, 0, 0, 255]);
        }
    }

    #[test]
    fn test_capture_is_deterministic_for_identical_content() {
        let registry = SurfaceRegistry::new();
        let surface = Arc::new(PixelSurface::new(16, 16));
        surface.fill([10, 20, 30, 255]);
        surface.fill_rect(4, 4, 8, 8, [200, 100, 50, 255]);
        registry.register("canvas", surface);

        let first = capture(&registry, "canvas").unwrap();
        let second = capture(&registry, "canvas").unwrap();
        assert_eq!(first.data, second.data);
    }

    #[test]
    fn test_capture_does_not_mutate_surface() {
        let registry = SurfaceRegistry::new();
        let surface = Arc::new(PixelSurface::new(4, 4));
        surface.fill([9, 9, 9, 255]);
        let before = surface.read_pixels();

        registry.register("canvas", surface.clone());
        let _ = capture(&registry, "canvas").unwrap();

        assert_eq!(surface.read_pixels(), before);
    }
}
