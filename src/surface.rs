/**
 * ============================================================================
 * SURFACE MODULE
 * ============================================================================
 *
 * PURPOSE: Drawable surface abstraction and selector-based registry
 *
 * FUNCTIONALITY:
 * - DrawableSurface: pixel source contract implemented by rendering backends
 * - PixelSurface: minimal in-memory RGBA surface for demos and tests
 * - SurfaceRegistry: resolve a selector string to exactly one surface
 *
 * The rendering logic that draws into a surface lives entirely outside this
 * crate; the recorder only ever reads pixels through this boundary.
 *
 * ============================================================================
 */

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/**
 * Pixel source contract for frame capture
 * Implemented by rendering backends that expose their output for recording
 */
pub trait DrawableSurface: Send + Sync {
    // Current pixel dimensions (width, height)
    fn dimensions(&self) -> (u32, u32);

    // Tightly packed RGBA8 pixel data, row-major, width * height * 4 bytes
    fn read_pixels(&self) -> Vec<u8>;
}

/**
 * In-memory RGBA8 surface
 * Concrete surface for callers without a GPU-backed canvas (demos, tests)
 */
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: RwLock<Vec<u8>>,
}

impl PixelSurface {
    // Create a surface filled with opaque black
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0u8; (width * height * 4) as usize];
        for pixel in pixels.chunks_exact_mut(4) {
            pixel[3] = 255;
        }
        Self {
            width,
            height,
            pixels: RwLock::new(pixels),
        }
    }

    // Fill the whole surface with one color
    pub fn fill(&self, rgba: [u8; 4]) {
        let mut pixels = self.pixels.write().unwrap();
        for pixel in pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    // Fill an axis-aligned rectangle, clipped to the surface bounds
    pub fn fill_rect(&self, x: u32, y: u32, w: u32, h: u32, rgba: [u8; 4]) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        let mut pixels = self.pixels.write().unwrap();
        for row in y.min(self.height)..y_end {
            for col in x.min(self.width)..x_end {
                let offset = ((row * self.width + col) * 4) as usize;
                pixels[offset..offset + 4].copy_from_slice(&rgba);
            }
        }
    }

    // Write a single pixel; out-of-bounds writes are ignored
    pub fn set_pixel(&self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let mut pixels = self.pixels.write().unwrap();
        pixels[offset..offset + 4].copy_from_slice(&rgba);
    }
}

impl DrawableSurface for PixelSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn read_pixels(&self) -> Vec<u8> {
        self.pixels.read().unwrap().clone()
    }
}

/**
 * Selector-based surface registry
 * The renderer registers its surfaces; the recorder resolves them per capture
 * Shared between threads via Arc, no global state
 */
pub struct SurfaceRegistry {
    surfaces: RwLock<HashMap<String, Arc<dyn DrawableSurface>>>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self {
            surfaces: RwLock::new(HashMap::new()),
        }
    }

    /**
     * Register a surface under a selector
     * Replaces any surface previously registered under the same selector
     */
    pub fn register(&self, selector: impl Into<String>, surface: Arc<dyn DrawableSurface>) {
        let selector = selector.into();
        log::debug!("Registering surface '{}'", selector);
        self.surfaces.write().unwrap().insert(selector, surface);
    }

    /**
     * Remove a surface from the registry
     * Returns true if a surface was registered under the selector
     */
    pub fn unregister(&self, selector: &str) -> bool {
        let removed = self.surfaces.write().unwrap().remove(selector).is_some();
        if removed {
            log::debug!("Unregistered surface '{}'", selector);
        }
        removed
    }

    /**
     * Resolve a selector to its surface
     * Returns None if no surface is currently registered under the selector
     */
    pub fn resolve(&self, selector: &str) -> Option<Arc<dyn DrawableSurface>> {
        self.surfaces.read().unwrap().get(selector).cloned()
    }

    // Number of registered surfaces
    pub fn len(&self) -> usize {
        self.surfaces.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.read().unwrap().is_empty()
    }
}

impl Default for SurfaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
