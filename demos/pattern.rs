/**
 * ============================================================================
 * PATTERN DEMO
 * ============================================================================
 *
 * PURPOSE: Drive a recording session from a synthetic pattern animator
 *
 * Draws an alternating stripe pattern on a 600x600 in-memory surface,
 * records a short run, and streams the frames to a collector endpoint.
 * Pass the endpoint URL as the first argument to override the default.
 *
 * Run with: cargo run --example pattern [-- http://host:port/api/imageseq]
 *
 * ============================================================================
 */

use framecast::{
    ChannelFactory, CollectorConfig, DrawableSurface, PixelSurface, RecordingSession,
    SurfaceRegistry,
};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::time::{Duration, sleep};

#[tokio::main]
async fn main() {
    let endpoint_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| CollectorConfig::default().endpoint_url);

    let registry = Arc::new(SurfaceRegistry::new());
    let surface = Arc::new(PixelSurface::new(600, 600));
    registry.register("canvas", surface.clone());

    let config = CollectorConfig {
        endpoint_url,
        ..Default::default()
    };
    let factory = match ChannelFactory::new(config, Handle::current()) {
        Ok(factory) => factory,
        Err(e) => {
            eprintln!("Cannot start: {}", e);
            return;
        }
    };

    let mut session = RecordingSession::new(registry, "canvas", factory);
    session.start();
    println!("Recording session {}", session.session_id());

    let mut handles = Vec::new();
    let mut count = 1u32;
    for it in 0..9u32 {
        draw_pattern(&surface, count, it);
        if let Some(handle) = session.on_tick() {
            handles.push(handle);
        }
        count = if count * 2 > 256 { 1 } else { count * 2 };
        sleep(Duration::from_millis(33)).await;
    }
    session.stop();

    let total = handles.len();
    let mut delivered = 0usize;
    for handle in handles {
        match handle.wait().await {
            Ok(()) => delivered += 1,
            Err(e) => eprintln!("{}", e),
        }
    }
    println!("{}/{} frames delivered", delivered, total);
}

// Alternating band pattern: horizontal bands on even iterations, vertical on odd
fn draw_pattern(surface: &PixelSurface, count: u32, it: u32) {
    let (width, height) = surface.dimensions();
    surface.fill([0, 0, 0, 255]);

    for j in 0..count {
        if (j + it) % 2 == 0 {
            if it % 2 == 0 {
                surface.fill_rect(
                    0,
                    j * height / count,
                    width,
                    height / count,
                    [255, 255, 255, 255],
                );
            } else {
                surface.fill_rect(
                    j * width / count,
                    0,
                    width / count,
                    height,
                    [255, 255, 255, 255],
                );
            }
        }
    }
}
