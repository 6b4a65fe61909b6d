/**
 * ============================================================================
 * RECORDING SESSION MODULE
 * ============================================================================
 *
 * PURPOSE: Recording state machine and per-tick capture orchestration
 *
 * STATE MACHINE:
 * - Idle -> Recording: fresh session id, frame counter reset to 0
 * - Recording -> Idle: flag flip only; in-flight deliveries complete alone
 *
 * On each eligible tick the session captures the registered surface, wraps
 * the snapshot in an envelope carrying the session id and the current frame
 * index, dispatches it through a fresh transmission channel, and increments
 * the counter. Frame indices are assigned at capture time, never at
 * confirmed delivery, so induced latency or failed sends cannot reorder or
 * repeat them. Capture failures skip the tick without consuming an index
 * and without stopping the session.
 *
 * ============================================================================
 */

use crate::collector::channel::{ChannelFactory, DeliveryHandle};
use crate::recording::snapshot;
use crate::recording::types::FrameEnvelope;
use crate::surface::SurfaceRegistry;
use chrono::Utc;
use std::sync::Arc;

/**
 * One continuous recording run over a selected surface
 * Ticks are supplied by the external render loop; the session never drives
 * its own clock and never blocks the ticking thread on the network
 */
pub struct RecordingSession {
    registry: Arc<SurfaceRegistry>,
    selector: String,
    factory: ChannelFactory,
    active: bool,
    session_id: String,
    frame_index: u64,
}

impl RecordingSession {
    /**
     * Create a session in the Idle state
     * The destination and runtime are carried by the factory; the surface is
     * looked up per tick so it may appear or change while recording
     */
    pub fn new(
        registry: Arc<SurfaceRegistry>,
        selector: impl Into<String>,
        factory: ChannelFactory,
    ) -> Self {
        Self {
            registry,
            selector: selector.into(),
            factory,
            active: false,
            session_id: String::new(),
            frame_index: 0,
        }
    }

    /**
     * Flip between Idle and Recording
     * Returns true when the session is now recording
     */
    pub fn toggle(&mut self) -> bool {
        if self.active {
            self.stop();
        } else {
            self.start();
        }
        self.active
    }

    /**
     * Begin a new recording run
     * Generates a fresh session id and resets the frame counter
     */
    pub fn start(&mut self) {
        self.session_id = generate_session_id();
        self.frame_index = 0;
        self.active = true;
        log::info!(
            "Recording started (session {}, surface '{}')",
            self.session_id,
            self.selector
        );
    }

    /**
     * Stop recording
     * Deliveries dispatched before the stop are left to complete
     */
    pub fn stop(&mut self) {
        if self.active {
            self.active = false;
            log::info!(
                "Recording stopped (session {}, {} frames dispatched)",
                self.session_id,
                self.frame_index
            );
        }
    }

    pub fn is_recording(&self) -> bool {
        self.active
    }

    // Identifier of the current (or most recent) run; empty before first start
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    // Index the next captured frame will be assigned
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /**
     * Process one render tick
     *
     * Returns the delivery handle for the dispatched frame, or None when the
     * session is idle or the frame was skipped. Dropping the handle is
     * fire-and-forget; failures are still logged by the delivery task.
     */
    pub fn on_tick(&mut self) -> Option<DeliveryHandle> {
        if !self.active {
            return None;
        }

        let snapshot = match snapshot::capture(&self.registry, &self.selector) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // Per-frame failure: skip the tick, keep the session running.
                // The index is reused by the next successful capture.
                log::warn!("Frame capture skipped: {}", e);
                return None;
            }
        };

        let envelope = match FrameEnvelope::new(&self.session_id, self.frame_index, snapshot) {
            Ok(envelope) => envelope,
            Err(e) => {
                log::error!("Envelope construction rejected: {}", e);
                return None;
            }
        };

        let handle = self.factory.open().send(envelope);

        // Assigned at dispatch, regardless of eventual delivery outcome
        self.frame_index += 1;

        Some(handle)
    }
}

// Generate a unique session id, used as the grouping folder downstream
fn generate_session_id() -> String {
    let timestamp = Utc::now().timestamp();
    let random_suffix: String = (0..6)
        .map(|_| {
            let byte: u8 = rand::random();
            format!("{:02x}", byte)
        })
        .collect();
    format!("rec_{}_{}", timestamp, random_suffix)
}

// =============================================================================
// Tests
// =============================================================================
