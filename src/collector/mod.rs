/**
 * ============================================================================
 * COLLECTOR MODULE
 * ============================================================================
 *
 * PURPOSE: Asynchronous frame transmission to the remote collection endpoint
 *
 * ARCHITECTURE:
 * - config: Endpoint and timeout configuration with validation
 * - channel: Per-transmission channels spawned off the rendering thread
 *
 * Each transmission runs as an isolated task that owns its envelope, performs
 * one PUT request, reports the outcome through a oneshot, and disposes itself.
 * The collector server implementation is out of scope; only the wire contract
 * (JSON FrameEnvelope body, update-style verb) is owned here.
 *
 * ============================================================================
 */

pub mod channel;
pub mod config;

#[cfg(test)]
pub(crate) mod testserver;
