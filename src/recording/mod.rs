/**
 * ============================================================================
 * RECORDING MODULE
 * ============================================================================
 *
 * PURPOSE: Frame capture pipeline driven by an external render loop
 *
 * SUBMODULES:
 * - types: FrameEnvelope wire record and the recorder error taxonomy
 * - snapshot: Surface pixel capture and PNG/data-URL encoding
 * - session: Recording state machine and per-tick orchestration
 *
 * ARCHITECTURE:
 * The render loop owns the clock. On each tick the session decides whether
 * recording is active, captures the registered surface, wraps the snapshot
 * in an envelope carrying the session id and frame index, and hands it to a
 * transmission channel for asynchronous delivery. The ticking thread never
 * waits on the network.
 *
 * ============================================================================
 */

pub mod session;
pub mod snapshot;
pub mod types;
