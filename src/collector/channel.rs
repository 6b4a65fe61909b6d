/**
 * ============================================================================
 * TRANSMISSION CHANNEL MODULE
 * ============================================================================
 *
 * PURPOSE: Deliver one frame envelope per channel without blocking the caller
 *
 * CHANNEL LIFECYCLE:
 * 1. The factory opens a fresh channel for each transmission
 * 2. send() consumes the channel and the envelope and spawns a delivery task
 * 3. The task PUTs the envelope as JSON to the configured endpoint
 * 4. The outcome is reported through a oneshot, then the task drops itself
 *
 * The caller may await the returned DeliveryHandle or drop it; dropping is
 * fire-and-forget and never blocks or cancels the in-flight send. Failures
 * are additionally logged from the delivery task so they are observable even
 * when nobody holds the handle.
 *
 * ============================================================================
 */

use crate::collector::config::CollectorConfig;
use crate::recording::types::{FrameEnvelope, RecorderError};
use reqwest::Client;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use uuid::Uuid;

/**
 * Factory for per-transmission channels
 * Owns the shared HTTP connection pool, the destination address, and the
 * runtime handle delivery tasks are spawned on. Created once, typically by
 * the recording session; the ticking thread itself need not be a runtime
 * thread.
 */
pub struct ChannelFactory {
    client: Client,
    endpoint_url: String,
    runtime: Handle,
}

impl ChannelFactory {
    /**
     * Build a factory from validated configuration
     * Fails fast on invalid config or an unusable HTTP client
     */
    pub fn new(config: CollectorConfig, runtime: Handle) -> Result<Self, String> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

        log::info!("Channel factory ready for {}", config.endpoint_url);

        Ok(Self {
            client,
            endpoint_url: config.endpoint_url,
            runtime,
        })
    }

    /**
     * Open a fresh channel for a single transmission
     * Channels share the factory's connection pool but carry no other state
     */
    pub fn open(&self) -> TransmissionChannel {
        TransmissionChannel {
            client: self.client.clone(),
            endpoint_url: self.endpoint_url.clone(),
            runtime: self.runtime.clone(),
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

/**
 * Isolated execution context delivering exactly one envelope
 * send() takes the channel by value, so a channel can never be reused for a
 * second transmission
 */
pub struct TransmissionChannel {
    client: Client,
    endpoint_url: String,
    runtime: Handle,
}

impl TransmissionChannel {
    /**
     * Dispatch the envelope for asynchronous delivery
     *
     * Ownership of the envelope moves into the delivery task; the caller
     * retains no reference to the payload. Returns immediately with a handle
     * the caller may await for the outcome, or drop for fire-and-forget.
     */
    pub fn send(self, envelope: FrameEnvelope) -> DeliveryHandle {
        let TransmissionChannel {
            client,
            endpoint_url,
            runtime,
        } = self;

        let (tx, rx) = oneshot::channel();
        let delivery_id = Uuid::new_v4();
        let frame = envelope.frame;

        log::debug!(
            "Dispatching frame {} of '{}' (delivery {})",
            frame,
            envelope.foldername,
            delivery_id
        );

        runtime.spawn(async move {
            let outcome = deliver(client, endpoint_url, envelope).await;

            match &outcome {
                Ok(()) => log::debug!("Frame {} delivered (delivery {})", frame, delivery_id),
                Err(e) => log::warn!(
                    "Frame {} delivery failed (delivery {}): {}",
                    frame,
                    delivery_id,
                    e
                ),
            }

            // Receiver gone means the caller chose fire-and-forget
            let _ = tx.send(outcome);
        });

        DeliveryHandle { receiver: rx }
    }
}

/**
 * Perform the single PUT request for one envelope
 * Transport errors and non-success statuses both map to DeliveryFailed
 */
async fn deliver(
    client: Client,
    endpoint_url: String,
    envelope: FrameEnvelope,
) -> Result<(), RecorderError> {
    let response = client
        .put(&endpoint_url)
        .json(&envelope)
        .send()
        .await
        .map_err(|e| RecorderError::DeliveryFailed {
            message: format!("request to {} failed: {}", endpoint_url, e),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(RecorderError::DeliveryFailed {
            message: format!("collector returned {} for frame {}", status, envelope.frame),
        });
    }

    Ok(())
}

/**
 * Completion signal for one delivery attempt
 * Dropping the handle detaches from the outcome without cancelling the send
 */
pub struct DeliveryHandle {
    receiver: oneshot::Receiver<Result<(), RecorderError>>,
}

impl DeliveryHandle {
    /**
     * Wait for the delivery attempt to conclude
     */
    pub async fn wait(self) -> Result<(), RecorderError> {
        match self.receiver.await {
            Ok(outcome) => outcome,
            Err(_) => Err(RecorderError::DeliveryFailed {
                message: "delivery task dropped before reporting an outcome".to_string(),
            }),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
