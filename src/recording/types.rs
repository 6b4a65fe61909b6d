/**
 * ============================================================================
 * RECORDING TYPES MODULE
 * ============================================================================
 *
 * PURPOSE: Data structures for the frame capture and transmission pipeline
 *
 * TYPES:
 * - ImageDataFormat: Payload representation enum (wire-encoded as 0/1)
 * - FrameEnvelope: One frame's payload plus addressing/sequencing metadata
 * - RecorderError: Error taxonomy for capture and delivery
 *
 * ============================================================================
 */

use crate::recording::snapshot::FrameSnapshot;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// File extension declared on every envelope
pub const FRAME_EXT: &str = "png";

// =============================================================================
// Error Types
// =============================================================================

/**
 * Recorder error taxonomy
 * Capture-time errors are per-frame and non-fatal to the session;
 * delivery errors are reported out-of-band by the transmission channel
 */
#[derive(Debug, Clone)]
pub enum RecorderError {
    /// No surface is currently registered under the requested selector
    SurfaceNotFound { selector: String },

    /// The surface produced pixel data that could not be encoded
    CaptureFailed { message: String },

    /// Envelope construction rejected its inputs
    InvalidEnvelope { message: String },

    /// The transmission attempt failed (transport error or non-success response)
    DeliveryFailed { message: String },
}

impl std::fmt::Display for RecorderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecorderError::SurfaceNotFound { selector } => {
                write!(f, "No surface found for selector '{}'", selector)
            }
            RecorderError::CaptureFailed { message } => {
                write!(f, "Capture failed: {}", message)
            }
            RecorderError::InvalidEnvelope { message } => {
                write!(f, "Invalid envelope: {}", message)
            }
            RecorderError::DeliveryFailed { message } => {
                write!(f, "Delivery failed: {}", message)
            }
        }
    }
}

impl std::error::Error for RecorderError {}

// =============================================================================
// Payload Format
// =============================================================================

/**
 * Payload representation declared to the collector
 * Serialized as the bare integers 0 (raw) / 1 (data URL) on the wire
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDataFormat {
    // Direct binary-capable representation
    Raw = 0,
    // Textual base64 data URL representation
    DataUrl = 1,
}

impl ImageDataFormat {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ImageDataFormat::Raw),
            1 => Some(ImageDataFormat::DataUrl),
            _ => None,
        }
    }
}

impl Serialize for ImageDataFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for ImageDataFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        ImageDataFormat::from_u8(value)
            .ok_or_else(|| de::Error::custom(format!("invalid data format: {}", value)))
    }
}

// =============================================================================
// Frame Envelope
// =============================================================================

/**
 * One frame's payload plus its addressing and sequencing metadata
 * Created once per capture, handed to a transmission channel, never mutated
 */
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameEnvelope {
    // Frame index assigned at capture time, starting at 0 per session
    pub frame: u64,

    // Source surface pixel dimensions at capture time
    pub width: u32,
    pub height: u32,

    // How `data` should be interpreted downstream
    pub data_format: ImageDataFormat,

    // Encoded image payload
    pub data: String,

    // Session id, used as the grouping folder downstream
    pub foldername: String,

    // Per-frame file label, unique within the session
    pub filename: String,

    // Image format extension, always "png"
    pub ext: String,
}

impl FrameEnvelope {
    /**
     * Build an envelope from a captured snapshot
     * Pure: no I/O; fails only when the session id is empty
     */
    pub fn new(
        session_id: &str,
        frame_index: u64,
        snapshot: FrameSnapshot,
    ) -> Result<Self, RecorderError> {
        if session_id.is_empty() {
            return Err(RecorderError::InvalidEnvelope {
                message: "session id must not be empty".to_string(),
            });
        }

        Ok(Self {
            frame: frame_index,
            width: snapshot.width,
            height: snapshot.height,
            data_format: snapshot.format,
            data: snapshot.data,
            foldername: session_id.to_string(),
            filename: format!("frame_{:06}", frame_index),
            ext: FRAME_EXT.to_string(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
