/**
 * ============================================================================
 * COLLECTOR CONFIGURATION MODULE
 * ============================================================================
 *
 * PURPOSE: Configuration schema and validation for frame transmission
 *
 * The destination address is supplied by the caller; nothing here is read
 * from the environment or persisted. Validation runs when a channel factory
 * is constructed, so a bad endpoint fails fast instead of on the first frame.
 *
 * ============================================================================
 */

use serde::{Deserialize, Serialize};

/**
 * Transmission configuration
 * All delivery behavior is controlled through these settings
 */
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectorConfig {
    // Destination endpoint receiving one PUT per frame
    pub endpoint_url: String,

    // Per-request timeout in seconds
    pub request_timeout_seconds: u64,

    // TCP connect timeout in seconds
    pub connect_timeout_seconds: u64,
}

impl Default for CollectorConfig {
    /**
     * Defaults matching the reference collector address
     */
    fn default() -> Self {
        Self {
            endpoint_url: "http://127.0.0.1:8000/api/imageseq".to_string(),
            request_timeout_seconds: 30,
            connect_timeout_seconds: 10,
        }
    }
}

impl CollectorConfig {
    /**
     * Validate configuration values
     * Returns a descriptive error for the first invalid field
     */
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint_url.trim().is_empty() {
            return Err("endpoint_url must not be empty".to_string());
        }

        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://") {
            return Err(format!(
                "endpoint_url must use http or https: {}",
                self.endpoint_url
            ));
        }

        if self.request_timeout_seconds == 0 {
            return Err("request_timeout_seconds must be greater than zero".to_string());
        }

        if self.connect_timeout_seconds == 0 {
            return Err("connect_timeout_seconds must be greater than zero".to_string());
        }

        Ok(())
    }
}
