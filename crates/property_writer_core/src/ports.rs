//! crates/property_writer_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! The core only talks to the completion endpoint through this boundary, so the
//! HTTP client lives in the service crate and tests can substitute a stub.

use async_trait::async_trait;

use crate::domain::Credential;

/// Sampling temperature for a normal generation.
pub const STANDARD_TEMPERATURE: f64 = 0.7;

/// Sampling temperature for a regeneration, to get a different phrasing.
pub const REGENERATE_TEMPERATURE: f64 = 0.9;

//=========================================================================================
// Port Error and Result Types
//=========================================================================================

/// Everything that can go wrong while asking the endpoint for a completion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    /// The endpoint answered with something other than HTTP 200.
    #[error("Error: {status} - {body}")]
    Status { status: u16, body: String },

    /// The request never got an HTTP answer (DNS, connect, reset, timeout).
    #[error("Error generating description: {0}")]
    Transport(String),

    /// HTTP 200, but the body was not the expected completion shape.
    #[error("Unexpected response from the completion endpoint: {0}")]
    MalformedResponse(String),
}

/// A convenience type alias for `Result<T, CompletionError>`.
pub type CompletionResult<T> = Result<T, CompletionError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends one prompt and returns the first choice's text. Makes a single attempt.
    async fn request_completion(
        &self,
        prompt: &str,
        credential: &Credential,
        temperature: f64,
    ) -> CompletionResult<String>;
}
