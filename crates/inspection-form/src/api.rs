//! Contract with the backend that stores inspections

use crate::payload::InspectionPayload;
use async_trait::async_trait;
use common::Inspection;
use thiserror::Error;

/// Failure signalled by the backend or the transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request body was refused as too large (HTTP 413)
    #[error("Request entity too large")]
    PayloadTooLarge,
    /// The backend refused the request content, e.g. a malformed field
    #[error("Request rejected with status {status}: {message}")]
    ServerRejected { status: u16, message: String },
    #[error("Inspection {0} not found")]
    NotFound(String),
    /// Network failure, server error or unreadable response
    #[error("Transport error: {0}")]
    TransportError(String),
}

/// Operations the form and its views need from the backend.
///
/// Implementations send exactly one request per call and never retry.
#[async_trait]
pub trait InspectionApi: Send + Sync {
    /// Store a new inspection. Returned images keep the payload order.
    async fn create_inspection(&self, payload: &InspectionPayload) -> Result<Inspection, ApiError>;

    async fn list_inspections(&self) -> Result<Vec<Inspection>, ApiError>;

    async fn get_inspection(&self, id: &str) -> Result<Inspection, ApiError>;

    async fn delete_inspection(&self, id: &str) -> Result<(), ApiError>;
}
