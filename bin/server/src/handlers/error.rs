use tracing::error;

/// Helper function for bad request errors
pub fn handle_error<E: std::fmt::Display>(msg: &str, e: E) -> actix_web::Error {
    error!("{}: {}", msg, e);
    actix_web::error::ErrorBadRequest(format!("{}: {}", msg, e))
}

/// Helper function for oversized requests
pub fn handle_payload_too_large<E: std::fmt::Display>(msg: &str, e: E) -> actix_web::Error {
    error!("{}: {}", msg, e);
    actix_web::error::ErrorPayloadTooLarge(format!("{}: {}", msg, e))
}

/// Helper function for not found errors
pub fn handle_not_found(what: &str, id: &str) -> actix_web::Error {
    error!("{} {} not found", what, id);
    actix_web::error::ErrorNotFound(format!("{} {} not found", what, id))
}
