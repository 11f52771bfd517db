pub mod blocklist;
pub mod feed;
pub mod health;
pub mod moderation;
pub mod upload;

use axum::http::StatusCode;
use memefeed_domain::DomainError;
use tracing::error;

pub(crate) type ApiError = (StatusCode, String);

pub(crate) fn error_response(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::NotFound(_) | DomainError::CategoryNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidCategory(_)
        | DomainError::InvalidModerator
        | DomainError::InvalidItem(_)
        | DomainError::Serialization(_) => StatusCode::BAD_REQUEST,
        DomainError::InvalidCredential => StatusCode::UNAUTHORIZED,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::DatabaseError(_) => {
            error!(error = %e, "Request failed on persistence");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string())
}
