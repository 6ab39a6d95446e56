use crate::domain::platform::{ProjectId, ProjectStatus, Role};
use crate::domain::session::SessionError;
use crate::outbound::http::error::Error as GatewayError;
use thiserror::Error;

/// Errors surfaced by the screens. Each one ends up rendered as an inline
/// error message; nothing is retried.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    RequestFailed(String),

    #[error("Access Denied: User is not a {expected}.")]
    AccessDenied { expected: Role, found: Role },

    #[error("No user logged in.")]
    NotAuthenticated,

    #[error("project {0} is already {1}")]
    InvalidTransition(ProjectId, ProjectStatus),

    #[error("project {0} is not open for grading")]
    GradingLocked(ProjectId),

    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),

    #[error("Please fill in at least Name and USN")]
    InvalidMember,

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Folds a gateway failure into [`ClientError::RequestFailed`], keeping the
/// server's own message when it sent one.
pub fn request_failed(err: GatewayError, fallback: &str) -> ClientError {
    tracing::error!(error = %err, "{}", fallback);
    match err.detail() {
        Some(detail) => ClientError::RequestFailed(detail.to_string()),
        None => ClientError::RequestFailed(fallback.to_string()),
    }
}

pub fn access_denied(expected: Role, found: Role) -> ClientError {
    tracing::debug!(%expected, %found, "role mismatch");
    ClientError::AccessDenied { expected, found }
}
