use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::views;
use crate::core::errors::MedviewError;

// Request structs for form payloads
#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct FeedbackForm {
    #[serde(default)]
    pub feedback: String,
}

/// Shape of the `multipart/form-data` upload body; only used for the API docs.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// Image file contents. The part's filename is sanitized before saving.
    pub file: String,
}

/// One-shot message a handler attaches to its response; the session
/// middleware moves it into the caller's session.
#[derive(Clone, Debug)]
pub struct Notice(pub String);

pub fn redirect_with_notice(to: &str, notice: impl Into<String>) -> Response {
    let mut response = Redirect::to(to).into_response();
    response.extensions_mut().insert(Notice(notice.into()));
    response
}

// Newtype wrapper for MedviewError to implement IntoResponse
pub struct ApiError(pub MedviewError);

impl From<MedviewError> for ApiError {
    fn from(err: MedviewError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            MedviewError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Html(views::login_page(Some("Invalid username or password"))),
            )
                .into_response(),
            MedviewError::Unauthenticated => Redirect::to("/login").into_response(),
            MedviewError::Forbidden(operation) => redirect_with_notice("/", operation.denial_notice()),
            MedviewError::MissingFile => Html(views::upload_page(None)).into_response(),
            MedviewError::InvalidFilename(_) => (
                StatusCode::BAD_REQUEST,
                Html(views::upload_page(Some("Invalid file name."))),
            )
                .into_response(),
            MedviewError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, format!("Invalid request: {}", msg)).into_response(),
            MedviewError::PayloadTooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, "Upload exceeds the size limit").into_response()
            }
            err @ (MedviewError::StorageError(_) | MedviewError::SessionError(_) | MedviewError::InternalServerError(_)) => {
                error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
