//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{PostId, ValidationError};

/// JSON body whose rejections become `ApiError::Validation` (400)
/// instead of axum's default 415/422 plain-text responses.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Extract and validate a numeric post id from the path
pub struct ValidPostId(pub PostId);

impl<S> FromRequestParts<S> for ValidPostId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        parse_post_id(&id).map(Self).map_err(ApiError::Validation)
    }
}

/// Parse a positive integer post id.
pub fn parse_post_id(raw: &str) -> Result<PostId, ValidationError> {
    match raw.parse::<PostId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidFormat {
            field: "id",
            reason: "must be a positive integer",
        }),
    }
}
