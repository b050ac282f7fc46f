//! Post endpoints
//!
//! `/api/posts` dispatches on method: POST creates, GET lists newest-first,
//! anything else (HEAD and OPTIONS included) is 405 with `Allow: POST, GET`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::PostRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ValidPostId};
use crate::http::server::AppState;
use crate::models::{Post, PostContent, PostTitle, PostWithAuthor, UserId};

/// Create post request. `title`/`content` are optional here so that a
/// missing field is reported as "cannot be empty" rather than a decode error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub author_id: UserId,
}

/// POST /api/posts - create a post
async fn create_post(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let title = PostTitle::new(req.title.as_deref().unwrap_or_default())?;
    let content = PostContent::new(req.content.as_deref().unwrap_or_default())?;

    let post = PostRepo::new(state.store.as_ref())
        .create(title, content, req.author_id)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/posts - list all posts, newest first
async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = PostRepo::new(state.store.as_ref()).list().await?;
    Ok(Json(posts))
}

/// GET /api/posts/{id} - a single post with its author's name
async fn get_post(
    State(state): State<Arc<AppState>>,
    ValidPostId(id): ValidPostId,
) -> Result<Json<PostWithAuthor>, ApiError> {
    let post = PostRepo::new(state.store.as_ref()).get(id).await?;
    Ok(Json(post))
}

/// Any other method on /api/posts
async fn method_not_allowed(method: Method) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST, GET")],
        format!("Method {} Not Allowed", method),
    )
        .into_response()
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/posts",
            get(list_posts)
                .post(create_post)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route("/api/posts/{id}", get(get_post))
}
