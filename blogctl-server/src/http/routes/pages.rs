//! HTML page routes: home, post detail, admin create form

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;

use crate::db::{PostRepo, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::parse_post_id;
use crate::http::server::AppState;
use crate::models::{Post, PostContent, PostTitle, UserId, ValidationError};
use crate::pages::{self, CreatePostForm};

/// Form fields as submitted; all optional so a partial form still renders.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePostInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_id: String,
}

fn error_response(state: &AppState, err: ApiError) -> Response {
    err.log();
    let status = err.status();
    let page = pages::error_page(&state.pages, status, &err.public_message());
    (status, Html(page.into_string())).into_response()
}

/// GET /
async fn home(State(state): State<Arc<AppState>>) -> Response {
    match PostRepo::new(state.store.as_ref()).list().await {
        Ok(posts) => Html(pages::home_page(&state.pages, &posts).into_string()).into_response(),
        Err(e) => error_response(&state, e.into()),
    }
}

/// GET /posts/{id}
async fn post_detail(State(state): State<Arc<AppState>>, Path(raw_id): Path<String>) -> Response {
    // Malformed ids are indistinguishable from missing posts for page visitors.
    let Ok(id) = parse_post_id(&raw_id) else {
        return error_response(
            &state,
            ApiError::NotFound {
                resource: "post",
                id: raw_id,
            },
        );
    };

    match PostRepo::new(state.store.as_ref()).get(id).await {
        Ok(post) => (
            [(header::CACHE_CONTROL, state.pages.post_cache_control())],
            Html(pages::post_page(&state.pages, &post).into_string()),
        )
            .into_response(),
        Err(e) => error_response(&state, e.into()),
    }
}

/// GET /admin/create-post
async fn create_post_form(State(state): State<Arc<AppState>>) -> Response {
    render_form(&state, StatusCode::OK, CreatePostForm::default()).await
}

/// POST /admin/create-post
///
/// Success redirects home; failure re-renders the form with the submitted
/// values, the error message, and the status the API would return.
async fn submit_create_post(
    State(state): State<Arc<AppState>>,
    Form(input): Form<CreatePostInput>,
) -> Response {
    let author_id = input.author_id.trim().parse::<UserId>().ok();

    match create_from_input(&state, &input, author_id).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(err) => {
            err.log();
            let form = CreatePostForm {
                title: input.title,
                content: input.content,
                author_id,
                error: Some(err.public_message()),
            };
            render_form(&state, err.status(), form).await
        }
    }
}

async fn create_from_input(
    state: &AppState,
    input: &CreatePostInput,
    author_id: Option<UserId>,
) -> Result<Post, ApiError> {
    let title = PostTitle::new(&input.title)?;
    let content = PostContent::new(&input.content)?;
    let author_id = author_id.ok_or(ValidationError::InvalidFormat {
        field: "author",
        reason: "select an existing author",
    })?;

    Ok(PostRepo::new(state.store.as_ref())
        .create(title, content, author_id)
        .await?)
}

async fn render_form(state: &AppState, status: StatusCode, form: CreatePostForm) -> Response {
    let users = match UserRepo::new(state.store.as_ref()).list().await {
        Ok(users) => users,
        Err(e) => return error_response(state, e.into()),
    };
    let posts = match PostRepo::new(state.store.as_ref()).list().await {
        Ok(posts) => posts,
        Err(e) => return error_response(state, e.into()),
    };

    let page = pages::create_post_page(&state.pages, &form, &users, &posts);
    (status, Html(page.into_string())).into_response()
}

/// Router-wide fallback: HTML 404
pub async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    let page = pages::error_page(&state.pages, StatusCode::NOT_FOUND, "page not found");
    (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
}

/// Page routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/posts/{id}", get(post_detail))
        .route(
            "/admin/create-post",
            get(create_post_form).post(submit_create_post),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::UserName;
    use crate::pages::PageSettings;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        store.seed_user(2, &UserName::new("Alice").unwrap()).await;
        let state = AppState::new(store.clone(), PageSettings::default());
        (router().with_state(Arc::new(state)), store)
    }

    fn submit(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/admin/create-post")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn valid_submission_redirects_home() {
        let (app, store) = app().await;

        let response = app
            .oneshot(submit("title=Hello&content=World&author_id=2"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(store.post_count().await, 1);
    }

    #[tokio::test]
    async fn empty_title_rerenders_form_with_error() {
        let (app, store) = app().await;

        let response = app
            .oneshot(submit("title=&content=Kept+body&author_id=2"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = text(response).await;
        assert!(html.contains("title cannot be empty"));
        assert!(html.contains("Kept body"));
        assert_eq!(store.post_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_author_rerenders_with_404() {
        let (app, _) = app().await;

        let response = app
            .oneshot(submit("title=X&content=Y&author_id=999"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = text(response).await;
        assert!(html.contains("999"));
        assert!(html.contains("not found"));
    }

    #[tokio::test]
    async fn post_page_and_missing_post() {
        let (app, _) = app().await;
        app.clone()
            .oneshot(submit("title=Hello&content=World&author_id=2"))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/posts/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=0, s-maxage=60, stale-while-revalidate"
        );
        assert!(text(response).await.contains("By Alice"));

        for uri in ["/posts/2", "/posts/abc"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri: {uri}");
        }
    }

    #[tokio::test]
    async fn home_lists_newest_first() {
        let (app, _) = app().await;
        for body in [
            "title=Older&content=a&author_id=2",
            "title=Newer&content=b&author_id=2",
        ] {
            app.clone().oneshot(submit(body)).await.unwrap();
        }

        let html = text(
            app.oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                .await
                .unwrap(),
        )
        .await;

        let newer = html.find("Newer").unwrap();
        let older = html.find("Older").unwrap();
        assert!(newer < older);
    }
}
