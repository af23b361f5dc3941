//! Route handlers
//!
//! - GET  /            list page, consumes queued notices
//! - POST /add         insert a task, redirect to /
//! - POST /delete/{id} delete a task, redirect to /
//! - GET  /health      liveness and database reachability

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::{Deserialize, Serialize};

use crate::flash;
use crate::render;
use crate::state::AppState;

/// Add form body
#[derive(Debug, Deserialize)]
pub struct AddTodoForm {
    pub task: Option<String>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
}

/// Todo id from the path.
///
/// Only plain decimal digits are accepted, so `/delete/abc`, `/delete/-1`
/// and `/delete/+5` are 404s that never reach the database. Ids larger
/// than any stored id still get a "not found" notice.
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;

        parse_id(&raw).map(Self).ok_or(StatusCode::NOT_FOUND)
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// GET / - render the list page
async fn index(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Response {
    let todos = state.service().list().await;
    let (jar, notices) = flash::take(jar);
    match render::index_page(&todos, &notices) {
        Ok(html) => (jar, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render list page");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

/// POST /add - insert a task
///
/// A body that is not a readable form counts as a missing task.
async fn add_todo(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: Result<Form<AddTodoForm>, FormRejection>,
) -> (SignedCookieJar, Redirect) {
    let task = match form {
        Ok(Form(form)) => form.task,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable add form");
            None
        }
    };
    let notice = state.service().add(task.as_deref()).await;
    (flash::push(jar, notice), Redirect::to("/"))
}

/// POST /delete/{id} - delete a task
async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Redirect) {
    let notice = state.service().delete(id).await;
    (flash::push(jar, notice), Redirect::to("/"))
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: state.service().ping().await,
    })
}

/// Todo routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/add", post(add_todo))
        .route("/delete/{id}", post(delete_todo))
        .route("/health", get(health))
}
