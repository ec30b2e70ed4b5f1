use std::{path::Path, sync::Arc};

use axum::{
    extract::Request,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use tower::{util::MapRequest, Layer};
use tower_http::services::ServeDir;

use models::book::BookStore;
use services::cover::CoverLookup;

pub mod config;
pub mod method_override;
pub mod models;
pub mod services;
pub mod util;
pub mod views;

/// Everything a request handler needs. Both collaborators are trait objects
/// so the binary can hand in Postgres and Open Library while tests hand in
/// doubles.
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookStore>,
    pub covers: Arc<dyn CoverLookup>,
}

impl AppState {
    pub fn new(books: impl BookStore + 'static, covers: impl CoverLookup + 'static) -> Self {
        Self {
            books: Arc::new(books),
            covers: Arc::new(covers),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            AppError::NotFound(message) | AppError::BadRequest(message) => {
                (status, message).into_response()
            }
            AppError::Internal(err) => {
                log::error!("{:?}", err);
                (status, "Server Error").into_response()
            }
        }
    }
}

// Lets handlers use `?` on anything that converts into `anyhow::Error`.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

async fn not_found() -> (StatusCode, Html<&'static str>) {
    (
        StatusCode::NOT_FOUND,
        Html("<h1>404 Not found</h1><a href=\"/\">Back home</a>"),
    )
}

pub fn router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    let assets = ServeDir::new(public_dir).not_found_service(not_found.into_service());
    Router::new()
        .route("/", get(views::books::list::view_book_list))
        .nest("/books", views::books::get_routes())
        .fallback_service(assets)
        .layer(Extension(state))
}

pub type App = MapRequest<Router, fn(Request) -> Request>;

/// The router wrapped in the method override. The rewrite has to happen
/// before routing, so it wraps the router from the outside instead of going
/// through `Router::layer`.
pub fn app(state: AppState, public_dir: impl AsRef<Path>) -> App {
    let rewrite: fn(Request) -> Request = method_override::override_method;
    tower::util::MapRequestLayer::new(rewrite).layer(router(state, public_dir))
}
