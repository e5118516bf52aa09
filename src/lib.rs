pub mod api;
pub mod config;
pub mod res;
pub mod store;

use std::ops::Deref;

use axum::{
    extract::{rejection::JsonRejection, FromRef},
    handler::Handler,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, services::ServeDir};

use config::Config;
use res::Bundle;
use store::{Comment, Log, Message, NewMessage, ValidationError};

/// Everything the handlers share. Built once at startup and dropped on shutdown.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub messages: Log<Message>,
    pub comments: Log<Comment>,
    pub bundle: Bundle,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, ValidationError> {
        let messages = Log::new();
        if config.seed_welcome {
            messages.append(NewMessage::welcome())?;
        }

        Ok(Self {
            messages,
            comments: Log::new(),
            bundle: Bundle::new(&config.dist_path),
        })
    }
}

/// The whole application: `/api` plus the client bundle for every other path.
pub fn app(state: AppState) -> Router {
    let client = ServeDir::new(state.bundle.dir())
        .fallback(res::index.with_state(state.clone()));

    Router::new()
        .nest("/api", api::router())
        .fallback_service(client)
        .with_state(state)
        .layer(CorsLayer::permissive())
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// The client sent something unusable.
    BadRequest(String),
    Internal(anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error })).into_response()
            }
            AppError::Internal(err) => {
                tracing::error!("{err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{}\n\n{}", err, err.backtrace()),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Reads a JSON request body. A body sent without a JSON content type is
/// ignored, so the draft comes out empty and fails validation.
pub(crate) fn json_draft<T: Default>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    match body {
        Ok(Json(draft)) => Ok(draft),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Internal(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(anyhow::Error);
apperr_impl!(std::io::Error);

/// Renders Markdown into the shared page shell.
pub struct Markdown<T>(pub T);

impl<T> IntoResponse for Markdown<T>
where
    T: Deref<Target = str>
{
    fn into_response(self) -> Response {
        use pulldown_cmark::{html, Options, Parser};

        let parser = Parser::new_ext(&*self.0, Options::ENABLE_STRIKETHROUGH);

        let mut content = String::new();
        html::push_html(&mut content, parser);
        Html(
            crate::include_res!(str, "/pages/shell.html")
                .replace("{content}", &content)
        ).into_response()
    }
}
