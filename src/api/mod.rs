mod comments;
mod greeting;
mod messages;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(greeting::greeting))
        .route("/messages", get(messages::list).post(messages::create))
        .route("/comments", get(comments::list).post(comments::create))
}
