use axum::{debug_handler, Json};
use serde::Serialize;

const GREETING: &str = "Welcome to the Mentat Party API! 🎉";

#[derive(Serialize)]
pub(crate) struct Greeting {
    message: &'static str,
}

#[debug_handler]
pub(crate) async fn greeting() -> Json<Greeting> {
    Json(Greeting { message: GREETING })
}
