use axum::{debug_handler, extract::{rejection::JsonRejection, State}, Json};
use serde::Serialize;

use crate::{store::{Log, Message, NewMessage}, json_draft, AppResult, AppState};

#[derive(Serialize)]
pub(crate) struct MessageList {
    messages: Vec<Message>,
}

#[derive(Serialize)]
pub(crate) struct PostedMessage {
    message: Message,
}

#[debug_handler(state = AppState)]
pub(crate) async fn list(State(messages): State<Log<Message>>) -> Json<MessageList> {
    Json(MessageList { messages: messages.list() })
}

#[debug_handler(state = AppState)]
pub(crate) async fn create(
    State(messages): State<Log<Message>>,
    body: Result<Json<NewMessage>, JsonRejection>,
) -> AppResult<Json<PostedMessage>> {
    let draft = json_draft(body)?;
    let message = messages
        .append(draft)
        .inspect_err(|err| tracing::info!(%err, "rejected message"))?;

    tracing::info!(id = %message.id, username = %message.username, "message posted");
    Ok(Json(PostedMessage { message }))
}
