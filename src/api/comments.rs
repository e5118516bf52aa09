use axum::{
    debug_handler,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::{store::{Comment, Log, NewComment}, json_draft, AppResult, AppState};

#[derive(Serialize)]
pub(crate) struct CommentList {
    comments: Vec<Comment>,
}

#[derive(Serialize)]
pub(crate) struct PostedComment {
    comment: Comment,
}

#[debug_handler(state = AppState)]
pub(crate) async fn list(State(comments): State<Log<Comment>>) -> Json<CommentList> {
    Json(CommentList { comments: comments.list() })
}

#[debug_handler(state = AppState)]
pub(crate) async fn create(
    State(comments): State<Log<Comment>>,
    body: Result<Json<NewComment>, JsonRejection>,
) -> AppResult<(StatusCode, Json<PostedComment>)> {
    let draft = json_draft(body)?;
    let comment = comments
        .append(draft)
        .inspect_err(|err| tracing::info!(%err, "rejected comment"))?;

    tracing::info!(id = comment.id, author = %comment.author, "comment posted");
    Ok((StatusCode::CREATED, Json(PostedComment { comment })))
}
