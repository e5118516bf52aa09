use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Response},
};

use crate::{AppResult, AppState, Markdown};

#[macro_export]
macro_rules! include_res {
    (bytes, $p:expr) => {
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}

/// Location of the prebuilt client.
#[derive(Debug, Clone)]
pub struct Bundle {
    dir: Arc<Path>,
}

impl Bundle {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join("index.html")
    }
}

/// Serves the client's `index.html` for any path the bundle has no file for,
/// or explains how to build the client when there is no bundle.
#[debug_handler(state = AppState)]
pub async fn index(State(bundle): State<Bundle>) -> AppResult<Response> {
    match tokio::fs::read_to_string(bundle.index_path()).await {
        Ok(html) => Ok(Html(html).into_response()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(
                dir = %bundle.dir().display(),
                "no client bundle, serving fallback page"
            );
            Ok(Markdown(crate::include_res!(str, "/pages/fallback.md")).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
