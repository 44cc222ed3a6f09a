//! Navigation listing

use axum::{Extension, Json, response::IntoResponse};
use nutri_core::{PAGES, Page};
use serde::Serialize;

use crate::config::Config;

#[derive(Serialize)]
pub struct PagesResponse {
    project: String,
    pages: &'static [Page],
}

/// GET /pages - The nine pages with their route prefixes
pub async fn list(Extension(config): Extension<Config>) -> impl IntoResponse {
    Json(PagesResponse {
        project: config.project_name,
        pages: &PAGES,
    })
}
