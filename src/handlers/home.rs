//! Index page handler

use axum::response::Html;

use crate::view::render_index;

pub async fn index() -> Html<String> {
    render_index(None)
}
