//! Browser app routes.

use axum::response::{Html, Redirect};

const APP_HTML: &str = include_str!("../../static/app.html");

/// GET / - Send browsers to the app.
pub async fn root() -> Redirect {
    Redirect::temporary("/app")
}

/// GET /app - Single-page purchase app.
pub async fn index() -> Html<&'static str> {
    Html(APP_HTML)
}
