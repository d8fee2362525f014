use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Pass generator page; also the landing page for checkout redirects.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
