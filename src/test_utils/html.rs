use axum::response::Response;
use scraper::Html;

async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    String::from_utf8(body.to_vec()).expect("Response body is not UTF-8")
}

/// Parse a full page, e.g. from a GET handler.
pub(crate) async fn parse_html_document(response: Response) -> Html {
    Html::parse_document(&body_text(response).await)
}

/// Parse a fragment, e.g. an alert or a partial swapped in by HTMX.
pub(crate) async fn parse_html_fragment(response: Response) -> Html {
    Html::parse_fragment(&body_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}
