//! Full pages for requests that cannot be served: unknown routes and server errors.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A full page explaining why the request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPage {
    /// No route matches the request.
    NotFound,
    /// Something failed on the server.
    InternalServerError { description: String, fix: String },
}

impl ErrorPage {
    /// The generic internal server error page.
    pub fn internal_server_error() -> Self {
        ErrorPage::InternalServerError {
            description: "Sorry, something went wrong.".to_owned(),
            fix: "Try again later or check the server logs".to_owned(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ErrorPage::NotFound => StatusCode::NOT_FOUND,
            ErrorPage::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let markup = match &self {
            ErrorPage::NotFound => error_view(
                "Not Found",
                "404",
                "Something's missing.",
                "Sorry, we can't find that page. Your expenses are on the dashboard.",
            ),
            ErrorPage::InternalServerError { description, fix } => {
                error_view("Internal Server Error", "500", description, fix)
            }
        };

        (status_code, Html(markup.into_string())).into_response()
    }
}

/// Fallback for routes that do not exist.
pub async fn get_404_not_found() -> Response {
    ErrorPage::NotFound.into_response()
}

pub async fn get_internal_server_error_page() -> Response {
    ErrorPage::internal_server_error().into_response()
}

#[cfg(test)]
mod error_page_tests {
    use axum::http::StatusCode;
    use scraper::Selector;

    use crate::test_utils::{assert_content_type, assert_valid_html, parse_html_document};

    use super::{get_404_not_found, get_internal_server_error_page};

    #[tokio::test]
    async fn not_found_page_has_404_status() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let header = html
            .select(&Selector::parse("h1").unwrap())
            .next()
            .expect("No h1 found");
        assert_eq!(header.text().collect::<String>().trim(), "404");
    }

    #[tokio::test]
    async fn internal_server_error_page_links_back_to_dashboard() {
        let response = get_internal_server_error_page().await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let link = html
            .select(&Selector::parse("a").unwrap())
            .next()
            .expect("No link found");
        assert_eq!(link.value().attr("href"), Some("/"));
    }
}
