//! Expense Tracker is a web dashboard for recording and reviewing day-to-day spending.
//!
//! Expenses are owned by a remote expense API. This library keeps an
//! in-memory copy of one user's expenses, summarises them, and serves the
//! dashboard as HTML pages driven by htmx.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HxReswap, SwapOption};
use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod alert;
mod api;
mod app_state;
mod config;
mod dashboard;
mod endpoints;
mod error_page;
mod expense;
mod html;
mod logging;
mod render;
mod routing;
mod store;
mod sync;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use api::{ApiError, ExpenseApi, HttpExpenseApi};
pub use app_state::AppState;
pub use config::Args;
pub use expense::{Category, CategoryFilter, Expense, ExpenseDraft, ExpenseId, NewExpense};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use store::ExpenseStore;
pub use sync::{
    AlreadyConfirmed, Confirmation, DashboardUi, Notification, NotificationKind, SyncController,
    SyncOutcome, SyncState,
};

use crate::{alert::Alert, error_page::ErrorPage};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The URL of the remote expense API cannot be used to build request URLs.
    #[error("invalid expense API URL {0}")]
    InvalidApiUrl(String),
}

impl Error {
    fn description_and_fix(&self) -> (&'static str, String) {
        match self {
            Error::InvalidTimezoneError(timezone) => (
                "Invalid Timezone Settings",
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            Error::InvalidApiUrl(url) => (
                "Invalid Expense API Settings",
                format!(
                    "\"{url}\" is not a usable base URL for the expense API. \
                    Check the --api-url option"
                ),
            ),
        }
    }

    /// Render the error as an alert for htmx requests.
    ///
    /// The response tells htmx not to swap the request's target, so only the
    /// alert is shown.
    fn into_alert_response(self) -> Response {
        tracing::error!("{self}");
        let (description, fix) = self.description_and_fix();

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            HxReswap(SwapOption::None),
            Alert::Error {
                message: description.to_owned(),
                details: fix,
            },
        )
            .into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{self}");
        let (description, fix) = self.description_and_fix();

        ErrorPage::InternalServerError {
            description: description.to_owned(),
            fix,
        }
        .into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::test_utils::{get_header, parse_html_document, parse_html_fragment};

    use super::Error;

    #[tokio::test]
    async fn invalid_timezone_renders_error_page() {
        let response = Error::InvalidTimezoneError("Mars/Olympus".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Invalid Timezone Settings"));
        assert!(text.contains("Mars/Olympus"));
    }

    #[tokio::test]
    async fn alert_response_does_not_swap_target() {
        let response = Error::InvalidApiUrl("nope".to_owned()).into_alert_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(get_header(&response, "hx-reswap"), "none");
        let html = parse_html_fragment(response).await;
        let alert = html
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("No alert found");
        assert!(
            alert
                .text()
                .collect::<String>()
                .contains("Invalid Expense API Settings")
        );
    }
}
