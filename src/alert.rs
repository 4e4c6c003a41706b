//! Alert system for displaying success and error messages to users.
//!
//! Alerts are swapped out-of-band into the `#alert-container` element of the
//! base layout, so they can be appended to any htmx response.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::sync::{Notification, NotificationKind};

/// An alert message with optional details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    SuccessSimple { message: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    fn is_error(&self) -> bool {
        matches!(self, Alert::Error { .. } | Alert::ErrorSimple { .. })
    }

    fn message(&self) -> &str {
        match self {
            Alert::SuccessSimple { message }
            | Alert::Error { message, .. }
            | Alert::ErrorSimple { message } => message.as_str(),
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            Alert::Error { details, .. } if !details.is_empty() => Some(details.as_str()),
            _ => None,
        }
    }

    /// The alert box on its own, without the surrounding container.
    fn alert_box(&self) -> Markup {
        let container_style = if self.is_error() {
            "flex items-start gap-3 p-4 mb-2 rounded-lg shadow-lg border \
            text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        } else {
            "flex items-start gap-3 p-4 mb-2 rounded-lg shadow-lg border \
            text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        };
        let icon = if self.is_error() { "❌" } else { "✅" };
        let role = if self.is_error() { "alert" } else { "status" };

        html! {
            div class=(container_style) role=(role)
            {
                span aria-hidden="true" { (icon) }

                div class="flex-1"
                {
                    p class="font-medium" { (self.message()) }

                    @if let Some(details) = self.details() {
                        p class="text-sm mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    class="ml-auto text-sm font-medium underline"
                    onclick="this.closest('[role]').remove()"
                {
                    "Dismiss"
                }
            }
        }
    }

    /// This alert swapped out-of-band into the page's alert container.
    pub fn into_html(self) -> Markup {
        alerts_out_of_band(&[self])
    }
}

/// The alert container of a full page, showing `alerts` if there are any.
pub fn alert_container(alerts: &[Alert]) -> Markup {
    container(alerts, false)
}

/// `alerts` swapped out-of-band into the alert container, for htmx responses.
pub fn alerts_out_of_band(alerts: &[Alert]) -> Markup {
    container(alerts, true)
}

fn container(alerts: &[Alert], out_of_band: bool) -> Markup {
    let visibility = if alerts.is_empty() { "hidden " } else { "" };

    html! {
        div
            id="alert-container"
            hx-swap-oob=[out_of_band.then_some("true")]
            class={ (visibility) "w-full max-w-md px-4" }
            style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
        {
            @for alert in alerts {
                (alert.alert_box())
            }
        }
    }
}

impl From<Notification> for Alert {
    fn from(notification: Notification) -> Self {
        match notification.kind {
            NotificationKind::Success => Alert::SuccessSimple {
                message: notification.message,
            },
            NotificationKind::Error => Alert::ErrorSimple {
                message: notification.message,
            },
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
