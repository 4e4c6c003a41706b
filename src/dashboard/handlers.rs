//! Dashboard HTTP handlers.
//!
//! Each handler runs one sync controller operation with an [HtmlUi] that
//! collects what the controller asks the UI to do, then turns that into an
//! htmx response.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::{HxReswap, SwapOption};
use maud::html;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    alert::{Alert, alerts_out_of_band},
    dashboard::views::{dashboard_content, dashboard_page, expense_form},
    expense::{CategoryFilter, ExpenseDraft, ExpenseId},
    render::Dashboard,
    sync::{AlreadyConfirmed, DashboardUi, Notification, SyncController},
    timezone::local_today,
};

/// The state needed by the dashboard handlers.
#[derive(Clone)]
pub struct DashboardState {
    pub sync_controller: Arc<SyncController>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sync_controller: state.sync_controller.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl DashboardState {
    fn today(&self) -> Result<Date, Error> {
        local_today(&self.local_timezone).ok_or_else(|| {
            tracing::error!("Invalid timezone {}", self.local_timezone);
            Error::InvalidTimezoneError(self.local_timezone.clone())
        })
    }
}

/// Form data for changing the category filter.
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    /// A category name, or "All".
    pub category: String,
}

/// Records the controller's UI requests for the duration of one request.
#[derive(Debug, Default)]
struct HtmlUi {
    dashboard: Option<Dashboard>,
    alerts: Vec<Alert>,
    form_reset: bool,
}

impl DashboardUi for HtmlUi {
    fn set_loading(&mut self, is_loading: bool) {
        // The browser shows its own indicator while the request is in flight.
        tracing::trace!("loading: {is_loading}");
    }

    fn notify(&mut self, notification: Notification) {
        self.alerts.push(Alert::from(notification));
    }

    fn render(&mut self, dashboard: &Dashboard) {
        self.dashboard = Some(dashboard.clone());
    }

    fn reset_form(&mut self) {
        self.form_reset = true;
    }
}

impl HtmlUi {
    /// The htmx response for the dashboard content area.
    ///
    /// If nothing was rendered, htmx is told to leave the content alone and
    /// only the alerts are shown.
    fn into_response(self, today: Date) -> Response {
        match self.dashboard {
            Some(dashboard) => html! {
                (dashboard_content(&dashboard))

                @if self.form_reset {
                    (expense_form(today, true))
                }

                (alerts_out_of_band(&self.alerts))
            }
            .into_response(),
            None => (HxReswap(SwapOption::None), alerts_out_of_band(&self.alerts)).into_response(),
        }
    }
}

/// Display the dashboard with the user's latest expenses.
///
/// The expenses are fetched from the remote expense API on every page load.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let today = state.today()?;
    let mut ui = HtmlUi::default();

    state.sync_controller.load(&mut ui).await;

    let dashboard = ui
        .dashboard
        .unwrap_or_else(|| state.sync_controller.dashboard());

    Ok(dashboard_page(&dashboard, today, &ui.alerts).into_response())
}

/// Fetch the expenses again and return the refreshed dashboard content.
pub async fn reload_expenses_endpoint(State(state): State<DashboardState>) -> Response {
    let today = match state.today() {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };
    let mut ui = HtmlUi::default();

    state.sync_controller.load(&mut ui).await;

    ui.into_response(today)
}

/// Create an expense from the add expense form.
pub async fn create_expense_endpoint(
    State(state): State<DashboardState>,
    Form(draft): Form<ExpenseDraft>,
) -> Response {
    let today = match state.today() {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };
    let mut ui = HtmlUi::default();

    state.sync_controller.create(draft, &mut ui).await;

    ui.into_response(today)
}

/// Delete an expense.
///
/// The user confirms the deletion in the browser before the request is sent.
pub async fn delete_expense_endpoint(
    Path(expense_id): Path<String>,
    State(state): State<DashboardState>,
) -> Response {
    let today = match state.today() {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };
    let mut ui = HtmlUi::default();

    state
        .sync_controller
        .delete(&ExpenseId::new(expense_id), &AlreadyConfirmed, &mut ui)
        .await;

    ui.into_response(today)
}

/// Show only the expenses in the chosen category.
pub async fn set_filter_endpoint(
    State(state): State<DashboardState>,
    Form(form): Form<FilterForm>,
) -> Response {
    let today = match state.today() {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };
    let mut ui = HtmlUi::default();

    state
        .sync_controller
        .set_filter(CategoryFilter::from(form.category.as_str()), &mut ui);

    ui.into_response(today)
}
