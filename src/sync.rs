//! Keeps the expense store in step with the remote expense API.
//!
//! The [SyncController] runs the three network operations (load, create and
//! delete), applies their results to the [ExpenseStore] and tells the UI what
//! happened through the [DashboardUi] port. Failures never escape: they are
//! logged and turned into a single error notification for the user.
//!
//! Operations on one controller never overlap. If a second operation is
//! started while one is in flight it waits for the first to finish, so the
//! store sees the results in the order the operations were started.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use time::Date;

use crate::{
    api::ExpenseApi,
    expense::{CategoryFilter, ExpenseDraft, ExpenseId},
    render::Dashboard,
    store::ExpenseStore,
};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load expenses. Please try again.";
pub const CREATE_SUCCEEDED_MESSAGE: &str = "Expense added successfully!";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to add expense. Please try again.";
pub const DELETE_SUCCEEDED_MESSAGE: &str = "Expense deleted successfully!";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete expense. Please try again.";
pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this expense?";

/// Whether a notification reports a success or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    #[allow(missing_docs)]
    Success,
    #[allow(missing_docs)]
    Error,
}

/// A message for the user about the outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Whether the operation succeeded.
    pub kind: NotificationKind,
    /// The text shown to the user.
    pub message: String,
}

impl Notification {
    /// A notification that an operation succeeded.
    pub fn success(message: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.to_owned(),
        }
    }

    /// A notification that an operation failed.
    pub fn error(message: &str) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.to_owned(),
        }
    }
}

/// The part of the user interface the controller drives.
pub trait DashboardUi: Send {
    /// Show or hide the loading indicator.
    fn set_loading(&mut self, is_loading: bool);

    /// Tell the user how an operation went.
    fn notify(&mut self, notification: Notification);

    /// Draw `dashboard`, replacing whatever was drawn before.
    fn render(&mut self, dashboard: &Dashboard);

    /// Clear the add expense form.
    fn reset_form(&mut self);
}

/// Asks the user to confirm a destructive action.
#[async_trait]
pub trait Confirmation: Send + Sync {
    /// Returns `true` if the user agreed to `prompt`.
    async fn confirm(&self, prompt: &str) -> bool;
}

/// A [Confirmation] for actions the user has already confirmed elsewhere,
/// e.g. in the browser before the request was sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlreadyConfirmed;

#[async_trait]
impl Confirmation for AlreadyConfirmed {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Where the controller is in an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No operation is in flight.
    Idle,
    /// Waiting for the remote expense API.
    Loading,
    /// The last operation succeeded, about to return to idle.
    Succeeded,
    /// The last operation failed, about to return to idle.
    Failed,
}

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    #[allow(missing_docs)]
    Succeeded,
    #[allow(missing_docs)]
    Failed,
    /// The user declined to confirm, nothing was done.
    Declined,
}

/// A function giving the current calendar date in the user's timezone.
pub type TodayFn = Arc<dyn Fn() -> Date + Send + Sync>;

/// Runs network operations against the remote expense API and applies them to the store.
pub struct SyncController {
    api: Arc<dyn ExpenseApi>,
    user_id: String,
    store: Arc<Mutex<ExpenseStore>>,
    today: TodayFn,
    state: Mutex<SyncState>,
    operation_lock: tokio::sync::Mutex<()>,
}

impl SyncController {
    /// Create a controller that syncs `user_id`'s expenses into `store`.
    ///
    /// `today` decides which expenses are shown as "Today" and "Yesterday".
    pub fn new(
        api: Arc<dyn ExpenseApi>,
        user_id: &str,
        store: Arc<Mutex<ExpenseStore>>,
        today: TodayFn,
    ) -> Self {
        Self {
            api,
            user_id: user_id.to_owned(),
            store,
            today,
            state: Mutex::new(SyncState::Idle),
            operation_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// The user whose expenses are synced.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Where the controller is in the current operation.
    pub fn state(&self) -> SyncState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The dashboard for the current contents of the store.
    pub fn dashboard(&self) -> Dashboard {
        let store = self.lock_store();
        Dashboard::build(&store, (self.today)())
    }

    /// Fetch the user's expenses, replacing the contents of the store.
    ///
    /// On failure the store is emptied so the dashboard does not show stale data.
    pub async fn load(&self, ui: &mut dyn DashboardUi) -> SyncOutcome {
        let _operation = self.operation_lock.lock().await;
        self.begin(ui);

        let outcome = match self.api.fetch_expenses(&self.user_id).await {
            Ok(expenses) => {
                tracing::info!("loaded {} expenses for {}", expenses.len(), self.user_id);
                self.lock_store().replace_all(expenses);
                self.render(ui);
                SyncOutcome::Succeeded
            }
            Err(error) => {
                tracing::error!("could not load expenses for {}: {error}", self.user_id);
                self.lock_store().clear();
                self.render(ui);
                ui.notify(Notification::error(LOAD_FAILED_MESSAGE));
                SyncOutcome::Failed
            }
        };

        self.finish(ui, outcome)
    }

    /// Create an expense and add it to the front of the store.
    ///
    /// The draft is sent as is, the remote store decides whether it is valid.
    /// On failure the store is left unchanged.
    pub async fn create(&self, draft: ExpenseDraft, ui: &mut dyn DashboardUi) -> SyncOutcome {
        let _operation = self.operation_lock.lock().await;
        self.begin(ui);

        let new_expense = draft.for_user(&self.user_id);

        let outcome = match self.api.create_expense(&new_expense).await {
            Ok(expense) => {
                tracing::info!("created expense {}", expense.id);
                self.lock_store().prepend(expense);
                self.render(ui);
                ui.reset_form();
                ui.notify(Notification::success(CREATE_SUCCEEDED_MESSAGE));
                SyncOutcome::Succeeded
            }
            Err(error) => {
                tracing::error!("could not create expense {new_expense:?}: {error}");
                ui.notify(Notification::error(CREATE_FAILED_MESSAGE));
                SyncOutcome::Failed
            }
        };

        self.finish(ui, outcome)
    }

    /// Delete the expense `id` once the user confirms.
    ///
    /// Declining is not an error: nothing is sent and nothing is shown.
    /// On failure the store is left unchanged.
    pub async fn delete(
        &self,
        id: &ExpenseId,
        confirmation: &dyn Confirmation,
        ui: &mut dyn DashboardUi,
    ) -> SyncOutcome {
        if !confirmation.confirm(DELETE_CONFIRMATION_PROMPT).await {
            tracing::debug!("deletion of expense {id} was not confirmed");
            return SyncOutcome::Declined;
        }

        let _operation = self.operation_lock.lock().await;
        self.begin(ui);

        let outcome = match self.api.delete_expense(&self.user_id, id).await {
            Ok(()) => {
                tracing::info!("deleted expense {id}");
                self.lock_store().remove(id);
                self.render(ui);
                ui.notify(Notification::success(DELETE_SUCCEEDED_MESSAGE));
                SyncOutcome::Succeeded
            }
            Err(error) => {
                tracing::error!("could not delete expense {id}: {error}");
                ui.notify(Notification::error(DELETE_FAILED_MESSAGE));
                SyncOutcome::Failed
            }
        };

        self.finish(ui, outcome)
    }

    /// Change the category filter and redraw. No network call is made.
    pub fn set_filter(&self, filter: CategoryFilter, ui: &mut dyn DashboardUi) {
        self.lock_store().set_filter(filter);
        self.render(ui);
    }

    fn begin(&self, ui: &mut dyn DashboardUi) {
        self.set_state(SyncState::Loading);
        ui.set_loading(true);
    }

    fn finish(&self, ui: &mut dyn DashboardUi, outcome: SyncOutcome) -> SyncOutcome {
        self.set_state(match outcome {
            SyncOutcome::Failed => SyncState::Failed,
            _ => SyncState::Succeeded,
        });
        ui.set_loading(false);
        self.set_state(SyncState::Idle);

        outcome
    }

    fn set_state(&self, state: SyncState) {
        tracing::debug!("sync state: {state:?}");
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    fn render(&self, ui: &mut dyn DashboardUi) {
        let dashboard = self.dashboard();
        ui.render(&dashboard);
    }

    fn lock_store(&self) -> MutexGuard<'_, ExpenseStore> {
        self.store.lock().unwrap_or_else(|error| {
            tracing::warn!("expense store lock was poisoned, continuing with its contents");
            error.into_inner()
        })
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use async_trait::async_trait;
    use time::macros::date;

    use crate::{
        api::{ApiError, ExpenseApi},
        expense::{Expense, ExpenseId, NewExpense},
        render::Dashboard,
        store::ExpenseStore,
    };

    use super::{Confirmation, DashboardUi, Notification, SyncController};

    /// A call the fake API received.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum ApiCall {
        Fetch(String),
        Create(NewExpense),
        Delete(String, ExpenseId),
        /// Marks the end of a call, recorded after the simulated latency.
        Done,
    }

    /// An in-memory stand-in for the remote expense API.
    #[derive(Default)]
    pub(crate) struct FakeExpenseApi {
        pub(crate) fetch_results: Mutex<VecDeque<Result<Vec<Expense>, ApiError>>>,
        pub(crate) create_results: Mutex<VecDeque<Result<Expense, ApiError>>>,
        pub(crate) delete_results: Mutex<VecDeque<Result<(), ApiError>>>,
        pub(crate) calls: Mutex<Vec<ApiCall>>,
        pub(crate) latency: Option<Duration>,
    }

    impl FakeExpenseApi {
        pub(crate) fn with_fetch_result(self, result: Result<Vec<Expense>, ApiError>) -> Self {
            self.fetch_results.lock().unwrap().push_back(result);
            self
        }

        pub(crate) fn with_create_result(self, result: Result<Expense, ApiError>) -> Self {
            self.create_results.lock().unwrap().push_back(result);
            self
        }

        pub(crate) fn with_delete_result(self, result: Result<(), ApiError>) -> Self {
            self.delete_results.lock().unwrap().push_back(result);
            self
        }

        pub(crate) fn calls(&self) -> Vec<ApiCall> {
            self.calls.lock().unwrap().clone()
        }

        async fn record(&self, call: ApiCall) {
            self.calls.lock().unwrap().push(call);

            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
                self.calls.lock().unwrap().push(ApiCall::Done);
            }
        }
    }

    #[async_trait]
    impl ExpenseApi for FakeExpenseApi {
        async fn fetch_expenses(&self, user_id: &str) -> Result<Vec<Expense>, ApiError> {
            self.record(ApiCall::Fetch(user_id.to_owned())).await;
            self.fetch_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Vec::new()))
        }

        async fn create_expense(&self, draft: &NewExpense) -> Result<Expense, ApiError> {
            self.record(ApiCall::Create(draft.clone())).await;
            self.create_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ApiError::Status(500)))
        }

        async fn delete_expense(
            &self,
            user_id: &str,
            expense_id: &ExpenseId,
        ) -> Result<(), ApiError> {
            self.record(ApiCall::Delete(user_id.to_owned(), expense_id.clone()))
                .await;
            self.delete_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(()))
        }
    }

    /// Something the controller asked the UI to do.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum UiEvent {
        Loading(bool),
        Notify(Notification),
        Render(Dashboard),
        ResetForm,
    }

    #[derive(Debug, Default)]
    pub(crate) struct RecordingUi {
        pub(crate) events: Vec<UiEvent>,
    }

    impl RecordingUi {
        pub(crate) fn notifications(&self) -> Vec<&Notification> {
            self.events
                .iter()
                .filter_map(|event| match event {
                    UiEvent::Notify(notification) => Some(notification),
                    _ => None,
                })
                .collect()
        }

        pub(crate) fn last_render(&self) -> Option<&Dashboard> {
            self.events.iter().rev().find_map(|event| match event {
                UiEvent::Render(dashboard) => Some(dashboard),
                _ => None,
            })
        }
    }

    impl DashboardUi for RecordingUi {
        fn set_loading(&mut self, is_loading: bool) {
            self.events.push(UiEvent::Loading(is_loading));
        }

        fn notify(&mut self, notification: Notification) {
            self.events.push(UiEvent::Notify(notification));
        }

        fn render(&mut self, dashboard: &Dashboard) {
            self.events.push(UiEvent::Render(dashboard.clone()));
        }

        fn reset_form(&mut self) {
            self.events.push(UiEvent::ResetForm);
        }
    }

    /// Answers every confirmation prompt with a fixed decision and remembers the prompts.
    pub(crate) struct FixedConfirmation {
        pub(crate) decision: bool,
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    impl FixedConfirmation {
        pub(crate) fn new(decision: bool) -> Self {
            Self {
                decision,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Confirmation for FixedConfirmation {
        async fn confirm(&self, prompt: &str) -> bool {
            self.prompts.lock().unwrap().push(prompt.to_owned());
            self.decision
        }
    }

    pub(crate) fn new_test_controller(
        api: Arc<FakeExpenseApi>,
        store: Arc<Mutex<ExpenseStore>>,
    ) -> SyncController {
        SyncController::new(
            api,
            "demo_user",
            store,
            Arc::new(|| date!(2024 - 03 - 01)),
        )
    }
}
