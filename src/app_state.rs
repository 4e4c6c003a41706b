//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use time::OffsetDateTime;

use crate::{
    Error,
    api::ExpenseApi,
    store::ExpenseStore,
    sync::SyncController,
    timezone::{get_local_offset, local_today},
};

/// The state of the web server.
#[derive(Clone)]
pub struct AppState {
    /// Runs every operation against the remote expense API and owns the
    /// in-memory expense store.
    pub sync_controller: Arc<SyncController>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] with an empty expense store.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(
        expense_api: Arc<dyn ExpenseApi>,
        user_id: &str,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        let timezone = local_timezone.to_owned();
        let today = Arc::new(move || {
            local_today(&timezone).unwrap_or_else(|| {
                tracing::warn!("could not get today's date in {timezone}, falling back to UTC");
                OffsetDateTime::now_utc().date()
            })
        });

        let store = Arc::new(Mutex::new(ExpenseStore::new()));

        Ok(Self {
            sync_controller: Arc::new(SyncController::new(expense_api, user_id, store, today)),
            local_timezone: local_timezone.to_owned(),
        })
    }
}
