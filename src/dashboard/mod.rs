//! The expense dashboard page and the htmx endpoints that update it.
//!
//! This module contains:
//! - Route handlers that run the sync controller's operations
//! - HTML view functions for the dashboard's view models

mod handlers;
mod views;

pub use handlers::{
    create_expense_endpoint, delete_expense_endpoint, get_dashboard_page,
    reload_expenses_endpoint, set_filter_endpoint,
};
