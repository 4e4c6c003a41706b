//! The in-memory collection of expenses shown on the dashboard.

use std::collections::HashSet;

use crate::expense::{CategoryFilter, Expense, ExpenseId};

/// The user's expenses in display order together with the active category filter.
///
/// The store is created once at startup and lives for the whole session.
/// Only the sync controller mutates it; views read it on every render.
#[derive(Debug, Default, Clone)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    filter: CategoryFilter,
}

impl ExpenseStore {
    /// Create an empty store that shows all categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every expense with `expenses`, keeping their order.
    ///
    /// If an ID appears more than once only the first occurrence is kept.
    pub fn replace_all(&mut self, expenses: Vec<Expense>) {
        let mut seen = HashSet::with_capacity(expenses.len());

        self.expenses = expenses
            .into_iter()
            .filter(|expense| seen.insert(expense.id.clone()))
            .collect();
    }

    /// Insert `expense` at the front, dropping any older record with the same ID.
    pub fn prepend(&mut self, expense: Expense) {
        self.remove(&expense.id);
        self.expenses.insert(0, expense);
    }

    /// Remove the expense with `id`, does nothing if there is no such expense.
    pub fn remove(&mut self, id: &ExpenseId) {
        self.expenses.retain(|expense| &expense.id != id);
    }

    /// Remove every expense. The filter is left as is.
    pub fn clear(&mut self) {
        self.expenses.clear();
    }

    /// Change which expenses [ExpenseStore::filtered_view] returns.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// The active category filter.
    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// All expenses in display order.
    pub fn view(&self) -> &[Expense] {
        &self.expenses
    }

    /// The expenses that pass the active filter, in display order.
    pub fn filtered_view(&self) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|expense| self.filter.matches(&expense.category))
            .collect()
    }
}
