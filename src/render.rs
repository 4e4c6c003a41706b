//! View models for the dashboard.
//!
//! The functions here turn the store and the aggregation results into plain
//! data with every value already formatted for display. They know nothing
//! about HTML; see [crate::dashboard] for the markup.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    aggregation::{
        CategoryShare, average_transaction, category_breakdown, top_category, total_spent,
        transaction_count,
    },
    endpoints::{self, format_endpoint},
    expense::{ALL_FILTER_LABEL, CategoryFilter, Expense, ExpenseId, KNOWN_CATEGORIES},
    store::ExpenseStore,
};

const LONG_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none], [year]");

/// One row of the expense table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    pub id: ExpenseId,
    pub icon: &'static str,
    pub color: &'static str,
    pub category: String,
    pub description: String,
    /// e.g. "$12.50"
    pub amount: String,
    /// "Today", "Yesterday" or e.g. "Jan 5, 2024".
    pub date: String,
    /// The endpoint that deletes this expense.
    pub delete_url: String,
}

/// The contents of the expense table.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseTable {
    /// No expenses pass the active filter.
    Empty,
    Rows(Vec<ExpenseRow>),
}

/// One bar of the category breakdown panel.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownBar {
    pub icon: &'static str,
    pub color: &'static str,
    pub category: String,
    pub amount: String,
    /// e.g. "12.5%"
    pub percentage: String,
    /// The bar width as a percentage of the panel.
    pub width: f64,
}

/// The contents of the category breakdown panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Breakdown {
    NoData,
    Bars(Vec<BreakdownBar>),
}

/// The headline numbers at the top of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_spent: String,
    pub transaction_count: String,
    pub average_transaction: String,
    pub top_category: String,
    pub top_category_amount: String,
}

/// A button in the category filter bar.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterButton {
    pub label: String,
    pub is_active: bool,
}

/// Everything needed to draw the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub filters: Vec<FilterButton>,
    pub table: ExpenseTable,
    pub breakdown: Breakdown,
}

impl Dashboard {
    /// Build the dashboard for the current contents of `store`.
    ///
    /// `today` is the current calendar date in the user's timezone and
    /// decides which rows read "Today" and "Yesterday".
    pub fn build(store: &ExpenseStore, today: Date) -> Self {
        Self {
            stats: dashboard_stats(store.view()),
            filters: filter_buttons(store.filter()),
            table: expense_table(&store.filtered_view(), today),
            breakdown: breakdown(&category_breakdown(store.view())),
        }
    }
}

/// Format `amount` as dollars with two decimal places, e.g. "$1234.50".
pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Format `date` relative to `today`.
///
/// Gives "Today" or "Yesterday" for those calendar days and an abbreviated
/// date such as "Jan 5, 2024" for anything else.
pub fn format_date(date: Date, today: Date) -> String {
    if date == today {
        return "Today".to_owned();
    }

    if today.previous_day() == Some(date) {
        return "Yesterday".to_owned();
    }

    date.format(LONG_DATE_FORMAT).unwrap_or_else(|error| {
        tracing::warn!("could not format date {date}: {error}");
        date.to_string()
    })
}

pub fn dashboard_stats(expenses: &[Expense]) -> DashboardStats {
    let top = top_category(expenses);

    DashboardStats {
        total_spent: format_amount(total_spent(expenses)),
        transaction_count: transaction_count(expenses).to_string(),
        average_transaction: format_amount(average_transaction(expenses)),
        top_category: top.label().to_owned(),
        top_category_amount: format_amount(top.amount),
    }
}

pub fn expense_table(expenses: &[&Expense], today: Date) -> ExpenseTable {
    if expenses.is_empty() {
        return ExpenseTable::Empty;
    }

    let rows = expenses
        .iter()
        .map(|expense| {
            let style = expense.category.style();

            ExpenseRow {
                id: expense.id.clone(),
                icon: style.icon,
                color: style.color,
                category: expense.category.name().to_owned(),
                description: expense.description.clone(),
                amount: format_amount(expense.amount),
                date: format_date(expense.date, today),
                delete_url: format_endpoint(endpoints::EXPENSE, expense.id.as_str()),
            }
        })
        .collect();

    ExpenseTable::Rows(rows)
}

pub fn breakdown(shares: &[CategoryShare]) -> Breakdown {
    if shares.is_empty() {
        return Breakdown::NoData;
    }

    let bars = shares
        .iter()
        .map(|share| {
            let style = share.category.style();

            BreakdownBar {
                icon: style.icon,
                color: style.color,
                category: share.category.name().to_owned(),
                amount: format_amount(share.amount),
                percentage: format!("{:.1}%", share.percentage),
                width: share.percentage,
            }
        })
        .collect();

    Breakdown::Bars(bars)
}

/// The "All" button followed by one button per known category.
pub fn filter_buttons(active: &CategoryFilter) -> Vec<FilterButton> {
    let all = FilterButton {
        label: ALL_FILTER_LABEL.to_owned(),
        is_active: *active == CategoryFilter::All,
    };

    std::iter::once(all)
        .chain(KNOWN_CATEGORIES.into_iter().map(|category| FilterButton {
            label: category.name().to_owned(),
            is_active: active.matches(&category) && *active != CategoryFilter::All,
        }))
        .collect()
}
