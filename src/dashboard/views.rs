//! Maud views for the dashboard's view models.

use maud::{Markup, html};
use time::Date;

use crate::{
    alert::Alert,
    endpoints,
    expense::KNOWN_CATEGORIES,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, CARD_STYLE, FILTER_BUTTON_ACTIVE_STYLE,
        FILTER_BUTTON_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, MAX_DESCRIPTION_GRAPHEMES,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base_with_alerts, dollar_input_styles, loading_spinner, truncate,
    },
    render::{Breakdown, Dashboard, DashboardStats, ExpenseTable, FilterButton},
    sync::DELETE_CONFIRMATION_PROMPT,
};

const DASHBOARD_CONTENT_ID: &str = "dashboard-content";
const DASHBOARD_CONTENT_TARGET: &str = "#dashboard-content";

/// The full dashboard page.
///
/// `today` is the default date of the add expense form and `alerts` are
/// shown as soon as the page loads.
pub(super) fn dashboard_page(dashboard: &Dashboard, today: Date, alerts: &[Alert]) -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            header class="flex justify-between flex-wrap items-center gap-4"
            {
                h1 class="text-2xl font-bold"
                {
                    i class="fas fa-wallet mr-2 text-teal-500" {}
                    "Expense Tracker"
                }

                div class="flex items-center gap-4"
                {
                    (loading_spinner())

                    button
                        id="reload-expenses"
                        type="button"
                        hx-post=(endpoints::RELOAD_EXPENSES)
                        hx-target=(DASHBOARD_CONTENT_TARGET)
                        hx-swap="innerHTML"
                        hx-disabled-elt="this"
                        class=(BUTTON_PRIMARY_STYLE)
                    {
                        i class="fas fa-sync-alt mr-2" {}
                        "Refresh"
                    }
                }
            }

            section class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-4" { "Add Expense" }
                (expense_form(today, false))
            }

            div id=(DASHBOARD_CONTENT_ID) class="flex flex-col gap-6"
            {
                (dashboard_content(dashboard))
            }
        }
    };

    base_with_alerts("Dashboard", &[dollar_input_styles()], &content, alerts)
}

/// Everything inside the dashboard content area: stats, filters, the expense
/// table and the category breakdown.
pub(super) fn dashboard_content(dashboard: &Dashboard) -> Markup {
    html! {
        (stats_cards(&dashboard.stats))
        (filter_bar(&dashboard.filters))

        div class="grid grid-cols-1 lg:grid-cols-3 gap-6"
        {
            section class={ (CARD_STYLE) " lg:col-span-2 overflow-x-auto" }
            {
                h2 class="text-lg font-semibold mb-4" { "Recent Expenses" }
                (expense_table(&dashboard.table))
            }

            section class=(CARD_STYLE)
            {
                h2 class="text-lg font-semibold mb-4" { "Spending by Category" }
                (category_breakdown(&dashboard.breakdown))
            }
        }
    }
}

/// The add expense form.
///
/// Set `out_of_band` to replace the form on the page from an htmx response,
/// which clears whatever the user typed.
pub(super) fn expense_form(today: Date, out_of_band: bool) -> Markup {
    html! {
        div
            id="expense-form-container"
            hx-swap-oob=[out_of_band.then_some("true")]
        {
            form
                id="expense-form"
                hx-post=(endpoints::EXPENSES_API)
                hx-target=(DASHBOARD_CONTENT_TARGET)
                hx-swap="innerHTML"
                hx-disabled-elt="find button[type=submit]"
                class="grid grid-cols-1 md:grid-cols-5 gap-4 items-end"
            {
                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select
                        id="category"
                        name="category"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" disabled selected { "Select category" }

                        @for category in &KNOWN_CATEGORIES {
                            option value=(category.name()) { (category.name()) }
                        }
                    }
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="input-wrapper w-full"
                    {
                        input
                            id="amount"
                            type="number"
                            name="amount"
                            step="0.01"
                            min="0"
                            placeholder="0.00"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        id="description"
                        type="text"
                        name="description"
                        placeholder="What was it for?"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        id="date"
                        type="date"
                        name="date"
                        value=(today.to_string())
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    i class="fas fa-plus mr-2" {}
                    "Add Expense"
                }
            }
        }
    }
}

fn stats_cards(stats: &DashboardStats) -> Markup {
    let card = |id: &str, icon: &str, title: &str, value: &str| {
        html! {
            div class=(CARD_STYLE)
            {
                div class="flex items-center justify-between"
                {
                    p class="text-sm text-gray-500 dark:text-gray-400" { (title) }
                    i class={ "fas " (icon) " text-teal-500" } {}
                }

                p id=(id) class="text-2xl font-bold mt-2" { (value) }
            }
        }
    };

    html! {
        section id="stats" class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-4 gap-4"
        {
            (card("total-spent", "fa-dollar-sign", "Total Spent", &stats.total_spent))
            (card("transaction-count", "fa-receipt", "Transactions", &stats.transaction_count))
            (card("average-transaction", "fa-chart-line", "Average Transaction", &stats.average_transaction))

            div class=(CARD_STYLE)
            {
                div class="flex items-center justify-between"
                {
                    p class="text-sm text-gray-500 dark:text-gray-400" { "Top Category" }
                    i class="fas fa-trophy text-teal-500" {}
                }

                p id="top-category" class="text-2xl font-bold mt-2" { (stats.top_category) }
                p id="top-category-amount" class="text-sm text-gray-500 dark:text-gray-400"
                {
                    (stats.top_category_amount)
                }
            }
        }
    }
}

fn filter_bar(filters: &[FilterButton]) -> Markup {
    html! {
        nav id="category-filters" class="flex flex-wrap gap-2" aria-label="Filter by category"
        {
            @for filter in filters {
                @let style = if filter.is_active {
                    FILTER_BUTTON_ACTIVE_STYLE
                } else {
                    FILTER_BUTTON_STYLE
                };

                button
                    type="button"
                    data-category=(filter.label)
                    aria-pressed=(if filter.is_active { "true" } else { "false" })
                    hx-post=(endpoints::CATEGORY_FILTER)
                    hx-vals=(serde_json::json!({ "category": filter.label }).to_string())
                    hx-target=(DASHBOARD_CONTENT_TARGET)
                    hx-swap="innerHTML"
                    class=(style)
                {
                    (filter.label)
                }
            }
        }
    }
}

fn expense_table(table: &ExpenseTable) -> Markup {
    let rows = match table {
        ExpenseTable::Empty => {
            return html! {
                div id="empty-state" class="flex flex-col items-center py-12 text-gray-500 dark:text-gray-400"
                {
                    i class="fas fa-receipt text-4xl mb-4" {}
                    p class="text-lg font-medium" { "No expenses yet" }
                    p class="text-sm" { "Click \"Add Expense\" to get started!" }
                }
            };
        }
        ExpenseTable::Rows(rows) => rows,
    };

    html! {
        table id="expense-table" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                }
            }

            tbody
            {
                @for row in rows {
                    @let (description, full_description) =
                        truncate(&row.description, MAX_DESCRIPTION_GRAPHEMES);

                    tr class=(TABLE_ROW_STYLE) data-expense-id=(row.id.as_str())
                    {
                        td class=(TABLE_CELL_STYLE)
                        {
                            span class="inline-flex items-center gap-2 font-medium text-gray-900 dark:text-white"
                            {
                                i class={ "fas " (row.icon) } style={ "color: " (row.color) } {}
                                (row.category)
                            }
                        }

                        td class=(TABLE_CELL_STYLE) title=[full_description] { (description) }
                        td class={ (TABLE_CELL_STYLE) " font-semibold text-gray-900 dark:text-white" } { (row.amount) }
                        td class=(TABLE_CELL_STYLE) { (row.date) }

                        td class=(TABLE_CELL_STYLE)
                        {
                            button
                                type="button"
                                hx-delete=(row.delete_url)
                                hx-confirm=(DELETE_CONFIRMATION_PROMPT)
                                hx-target=(DASHBOARD_CONTENT_TARGET)
                                hx-swap="innerHTML"
                                title="Delete expense"
                                class=(BUTTON_DELETE_STYLE)
                            {
                                i class="fas fa-trash" {}
                                span class="sr-only" { "Delete" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn category_breakdown(breakdown: &Breakdown) -> Markup {
    let bars = match breakdown {
        Breakdown::NoData => {
            return html! {
                p id="category-breakdown" class="text-center py-8 text-gray-500 dark:text-gray-400"
                {
                    "No data yet"
                }
            };
        }
        Breakdown::Bars(bars) => bars,
    };

    html! {
        ul id="category-breakdown" class="flex flex-col gap-4"
        {
            @for bar in bars {
                li data-category=(bar.category)
                {
                    div class="flex justify-between items-center mb-1 text-sm"
                    {
                        span class="inline-flex items-center gap-2 font-medium"
                        {
                            i class={ "fas " (bar.icon) } style={ "color: " (bar.color) } {}
                            (bar.category)
                        }

                        span
                        {
                            (bar.amount)
                            " "
                            span class="text-gray-500 dark:text-gray-400" { "(" (bar.percentage) ")" }
                        }
                    }

                    div class="w-full h-2 rounded-full bg-gray-200 dark:bg-gray-700"
                    {
                        div
                            class="h-2 rounded-full"
                            style={ "width: " (format!("{:.1}", bar.width)) "%; background-color: " (bar.color) }
                        {}
                    }
                }
            }
        }
    }
}
