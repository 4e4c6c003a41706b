//! The expense record, its categories and the category filter.
//!
//! Expenses are owned by the remote expense API; this module only describes
//! their shape on the wire and the fixed set of categories the dashboard knows
//! how to style.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// The identifier the remote store assigns to an expense when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Wrap an identifier issued by the remote store.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The spending category of an expense.
///
/// The remote store accepts free text, so any value outside the known set is
/// kept verbatim in [Category::Unrecognised] and rendered with the fallback
/// style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[allow(missing_docs)]
pub enum Category {
    Food,
    Transportation,
    Shopping,
    Entertainment,
    Utilities,
    Health,
    Other,
    /// A category name the dashboard does not know about.
    Unrecognised(String),
}

/// The categories offered in the filter bar and the add expense form, in display order.
pub const KNOWN_CATEGORIES: [Category; 7] = [
    Category::Food,
    Category::Transportation,
    Category::Shopping,
    Category::Entertainment,
    Category::Utilities,
    Category::Health,
    Category::Other,
];

/// The icon token and display colour for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    /// A Font Awesome icon class, e.g. "fa-utensils".
    pub icon: &'static str,
    /// A CSS hex colour, e.g. "#F59E0B".
    pub color: &'static str,
}

/// The style used for categories without an entry of their own.
pub const DEFAULT_CATEGORY_STYLE: CategoryStyle = CategoryStyle {
    icon: "fa-tag",
    color: "#6B7280",
};

impl Category {
    /// The category name as sent to and received from the remote store.
    pub fn name(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Health => "Health",
            Category::Other => "Other",
            Category::Unrecognised(name) => name,
        }
    }

    /// The icon and colour to display next to this category.
    pub fn style(&self) -> CategoryStyle {
        let (icon, color) = match self {
            Category::Food => ("fa-utensils", "#F59E0B"),
            Category::Transportation => ("fa-car", "#3B82F6"),
            Category::Shopping => ("fa-shopping-bag", "#EC4899"),
            Category::Entertainment => ("fa-film", "#8B5CF6"),
            Category::Utilities => ("fa-bolt", "#10B981"),
            Category::Health => ("fa-heart", "#EF4444"),
            Category::Other => ("fa-tag", "#6B7280"),
            Category::Unrecognised(_) => return DEFAULT_CATEGORY_STYLE,
        };

        CategoryStyle { icon, color }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        KNOWN_CATEGORIES
            .iter()
            .find(|category| category.name() == value)
            .cloned()
            .unwrap_or_else(|| Category::Unrecognised(value.to_owned()))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from(value.as_str())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Unrecognised(name) => name,
            known => known.name().to_owned(),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An expense as stored by the remote expense API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Assigned by the remote store, immutable afterwards.
    #[serde(rename = "expenseId")]
    pub id: ExpenseId,
    /// The user the expense belongs to.
    pub user_id: String,
    /// What the money was spent on.
    pub category: Category,
    /// The amount spent in dollars. Never negative.
    pub amount: f64,
    /// Free text entered by the user, may be empty.
    pub description: String,
    /// The day the money was spent.
    ///
    /// Must be exactly `YYYY-MM-DD` on the wire. A listed record with any
    /// other date form fails to decode and is skipped.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// When the remote store created the record, in milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// The body of a request to create an expense.
///
/// The amount must already be parsed, but nothing else is checked here; the
/// remote store is responsible for rejecting malformed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct NewExpense {
    pub user_id: String,
    pub category: Category,
    pub amount: f64,
    pub description: String,
    #[serde(with = "iso_date")]
    pub date: Date,
}

/// The fields of a new expense as entered by the user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[allow(missing_docs)]
pub struct ExpenseDraft {
    pub category: Category,
    pub amount: f64,
    pub description: String,
    #[serde(with = "iso_date")]
    pub date: Date,
}

impl ExpenseDraft {
    /// The request body for creating this expense on behalf of `user_id`.
    pub fn for_user(self, user_id: &str) -> NewExpense {
        NewExpense {
            user_id: user_id.to_owned(),
            category: self.category,
            amount: self.amount,
            description: self.description,
            date: self.date,
        }
    }
}

/// The label of the filter that shows every expense.
pub const ALL_FILTER_LABEL: &str = "All";

/// The category used to narrow the expense table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Show all expenses.
    #[default]
    All,
    /// Show only expenses in this category.
    Only(Category),
}

impl CategoryFilter {
    /// Whether `category` passes the filter.
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    /// The label shown on the filter button.
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_FILTER_LABEL,
            CategoryFilter::Only(category) => category.name(),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_FILTER_LABEL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::from(value))
        }
    }
}

#[cfg(test)]
mod expense_tests {
    use time::macros::date;

    use super::{
        Category, CategoryFilter, DEFAULT_CATEGORY_STYLE, Expense, ExpenseId, KNOWN_CATEGORIES,
        NewExpense,
    };

    #[test]
    fn known_category_names_round_trip() {
        for category in KNOWN_CATEGORIES {
            assert_eq!(Category::from(category.name()), category);
        }
    }

    #[test]
    fn unknown_category_falls_back_to_default_style() {
        let category = Category::from("Pets");

        assert_eq!(category, Category::Unrecognised("Pets".to_owned()));
        assert_eq!(category.name(), "Pets");
        assert_eq!(category.style(), DEFAULT_CATEGORY_STYLE);
    }

    #[test]
    fn known_categories_have_their_own_style() {
        assert_eq!(Category::Food.style().icon, "fa-utensils");
        assert_eq!(Category::Food.style().color, "#F59E0B");
        assert_eq!(Category::Health.style().icon, "fa-heart");
        assert_eq!(Category::Health.style().color, "#EF4444");
    }

    #[test]
    fn deserializes_expense_from_api_json() {
        let json = r#"{
            "expenseId": "0b6c",
            "userId": "demo_user",
            "category": "Groceries",
            "amount": 12.5,
            "description": "Milk",
            "date": "2024-01-05",
            "timestamp": 1704412800000
        }"#;

        let expense: Expense = serde_json::from_str(json).expect("Could not parse expense");

        assert_eq!(expense.id, ExpenseId::new("0b6c"));
        assert_eq!(expense.user_id, "demo_user");
        assert_eq!(expense.category, Category::Unrecognised("Groceries".to_owned()));
        assert_eq!(expense.amount, 12.5);
        assert_eq!(expense.date, date!(2024 - 01 - 05));
        assert_eq!(expense.timestamp, Some(1704412800000));
    }

    #[test]
    fn timestamp_is_optional() {
        let json = r#"{"expenseId": "1", "userId": "u", "category": "Food",
            "amount": 1, "description": "", "date": "2024-02-29"}"#;

        let expense: Expense = serde_json::from_str(json).expect("Could not parse expense");

        assert_eq!(expense.timestamp, None);
        assert_eq!(expense.category, Category::Food);
    }

    #[test]
    fn serializes_new_expense_with_api_field_names() {
        let draft = NewExpense {
            user_id: "demo_user".to_owned(),
            category: Category::Transportation,
            amount: 3.2,
            description: "Bus".to_owned(),
            date: date!(2024 - 03 - 01),
        };

        let json = serde_json::to_value(&draft).expect("Could not serialize draft");

        assert_eq!(
            json,
            serde_json::json!({
                "userId": "demo_user",
                "category": "Transportation",
                "amount": 3.2,
                "description": "Bus",
                "date": "2024-03-01",
            })
        );
    }

    #[test]
    fn filter_all_matches_everything() {
        let filter = CategoryFilter::from("All");

        assert_eq!(filter, CategoryFilter::All);
        assert!(filter.matches(&Category::Food));
        assert!(filter.matches(&Category::Unrecognised("Pets".to_owned())));
    }

    #[test]
    fn category_filter_matches_only_its_category() {
        let filter = CategoryFilter::from("Food");

        assert!(filter.matches(&Category::Food));
        assert!(!filter.matches(&Category::Health));
        assert_eq!(filter.label(), "Food");
    }
}
