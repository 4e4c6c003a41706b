//! Summary statistics over a list of expenses.
//!
//! Every function here is pure: the same expenses always give the same result,
//! and the result depends on the order of the expenses only where documented.

use crate::expense::{Category, Expense};

/// The label shown in place of a top category when there is nothing to show.
pub const NO_TOP_CATEGORY_LABEL: &str = "-";

/// The category with the most spending.
#[derive(Debug, Clone, PartialEq)]
pub struct TopCategory {
    /// `None` when there are no expenses, rendered as [NO_TOP_CATEGORY_LABEL].
    pub category: Option<Category>,
    pub amount: f64,
}

impl TopCategory {
    /// The category name, or [NO_TOP_CATEGORY_LABEL] if there is no top category.
    pub fn label(&self) -> &str {
        self.category
            .as_ref()
            .map_or(NO_TOP_CATEGORY_LABEL, Category::name)
    }
}

/// The spending in one category and its share of all spending.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: f64,
    /// Percentage of total spending, rounded to one decimal place.
    pub percentage: f64,
}

/// The sum of all expense amounts, zero if there are no expenses.
pub fn total_spent<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> f64 {
    expenses.into_iter().map(|expense| expense.amount).sum()
}

pub fn transaction_count<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> usize {
    expenses.into_iter().count()
}

/// The mean expense amount, zero if there are no expenses.
pub fn average_transaction(expenses: &[Expense]) -> f64 {
    let count = transaction_count(expenses);

    if count == 0 {
        return 0.0;
    }

    total_spent(expenses) / count as f64
}

/// Sums expense amounts per category.
///
/// Categories are returned in the order they are first seen in `expenses`.
pub fn sum_by_category(expenses: &[Expense]) -> Vec<(Category, f64)> {
    let mut totals: Vec<(Category, f64)> = Vec::new();

    for expense in expenses {
        match totals
            .iter_mut()
            .find(|(category, _)| *category == expense.category)
        {
            Some((_, total)) => *total += expense.amount,
            None => totals.push((expense.category.clone(), expense.amount)),
        }
    }

    totals
}

/// Finds the category with the greatest total spending.
///
/// Ties go to the category seen first in `expenses`. A category must spend
/// more than zero to be picked, so no expenses (or only zero amounts) gives a
/// [TopCategory] with no category and an amount of zero.
pub fn top_category(expenses: &[Expense]) -> TopCategory {
    let mut top = TopCategory {
        category: None,
        amount: 0.0,
    };

    for (category, amount) in sum_by_category(expenses) {
        if amount > top.amount {
            top = TopCategory {
                category: Some(category),
                amount,
            };
        }
    }

    top
}

/// Per-category spending sorted from most to least, with each category's
/// share of the total.
///
/// Categories with equal spending keep the order they were first seen in.
/// Returns an empty vector when there are no expenses. If every amount is
/// zero each share is 0%.
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryShare> {
    if expenses.is_empty() {
        return Vec::new();
    }

    let total = total_spent(expenses);
    let mut totals = sum_by_category(expenses);
    // `sort_by` is stable, which keeps ties in encounter order.
    totals.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    totals
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            percentage: if total > 0.0 {
                round_to_one_decimal(amount / total * 100.0)
            } else {
                0.0
            },
        })
        .collect()
}

fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod aggregation_tests {
    use time::macros::date;

    use crate::{
        expense::{Category, Expense},
        store::test_utils::create_test_expense,
    };

    use super::{
        CategoryShare, average_transaction, category_breakdown, sum_by_category, top_category,
        total_spent, transaction_count,
    };

    fn expense(id: &str, category: Category, amount: f64) -> Expense {
        create_test_expense(id, category, amount, date!(2024 - 01 - 15))
    }

    #[test]
    fn empty_input_gives_zero_totals() {
        let expenses: Vec<Expense> = vec![];

        assert_eq!(total_spent(&expenses), 0.0);
        assert_eq!(transaction_count(&expenses), 0);
        assert_eq!(average_transaction(&expenses), 0.0);
    }

    #[test]
    fn average_is_total_over_count() {
        let expenses = vec![
            expense("1", Category::Food, 10.0),
            expense("2", Category::Health, 25.5),
            expense("3", Category::Food, 4.5),
        ];

        assert_eq!(total_spent(&expenses), 40.0);
        assert_eq!(transaction_count(&expenses), 3);
        assert_eq!(
            average_transaction(&expenses),
            total_spent(&expenses) / transaction_count(&expenses) as f64
        );
    }

    #[test]
    fn sum_by_category_keeps_encounter_order() {
        let expenses = vec![
            expense("1", Category::Health, 1.0),
            expense("2", Category::Food, 2.0),
            expense("3", Category::Health, 3.0),
        ];

        let sums = sum_by_category(&expenses);

        assert_eq!(sums, vec![(Category::Health, 4.0), (Category::Food, 2.0)]);
    }

    #[test]
    fn top_category_picks_greatest_sum() {
        let expenses = vec![
            expense("1", Category::Food, 10.0),
            expense("2", Category::Shopping, 15.0),
            expense("3", Category::Food, 10.0),
        ];

        let top = top_category(&expenses);

        assert_eq!(top.category, Some(Category::Food));
        assert_eq!(top.amount, 20.0);
        assert_eq!(top.label(), "Food");
    }

    #[test]
    fn top_category_tie_goes_to_first_seen() {
        let expenses = vec![
            expense("1", Category::Unrecognised("A".to_owned()), 10.0),
            expense("2", Category::Unrecognised("B".to_owned()), 10.0),
        ];

        let top = top_category(&expenses);

        assert_eq!(top.label(), "A");
    }

    #[test]
    fn top_category_of_nothing_is_sentinel() {
        let top = top_category(&[]);

        assert_eq!(top.category, None);
        assert_eq!(top.amount, 0.0);
        assert_eq!(top.label(), "-");
    }

    #[test]
    fn top_category_ignores_zero_spending() {
        let top = top_category(&[expense("1", Category::Food, 0.0)]);

        assert_eq!(top.label(), "-");
    }

    #[test]
    fn breakdown_of_nothing_is_empty() {
        assert!(category_breakdown(&[]).is_empty());
    }

    #[test]
    fn breakdown_is_sorted_descending_with_stable_ties() {
        let expenses = vec![
            expense("1", Category::Food, 20.0),
            expense("2", Category::Health, 50.0),
            expense("3", Category::Shopping, 20.0),
            expense("4", Category::Other, 10.0),
        ];

        let breakdown = category_breakdown(&expenses);

        assert_eq!(
            breakdown,
            vec![
                CategoryShare {
                    category: Category::Health,
                    amount: 50.0,
                    percentage: 50.0,
                },
                CategoryShare {
                    category: Category::Food,
                    amount: 20.0,
                    percentage: 20.0,
                },
                CategoryShare {
                    category: Category::Shopping,
                    amount: 20.0,
                    percentage: 20.0,
                },
                CategoryShare {
                    category: Category::Other,
                    amount: 10.0,
                    percentage: 10.0,
                },
            ]
        );
    }

    #[test]
    fn breakdown_percentages_are_rounded_to_one_decimal() {
        let expenses = vec![
            expense("1", Category::Food, 1.0),
            expense("2", Category::Health, 1.0),
            expense("3", Category::Other, 1.0),
        ];

        let breakdown = category_breakdown(&expenses);

        assert!(breakdown.iter().all(|share| share.percentage == 33.3));
    }

    #[test]
    fn breakdown_percentages_sum_to_one_hundred() {
        let expenses = vec![
            expense("1", Category::Food, 12.34),
            expense("2", Category::Health, 56.78),
            expense("3", Category::Other, 9.1),
            expense("4", Category::Shopping, 100.0),
            expense("5", Category::Food, 0.99),
        ];

        let breakdown = category_breakdown(&expenses);
        let total: f64 = breakdown.iter().map(|share| share.percentage).sum();
        // Each share is rounded to 0.1, so the sum can drift by 0.05 per category.
        let tolerance = 0.05 * breakdown.len() as f64 + f64::EPSILON;

        assert!(
            (total - 100.0).abs() <= tolerance,
            "want percentages summing to 100 ± {tolerance}, got {total}"
        );
    }

    #[test]
    fn breakdown_of_zero_spending_has_zero_percentages() {
        let expenses = vec![
            expense("a", Category::Food, 0.0),
            expense("b", Category::Health, 0.0),
        ];

        let breakdown = category_breakdown(&expenses);

        assert_eq!(breakdown.len(), 2);
        for share in &breakdown {
            assert!(share.percentage.is_finite(), "got {share:?}");
            assert_eq!(share.percentage, 0.0);
        }
    }
}
