//! Expenses

use std::fmt;

use jiff::civil::Date;
use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::{Deserialize, Serialize};

/// Category an expense is logged under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Flour, butter, chocolate and the rest
    Ingredients,

    /// Ovens, mixers, tins
    Equipment,

    /// Boxes, bags, labels
    Packaging,

    /// Power, water, gas
    Utilities,

    /// Ads, market-stall fees
    Marketing,

    /// Anything else
    Other,
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseCategory::Ingredients => "ingredients",
            ExpenseCategory::Equipment => "equipment",
            ExpenseCategory::Packaging => "packaging",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Marketing => "marketing",
            ExpenseCategory::Other => "other",
        };

        f.write_str(label)
    }
}

/// A single logged expense.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense<'a> {
    /// What the money went on
    pub description: String,

    /// Category for grouping
    pub category: ExpenseCategory,

    /// Amount spent
    pub amount: Money<'a, Currency>,

    /// Date the expense was incurred
    pub incurred_on: Date,
}

/// Sums expenses per category.
///
/// # Errors
///
/// Returns a [`MoneyError`] if amounts within a category disagree on currency.
pub fn totals_by_category<'a>(
    expenses: &[Expense<'a>],
) -> Result<FxHashMap<ExpenseCategory, Money<'a, Currency>>, MoneyError> {
    let mut totals: FxHashMap<ExpenseCategory, Money<'a, Currency>> = FxHashMap::default();

    for expense in expenses {
        let total = match totals.remove(&expense.category) {
            Some(total) => total.add(expense.amount)?,
            None => expense.amount,
        };

        totals.insert(expense.category, total);
    }

    Ok(totals)
}

/// Total spend in a calendar month, or `None` if nothing was logged then.
///
/// # Errors
///
/// Returns a [`MoneyError`] if amounts within the month disagree on currency.
pub fn month_total<'a>(
    expenses: &[Expense<'a>],
    year: i16,
    month: i8,
) -> Result<Option<Money<'a, Currency>>, MoneyError> {
    let mut total: Option<Money<'a, Currency>> = None;

    for expense in expenses {
        if expense.incurred_on.year() != year || expense.incurred_on.month() != month {
            continue;
        }

        total = Some(match total {
            Some(total) => total.add(expense.amount)?,
            None => expense.amount,
        });
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn expenses<'a>() -> Vec<Expense<'a>> {
        vec![
            Expense {
                description: "25kg flour sacks".to_string(),
                category: ExpenseCategory::Ingredients,
                amount: Money::from_minor(4_200, USD),
                incurred_on: date(2026, 8, 3),
            },
            Expense {
                description: "Butter".to_string(),
                category: ExpenseCategory::Ingredients,
                amount: Money::from_minor(1_800, USD),
                incurred_on: date(2026, 8, 10),
            },
            Expense {
                description: "Bread bags".to_string(),
                category: ExpenseCategory::Packaging,
                amount: Money::from_minor(950, USD),
                incurred_on: date(2026, 7, 28),
            },
        ]
    }

    #[test]
    fn totals_by_category_groups_and_sums() -> TestResult {
        let totals = totals_by_category(&expenses())?;

        assert_eq!(
            totals.get(&ExpenseCategory::Ingredients),
            Some(&Money::from_minor(6_000, USD))
        );
        assert_eq!(
            totals.get(&ExpenseCategory::Packaging),
            Some(&Money::from_minor(950, USD))
        );
        assert_eq!(totals.get(&ExpenseCategory::Utilities), None);

        Ok(())
    }

    #[test]
    fn totals_by_category_empty_input_yields_empty_map() -> TestResult {
        let totals = totals_by_category(&[])?;

        assert!(totals.is_empty());

        Ok(())
    }

    #[test]
    fn totals_by_category_errors_on_currency_mismatch() {
        let mut expenses = expenses();

        expenses.push(Expense {
            description: "Imported vanilla".to_string(),
            category: ExpenseCategory::Ingredients,
            amount: Money::from_minor(2_500, GBP),
            incurred_on: date(2026, 8, 15),
        });

        assert!(totals_by_category(&expenses).is_err());
    }

    #[test]
    fn month_total_only_counts_matching_month() -> TestResult {
        let expenses = expenses();

        assert_eq!(
            month_total(&expenses, 2026, 8)?,
            Some(Money::from_minor(6_000, USD))
        );
        assert_eq!(
            month_total(&expenses, 2026, 7)?,
            Some(Money::from_minor(950, USD))
        );
        assert_eq!(month_total(&expenses, 2026, 6)?, None);

        Ok(())
    }

    #[test]
    fn category_display_matches_serde_names() -> TestResult {
        assert_eq!(ExpenseCategory::Ingredients.to_string(), "ingredients");

        assert_eq!(
            serde_norway::to_string(&ExpenseCategory::Packaging)?.trim(),
            "packaging"
        );

        Ok(())
    }
}
