//! Recipe Costing
//!
//! Turns a [`Recipe`] plus an ingredient map into a [`CostSummary`]: total batch
//! cost, cost per sellable unit, and a suggested retail price derived from a
//! fixed markup.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    ingredients::{Ingredient, IngredientKey},
    recipes::Recipe,
};

/// Errors that can occur while costing a recipe.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostingError {
    /// The recipe has no lines, so currency could not be determined.
    #[error("recipe has no ingredient lines; cannot determine currency")]
    EmptyRecipe,

    /// A recipe line references an ingredient missing from the catalog.
    ///
    /// Callers are expected to validate references up front; this error makes
    /// a broken reference visible instead of panicking on it.
    #[error("recipe line references an unknown ingredient")]
    UnknownIngredient(IngredientKey),

    /// Ingredients on the same recipe are priced in different currencies.
    #[error("currency mismatch: expected {expected}, found {actual}")]
    CurrencyMismatch {
        /// Currency of the first ingredient line
        expected: &'static str,
        /// Currency of the offending line
        actual: &'static str,
    },

    /// An intermediate amount exceeded the representable decimal range.
    #[error("cost amount overflowed")]
    AmountOverflow,
}

/// The fixed markup applied on top of per-unit cost when suggesting a retail
/// price: 150%, so the suggested price is 2.5 × cost per unit.
#[must_use]
pub fn markup() -> Percentage {
    Percentage::from(1.5)
}

/// Derived costs for one recipe batch.
///
/// Amounts are exact decimals in major currency units; the `*_money` accessors
/// round to the currency's minor unit for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostSummary<'a> {
    currency: &'a Currency,
    total_cost: Decimal,
    cost_per_unit: Decimal,
    suggested_price: Decimal,
}

impl<'a> CostSummary<'a> {
    /// Currency all amounts are denominated in.
    #[must_use]
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Total cost of one batch.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    /// Cost of one sellable unit (zero when the batch size is zero).
    #[must_use]
    pub fn cost_per_unit(&self) -> Decimal {
        self.cost_per_unit
    }

    /// Suggested retail price for one sellable unit.
    #[must_use]
    pub fn suggested_price(&self) -> Decimal {
        self.suggested_price
    }

    /// Total batch cost rounded to the currency's minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`CostingError::AmountOverflow`] if the amount does not fit in
    /// minor units.
    pub fn total_cost_money(&self) -> Result<Money<'a, Currency>, CostingError> {
        money_from_decimal(self.total_cost, self.currency)
    }

    /// Per-unit cost rounded to the currency's minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`CostingError::AmountOverflow`] if the amount does not fit in
    /// minor units.
    pub fn cost_per_unit_money(&self) -> Result<Money<'a, Currency>, CostingError> {
        money_from_decimal(self.cost_per_unit, self.currency)
    }

    /// Suggested price rounded to the currency's minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`CostingError::AmountOverflow`] if the amount does not fit in
    /// minor units.
    pub fn suggested_price_money(&self) -> Result<Money<'a, Currency>, CostingError> {
        money_from_decimal(self.suggested_price, self.currency)
    }
}

/// Calculates the cost summary for a recipe.
///
/// `total_cost` is the sum over all lines of quantity × ingredient cost per
/// unit. `cost_per_unit` divides that by the batch size, defaulting to zero
/// for a zero batch size rather than erroring; `suggested_price` applies the
/// fixed [`markup`]. The calculation is pure and idempotent.
///
/// Negative costs or quantities are not rejected here; the catalog loader
/// warns about them when they enter the system.
///
/// # Errors
///
/// - [`CostingError::EmptyRecipe`]: the recipe has no lines.
/// - [`CostingError::UnknownIngredient`]: a line references a key missing
///   from `ingredients`.
/// - [`CostingError::CurrencyMismatch`]: ingredient costs disagree on currency.
/// - [`CostingError::AmountOverflow`]: an intermediate amount overflowed.
pub fn cost_recipe<'a>(
    recipe: &Recipe,
    ingredients: &SlotMap<IngredientKey, Ingredient<'a>>,
) -> Result<CostSummary<'a>, CostingError> {
    let mut currency: Option<&'a Currency> = None;
    let mut total_cost = Decimal::ZERO;

    for line in recipe.lines() {
        let ingredient = ingredients
            .get(line.ingredient)
            .ok_or(CostingError::UnknownIngredient(line.ingredient))?;

        let line_currency = ingredient.cost_per_unit().currency();

        match currency {
            None => currency = Some(line_currency),
            Some(expected) if expected != line_currency => {
                return Err(CostingError::CurrencyMismatch {
                    expected: expected.iso_alpha_code,
                    actual: line_currency.iso_alpha_code,
                });
            }
            Some(_) => {}
        }

        let line_cost = line_cost(line.quantity, ingredient.cost_per_unit())?;

        total_cost = total_cost
            .checked_add(line_cost)
            .ok_or(CostingError::AmountOverflow)?;
    }

    let currency = currency.ok_or(CostingError::EmptyRecipe)?;

    let cost_per_unit = if recipe.batch_size() == 0 {
        Decimal::ZERO
    } else {
        total_cost
            .checked_div(Decimal::from(recipe.batch_size()))
            .ok_or(CostingError::AmountOverflow)?
    };

    // Single multiplication: adding a separately rounded markup amount can
    // land one ulp off the exact 2.5× relation.
    let multiplier = Decimal::ONE
        .checked_add(markup() * Decimal::ONE)
        .ok_or(CostingError::AmountOverflow)?;

    let suggested_price = cost_per_unit
        .checked_mul(multiplier)
        .ok_or(CostingError::AmountOverflow)?;

    Ok(CostSummary {
        currency,
        total_cost,
        cost_per_unit,
        suggested_price,
    })
}

/// Cost of `quantity` units of an ingredient, in major currency units.
///
/// # Errors
///
/// Returns [`CostingError::AmountOverflow`] if the multiplication overflows.
pub fn line_cost(
    quantity: Decimal,
    cost_per_unit: &Money<'_, Currency>,
) -> Result<Decimal, CostingError> {
    let unit_cost = major_units(cost_per_unit);

    quantity
        .checked_mul(unit_cost)
        .ok_or(CostingError::AmountOverflow)
}

/// Converts a money value to an exact decimal in major units.
pub(crate) fn major_units(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), money.currency().exponent)
}

/// Rounds a major-unit decimal to the currency's minor unit.
pub(crate) fn money_from_decimal<'a>(
    amount: Decimal,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, CostingError> {
    let scale = Decimal::new(10_i64.pow(currency.exponent), 0);

    let minor = amount
        .checked_mul(scale)
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_i64())
        .ok_or(CostingError::AmountOverflow)?;

    Ok(Money::from_minor(minor, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use crate::{recipes::RecipeLine, units::Unit};

    use super::*;

    fn catalog<'a>() -> (
        SlotMap<IngredientKey, Ingredient<'a>>,
        IngredientKey,
        IngredientKey,
    ) {
        let mut ingredients = SlotMap::with_key();

        let flour = ingredients.insert(Ingredient::new(
            "Plain Flour",
            Unit::Kilogram,
            Money::from_minor(150, USD),
        ));

        let sugar = ingredients.insert(Ingredient::new(
            "Caster Sugar",
            Unit::Kilogram,
            Money::from_minor(200, USD),
        ));

        (ingredients, flour, sugar)
    }

    fn muffins(flour: IngredientKey, sugar: IngredientKey) -> Result<Recipe, crate::recipes::RecipeError> {
        Recipe::with_lines(
            "Muffins",
            12,
            [
                RecipeLine {
                    ingredient: flour,
                    quantity: Decimal::TWO,
                },
                RecipeLine {
                    ingredient: sugar,
                    quantity: Decimal::ONE,
                },
            ],
        )
    }

    #[test]
    fn worked_example_matches_expected_amounts() -> TestResult {
        let (ingredients, flour, sugar) = catalog();
        let recipe = muffins(flour, sugar)?;

        let summary = cost_recipe(&recipe, &ingredients)?;

        assert_eq!(summary.total_cost(), Decimal::new(500, 2));
        assert_eq!(summary.cost_per_unit().round_dp(4), Decimal::new(4167, 4));
        assert_eq!(summary.suggested_price().round_dp(4), Decimal::new(10417, 4));
        assert_eq!(summary.currency(), USD);

        Ok(())
    }

    #[test]
    fn suggested_price_is_two_and_a_half_times_unit_cost() -> TestResult {
        let (ingredients, flour, sugar) = catalog();
        let recipe = muffins(flour, sugar)?;

        let summary = cost_recipe(&recipe, &ingredients)?;
        let multiplier = Decimal::new(25, 1);

        assert_eq!(
            summary.suggested_price(),
            summary.cost_per_unit() * multiplier
        );

        Ok(())
    }

    #[test]
    fn costing_is_idempotent() -> TestResult {
        let (ingredients, flour, sugar) = catalog();
        let recipe = muffins(flour, sugar)?;

        let first = cost_recipe(&recipe, &ingredients)?;
        let second = cost_recipe(&recipe, &ingredients)?;

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn zero_batch_size_yields_zero_unit_and_suggested_prices() -> TestResult {
        let (ingredients, flour, sugar) = catalog();

        let recipe = Recipe::with_lines(
            "Unsized",
            0,
            [
                RecipeLine {
                    ingredient: flour,
                    quantity: Decimal::TWO,
                },
                RecipeLine {
                    ingredient: sugar,
                    quantity: Decimal::ONE,
                },
            ],
        )?;

        let summary = cost_recipe(&recipe, &ingredients)?;

        assert_eq!(summary.total_cost(), Decimal::new(500, 2));
        assert_eq!(summary.cost_per_unit(), Decimal::ZERO);
        assert_eq!(summary.suggested_price(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn empty_recipe_returns_error() {
        let ingredients = SlotMap::<IngredientKey, Ingredient<'_>>::with_key();
        let recipe = Recipe::new("Empty", 12);

        let result = cost_recipe(&recipe, &ingredients);

        assert_eq!(result, Err(CostingError::EmptyRecipe));
    }

    #[test]
    fn unknown_ingredient_returns_error() -> TestResult {
        let (mut ingredients, flour, _sugar) = catalog();

        // A key left dangling by removal, as after a catalog edit.
        let missing = ingredients.insert(Ingredient::new(
            "Discontinued Spice",
            Unit::Kilogram,
            Money::from_minor(900, USD),
        ));

        ingredients.remove(missing);

        let recipe = Recipe::with_lines(
            "Broken",
            12,
            [
                RecipeLine {
                    ingredient: flour,
                    quantity: Decimal::ONE,
                },
                RecipeLine {
                    ingredient: missing,
                    quantity: Decimal::ONE,
                },
            ],
        )?;

        let result = cost_recipe(&recipe, &ingredients);

        assert_eq!(result, Err(CostingError::UnknownIngredient(missing)));

        Ok(())
    }

    #[test]
    fn mixed_currencies_return_error() -> TestResult {
        let mut ingredients = SlotMap::with_key();

        let flour = ingredients.insert(Ingredient::new(
            "Plain Flour",
            Unit::Kilogram,
            Money::from_minor(150, USD),
        ));

        let butter = ingredients.insert(Ingredient::new(
            "Butter",
            Unit::Kilogram,
            Money::from_minor(400, GBP),
        ));

        let recipe = Recipe::with_lines(
            "Mismatched",
            12,
            [
                RecipeLine {
                    ingredient: flour,
                    quantity: Decimal::ONE,
                },
                RecipeLine {
                    ingredient: butter,
                    quantity: Decimal::ONE,
                },
            ],
        )?;

        let result = cost_recipe(&recipe, &ingredients);

        assert_eq!(
            result,
            Err(CostingError::CurrencyMismatch {
                expected: USD.iso_alpha_code,
                actual: GBP.iso_alpha_code,
            })
        );

        Ok(())
    }

    #[test]
    fn negative_quantities_pass_through_unvalidated() -> TestResult {
        let (ingredients, flour, _sugar) = catalog();

        let recipe = Recipe::with_lines(
            "Correction",
            1,
            [RecipeLine {
                ingredient: flour,
                quantity: -Decimal::ONE,
            }],
        )?;

        let summary = cost_recipe(&recipe, &ingredients)?;

        assert_eq!(summary.total_cost(), Decimal::new(-150, 2));

        Ok(())
    }

    #[test]
    fn money_accessors_round_to_minor_units() -> TestResult {
        let (ingredients, flour, sugar) = catalog();
        let recipe = muffins(flour, sugar)?;

        let summary = cost_recipe(&recipe, &ingredients)?;

        assert_eq!(summary.total_cost_money()?, Money::from_minor(500, USD));
        // 0.41666... rounds to 0.42; 1.04166... rounds to 1.04.
        assert_eq!(summary.cost_per_unit_money()?, Money::from_minor(42, USD));
        assert_eq!(summary.suggested_price_money()?, Money::from_minor(104, USD));

        Ok(())
    }

    #[test]
    fn line_cost_multiplies_quantity_by_unit_cost() -> TestResult {
        let cost = Money::from_minor(150, USD);

        assert_eq!(
            line_cost(Decimal::new(25, 1), &cost)?,
            Decimal::new(375, 2)
        );

        Ok(())
    }

    #[test]
    fn markup_is_one_hundred_and_fifty_percent() {
        assert_eq!(markup(), Percentage::from(1.5));
    }
}
