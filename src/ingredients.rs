//! Ingredients

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

use crate::units::Unit;

new_key_type! {
    /// Ingredient Key
    pub struct IngredientKey;
}

/// A purchasable ingredient with a per-unit cost.
///
/// The cost is per one [`Unit`] of the ingredient (per kilogram, per dozen,
/// and so on). Recipe lines reference ingredients by [`IngredientKey`] and
/// express their quantities in the same unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient<'a> {
    name: String,
    unit: Unit,
    cost_per_unit: Money<'a, Currency>,
}

impl<'a> Ingredient<'a> {
    /// Creates a new ingredient.
    #[must_use]
    pub fn new(name: impl Into<String>, unit: Unit, cost_per_unit: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            unit,
            cost_per_unit,
        }
    }

    /// Returns the ingredient name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit the ingredient is priced in.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Returns the cost of one unit of the ingredient.
    pub fn cost_per_unit(&self) -> &Money<'a, Currency> {
        &self.cost_per_unit
    }
}
