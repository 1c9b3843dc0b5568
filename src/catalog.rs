//! Catalog
//!
//! Loads ingredient catalogs and recipe books from YAML files and resolves
//! string keys to in-memory slotmap keys. Files live under a base path
//! (default `./fixtures`): `ingredients/<name>.yml` and `recipes/<name>.yml`.
//!
//! Suspect data (negative costs or quantities) is loaded as-is but warned
//! about, so the numbers downstream stay faithful to the source file while
//! the operator can see something is off.

use std::{fs, path::PathBuf};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use slotmap::SlotMap;
use thiserror::Error;
use tracing::warn;

use crate::{
    costing::{CostSummary, CostingError, cost_recipe},
    ingredients::{Ingredient, IngredientKey},
    recipes::{Recipe, RecipeError, RecipeLine},
    units::Unit,
};

/// Catalog loading and lookup errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading catalog files
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid cost format
    #[error("Invalid cost format: {0}")]
    InvalidCost(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between ingredients
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Ingredient not found
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    /// Recipe not found
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    /// No ingredients loaded yet
    #[error("No ingredients loaded yet; currency unknown")]
    NoCurrency,

    /// Invalid recipe definition
    #[error(transparent)]
    Recipe(#[from] RecipeError),

    /// Costing error for a loaded recipe
    #[error(transparent)]
    Costing(#[from] CostingError),
}

/// Wrapper for ingredients in YAML
#[derive(Debug, Deserialize)]
struct IngredientsFile {
    /// Map of ingredient key -> ingredient entry
    ingredients: FxHashMap<String, IngredientEntry>,
}

/// One ingredient entry in a catalog file
#[derive(Debug, Deserialize)]
struct IngredientEntry {
    name: String,
    unit: Unit,
    /// Cost per unit (e.g., "1.50 USD")
    cost_per_unit: String,
}

/// Wrapper for recipes in YAML
#[derive(Debug, Deserialize)]
struct RecipesFile {
    /// Map of recipe key -> recipe entry
    recipes: FxHashMap<String, RecipeEntry>,
}

/// One recipe entry in a recipe book file
#[derive(Debug, Deserialize)]
struct RecipeEntry {
    name: String,
    batch_size: u32,
    lines: Vec<LineEntry>,
}

/// One ingredient line within a recipe entry
#[derive(Debug, Deserialize)]
struct LineEntry {
    /// String key of the ingredient in the same catalog
    ingredient: String,
    quantity: Decimal,
}

/// An in-memory ingredient catalog and recipe book.
#[derive(Debug)]
pub struct Catalog {
    /// Base path for catalog files
    base_path: PathBuf,

    /// Ingredient storage with generated keys
    ingredients: SlotMap<IngredientKey, Ingredient<'static>>,

    /// String key -> `SlotMap` key mapping for lookups
    ingredient_keys: FxHashMap<String, IngredientKey>,

    /// Loaded recipes and their string-key index
    recipes: Vec<Recipe>,
    recipe_keys: FxHashMap<String, usize>,

    /// Currency shared by every ingredient in the catalog
    currency: Option<&'static Currency>,
}

impl Catalog {
    /// Create a new empty catalog with the default base path.
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty catalog with a custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ingredients: SlotMap::with_key(),
            ingredient_keys: FxHashMap::default(),
            recipes: Vec::new(),
            recipe_keys: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load ingredients from a YAML catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a cost is
    /// malformed, or if a cost's currency disagrees with ingredients loaded
    /// earlier.
    pub fn load_ingredients(&mut self, name: &str) -> Result<&mut Self, CatalogError> {
        let file_path = self
            .base_path
            .join("ingredients")
            .join(format!("{name}.yml"));

        let contents = fs::read_to_string(&file_path)?;
        let file: IngredientsFile = serde_norway::from_str(&contents)?;

        for (key, entry) in file.ingredients {
            let (minor_units, currency) = parse_cost(&entry.cost_per_unit)?;

            if let Some(existing) = self.currency {
                if existing != currency {
                    return Err(CatalogError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            if minor_units < 0 {
                warn!(
                    ingredient = %entry.name,
                    cost = %entry.cost_per_unit,
                    "negative ingredient cost loaded"
                );
            }

            let ingredient = Ingredient::new(
                entry.name,
                entry.unit,
                Money::from_minor(minor_units, currency),
            );

            let ingredient_key = self.ingredients.insert(ingredient);

            self.ingredient_keys.insert(key, ingredient_key);
        }

        Ok(self)
    }

    /// Load recipes from a YAML recipe book file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a line
    /// references an ingredient that has not been loaded, or if a recipe
    /// lists the same ingredient twice.
    pub fn load_recipes(&mut self, name: &str) -> Result<&mut Self, CatalogError> {
        let file_path = self.base_path.join("recipes").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let file: RecipesFile = serde_norway::from_str(&contents)?;

        for (key, entry) in file.recipes {
            let mut recipe = Recipe::new(entry.name, entry.batch_size);

            for line in entry.lines {
                let ingredient = self
                    .ingredient_keys
                    .get(&line.ingredient)
                    .copied()
                    .ok_or_else(|| CatalogError::IngredientNotFound(line.ingredient.clone()))?;

                if line.quantity < Decimal::ZERO {
                    warn!(
                        recipe = %recipe.name(),
                        ingredient = %line.ingredient,
                        quantity = %line.quantity,
                        "negative recipe quantity loaded"
                    );
                }

                recipe.add_line(RecipeLine {
                    ingredient,
                    quantity: line.quantity,
                })?;
            }

            self.recipe_keys.insert(key, self.recipes.len());
            self.recipes.push(recipe);
        }

        Ok(self)
    }

    /// Load a complete catalog set (ingredients and recipes with the same name).
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        catalog.load_ingredients(name)?.load_recipes(name)?;

        Ok(catalog)
    }

    /// Get an ingredient by its string key.
    ///
    /// # Errors
    ///
    /// Returns an error if the ingredient is not found.
    pub fn ingredient(&self, key: &str) -> Result<&Ingredient<'static>, CatalogError> {
        let ingredient_key = self.ingredient_key(key)?;

        self.ingredients
            .get(ingredient_key)
            .ok_or_else(|| CatalogError::IngredientNotFound(key.to_string()))
    }

    /// Get an ingredient's slotmap key by its string key.
    ///
    /// # Errors
    ///
    /// Returns an error if the ingredient is not found.
    pub fn ingredient_key(&self, key: &str) -> Result<IngredientKey, CatalogError> {
        self.ingredient_keys
            .get(key)
            .copied()
            .ok_or_else(|| CatalogError::IngredientNotFound(key.to_string()))
    }

    /// Get the ingredient `SlotMap`.
    pub fn ingredients(&self) -> &SlotMap<IngredientKey, Ingredient<'static>> {
        &self.ingredients
    }

    /// Get a recipe by its string key.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe is not found.
    pub fn recipe(&self, key: &str) -> Result<&Recipe, CatalogError> {
        self.recipe_keys
            .get(key)
            .and_then(|&idx| self.recipes.get(idx))
            .ok_or_else(|| CatalogError::RecipeNotFound(key.to_string()))
    }

    /// Get all loaded recipes.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Get the catalog currency.
    ///
    /// # Errors
    ///
    /// Returns an error if no ingredients have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, CatalogError> {
        self.currency.ok_or(CatalogError::NoCurrency)
    }

    /// Cost a loaded recipe by its string key.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe is not found or cannot be costed.
    pub fn cost(&self, key: &str) -> Result<CostSummary<'static>, CatalogError> {
        let recipe = self.recipe(key)?;

        Ok(cost_recipe(recipe, &self.ingredients)?)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a cost string (e.g., "1.50 USD") into minor units and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code is
/// not recognized.
pub fn parse_cost(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(CatalogError::InvalidCost(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| CatalogError::InvalidCost(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidCost(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| CatalogError::InvalidCost(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| CatalogError::InvalidCost(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(CatalogError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
