//! Recipes

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::ingredients::IngredientKey;

/// Errors that can occur while assembling a recipe.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipeError {
    /// The same ingredient was added to a recipe twice.
    #[error("ingredient already present in recipe")]
    DuplicateIngredient(IngredientKey),
}

/// One ingredient entry in a recipe.
///
/// The quantity is in the referenced ingredient's own unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeLine {
    /// Ingredient being used
    pub ingredient: IngredientKey,

    /// Quantity of the ingredient, in the ingredient's unit
    pub quantity: Decimal,
}

/// A recipe: a named batch of ingredient lines.
///
/// `batch_size` is the number of sellable units one execution of the recipe
/// yields. A given ingredient may appear at most once per recipe; [`Recipe::add_line`]
/// enforces this.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    name: String,
    batch_size: u32,
    lines: SmallVec<[RecipeLine; 8]>,
}

impl Recipe {
    /// Creates a new recipe with no lines.
    #[must_use]
    pub fn new(name: impl Into<String>, batch_size: u32) -> Self {
        Self {
            name: name.into(),
            batch_size,
            lines: SmallVec::new(),
        }
    }

    /// Creates a recipe from an iterator of lines.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::DuplicateIngredient`] if the same ingredient
    /// appears on more than one line.
    pub fn with_lines(
        name: impl Into<String>,
        batch_size: u32,
        lines: impl IntoIterator<Item = RecipeLine>,
    ) -> Result<Self, RecipeError> {
        let mut recipe = Self::new(name, batch_size);

        for line in lines {
            recipe.add_line(line)?;
        }

        Ok(recipe)
    }

    /// Adds an ingredient line to the recipe.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::DuplicateIngredient`] if the line's ingredient
    /// is already present.
    pub fn add_line(&mut self, line: RecipeLine) -> Result<(), RecipeError> {
        if self.lines.iter().any(|l| l.ingredient == line.ingredient) {
            return Err(RecipeError::DuplicateIngredient(line.ingredient));
        }

        self.lines.push(line);

        Ok(())
    }

    /// Returns the recipe name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of sellable units one batch yields.
    pub fn batch_size(&self) -> u32 {
        self.batch_size
    }

    /// Returns the ingredient lines.
    pub fn lines(&self) -> &[RecipeLine] {
        &self.lines
    }
}
