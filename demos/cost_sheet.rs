//! Cost Sheet Demo
//!
//! Prints cost sheets for the recipes in a catalog set.
//!
//! Use `-f` to load a catalog set by name
//! Use `-r` to print a single recipe by its catalog key

use std::io;

use anyhow::Result;

use breadwinner::{catalog::Catalog, costing::cost_recipe, reports::write_cost_sheet, utils::CostSheetArgs};
use clap::Parser;

/// Cost Sheet Demo
#[expect(clippy::print_stdout, reason = "Demo code")]
pub fn main() -> Result<()> {
    let args = CostSheetArgs::parse();

    let catalog = Catalog::from_set(&args.fixture)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if let Some(key) = args.recipe.as_deref() {
        let recipe = catalog.recipe(key)?;
        let summary = catalog.cost(key)?;

        println!("\n{}", recipe.name());
        write_cost_sheet(&mut handle, recipe, catalog.ingredients(), &summary)?;
    } else {
        for recipe in catalog.recipes() {
            let summary = cost_recipe(recipe, catalog.ingredients())?;

            println!("\n{}", recipe.name());
            write_cost_sheet(&mut handle, recipe, catalog.ingredients(), &summary)?;
        }
    }

    Ok(())
}
