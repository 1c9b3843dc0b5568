//! Utils

use clap::Parser;

/// Arguments for the cost sheet demo
#[derive(Debug, Parser)]
pub struct CostSheetArgs {
    /// Catalog set to load ingredients and recipes from
    #[clap(short, long, default_value = "standard")]
    pub fixture: String,

    /// Print the cost sheet for a single recipe instead of all of them
    #[clap(short, long)]
    pub recipe: Option<String>,
}
