//! Reports
//!
//! Renders a recipe cost sheet as a bordered terminal table: one row per
//! ingredient line, followed by a summary block with the batch total, the
//! per-unit cost and the suggested sale price.

use std::{fmt::Write, io};

use rusty_money::MoneyError;
use slotmap::SlotMap;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    costing::{CostSummary, CostingError, line_cost, money_from_decimal},
    ingredients::{Ingredient, IngredientKey},
    recipes::Recipe,
};

/// Errors that can occur when rendering a cost sheet.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A recipe line references an ingredient missing from the catalog.
    #[error("Missing ingredient")]
    MissingIngredient(IngredientKey),

    /// Error costing a recipe line.
    #[error(transparent)]
    Costing(#[from] CostingError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Writes a cost sheet for `recipe` to `out`.
///
/// The `summary` should come from costing the same recipe against the same
/// ingredient catalog; the per-line rows are recomputed here so the sheet
/// always adds up to the summary it prints.
///
/// # Errors
///
/// Returns a [`ReportError`] if a line references a missing ingredient, a
/// line cannot be costed, or the table cannot be written.
pub fn write_cost_sheet(
    mut out: impl io::Write,
    recipe: &Recipe,
    ingredients: &SlotMap<IngredientKey, Ingredient<'_>>,
    summary: &CostSummary<'_>,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["Ingredient", "Quantity", "Unit Cost", "Line Cost"]);

    for line in recipe.lines() {
        let ingredient = ingredients
            .get(line.ingredient)
            .ok_or(ReportError::MissingIngredient(line.ingredient))?;

        let cost = line_cost(line.quantity, ingredient.cost_per_unit())?;
        let cost_money = money_from_decimal(cost, summary.currency())?;

        builder.push_record([
            ingredient.name().to_string(),
            format!("{} {}", line.quantity, ingredient.unit().abbreviation()),
            format!("{}", ingredient.cost_per_unit()),
            format!("{cost_money}"),
        ]);
    }

    write_cost_table(&mut out, builder)?;
    write_cost_summary(&mut out, recipe, summary)?;

    Ok(())
}

fn write_cost_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReportError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..4), Alignment::right());

    let table_str = dim_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| ReportError::IO)
}

fn write_cost_summary(
    out: &mut impl io::Write,
    recipe: &Recipe,
    summary: &CostSummary<'_>,
) -> Result<(), ReportError> {
    let total = summary.total_cost_money()?;
    let per_unit = summary.cost_per_unit_money()?;
    let suggested = summary.suggested_price_money()?;

    let batch_label = format!(" Batch cost ({} units):", recipe.batch_size());
    let per_unit_label = " Cost per unit:";
    let suggested_label = " \x1b[1mSuggested price:\x1b[0m";

    let batch_val = format!("{total}  ");
    let per_unit_val = format!("{per_unit}  ");
    let suggested_val = format!("{suggested}  ");

    let label_width = display_width(&batch_label)
        .max(display_width(per_unit_label))
        .max(display_width(suggested_label));

    let value_width = batch_val
        .len()
        .max(per_unit_val.len())
        .max(suggested_val.len());

    write_summary_line(out, &batch_label, &batch_val, label_width, value_width)?;
    write_summary_line(out, per_unit_label, &per_unit_val, label_width, value_width)?;

    write_summary_line(
        out,
        suggested_label,
        &format!("\x1b[1m{suggested_val}\x1b[0m"),
        label_width,
        value_width,
    )?;

    writeln!(out).map_err(|_err| ReportError::IO)
}

/// Dims the borders of a rendered table.
///
/// Anything in U+2500..U+257F counts as a border character; each contiguous
/// run is wrapped in one dark-grey ANSI escape so cell text keeps its own
/// styling.
fn dim_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut dimming = false;

    for ch in table.chars() {
        let border = ('\u{2500}'..='\u{257F}').contains(&ch);

        match (border, dimming) {
            (true, false) => {
                _ = out.write_str("\x1b[90m");
                dimming = true;
            }
            (false, true) => {
                _ = out.write_str("\x1b[0m");
                dimming = false;
            }
            _ => {}
        }

        out.push(ch);
    }

    if dimming {
        _ = out.write_str("\x1b[0m");
    }

    out
}

/// Character width of `s` with ANSI escape sequences skipped.
fn display_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut escape = false;

    for ch in s.chars() {
        if escape {
            escape = !ch.is_ascii_alphabetic();
        } else if ch == '\x1b' {
            escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes one `label  value` summary row.
///
/// Labels right-align against the widest label; values pad out to a shared
/// column so the amounts line up.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), ReportError> {
    let label_pad = label_col_width.saturating_sub(display_width(label));
    let value_pad = " ".repeat(value_col_width.saturating_sub(display_width(value)));

    writeln!(out, "{:>label_pad$}{label}  {value_pad}{value}", "")
        .map_err(|_err| ReportError::IO)
}
