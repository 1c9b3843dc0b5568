//! Measurement Units

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a unit string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown unit: {0}")]
pub struct UnitParseError(String);

/// The unit an ingredient is priced and measured in.
///
/// Quantities on recipe lines are expressed in the same unit as the
/// ingredient they reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Kilograms
    #[serde(rename = "kg")]
    Kilogram,

    /// Grams
    #[serde(rename = "g")]
    Gram,

    /// Litres
    #[serde(rename = "L", alias = "l")]
    Litre,

    /// Millilitres
    #[serde(rename = "mL", alias = "ml")]
    Millilitre,

    /// A dozen discrete items (eggs, rolls)
    #[serde(rename = "dozen")]
    Dozen,

    /// A single discrete item
    #[serde(rename = "piece")]
    Piece,
}

impl Unit {
    /// The abbreviation used in catalog files and cost sheets.
    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        match self {
            Unit::Kilogram => "kg",
            Unit::Gram => "g",
            Unit::Litre => "L",
            Unit::Millilitre => "mL",
            Unit::Dozen => "dozen",
            Unit::Piece => "piece",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for Unit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kg" => Ok(Unit::Kilogram),
            "g" => Ok(Unit::Gram),
            "L" | "l" => Ok(Unit::Litre),
            "mL" | "ml" => Ok(Unit::Millilitre),
            "dozen" => Ok(Unit::Dozen),
            "piece" => Ok(Unit::Piece),
            other => Err(UnitParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_round_trips_through_display() -> TestResult {
        for unit in [
            Unit::Kilogram,
            Unit::Gram,
            Unit::Litre,
            Unit::Millilitre,
            Unit::Dozen,
            Unit::Piece,
        ] {
            assert_eq!(unit.abbreviation().parse::<Unit>()?, unit);
            assert_eq!(unit.to_string(), unit.abbreviation());
        }

        Ok(())
    }

    #[test]
    fn parse_accepts_lowercase_volume_aliases() -> TestResult {
        assert_eq!("l".parse::<Unit>()?, Unit::Litre);
        assert_eq!("ml".parse::<Unit>()?, Unit::Millilitre);

        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_unit() {
        let result = "stone".parse::<Unit>();

        assert_eq!(result, Err(UnitParseError("stone".to_string())));
    }

    #[test]
    fn serde_names_match_catalog_spelling() -> TestResult {
        let yaml: Unit = serde_norway::from_str("kg")?;
        assert_eq!(yaml, Unit::Kilogram);

        let yaml: Unit = serde_norway::from_str("mL")?;
        assert_eq!(yaml, Unit::Millilitre);

        assert_eq!(serde_norway::to_string(&Unit::Litre)?.trim(), "L");

        Ok(())
    }
}
