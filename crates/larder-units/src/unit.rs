use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// Physical dimension a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Mass,
    Volume,
    Count,
}

impl Dimension {
    pub fn base_unit(self) -> Unit {
        match self {
            Dimension::Mass => Unit::Mass(MassUnit::Gram),
            Dimension::Volume => Unit::Volume(VolumeUnit::Milliliter),
            Dimension::Count => Unit::Count(CountUnit::Each),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Mass => write!(f, "mass"),
            Dimension::Volume => write!(f, "volume"),
            Dimension::Count => write!(f, "count"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MassUnit {
    Milligram,
    Gram,
    Kilogram,
    Ounce,
    Pound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeUnit {
    Milliliter,
    Centiliter,
    Deciliter,
    Liter,
    Teaspoon,
    Tablespoon,
    FluidOunce,
    Cup,
    Pint,
    Quart,
    Gallon,
}

/// Discrete units. Only one exists; aliases such as "piece" parse to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountUnit {
    Each,
}

/// A unit of measure, tagged by the dimension it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    Mass(MassUnit),
    Volume(VolumeUnit),
    Count(CountUnit),
}

impl MassUnit {
    /// Grams per one of this unit.
    pub fn grams(self) -> Decimal {
        match self {
            MassUnit::Milligram => Decimal::new(1, 3),
            MassUnit::Gram => Decimal::ONE,
            MassUnit::Kilogram => Decimal::new(1000, 0),
            // avoirdupois ounce and pound, exact by definition
            MassUnit::Ounce => Decimal::new(28_349_523_125, 9),
            MassUnit::Pound => Decimal::new(45_359_237, 5),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            MassUnit::Milligram => "mg",
            MassUnit::Gram => "g",
            MassUnit::Kilogram => "kg",
            MassUnit::Ounce => "oz",
            MassUnit::Pound => "lb",
        }
    }
}

impl VolumeUnit {
    /// Milliliters per one of this unit. Customary units are US measures.
    pub fn milliliters(self) -> Decimal {
        match self {
            VolumeUnit::Milliliter => Decimal::ONE,
            VolumeUnit::Centiliter => Decimal::new(10, 0),
            VolumeUnit::Deciliter => Decimal::new(100, 0),
            VolumeUnit::Liter => Decimal::new(1000, 0),
            VolumeUnit::Teaspoon => Decimal::new(492_892_159_375, 11),
            VolumeUnit::Tablespoon => Decimal::new(1_478_676_478_125, 11),
            VolumeUnit::FluidOunce => Decimal::new(295_735_295_625, 10),
            VolumeUnit::Cup => Decimal::new(2_365_882_365, 7),
            VolumeUnit::Pint => Decimal::new(473_176_473, 6),
            VolumeUnit::Quart => Decimal::new(946_352_946, 6),
            VolumeUnit::Gallon => Decimal::new(3_785_411_784, 6),
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            VolumeUnit::Milliliter => "ml",
            VolumeUnit::Centiliter => "cl",
            VolumeUnit::Deciliter => "dl",
            VolumeUnit::Liter => "l",
            VolumeUnit::Teaspoon => "tsp",
            VolumeUnit::Tablespoon => "tbsp",
            VolumeUnit::FluidOunce => "fl oz",
            VolumeUnit::Cup => "cup",
            VolumeUnit::Pint => "pt",
            VolumeUnit::Quart => "qt",
            VolumeUnit::Gallon => "gal",
        }
    }
}

impl Unit {
    pub const GRAM: Unit = Unit::Mass(MassUnit::Gram);
    pub const KILOGRAM: Unit = Unit::Mass(MassUnit::Kilogram);
    pub const MILLILITER: Unit = Unit::Volume(VolumeUnit::Milliliter);
    pub const LITER: Unit = Unit::Volume(VolumeUnit::Liter);
    pub const EACH: Unit = Unit::Count(CountUnit::Each);

    /// Every supported unit, in table order.
    pub const ALL: [Unit; 17] = [
        Unit::Mass(MassUnit::Milligram),
        Unit::Mass(MassUnit::Gram),
        Unit::Mass(MassUnit::Kilogram),
        Unit::Mass(MassUnit::Ounce),
        Unit::Mass(MassUnit::Pound),
        Unit::Volume(VolumeUnit::Milliliter),
        Unit::Volume(VolumeUnit::Centiliter),
        Unit::Volume(VolumeUnit::Deciliter),
        Unit::Volume(VolumeUnit::Liter),
        Unit::Volume(VolumeUnit::Teaspoon),
        Unit::Volume(VolumeUnit::Tablespoon),
        Unit::Volume(VolumeUnit::FluidOunce),
        Unit::Volume(VolumeUnit::Cup),
        Unit::Volume(VolumeUnit::Pint),
        Unit::Volume(VolumeUnit::Quart),
        Unit::Volume(VolumeUnit::Gallon),
        Unit::Count(CountUnit::Each),
    ];

    pub fn dimension(self) -> Dimension {
        match self {
            Unit::Mass(_) => Dimension::Mass,
            Unit::Volume(_) => Dimension::Volume,
            Unit::Count(_) => Dimension::Count,
        }
    }

    /// Multiplier from this unit to its dimension's base unit.
    pub fn factor(self) -> Decimal {
        match self {
            Unit::Mass(unit) => unit.grams(),
            Unit::Volume(unit) => unit.milliliters(),
            Unit::Count(CountUnit::Each) => Decimal::ONE,
        }
    }

    pub fn is_base(self) -> bool {
        self == self.dimension().base_unit()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Mass(unit) => unit.symbol(),
            Unit::Volume(unit) => unit.symbol(),
            Unit::Count(CountUnit::Each) => "each",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw
            .trim()
            .trim_end_matches('.')
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let unit = match normalized.as_str() {
            "mg" | "milligram" | "milligrams" | "milligramme" | "milligrammes" => {
                Unit::Mass(MassUnit::Milligram)
            }
            "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" => Unit::Mass(MassUnit::Gram),
            "kg" | "kilo" | "kilos" | "kilogram" | "kilograms" | "kilogramme" | "kilogrammes" => {
                Unit::Mass(MassUnit::Kilogram)
            }
            "oz" | "ounce" | "ounces" => Unit::Mass(MassUnit::Ounce),
            "lb" | "lbs" | "pound" | "pounds" => Unit::Mass(MassUnit::Pound),
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Unit::Volume(VolumeUnit::Milliliter)
            }
            "cl" | "centiliter" | "centiliters" | "centilitre" | "centilitres" => {
                Unit::Volume(VolumeUnit::Centiliter)
            }
            "dl" | "deciliter" | "deciliters" | "decilitre" | "decilitres" => {
                Unit::Volume(VolumeUnit::Deciliter)
            }
            "l" | "liter" | "liters" | "litre" | "litres" => Unit::Volume(VolumeUnit::Liter),
            "tsp" | "teaspoon" | "teaspoons" => Unit::Volume(VolumeUnit::Teaspoon),
            "tbsp" | "tablespoon" | "tablespoons" => Unit::Volume(VolumeUnit::Tablespoon),
            "fl oz" | "floz" | "fluid ounce" | "fluid ounces" => {
                Unit::Volume(VolumeUnit::FluidOunce)
            }
            "cup" | "cups" => Unit::Volume(VolumeUnit::Cup),
            "pt" | "pint" | "pints" => Unit::Volume(VolumeUnit::Pint),
            "qt" | "quart" | "quarts" => Unit::Volume(VolumeUnit::Quart),
            "gal" | "gallon" | "gallons" => Unit::Volume(VolumeUnit::Gallon),
            "each" | "ea" | "pc" | "pcs" | "piece" | "pieces" | "unit" | "units" | "item"
            | "items" => Unit::Count(CountUnit::Each),
            _ => {
                return Err(UnitError::UnknownUnit {
                    symbol: raw.to_string(),
                });
            }
        };

        Ok(unit)
    }
}

impl TryFrom<String> for Unit {
    type Error = UnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.symbol().to_string()
    }
}

/// Classify a unit symbol by dimension.
pub fn dimension_of(symbol: &str) -> Result<Dimension, UnitError> {
    Ok(symbol.parse::<Unit>()?.dimension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_symbol_parses_back_to_its_unit() {
        for unit in Unit::ALL {
            assert_eq!(unit.symbol().parse::<Unit>().unwrap(), unit);
        }
    }

    #[test]
    fn parsing_accepts_aliases_and_case() {
        assert_eq!("Grams".parse::<Unit>().unwrap(), Unit::GRAM);
        assert_eq!(" KG ".parse::<Unit>().unwrap(), Unit::KILOGRAM);
        assert_eq!("tbsp.".parse::<Unit>().unwrap(), Unit::Volume(VolumeUnit::Tablespoon));
        assert_eq!("fl  oz".parse::<Unit>().unwrap(), Unit::Volume(VolumeUnit::FluidOunce));
        assert_eq!("pieces".parse::<Unit>().unwrap(), Unit::EACH);
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        let err = "handful".parse::<Unit>().unwrap_err();
        assert_eq!(
            err,
            UnitError::UnknownUnit {
                symbol: "handful".to_string()
            }
        );
    }

    #[test]
    fn dimension_of_classifies_symbols() {
        assert_eq!(dimension_of("lb").unwrap(), Dimension::Mass);
        assert_eq!(dimension_of("cup").unwrap(), Dimension::Volume);
        assert_eq!(dimension_of("each").unwrap(), Dimension::Count);
        assert!(matches!(
            dimension_of("bunch"),
            Err(UnitError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn base_units_have_unit_factor() {
        for dimension in [Dimension::Mass, Dimension::Volume, Dimension::Count] {
            let base = dimension.base_unit();
            assert!(base.is_base());
            assert_eq!(base.factor(), Decimal::ONE);
        }
        assert_eq!(Unit::KILOGRAM.factor(), Decimal::new(1000, 0));
        assert_eq!(
            Unit::Volume(VolumeUnit::Tablespoon).factor(),
            Unit::Volume(VolumeUnit::Teaspoon).factor() * Decimal::new(3, 0)
        );
    }

    #[test]
    fn units_serialize_as_symbols() {
        let json = serde_json::to_string(&Unit::Volume(VolumeUnit::FluidOunce)).unwrap();
        assert_eq!(json, "\"fl oz\"");
        let unit: Unit = serde_json::from_str("\"kilograms\"").unwrap();
        assert_eq!(unit, Unit::KILOGRAM);
        assert!(serde_json::from_str::<Unit>("\"stone\"").is_err());
    }
}
