use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::UnitError,
    unit::{Dimension, Unit},
};

/// Grams per milliliter of a specific ingredient or preparation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Density(Decimal);

impl Density {
    pub fn new(grams_per_ml: Decimal) -> Result<Self, UnitError> {
        if grams_per_ml <= Decimal::ZERO {
            return Err(UnitError::InvalidDensity {
                value: grams_per_ml,
            });
        }
        Ok(Self(grams_per_ml))
    }

    pub fn grams_per_ml(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Density {
    type Error = UnitError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Density::new(value)
    }
}

impl From<Density> for Decimal {
    fn from(density: Density) -> Self {
        density.0
    }
}

/// A numeric amount in a declared unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quantity {
    pub amount: Decimal,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(amount: Decimal, unit: Unit) -> Self {
        Self { amount, unit }
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn to_base(&self) -> Result<BaseQuantity, UnitError> {
        to_base(self.amount, self.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount.normalize(), self.unit)
    }
}

/// An amount expressed in the base unit of its dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseQuantity {
    amount: Decimal,
    dimension: Dimension,
}

impl BaseQuantity {
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }
}

/// Express `amount` of `unit` in its dimension's base unit.
pub fn to_base(amount: Decimal, unit: Unit) -> Result<BaseQuantity, UnitError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(UnitError::InvalidQuantity {
            value: amount,
            unit,
        });
    }
    let in_base = amount
        .checked_mul(unit.factor())
        .ok_or(UnitError::Overflow { value: amount, unit })?;
    Ok(BaseQuantity {
        amount: in_base,
        dimension: unit.dimension(),
    })
}

/// Express a base quantity in `unit`, crossing mass and volume through `density`.
pub fn from_base(
    base: BaseQuantity,
    unit: Unit,
    density: Option<Density>,
) -> Result<Decimal, UnitError> {
    let target = unit.dimension();
    let in_target_base = bridge(base.amount, base.dimension, target, density)?;
    if unit.is_base() {
        return Ok(in_target_base);
    }
    in_target_base
        .checked_div(unit.factor())
        .ok_or(UnitError::Overflow {
            value: in_target_base,
            unit: target.base_unit(),
        })
}

/// Convert a quantity into `unit`.
pub fn convert(quantity: Quantity, unit: Unit, density: Option<Density>) -> Result<Decimal, UnitError> {
    if quantity.unit == unit {
        to_base(quantity.amount, unit)?;
        return Ok(quantity.amount);
    }
    from_base(quantity.to_base()?, unit, density)
}

fn bridge(
    amount: Decimal,
    from: Dimension,
    to: Dimension,
    density: Option<Density>,
) -> Result<Decimal, UnitError> {
    match (from, to) {
        _ if from == to => Ok(amount),
        (Dimension::Count, _) | (_, Dimension::Count) => {
            Err(UnitError::IncompatibleDimension { from, to })
        }
        (Dimension::Volume, Dimension::Mass) => {
            let density = density.ok_or(UnitError::MissingDensity { from, to })?;
            amount
                .checked_mul(density.grams_per_ml())
                .ok_or(UnitError::Overflow {
                    value: amount,
                    unit: from.base_unit(),
                })
        }
        (Dimension::Mass, Dimension::Volume) => {
            let density = density.ok_or(UnitError::MissingDensity { from, to })?;
            amount
                .checked_div(density.grams_per_ml())
                .ok_or(UnitError::Overflow {
                    value: amount,
                    unit: from.base_unit(),
                })
        }
        _ => Err(UnitError::IncompatibleDimension { from, to }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{MassUnit, VolumeUnit};

    fn dec(raw: &str) -> Decimal {
        raw.parse().unwrap()
    }

    fn close(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() < dec("0.000000001")
    }

    #[test]
    fn to_base_multiplies_by_factor() {
        let base = to_base(dec("2.5"), Unit::KILOGRAM).unwrap();
        assert_eq!(base.amount(), dec("2500"));
        assert_eq!(base.dimension(), Dimension::Mass);

        let eggs = to_base(dec("12"), Unit::EACH).unwrap();
        assert_eq!(eggs.amount(), dec("12"));
        assert_eq!(eggs.dimension(), Dimension::Count);
    }

    #[test]
    fn round_trip_through_base_for_every_unit() {
        for unit in Unit::ALL {
            for raw in ["0", "1", "0.125", "3.3", "250", "1234.5678"] {
                let x = dec(raw);
                let back = from_base(to_base(x, unit).unwrap(), unit, None).unwrap();
                assert!(close(back, x), "{unit}: {x} came back as {back}");
            }
        }
    }

    #[test]
    fn same_dimension_never_needs_density() {
        for from in Unit::ALL {
            for to in Unit::ALL {
                if from.dimension() != to.dimension() {
                    continue;
                }
                let result = convert(Quantity::new(dec("7"), from), to, None);
                assert!(result.is_ok(), "{from} -> {to}: {result:?}");
            }
        }
    }

    #[test]
    fn volume_to_mass_requires_density() {
        let milk = Quantity::new(dec("100"), Unit::MILLILITER);
        assert_eq!(
            convert(milk, Unit::GRAM, None),
            Err(UnitError::MissingDensity {
                from: Dimension::Volume,
                to: Dimension::Mass,
            })
        );

        let density = Density::new(dec("1.03")).unwrap();
        assert_eq!(convert(milk, Unit::GRAM, Some(density)).unwrap(), dec("103"));
    }

    #[test]
    fn mass_to_volume_divides_by_density() {
        let oil = Quantity::new(dec("92"), Unit::GRAM);
        let density = Density::new(dec("0.92")).unwrap();
        let ml = convert(oil, Unit::MILLILITER, Some(density)).unwrap();
        assert_eq!(ml, dec("100"));

        let liters = convert(Quantity::new(dec("1.84"), Unit::KILOGRAM), Unit::LITER, Some(density))
            .unwrap();
        assert!(close(liters, dec("2")));
    }

    #[test]
    fn count_never_interoperates() {
        let density = Density::new(dec("1")).unwrap();
        assert_eq!(
            convert(Quantity::new(dec("3"), Unit::EACH), Unit::GRAM, Some(density)),
            Err(UnitError::IncompatibleDimension {
                from: Dimension::Count,
                to: Dimension::Mass,
            })
        );
        assert_eq!(
            convert(
                Quantity::new(dec("1"), Unit::Volume(VolumeUnit::Cup)),
                Unit::EACH,
                Some(density)
            ),
            Err(UnitError::IncompatibleDimension {
                from: Dimension::Volume,
                to: Dimension::Count,
            })
        );
    }

    #[test]
    fn negative_quantities_are_rejected() {
        assert!(matches!(
            to_base(dec("-1"), Unit::Mass(MassUnit::Pound)),
            Err(UnitError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            convert(Quantity::new(dec("-0.5"), Unit::LITER), Unit::MILLILITER, None),
            Err(UnitError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn out_of_range_amounts_fail_instead_of_panicking() {
        let huge = dec("100000000000000000000000000");
        assert_eq!(
            to_base(huge, Unit::KILOGRAM),
            Err(UnitError::Overflow {
                value: huge,
                unit: Unit::KILOGRAM,
            })
        );

        let grams = to_base(huge, Unit::GRAM).unwrap();
        assert!(matches!(
            from_base(grams, Unit::Mass(MassUnit::Milligram), None),
            Err(UnitError::Overflow { .. })
        ));

        let milliliters = to_base(huge, Unit::MILLILITER).unwrap();
        let dense = Density::new(dec("1000")).unwrap();
        assert!(matches!(
            from_base(milliliters, Unit::GRAM, Some(dense)),
            Err(UnitError::Overflow { .. })
        ));

        let thin = Density::new(dec("0.0001")).unwrap();
        assert!(matches!(
            from_base(grams, Unit::MILLILITER, Some(thin)),
            Err(UnitError::Overflow { .. })
        ));
    }

    #[test]
    fn density_must_be_positive() {
        assert!(Density::new(Decimal::ZERO).is_err());
        assert!(Density::new(dec("-1.2")).is_err());
        assert!(serde_json::from_str::<Density>("\"0\"").is_err());
        let parsed: Density = serde_json::from_str("\"1.03\"").unwrap();
        assert_eq!(parsed.grams_per_ml(), dec("1.03"));
    }

    #[test]
    fn quantity_displays_amount_and_symbol() {
        let q = Quantity::new(dec("2.500"), Unit::Volume(VolumeUnit::Tablespoon));
        assert_eq!(q.to_string(), "2.5 tbsp");
    }
}
