use rust_decimal::Decimal;
use thiserror::Error;

use crate::unit::{Dimension, Unit};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("unknown unit `{symbol}`")]
    UnknownUnit { symbol: String },

    /// Count never converts to or from mass or volume.
    #[error("cannot convert {from} to {to}: count does not interoperate with mass or volume")]
    IncompatibleDimension { from: Dimension, to: Dimension },

    #[error("converting {from} to {to} requires a density")]
    MissingDensity { from: Dimension, to: Dimension },

    #[error("quantity {value} {unit} is negative")]
    InvalidQuantity { value: Decimal, unit: Unit },

    #[error("quantity {value} {unit} is out of range")]
    Overflow { value: Decimal, unit: Unit },

    #[error("density {value} g/ml must be greater than zero")]
    InvalidDensity { value: Decimal },
}
