//! Units of measure for recipe costing.
//!
//! Every unit belongs to exactly one [`Dimension`] and carries a fixed decimal
//! factor to that dimension's base unit (grams, milliliters, each). Mass and
//! volume interconvert only through an explicit [`Density`]; count never
//! converts to anything else.

pub mod error;
pub mod quantity;
pub mod unit;

pub use error::UnitError;
pub use quantity::{BaseQuantity, Density, Quantity, convert, from_base, to_base};
pub use unit::{CountUnit, Dimension, MassUnit, Unit, VolumeUnit, dimension_of};
