//! Recipe costing: prices ingredient usages from their packs and rolls the
//! results up through nested sub-recipes.

pub mod aggregate;
pub mod error;
pub mod prefetch;
pub mod usage;

pub use aggregate::{LineCost, LineSource, RecipeCost, portion_cost, recipe_cost};
pub use error::{CostError, CostErrorKind};
pub use prefetch::{PrefetchedRecipes, recipe_cost_async};
pub use usage::{unit_price, usage_cost};
