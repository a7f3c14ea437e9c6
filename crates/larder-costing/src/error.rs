use larder_core::{IngredientId, LineId, RecipeId};
use larder_units::{Quantity, Unit, UnitError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("cannot measure `{subject}` in {usage_unit} against {target_unit}: {source}")]
    UnresolvableUnit {
        subject: String,
        usage_unit: Unit,
        target_unit: Unit,
        source: UnitError,
    },

    #[error("pack price {price} for `{name}` ({item}) is negative")]
    InvalidPrice {
        item: IngredientId,
        name: String,
        price: Decimal,
    },

    #[error("pack of `{name}` ({item}) is zero base units but priced at {price}")]
    DivisionByZeroPack {
        item: IngredientId,
        name: String,
        price: Decimal,
    },

    #[error("recipe `{name}` ({recipe}) yields {quantity}; yield must be greater than zero")]
    InvalidYield {
        recipe: RecipeId,
        name: String,
        quantity: Quantity,
    },

    #[error("cost of `{subject}` is out of range")]
    Overflow { subject: String },

    #[error("circular recipe reference: {}", format_cycle(.cycle))]
    CircularRecipeReference { cycle: Vec<RecipeId> },

    #[error("could not resolve recipe {recipe}: {reason}")]
    RecipeResolutionFailed { recipe: RecipeId, reason: String },

    #[error("recipe {recipe}, line {line}: {source}")]
    Line {
        recipe: RecipeId,
        line: LineId,
        source: Box<CostError>,
    },
}

/// Flat classification of a [`CostError`], ignoring line context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostErrorKind {
    UnknownUnit,
    IncompatibleDimension,
    MissingDensity,
    InvalidQuantity,
    InvalidDensity,
    Overflow,
    UnresolvableUnit,
    InvalidPrice,
    DivisionByZeroPack,
    InvalidYield,
    CircularRecipeReference,
    RecipeResolutionFailed,
}

impl CostError {
    pub(crate) fn at_line(self, recipe: RecipeId, line: LineId) -> Self {
        CostError::Line {
            recipe,
            line,
            source: Box::new(self),
        }
    }

    /// The innermost error once line context is stripped.
    pub fn root_cause(&self) -> &CostError {
        let mut current = self;
        while let CostError::Line { source, .. } = current {
            current = source.as_ref();
        }
        current
    }

    /// Recipe/line pairs from the outermost recipe down to the failing line.
    pub fn line_path(&self) -> Vec<(RecipeId, LineId)> {
        let mut path = Vec::new();
        let mut current = self;
        while let CostError::Line {
            recipe,
            line,
            source,
        } = current
        {
            path.push((*recipe, *line));
            current = source.as_ref();
        }
        path
    }

    /// Kind of the unit failure behind a [`CostError::UnresolvableUnit`] root cause.
    pub fn cause_kind(&self) -> Option<CostErrorKind> {
        match self.root_cause() {
            CostError::UnresolvableUnit { source, .. } => Some(unit_error_kind(source)),
            _ => None,
        }
    }

    pub fn kind(&self) -> CostErrorKind {
        match self {
            CostError::Line { source, .. } => source.kind(),
            CostError::Unit(err) => unit_error_kind(err),
            CostError::UnresolvableUnit { .. } => CostErrorKind::UnresolvableUnit,
            CostError::InvalidPrice { .. } => CostErrorKind::InvalidPrice,
            CostError::DivisionByZeroPack { .. } => CostErrorKind::DivisionByZeroPack,
            CostError::InvalidYield { .. } => CostErrorKind::InvalidYield,
            CostError::Overflow { .. } => CostErrorKind::Overflow,
            CostError::CircularRecipeReference { .. } => CostErrorKind::CircularRecipeReference,
            CostError::RecipeResolutionFailed { .. } => CostErrorKind::RecipeResolutionFailed,
        }
    }
}

fn unit_error_kind(err: &UnitError) -> CostErrorKind {
    match err {
        UnitError::UnknownUnit { .. } => CostErrorKind::UnknownUnit,
        UnitError::IncompatibleDimension { .. } => CostErrorKind::IncompatibleDimension,
        UnitError::MissingDensity { .. } => CostErrorKind::MissingDensity,
        UnitError::InvalidQuantity { .. } => CostErrorKind::InvalidQuantity,
        UnitError::InvalidDensity { .. } => CostErrorKind::InvalidDensity,
        UnitError::Overflow { .. } => CostErrorKind::Overflow,
    }
}

fn format_cycle(cycle: &[RecipeId]) -> String {
    cycle
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
