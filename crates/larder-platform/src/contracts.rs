use chrono::{DateTime, Utc};
use larder_core::{LineId, RecipeId};
use larder_costing::{CostError, CostErrorKind, LineSource, RecipeCost};
use larder_units::Quantity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineCostView {
    pub line_id: LineId,
    pub kind: String,
    pub reference: String,
    pub quantity: Quantity,
    pub cost: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostReport {
    pub recipe_id: RecipeId,
    pub name: String,
    #[serde(rename = "yield")]
    pub yield_quantity: Quantity,
    pub total_cost: Decimal,
    pub cost_per_output_unit: Decimal,
    pub lines: Vec<LineCostView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePathEntry {
    pub recipe_id: RecipeId,
    pub line_id: LineId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostFailureView {
    pub recipe_id: RecipeId,
    pub name: String,
    pub kind: CostErrorKind,
    /// Unit-layer kind behind an `UNRESOLVABLE_UNIT` failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause_kind: Option<CostErrorKind>,
    pub message: String,
    pub line_path: Vec<LinePathEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CostOutcome {
    Costed(CostReport),
    Failed(CostFailureView),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostBatchReport {
    pub generated_at: DateTime<Utc>,
    pub costed: usize,
    pub failed: usize,
    pub outcomes: Vec<CostOutcome>,
}

impl CostReport {
    /// Presentation view of a computed cost, rounded to `decimals` places.
    pub fn from_cost(cost: &RecipeCost, decimals: u32) -> Self {
        let lines = cost
            .lines
            .iter()
            .map(|line| {
                let (kind, reference) = match &line.source {
                    LineSource::Ingredient { name, .. } => ("ingredient", name.clone()),
                    LineSource::SubRecipe { name, .. } => ("sub_recipe", name.clone()),
                };
                LineCostView {
                    line_id: line.line_id,
                    kind: kind.to_string(),
                    reference,
                    quantity: line.quantity,
                    cost: line.cost.round_dp(decimals),
                }
            })
            .collect();

        Self {
            recipe_id: cost.recipe_id,
            name: cost.name.clone(),
            yield_quantity: cost.yield_quantity,
            total_cost: cost.total_cost.round_dp(decimals),
            cost_per_output_unit: cost.cost_per_output_unit.round_dp(decimals),
            lines,
        }
    }
}

impl CostFailureView {
    pub fn from_error(recipe_id: RecipeId, name: &str, err: &CostError) -> Self {
        Self {
            recipe_id,
            name: name.to_string(),
            kind: err.kind(),
            cause_kind: err.cause_kind(),
            message: err.root_cause().to_string(),
            line_path: err
                .line_path()
                .into_iter()
                .map(|(recipe_id, line_id)| LinePathEntry { recipe_id, line_id })
                .collect(),
        }
    }
}

impl CostBatchReport {
    pub fn new(outcomes: Vec<CostOutcome>) -> Self {
        let costed = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, CostOutcome::Costed(_)))
            .count();
        Self {
            generated_at: Utc::now(),
            costed,
            failed: outcomes.len() - costed,
            outcomes,
        }
    }
}
