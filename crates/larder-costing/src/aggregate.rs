use std::collections::HashMap;

use larder_core::{IngredientId, LineId, Recipe, RecipeId, RecipeResolver};
use larder_units::{Density, Quantity, Unit};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::CostError,
    usage::{quantity_in, usage_cost},
};

/// Where a costed line's value came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineSource {
    Ingredient {
        item: IngredientId,
        name: String,
    },
    SubRecipe {
        recipe: RecipeId,
        name: String,
        cost_per_output_unit: Decimal,
        yield_unit: Unit,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineCost {
    pub line_id: LineId,
    pub source: LineSource,
    pub quantity: Quantity,
    pub cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCost {
    pub recipe_id: RecipeId,
    pub name: String,
    pub yield_quantity: Quantity,
    pub total_cost: Decimal,
    /// Cost of one `yield_quantity.unit` of output.
    pub cost_per_output_unit: Decimal,
    pub lines: Vec<LineCost>,
}

/// What a parent recipe needs to know about a costed sub-recipe.
#[derive(Debug, Clone)]
struct CostBasis {
    name: String,
    cost_per_output_unit: Decimal,
    yield_unit: Unit,
    density: Option<Density>,
}

/// Total cost and cost-per-output-unit of `recipe`, rolling up nested sub-recipes.
///
/// Sub-recipes are fetched through `resolver` at most once per id within this call
/// and costed once, however many lines reference them. A recipe that transitively
/// contains itself fails with [`CostError::CircularRecipeReference`]. Any failing
/// line fails the whole computation, wrapped in [`CostError::Line`] at each level.
pub fn recipe_cost<R>(recipe: &Recipe, resolver: &R) -> Result<RecipeCost, CostError>
where
    R: RecipeResolver + ?Sized,
{
    CostingSession::new(resolver).cost(recipe)
}

/// Cost of `quantity` of a recipe's output.
pub fn portion_cost<R>(recipe: &Recipe, quantity: &Quantity, resolver: &R) -> Result<Decimal, CostError>
where
    R: RecipeResolver + ?Sized,
{
    let cost = recipe_cost(recipe, resolver)?;
    let portion = quantity_in(&recipe.name, quantity, recipe.yield_quantity.unit, recipe.density)?;
    scaled(&recipe.name, cost.cost_per_output_unit, portion)
}

fn scaled(subject: &str, per_unit: Decimal, quantity: Decimal) -> Result<Decimal, CostError> {
    per_unit.checked_mul(quantity).ok_or_else(|| overflow(subject))
}

fn overflow(subject: &str) -> CostError {
    CostError::Overflow {
        subject: subject.to_string(),
    }
}

/// Scratch state for one top-level costing call.
struct CostingSession<'r, R: ?Sized> {
    resolver: &'r R,
    visiting: Vec<RecipeId>,
    memo: HashMap<RecipeId, CostBasis>,
}

impl<'r, R> CostingSession<'r, R>
where
    R: RecipeResolver + ?Sized,
{
    fn new(resolver: &'r R) -> Self {
        Self {
            resolver,
            visiting: Vec::new(),
            memo: HashMap::new(),
        }
    }

    fn cost(&mut self, recipe: &Recipe) -> Result<RecipeCost, CostError> {
        if let Some(cycle) = self.cycle_through(recipe.id) {
            return Err(CostError::CircularRecipeReference { cycle });
        }

        let yield_quantity = recipe.yield_quantity;
        if yield_quantity.amount <= Decimal::ZERO {
            return Err(CostError::InvalidYield {
                recipe: recipe.id,
                name: recipe.name.clone(),
                quantity: yield_quantity,
            });
        }

        self.visiting.push(recipe.id);
        let lines = self.cost_lines(recipe);
        self.visiting.pop();
        let lines = lines?;

        let total_cost = lines
            .iter()
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.cost))
            .ok_or_else(|| overflow(&recipe.name))?;
        let cost_per_output_unit = total_cost
            .checked_div(yield_quantity.amount)
            .ok_or_else(|| overflow(&recipe.name))?;

        self.memo.insert(
            recipe.id,
            CostBasis {
                name: recipe.name.clone(),
                cost_per_output_unit,
                yield_unit: yield_quantity.unit,
                density: recipe.density,
            },
        );

        Ok(RecipeCost {
            recipe_id: recipe.id,
            name: recipe.name.clone(),
            yield_quantity,
            total_cost,
            cost_per_output_unit,
            lines,
        })
    }

    fn cost_lines(&mut self, recipe: &Recipe) -> Result<Vec<LineCost>, CostError> {
        let mut lines = Vec::with_capacity(recipe.ingredients.len() + recipe.sub_recipes.len());

        for line in &recipe.ingredients {
            let cost = usage_cost(&line.quantity, &line.item)
                .map_err(|err| err.at_line(recipe.id, line.id))?;
            lines.push(LineCost {
                line_id: line.id,
                source: LineSource::Ingredient {
                    item: line.item.id,
                    name: line.item.name.clone(),
                },
                quantity: line.quantity,
                cost,
            });
        }

        for line in &recipe.sub_recipes {
            let basis = self
                .basis_for(line.recipe_id)
                .map_err(|err| err.at_line(recipe.id, line.id))?;
            let cost = quantity_in(&basis.name, &line.quantity, basis.yield_unit, basis.density)
                .and_then(|used| scaled(&basis.name, basis.cost_per_output_unit, used))
                .map_err(|err| err.at_line(recipe.id, line.id))?;
            lines.push(LineCost {
                line_id: line.id,
                source: LineSource::SubRecipe {
                    recipe: line.recipe_id,
                    name: basis.name.clone(),
                    cost_per_output_unit: basis.cost_per_output_unit,
                    yield_unit: basis.yield_unit,
                },
                quantity: line.quantity,
                cost,
            });
        }

        Ok(lines)
    }

    fn basis_for(&mut self, id: RecipeId) -> Result<CostBasis, CostError> {
        if let Some(cycle) = self.cycle_through(id) {
            return Err(CostError::CircularRecipeReference { cycle });
        }
        if let Some(basis) = self.memo.get(&id) {
            debug!(recipe = %id, "sub-recipe cost reused");
            return Ok(basis.clone());
        }

        let sub_recipe =
            self.resolver
                .resolve(id)
                .map_err(|err| CostError::RecipeResolutionFailed {
                    recipe: id,
                    reason: format!("{err:#}"),
                })?;
        debug!(recipe = %id, name = %sub_recipe.name, "sub-recipe resolved");

        let cost = self.cost(&sub_recipe)?;
        let basis = CostBasis {
            name: sub_recipe.name,
            cost_per_output_unit: cost.cost_per_output_unit,
            yield_unit: cost.yield_quantity.unit,
            density: sub_recipe.density,
        };
        self.memo.insert(id, basis.clone());
        Ok(basis)
    }

    fn cycle_through(&self, id: RecipeId) -> Option<Vec<RecipeId>> {
        let start = self.visiting.iter().position(|visiting| *visiting == id)?;
        let mut cycle = self.visiting[start..].to_vec();
        cycle.push(id);
        Some(cycle)
    }
}
