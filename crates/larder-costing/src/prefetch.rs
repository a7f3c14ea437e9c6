use std::collections::{HashMap, HashSet, VecDeque};

use anyhow::anyhow;
use larder_core::{AsyncRecipeResolver, Recipe, RecipeId, RecipeResolver};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    aggregate::{RecipeCost, recipe_cost},
    error::CostError,
};

/// Sub-recipes fetched ahead of a costing pass. Failed lookups are kept so the
/// costing pass reports them against the line that needed them.
#[derive(Debug, Default)]
pub struct PrefetchedRecipes {
    recipes: HashMap<RecipeId, Result<Recipe, String>>,
}

impl PrefetchedRecipes {
    /// Walk every sub-recipe reachable from `root`, resolving each id once.
    pub async fn load<R>(root: &Recipe, resolver: &R) -> Self
    where
        R: AsyncRecipeResolver + ?Sized,
    {
        let mut recipes = HashMap::new();
        let mut seen: HashSet<RecipeId> = HashSet::from([root.id]);
        let mut queue: VecDeque<RecipeId> = root.sub_recipe_ids().collect();

        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            match resolver.resolve(id).await {
                Ok(recipe) => {
                    queue.extend(recipe.sub_recipe_ids());
                    recipes.insert(id, Ok(recipe));
                }
                Err(err) => {
                    debug!(recipe = %id, "sub-recipe lookup failed: {err:#}");
                    recipes.insert(id, Err(format!("{err:#}")));
                }
            }
        }

        Self { recipes }
    }
}

impl RecipeResolver for PrefetchedRecipes {
    fn resolve(&self, id: RecipeId) -> anyhow::Result<Recipe> {
        match self.recipes.get(&id) {
            Some(Ok(recipe)) => Ok(recipe.clone()),
            Some(Err(reason)) => Err(anyhow!("{reason}")),
            None => Err(anyhow!("recipe {id} was not prefetched")),
        }
    }
}

/// [`recipe_cost`] over an asynchronous resolver.
pub async fn recipe_cost_async<R>(recipe: &Recipe, resolver: &R) -> Result<RecipeCost, CostError>
where
    R: AsyncRecipeResolver + ?Sized,
{
    if recipe.yield_quantity.amount <= Decimal::ZERO {
        return Err(CostError::InvalidYield {
            recipe: recipe.id,
            name: recipe.name.clone(),
            quantity: recipe.yield_quantity,
        });
    }

    let prefetched = PrefetchedRecipes::load(recipe, resolver).await;
    recipe_cost(recipe, &prefetched)
}
