use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::models::{Recipe, RecipeId};

/// Supplies sub-recipes to the costing engine.
pub trait RecipeResolver {
    fn resolve(&self, id: RecipeId) -> anyhow::Result<Recipe>;
}

impl RecipeResolver for HashMap<RecipeId, Recipe> {
    fn resolve(&self, id: RecipeId) -> anyhow::Result<Recipe> {
        self.get(&id)
            .cloned()
            .ok_or_else(|| anyhow!("recipe {id} not found"))
    }
}

#[async_trait]
pub trait AsyncRecipeResolver: Send + Sync {
    async fn resolve(&self, id: RecipeId) -> anyhow::Result<Recipe>;
}
