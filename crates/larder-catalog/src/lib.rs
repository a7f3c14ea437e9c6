use std::{collections::HashMap, path::Path};

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use larder_core::{AsyncRecipeResolver, Recipe, RecipeId};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

/// On-disk shape of a recipe catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[derive(Default)]
pub struct InMemoryRecipeCatalog {
    recipes: RwLock<HashMap<RecipeId, Recipe>>,
}

impl InMemoryRecipeCatalog {
    pub fn new(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let recipes = recipes
            .into_iter()
            .map(|recipe| (recipe.id, recipe))
            .collect();
        Self {
            recipes: RwLock::new(recipes),
        }
    }

    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let file: CatalogFile = serde_json::from_str(raw).context("invalid recipe catalog")?;
        Ok(Self::new(file.recipes))
    }

    pub async fn load_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let catalog = Self::from_json_str(&raw)
            .with_context(|| format!("failed to parse catalog {}", path.display()))?;
        info!("loaded {} recipes from {}", catalog.len().await, path.display());
        Ok(catalog)
    }

    /// Insert or replace a recipe, returning the previous version.
    pub async fn insert(&self, recipe: Recipe) -> Option<Recipe> {
        let mut recipes = self.recipes.write().await;
        recipes.insert(recipe.id, recipe)
    }

    pub async fn get(&self, id: RecipeId) -> Option<Recipe> {
        let recipes = self.recipes.read().await;
        recipes.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.recipes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipes.read().await.is_empty()
    }

    /// Every recipe, ordered by name then id.
    pub async fn recipes(&self) -> Vec<Recipe> {
        let recipes = self.recipes.read().await;
        let mut all: Vec<Recipe> = recipes.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        all
    }

    /// Point-in-time copy usable with the synchronous costing entry points.
    pub async fn snapshot(&self) -> HashMap<RecipeId, Recipe> {
        self.recipes.read().await.clone()
    }
}

#[async_trait]
impl AsyncRecipeResolver for InMemoryRecipeCatalog {
    async fn resolve(&self, id: RecipeId) -> anyhow::Result<Recipe> {
        self.get(id)
            .await
            .ok_or_else(|| anyhow!("recipe {id} is not in the catalog"))
    }
}
