use std::path::PathBuf;

use anyhow::{Context, Result};
use larder_core::RecipeId;

pub const DEFAULT_COST_DECIMALS: u32 = 4;

#[derive(Clone, Debug)]
pub struct CostingConfig {
    pub catalog_path: PathBuf,
    /// Decimal places kept when presenting costs. Never applied mid-computation.
    pub cost_decimals: u32,
    pub recipe_id: Option<RecipeId>,
}

impl CostingConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let catalog_path = lookup("LARDER_CATALOG_PATH")
            .map(PathBuf::from)
            .context("LARDER_CATALOG_PATH is required")?;

        let cost_decimals = match lookup("LARDER_COST_DECIMALS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|decimals| *decimals <= 28)
                .with_context(|| format!("LARDER_COST_DECIMALS must be 0..=28, got `{raw}`"))?,
            None => DEFAULT_COST_DECIMALS,
        };

        let recipe_id = lookup("LARDER_RECIPE_ID")
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map(RecipeId)
                    .with_context(|| format!("LARDER_RECIPE_ID is not a uuid: `{raw}`"))
            })
            .transpose()?;

        Ok(Self {
            catalog_path,
            cost_decimals,
            recipe_id,
        })
    }
}
