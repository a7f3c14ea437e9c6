use anyhow::{Context, Result};
use larder_catalog::InMemoryRecipeCatalog;
use larder_core::Recipe;
use larder_costing::recipe_cost_async;
use larder_platform::{CostBatchReport, CostFailureView, CostOutcome, CostReport, CostingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "larder_ops=info".to_string()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CostingConfig::from_env()?;
    let catalog = InMemoryRecipeCatalog::load_file(&config.catalog_path).await?;

    let recipes = match config.recipe_id {
        Some(id) => vec![
            catalog
                .get(id)
                .await
                .with_context(|| format!("recipe {id} is not in the catalog"))?,
        ],
        None => catalog.recipes().await,
    };

    info!("costing {} recipes", recipes.len());

    let mut outcomes = Vec::with_capacity(recipes.len());
    for recipe in &recipes {
        outcomes.push(cost_recipe(&catalog, recipe, config.cost_decimals).await);
    }

    let report = CostBatchReport::new(outcomes);
    info!("{} recipes costed, {} failed", report.costed, report.failed);

    let rendered = serde_json::to_string_pretty(&report)?;
    println!("{rendered}");

    Ok(())
}

async fn cost_recipe(catalog: &InMemoryRecipeCatalog, recipe: &Recipe, decimals: u32) -> CostOutcome {
    match recipe_cost_async(recipe, catalog).await {
        Ok(cost) => {
            info!(
                "recipe {} costed at {} ({} per {})",
                recipe.name,
                cost.total_cost.round_dp(decimals),
                cost.cost_per_output_unit.round_dp(decimals),
                cost.yield_quantity.unit
            );
            CostOutcome::Costed(CostReport::from_cost(&cost, decimals))
        }
        Err(err) => {
            error!("failed to cost recipe {}: {err}", recipe.name);
            CostOutcome::Failed(CostFailureView::from_error(recipe.id, &recipe.name, &err))
        }
    }
}
