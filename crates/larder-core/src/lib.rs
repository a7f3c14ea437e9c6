pub mod models;
pub mod storage;

pub use models::{
    IngredientId, IngredientLine, LineId, PurchasableItem, Recipe, RecipeId, SubRecipeLine,
};
pub use storage::{AsyncRecipeResolver, RecipeResolver};
