use std::fmt;

use larder_units::{Density, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_type!(IngredientId);
id_type!(RecipeId);
id_type!(LineId);

/// An ingredient as bought: a pack of some quantity at some price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasableItem {
    pub id: IngredientId,
    pub name: String,
    pub pack: Quantity,
    pub pack_price: Decimal,
    #[serde(default)]
    pub density: Option<Density>,
}

impl PurchasableItem {
    pub fn new(name: &str, pack: Quantity, pack_price: Decimal) -> Self {
        Self {
            id: IngredientId::new(),
            name: name.to_string(),
            pack,
            pack_price,
            density: None,
        }
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = Some(density);
        self
    }
}

/// A recipe line consuming a purchasable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub id: LineId,
    pub item: PurchasableItem,
    pub quantity: Quantity,
}

/// A recipe line consuming another recipe's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRecipeLine {
    pub id: LineId,
    pub recipe_id: RecipeId,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(rename = "yield")]
    pub yield_quantity: Quantity,
    /// Bridges mass and volume when the recipe is used in another dimension than its yield.
    #[serde(default)]
    pub density: Option<Density>,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub sub_recipes: Vec<SubRecipeLine>,
}

impl Recipe {
    pub fn new(name: &str, yield_quantity: Quantity) -> Self {
        Self {
            id: RecipeId::new(),
            name: name.to_string(),
            yield_quantity,
            density: None,
            ingredients: Vec::new(),
            sub_recipes: Vec::new(),
        }
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_ingredient(mut self, item: PurchasableItem, quantity: Quantity) -> Self {
        self.ingredients.push(IngredientLine {
            id: LineId::new(),
            item,
            quantity,
        });
        self
    }

    pub fn with_sub_recipe(mut self, recipe_id: RecipeId, quantity: Quantity) -> Self {
        self.sub_recipes.push(SubRecipeLine {
            id: LineId::new(),
            recipe_id,
            quantity,
        });
        self
    }

    pub fn sub_recipe_ids(&self) -> impl Iterator<Item = RecipeId> + '_ {
        self.sub_recipes.iter().map(|line| line.recipe_id)
    }
}
