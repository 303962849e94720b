use crate::infra::{Ingredient, InventoryItem, InventoryStatus, Recipe, RecipeIngredientLink};
use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct IngredientDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub calories_per_unit: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct InventoryDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub ingredient_id: ObjectId,
    pub quantity: f64,
    // stored as YYYY-MM-DD so range filters compare lexically
    pub expiration_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub min_stock_level: f64,
    pub status: InventoryStatus,
}

/// Recipe document; the links live inside it so a recipe is written in one operation.
#[derive(Debug, Deserialize, Serialize)]
pub struct RecipeDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: Option<String>,
    pub instructions: String,
    pub category: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub ingredients: Vec<LinkDoc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LinkDoc {
    pub ingredient_id: ObjectId,
    pub quantity: f64,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

impl From<&Ingredient> for IngredientDoc {
    fn from(ingredient: &Ingredient) -> Self {
        IngredientDoc {
            id: ingredient.id.oid(),
            name: ingredient.name.clone(),
            category: ingredient.category.clone(),
            unit: ingredient.unit.clone(),
            calories_per_unit: ingredient.calories_per_unit,
        }
    }
}

impl From<IngredientDoc> for Ingredient {
    fn from(doc: IngredientDoc) -> Self {
        Ingredient {
            id: doc.id.into(),
            name: doc.name,
            category: doc.category,
            unit: doc.unit,
            calories_per_unit: doc.calories_per_unit,
        }
    }
}

impl From<&InventoryItem> for InventoryDoc {
    fn from(item: &InventoryItem) -> Self {
        InventoryDoc {
            id: item.id.oid(),
            ingredient_id: item.ingredient_id.oid(),
            quantity: item.quantity,
            expiration_date: item.expiration_date,
            location: item.location.clone(),
            min_stock_level: item.min_stock_level,
            status: item.status,
        }
    }
}

impl From<InventoryDoc> for InventoryItem {
    fn from(doc: InventoryDoc) -> Self {
        InventoryItem {
            id: doc.id.into(),
            ingredient_id: doc.ingredient_id.into(),
            quantity: doc.quantity,
            expiration_date: doc.expiration_date,
            location: doc.location,
            min_stock_level: doc.min_stock_level,
            status: doc.status,
        }
    }
}

impl From<&RecipeIngredientLink> for LinkDoc {
    fn from(link: &RecipeIngredientLink) -> Self {
        LinkDoc {
            ingredient_id: link.ingredient_id.oid(),
            quantity: link.quantity,
            unit: link.unit.clone(),
            notes: link.notes.clone(),
        }
    }
}

impl From<LinkDoc> for RecipeIngredientLink {
    fn from(doc: LinkDoc) -> Self {
        RecipeIngredientLink {
            ingredient_id: doc.ingredient_id.into(),
            quantity: doc.quantity,
            unit: doc.unit,
            notes: doc.notes,
        }
    }
}

impl From<&Recipe> for RecipeDoc {
    fn from(recipe: &Recipe) -> Self {
        RecipeDoc {
            id: recipe.id.oid(),
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            instructions: recipe.instructions.clone(),
            category: recipe.category.clone(),
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
            ingredients: recipe.ingredients.iter().map(LinkDoc::from).collect(),
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

impl From<RecipeDoc> for Recipe {
    fn from(doc: RecipeDoc) -> Self {
        Recipe {
            id: doc.id.into(),
            title: doc.title,
            description: doc.description,
            instructions: doc.instructions,
            category: doc.category,
            prep_time: doc.prep_time,
            cook_time: doc.cook_time,
            servings: doc.servings,
            ingredients: doc.ingredients.into_iter().map(RecipeIngredientLink::from).collect(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Id;
    use chrono::SubsecRound;

    #[test]
    fn test_recipe_doc_keeps_links_and_timestamps() {
        let now = Utc::now().trunc_subsecs(3);
        let ingredient_id = Id::new();
        let mut recipe = Recipe::draft(now);
        recipe.title = String::from("Tarte aux abricots");
        recipe.ingredients.push(RecipeIngredientLink {
            ingredient_id,
            quantity: 6.0,
            unit: None,
            notes: Some(String::from("halved")),
        });

        let document = bson::to_document(&RecipeDoc::from(&recipe)).unwrap();
        assert!(document.get_object_id("_id").is_ok());
        assert!(document.get_datetime("created_at").is_ok());

        let back: RecipeDoc = bson::from_document(document).unwrap();
        assert_eq!(Recipe::from(back), recipe);
    }

    #[test]
    fn test_inventory_doc_stores_status_name() {
        let item = InventoryItem {
            id: Id::new(),
            ingredient_id: Id::new(),
            quantity: 2.0,
            expiration_date: NaiveDate::from_ymd_opt(2026, 10, 17),
            location: Some(String::from("Fridge")),
            min_stock_level: 5.0,
            status: InventoryStatus::LowStock,
        };
        let document = bson::to_document(&InventoryDoc::from(&item)).unwrap();
        assert_eq!(document.get_str("status").unwrap(), "LOW_STOCK");
        assert_eq!(document.get_str("expiration_date").unwrap(), "2026-10-17");
    }
}
