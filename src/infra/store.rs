use super::{Id, Ingredient, InventoryItem, InventoryStatus, Recipe};
use chrono::NaiveDate;
use mongodb::error::Error as mongoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepError {
    #[error("error querying value")]
    QueryError(#[from] mongoError),
    #[error("store lock poisoned")]
    Poisoned,
}

pub trait IngredientStore {
    fn all_ingredients(&self) -> Result<Vec<Ingredient>, RepError>;
    fn find_ingredient(&self, id: &Id) -> Result<Option<Ingredient>, RepError>;
    /// Case-insensitive substring match on the name; an empty fragment matches all.
    fn find_ingredients_by_name(&self, fragment: &str) -> Result<Vec<Ingredient>, RepError>;
    fn find_ingredients_by_category(&self, category: &str) -> Result<Vec<Ingredient>, RepError>;
    fn insert_ingredient(&self, ingredient: &Ingredient) -> Result<(), RepError>;
    /// Returns false when no record carries the ingredient's id.
    fn replace_ingredient(&self, ingredient: &Ingredient) -> Result<bool, RepError>;
    fn delete_ingredient(&self, id: &Id) -> Result<bool, RepError>;
}

pub trait InventoryStore {
    fn all_inventory(&self) -> Result<Vec<InventoryItem>, RepError>;
    fn find_inventory_item(&self, id: &Id) -> Result<Option<InventoryItem>, RepError>;
    fn find_inventory_by_status(&self, status: InventoryStatus) -> Result<Vec<InventoryItem>, RepError>;
    fn find_inventory_by_ingredient(&self, ingredient_id: &Id) -> Result<Vec<InventoryItem>, RepError>;
    /// Items whose expiration date is strictly before `date`.
    fn find_inventory_expiring_before(&self, date: NaiveDate) -> Result<Vec<InventoryItem>, RepError>;
    fn insert_inventory_item(&self, item: &InventoryItem) -> Result<(), RepError>;
    fn replace_inventory_item(&self, item: &InventoryItem) -> Result<bool, RepError>;
    fn delete_inventory_item(&self, id: &Id) -> Result<bool, RepError>;
}

pub trait RecipeStore {
    fn all_recipes(&self) -> Result<Vec<Recipe>, RepError>;
    fn find_recipe(&self, id: &Id) -> Result<Option<Recipe>, RepError>;
    fn find_recipes_by_category(&self, category: &str) -> Result<Vec<Recipe>, RepError>;
    /// Case-insensitive substring match on title or description; an empty query matches all.
    fn search_recipes(&self, query: &str) -> Result<Vec<Recipe>, RepError>;
    /// Writes the recipe and all of its links in one step.
    fn insert_recipe(&self, recipe: &Recipe) -> Result<(), RepError>;
    /// Swaps the stored recipe and its links for `recipe` in one step.
    fn replace_recipe(&self, recipe: &Recipe) -> Result<bool, RepError>;
    fn delete_recipe(&self, id: &Id) -> Result<bool, RepError>;
    fn count_recipes_using_ingredient(&self, ingredient_id: &Id) -> Result<u64, RepError>;
}

/// Everything the services need from a backend.
pub trait Store: IngredientStore + InventoryStore + RecipeStore + Send + Sync {}

impl<T> Store for T where T: IngredientStore + InventoryStore + RecipeStore + Send + Sync {}
