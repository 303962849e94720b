use super::types::{IngredientDoc, InventoryDoc, RecipeDoc};
use crate::infra::{
    Id, Ingredient, IngredientStore, InventoryItem, InventoryStatus, InventoryStore, Recipe,
    RecipeStore, RepError,
};
use bson::{doc, Document};
use chrono::NaiveDate;
use log::info;
use mongodb::sync::{Client, Collection, Cursor};
use serde::de::DeserializeOwned;

pub struct MongoRep {
    ingredients: Collection<IngredientDoc>,
    inventory: Collection<InventoryDoc>,
    recipes: Collection<RecipeDoc>,
}

impl MongoRep {
    pub fn init(uri: String, database: &str) -> Result<Self, RepError> {
        let client = Client::with_uri_str(uri)?;
        let database = client.database(database);
        info!("using MongoDB database '{}'", database.name());
        let rep = MongoRep {
            ingredients: database.collection("ingredients"),
            inventory: database.collection("inventory_items"),
            recipes: database.collection("recipes"),
        };
        Ok(rep)
    }
}

fn collect<D, T>(cursor: Cursor<D>) -> Result<Vec<T>, RepError>
where
    D: DeserializeOwned + Unpin + Send + Sync,
    T: From<D>,
{
    cursor
        .map(|doc| doc.map(T::from).map_err(RepError::from))
        .collect()
}

fn by_id(id: &Id) -> Document {
    doc! { "_id": id.oid() }
}

// user text goes into $regex, so it is escaped to match literally
fn contains_ignore_case(text: &str) -> Document {
    doc! { "$regex": regex::escape(text), "$options": "i" }
}

impl IngredientStore for MongoRep {
    fn all_ingredients(&self) -> Result<Vec<Ingredient>, RepError> {
        collect(self.ingredients.find(None, None)?)
    }

    fn find_ingredient(&self, id: &Id) -> Result<Option<Ingredient>, RepError> {
        Ok(self
            .ingredients
            .find_one(by_id(id), None)?
            .map(Ingredient::from))
    }

    fn find_ingredients_by_name(&self, fragment: &str) -> Result<Vec<Ingredient>, RepError> {
        let filter = doc! { "name": contains_ignore_case(fragment) };
        collect(self.ingredients.find(filter, None)?)
    }

    fn find_ingredients_by_category(&self, category: &str) -> Result<Vec<Ingredient>, RepError> {
        collect(self.ingredients.find(doc! { "category": category }, None)?)
    }

    fn insert_ingredient(&self, ingredient: &Ingredient) -> Result<(), RepError> {
        self.ingredients
            .insert_one(IngredientDoc::from(ingredient), None)?;
        Ok(())
    }

    fn replace_ingredient(&self, ingredient: &Ingredient) -> Result<bool, RepError> {
        let result = self.ingredients.replace_one(
            by_id(&ingredient.id),
            IngredientDoc::from(ingredient),
            None,
        )?;
        Ok(result.matched_count > 0)
    }

    fn delete_ingredient(&self, id: &Id) -> Result<bool, RepError> {
        Ok(self.ingredients.delete_one(by_id(id), None)?.deleted_count > 0)
    }
}

impl InventoryStore for MongoRep {
    fn all_inventory(&self) -> Result<Vec<InventoryItem>, RepError> {
        collect(self.inventory.find(None, None)?)
    }

    fn find_inventory_item(&self, id: &Id) -> Result<Option<InventoryItem>, RepError> {
        Ok(self
            .inventory
            .find_one(by_id(id), None)?
            .map(InventoryItem::from))
    }

    fn find_inventory_by_status(&self, status: InventoryStatus) -> Result<Vec<InventoryItem>, RepError> {
        collect(self.inventory.find(doc! { "status": status.as_str() }, None)?)
    }

    fn find_inventory_by_ingredient(&self, ingredient_id: &Id) -> Result<Vec<InventoryItem>, RepError> {
        let filter = doc! { "ingredient_id": ingredient_id.oid() };
        collect(self.inventory.find(filter, None)?)
    }

    fn find_inventory_expiring_before(&self, date: NaiveDate) -> Result<Vec<InventoryItem>, RepError> {
        let filter = doc! { "expiration_date": { "$lt": date.to_string() } };
        collect(self.inventory.find(filter, None)?)
    }

    fn insert_inventory_item(&self, item: &InventoryItem) -> Result<(), RepError> {
        self.inventory.insert_one(InventoryDoc::from(item), None)?;
        Ok(())
    }

    fn replace_inventory_item(&self, item: &InventoryItem) -> Result<bool, RepError> {
        let result = self
            .inventory
            .replace_one(by_id(&item.id), InventoryDoc::from(item), None)?;
        Ok(result.matched_count > 0)
    }

    fn delete_inventory_item(&self, id: &Id) -> Result<bool, RepError> {
        Ok(self.inventory.delete_one(by_id(id), None)?.deleted_count > 0)
    }
}

impl RecipeStore for MongoRep {
    fn all_recipes(&self) -> Result<Vec<Recipe>, RepError> {
        collect(self.recipes.find(None, None)?)
    }

    fn find_recipe(&self, id: &Id) -> Result<Option<Recipe>, RepError> {
        Ok(self.recipes.find_one(by_id(id), None)?.map(Recipe::from))
    }

    fn find_recipes_by_category(&self, category: &str) -> Result<Vec<Recipe>, RepError> {
        collect(self.recipes.find(doc! { "category": category }, None)?)
    }

    fn search_recipes(&self, query: &str) -> Result<Vec<Recipe>, RepError> {
        let filter = if query.is_empty() {
            doc! {}
        } else {
            doc! {
                "$or": [
                    { "title": contains_ignore_case(query) },
                    { "description": contains_ignore_case(query) }
                ]
            }
        };
        collect(self.recipes.find(filter, None)?)
    }

    fn insert_recipe(&self, recipe: &Recipe) -> Result<(), RepError> {
        self.recipes.insert_one(RecipeDoc::from(recipe), None)?;
        Ok(())
    }

    fn replace_recipe(&self, recipe: &Recipe) -> Result<bool, RepError> {
        let result = self
            .recipes
            .replace_one(by_id(&recipe.id), RecipeDoc::from(recipe), None)?;
        Ok(result.matched_count > 0)
    }

    fn delete_recipe(&self, id: &Id) -> Result<bool, RepError> {
        Ok(self.recipes.delete_one(by_id(id), None)?.deleted_count > 0)
    }

    fn count_recipes_using_ingredient(&self, ingredient_id: &Id) -> Result<u64, RepError> {
        let filter = doc! { "ingredients.ingredient_id": ingredient_id.oid() };
        Ok(self.recipes.count_documents(filter, None)?)
    }
}
