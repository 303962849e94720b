use super::{
    Id, Ingredient, IngredientStore, InventoryItem, InventoryStatus, InventoryStore, Recipe,
    RecipeStore, RepError,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    ingredients: HashMap<Id, Ingredient>,
    inventory: HashMap<Id, InventoryItem>,
    recipes: HashMap<Id, Recipe>,
}

/// In-process store, used by the tests and when no database is configured.
#[derive(Default)]
pub struct MemoryRep {
    tables: Mutex<Tables>,
}

impl MemoryRep {
    fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepError> {
        self.tables.lock().map_err(|_| RepError::Poisoned)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl IngredientStore for MemoryRep {
    fn all_ingredients(&self) -> Result<Vec<Ingredient>, RepError> {
        Ok(self.tables()?.ingredients.values().cloned().collect())
    }

    fn find_ingredient(&self, id: &Id) -> Result<Option<Ingredient>, RepError> {
        Ok(self.tables()?.ingredients.get(id).cloned())
    }

    fn find_ingredients_by_name(&self, fragment: &str) -> Result<Vec<Ingredient>, RepError> {
        Ok(self
            .tables()?
            .ingredients
            .values()
            .filter(|i| contains_ignore_case(&i.name, fragment))
            .cloned()
            .collect())
    }

    fn find_ingredients_by_category(&self, category: &str) -> Result<Vec<Ingredient>, RepError> {
        Ok(self
            .tables()?
            .ingredients
            .values()
            .filter(|i| i.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }

    fn insert_ingredient(&self, ingredient: &Ingredient) -> Result<(), RepError> {
        self.tables()?
            .ingredients
            .insert(ingredient.id, ingredient.clone());
        Ok(())
    }

    fn replace_ingredient(&self, ingredient: &Ingredient) -> Result<bool, RepError> {
        match self.tables()?.ingredients.get_mut(&ingredient.id) {
            Some(stored) => {
                *stored = ingredient.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_ingredient(&self, id: &Id) -> Result<bool, RepError> {
        Ok(self.tables()?.ingredients.remove(id).is_some())
    }
}

impl InventoryStore for MemoryRep {
    fn all_inventory(&self) -> Result<Vec<InventoryItem>, RepError> {
        Ok(self.tables()?.inventory.values().cloned().collect())
    }

    fn find_inventory_item(&self, id: &Id) -> Result<Option<InventoryItem>, RepError> {
        Ok(self.tables()?.inventory.get(id).cloned())
    }

    fn find_inventory_by_status(&self, status: InventoryStatus) -> Result<Vec<InventoryItem>, RepError> {
        Ok(self
            .tables()?
            .inventory
            .values()
            .filter(|item| item.status == status)
            .cloned()
            .collect())
    }

    fn find_inventory_by_ingredient(&self, ingredient_id: &Id) -> Result<Vec<InventoryItem>, RepError> {
        Ok(self
            .tables()?
            .inventory
            .values()
            .filter(|item| item.ingredient_id == *ingredient_id)
            .cloned()
            .collect())
    }

    fn find_inventory_expiring_before(&self, date: NaiveDate) -> Result<Vec<InventoryItem>, RepError> {
        Ok(self
            .tables()?
            .inventory
            .values()
            .filter(|item| matches!(item.expiration_date, Some(d) if d < date))
            .cloned()
            .collect())
    }

    fn insert_inventory_item(&self, item: &InventoryItem) -> Result<(), RepError> {
        self.tables()?.inventory.insert(item.id, item.clone());
        Ok(())
    }

    fn replace_inventory_item(&self, item: &InventoryItem) -> Result<bool, RepError> {
        match self.tables()?.inventory.get_mut(&item.id) {
            Some(stored) => {
                *stored = item.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_inventory_item(&self, id: &Id) -> Result<bool, RepError> {
        Ok(self.tables()?.inventory.remove(id).is_some())
    }
}

impl RecipeStore for MemoryRep {
    fn all_recipes(&self) -> Result<Vec<Recipe>, RepError> {
        Ok(self.tables()?.recipes.values().cloned().collect())
    }

    fn find_recipe(&self, id: &Id) -> Result<Option<Recipe>, RepError> {
        Ok(self.tables()?.recipes.get(id).cloned())
    }

    fn find_recipes_by_category(&self, category: &str) -> Result<Vec<Recipe>, RepError> {
        Ok(self
            .tables()?
            .recipes
            .values()
            .filter(|r| r.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }

    fn search_recipes(&self, query: &str) -> Result<Vec<Recipe>, RepError> {
        Ok(self
            .tables()?
            .recipes
            .values()
            .filter(|r| {
                contains_ignore_case(&r.title, query)
                    || r.description
                        .as_deref()
                        .map_or(false, |d| contains_ignore_case(d, query))
            })
            .cloned()
            .collect())
    }

    fn insert_recipe(&self, recipe: &Recipe) -> Result<(), RepError> {
        self.tables()?.recipes.insert(recipe.id, recipe.clone());
        Ok(())
    }

    fn replace_recipe(&self, recipe: &Recipe) -> Result<bool, RepError> {
        match self.tables()?.recipes.get_mut(&recipe.id) {
            Some(stored) => {
                *stored = recipe.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_recipe(&self, id: &Id) -> Result<bool, RepError> {
        Ok(self.tables()?.recipes.remove(id).is_some())
    }

    fn count_recipes_using_ingredient(&self, ingredient_id: &Id) -> Result<u64, RepError> {
        Ok(self
            .tables()?
            .recipes
            .values()
            .filter(|r| r.ingredients.iter().any(|l| l.ingredient_id == *ingredient_id))
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, category: Option<&str>) -> Ingredient {
        Ingredient {
            id: Id::new(),
            name: name.to_string(),
            category: category.map(str::to_string),
            unit: None,
            calories_per_unit: None,
        }
    }

    #[test]
    fn test_find_ingredients_by_name_ignores_case() {
        let rep = MemoryRep::default();
        rep.insert_ingredient(&ingredient("Abricot", None)).unwrap();
        rep.insert_ingredient(&ingredient("Ail", None)).unwrap();

        let found = rep.find_ingredients_by_name("BRIC").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Abricot");
        assert_eq!(rep.find_ingredients_by_name("").unwrap().len(), 2);
    }

    #[test]
    fn test_find_ingredients_by_category_is_exact() {
        let rep = MemoryRep::default();
        rep.insert_ingredient(&ingredient("Milk", Some("Dairy"))).unwrap();
        rep.insert_ingredient(&ingredient("Basil", Some("Herb"))).unwrap();

        assert_eq!(rep.find_ingredients_by_category("Dairy").unwrap().len(), 1);
        assert!(rep.find_ingredients_by_category("dairy").unwrap().is_empty());
    }

    #[test]
    fn test_replace_missing_ingredient_reports_false() {
        let rep = MemoryRep::default();
        assert!(!rep.replace_ingredient(&ingredient("Ghost", None)).unwrap());
        assert!(!rep.delete_ingredient(&Id::new()).unwrap());
    }
}
