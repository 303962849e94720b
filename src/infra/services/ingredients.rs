use crate::infra::{Id, Ingredient, IngredientRequest, IngredientStore, ServiceError, Store};
use log::info;

fn validate(request: &IngredientRequest) -> Result<(), ServiceError> {
    if request.name.trim().is_empty() {
        return Err(ServiceError::validation("Name is required"));
    }
    if let Some(calories) = request.calories_per_unit {
        if !calories.is_finite() || calories < 0.0 {
            return Err(ServiceError::validation(
                "Calories per unit must be a non-negative number",
            ));
        }
    }
    Ok(())
}

pub fn create<S: IngredientStore + ?Sized>(
    store: &S,
    request: IngredientRequest,
) -> Result<Ingredient, ServiceError> {
    validate(&request)?;
    let ingredient = Ingredient {
        id: Id::new(),
        name: request.name,
        category: request.category,
        unit: request.unit,
        calories_per_unit: request.calories_per_unit,
    };
    store.insert_ingredient(&ingredient)?;
    info!("created ingredient {} '{}'", ingredient.id, ingredient.name);
    Ok(ingredient)
}

/// Creates every ingredient, or none of them if any element is invalid.
pub fn create_many<S: IngredientStore + ?Sized>(
    store: &S,
    requests: Vec<IngredientRequest>,
) -> Result<Vec<Ingredient>, ServiceError> {
    for (index, request) in requests.iter().enumerate() {
        validate(request)
            .map_err(|e| ServiceError::validation(format!("ingredient #{}: {}", index, e)))?;
    }
    requests
        .into_iter()
        .map(|request| create(store, request))
        .collect()
}

pub fn list<S: IngredientStore + ?Sized>(store: &S) -> Result<Vec<Ingredient>, ServiceError> {
    Ok(store.all_ingredients()?)
}

pub fn get<S: IngredientStore + ?Sized>(store: &S, id: Id) -> Result<Ingredient, ServiceError> {
    store
        .find_ingredient(&id)?
        .ok_or_else(|| ServiceError::not_found("Ingredient", id))
}

pub fn search_by_name<S: IngredientStore + ?Sized>(
    store: &S,
    name: &str,
) -> Result<Vec<Ingredient>, ServiceError> {
    Ok(store.find_ingredients_by_name(name)?)
}

pub fn list_by_category<S: IngredientStore + ?Sized>(
    store: &S,
    category: &str,
) -> Result<Vec<Ingredient>, ServiceError> {
    Ok(store.find_ingredients_by_category(category)?)
}

pub fn update<S: IngredientStore + ?Sized>(
    store: &S,
    id: Id,
    request: IngredientRequest,
) -> Result<Ingredient, ServiceError> {
    validate(&request)?;
    let mut ingredient = get(store, id)?;
    ingredient.name = request.name;
    ingredient.category = request.category;
    ingredient.unit = request.unit;
    ingredient.calories_per_unit = request.calories_per_unit;
    if !store.replace_ingredient(&ingredient)? {
        return Err(ServiceError::not_found("Ingredient", id));
    }
    info!("updated ingredient {}", id);
    Ok(ingredient)
}

/// Refuses to remove an ingredient that recipes or inventory still point at.
/// Removing an unknown id succeeds without effect.
pub fn delete<S: Store + ?Sized>(store: &S, id: Id) -> Result<(), ServiceError> {
    let recipes = store.count_recipes_using_ingredient(&id)?;
    let inventory = store.find_inventory_by_ingredient(&id)?.len() as u64;
    if recipes > 0 || inventory > 0 {
        return Err(ServiceError::InUse {
            id,
            recipes,
            inventory,
        });
    }
    if store.delete_ingredient(&id)? {
        info!("deleted ingredient {}", id);
    }
    Ok(())
}
