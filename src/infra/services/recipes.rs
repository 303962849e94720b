use crate::infra::policy::{prepare_recipe_for_insert, prepare_recipe_for_update};
use crate::infra::{
    Id, Ingredient, IngredientStore, Recipe, RecipeDetail, RecipeIngredientLink, RecipeRequest,
    RecipeStore, ServiceError,
};
use chrono::Utc;
use log::info;

const MAX_NOTES_LEN: usize = 100;

fn validate(request: &RecipeRequest) -> Result<(), ServiceError> {
    if request.title.trim().is_empty() {
        return Err(ServiceError::validation("Title is required"));
    }
    if request.instructions.trim().is_empty() {
        return Err(ServiceError::validation("Instructions are required"));
    }
    if request.ingredients.is_empty() {
        return Err(ServiceError::validation("At least one ingredient is required"));
    }
    for link in &request.ingredients {
        if !link.quantity.is_finite() || link.quantity <= 0.0 {
            return Err(ServiceError::validation("Quantity must be positive"));
        }
        if link.notes.as_ref().map_or(false, |n| n.chars().count() > MAX_NOTES_LEN) {
            return Err(ServiceError::validation("Notes too long"));
        }
    }
    Ok(())
}

/// Copies the request onto `recipe` and swaps in a freshly built link list.
/// Every ingredient has to resolve; the resolved records come back in link order.
fn assemble<S: IngredientStore + ?Sized>(
    store: &S,
    request: RecipeRequest,
    recipe: &mut Recipe,
) -> Result<Vec<Ingredient>, ServiceError> {
    recipe.title = request.title;
    recipe.description = request.description;
    recipe.instructions = request.instructions;
    recipe.category = request.category;
    recipe.prep_time = request.prep_time;
    recipe.cook_time = request.cook_time;
    recipe.servings = request.servings;

    let mut links = Vec::with_capacity(request.ingredients.len());
    let mut resolved = Vec::with_capacity(request.ingredients.len());
    for link in request.ingredients {
        let ingredient = store
            .find_ingredient(&link.ingredient_id)?
            .ok_or_else(|| ServiceError::not_found("Ingredient", link.ingredient_id))?;
        links.push(RecipeIngredientLink {
            ingredient_id: ingredient.id,
            quantity: link.quantity,
            unit: link.unit.or_else(|| ingredient.unit.clone()),
            notes: link.notes,
        });
        resolved.push(ingredient);
    }
    recipe.ingredients = links;
    Ok(resolved)
}

fn detail<S: IngredientStore + ?Sized>(store: &S, recipe: Recipe) -> Result<RecipeDetail, ServiceError> {
    let resolved = recipe
        .ingredients
        .iter()
        .map(|link| {
            store
                .find_ingredient(&link.ingredient_id)?
                .ok_or_else(|| ServiceError::not_found("Ingredient", link.ingredient_id))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RecipeDetail::assemble(recipe, resolved))
}

fn details<S: IngredientStore + ?Sized>(
    store: &S,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeDetail>, ServiceError> {
    recipes.into_iter().map(|r| detail(store, r)).collect()
}

fn find<S: RecipeStore + ?Sized>(store: &S, id: Id) -> Result<Recipe, ServiceError> {
    store
        .find_recipe(&id)?
        .ok_or_else(|| ServiceError::not_found("Recipe", id))
}

pub fn create<S: IngredientStore + RecipeStore + ?Sized>(
    store: &S,
    request: RecipeRequest,
) -> Result<RecipeDetail, ServiceError> {
    validate(&request)?;
    let now = Utc::now();
    let mut recipe = Recipe::draft(now);
    let resolved = assemble(store, request, &mut recipe)?;
    prepare_recipe_for_insert(&mut recipe, now);
    store.insert_recipe(&recipe)?;
    info!("created recipe {} '{}'", recipe.id, recipe.title);
    Ok(RecipeDetail::assemble(recipe, resolved))
}

/// Nothing is written unless every step succeeds, so a failed update leaves
/// the stored recipe as it was.
pub fn update<S: IngredientStore + RecipeStore + ?Sized>(
    store: &S,
    id: Id,
    request: RecipeRequest,
) -> Result<RecipeDetail, ServiceError> {
    validate(&request)?;
    let mut recipe = find(store, id)?;
    let resolved = assemble(store, request, &mut recipe)?;
    prepare_recipe_for_update(&mut recipe, Utc::now());
    if !store.replace_recipe(&recipe)? {
        return Err(ServiceError::not_found("Recipe", id));
    }
    info!("updated recipe {} ({} ingredients)", id, recipe.ingredients.len());
    Ok(RecipeDetail::assemble(recipe, resolved))
}

pub fn delete<S: RecipeStore + ?Sized>(store: &S, id: Id) -> Result<(), ServiceError> {
    find(store, id)?;
    if !store.delete_recipe(&id)? {
        return Err(ServiceError::not_found("Recipe", id));
    }
    info!("deleted recipe {}", id);
    Ok(())
}

pub fn get<S: IngredientStore + RecipeStore + ?Sized>(
    store: &S,
    id: Id,
) -> Result<RecipeDetail, ServiceError> {
    let recipe = find(store, id)?;
    detail(store, recipe)
}

pub fn links_for_recipe<S: RecipeStore + ?Sized>(
    store: &S,
    id: Id,
) -> Result<Vec<RecipeIngredientLink>, ServiceError> {
    Ok(find(store, id)?.ingredients)
}

pub fn list<S: IngredientStore + RecipeStore + ?Sized>(
    store: &S,
) -> Result<Vec<RecipeDetail>, ServiceError> {
    details(store, store.all_recipes()?)
}

pub fn list_by_category<S: IngredientStore + RecipeStore + ?Sized>(
    store: &S,
    category: &str,
) -> Result<Vec<RecipeDetail>, ServiceError> {
    details(store, store.find_recipes_by_category(category)?)
}

pub fn search<S: IngredientStore + RecipeStore + ?Sized>(
    store: &S,
    query: &str,
) -> Result<Vec<RecipeDetail>, ServiceError> {
    details(store, store.search_recipes(query)?)
}
