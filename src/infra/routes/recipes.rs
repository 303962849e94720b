use super::{parse_id, store, Db};
use crate::infra::services::recipes;
use crate::infra::{RecipeDetail, RecipeIngredientLink, RecipeRequest, ServiceError};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put};

#[post("/recipes", data = "<request>")]
pub fn create_recipe(
    db: &Db,
    request: Json<RecipeRequest>,
) -> Result<Json<RecipeDetail>, ServiceError> {
    recipes::create(store(db), request.into_inner()).map(Json)
}

#[get("/recipes")]
pub fn get_recipes(db: &Db) -> Result<Json<Vec<RecipeDetail>>, ServiceError> {
    recipes::list(store(db)).map(Json)
}

#[get("/recipes/search?<query>")]
pub fn search_recipes(
    db: &Db,
    query: Option<&str>,
) -> Result<Json<Vec<RecipeDetail>>, ServiceError> {
    recipes::search(store(db), query.unwrap_or_default()).map(Json)
}

#[get("/recipes/category/<category>")]
pub fn get_recipes_by_category(
    db: &Db,
    category: &str,
) -> Result<Json<Vec<RecipeDetail>>, ServiceError> {
    recipes::list_by_category(store(db), category).map(Json)
}

#[get("/recipes/<id>")]
pub fn get_recipe(db: &Db, id: &str) -> Result<Json<RecipeDetail>, ServiceError> {
    recipes::get(store(db), parse_id(id)?).map(Json)
}

#[get("/recipes/<id>/ingredients", rank = 2)]
pub fn get_recipe_links(
    db: &Db,
    id: &str,
) -> Result<Json<Vec<RecipeIngredientLink>>, ServiceError> {
    recipes::links_for_recipe(store(db), parse_id(id)?).map(Json)
}

#[put("/recipes/<id>", data = "<request>")]
pub fn update_recipe(
    db: &Db,
    id: &str,
    request: Json<RecipeRequest>,
) -> Result<Json<RecipeDetail>, ServiceError> {
    recipes::update(store(db), parse_id(id)?, request.into_inner()).map(Json)
}

#[delete("/recipes/<id>")]
pub fn delete_recipe(db: &Db, id: &str) -> Result<Status, ServiceError> {
    recipes::delete(store(db), parse_id(id)?)?;
    Ok(Status::NoContent)
}
