use super::{parse_id, store, Db};
use crate::infra::services::ingredients;
use crate::infra::{Ingredient, IngredientRequest, ServiceError};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put};

#[post("/ingredients", data = "<request>")]
pub fn create_ingredient(
    db: &Db,
    request: Json<IngredientRequest>,
) -> Result<Json<Ingredient>, ServiceError> {
    ingredients::create(store(db), request.into_inner()).map(Json)
}

#[post("/ingredients/bulk", data = "<requests>")]
pub fn create_ingredients(
    db: &Db,
    requests: Json<Vec<IngredientRequest>>,
) -> Result<Json<Vec<Ingredient>>, ServiceError> {
    ingredients::create_many(store(db), requests.into_inner()).map(Json)
}

#[get("/ingredients")]
pub fn get_ingredients(db: &Db) -> Result<Json<Vec<Ingredient>>, ServiceError> {
    ingredients::list(store(db)).map(Json)
}

#[get("/ingredients/search?<name>")]
pub fn search_ingredients(
    db: &Db,
    name: Option<&str>,
) -> Result<Json<Vec<Ingredient>>, ServiceError> {
    ingredients::search_by_name(store(db), name.unwrap_or_default()).map(Json)
}

#[get("/ingredients/category/<category>")]
pub fn get_ingredients_by_category(
    db: &Db,
    category: &str,
) -> Result<Json<Vec<Ingredient>>, ServiceError> {
    ingredients::list_by_category(store(db), category).map(Json)
}

#[get("/ingredients/<id>")]
pub fn get_ingredient(db: &Db, id: &str) -> Result<Json<Ingredient>, ServiceError> {
    ingredients::get(store(db), parse_id(id)?).map(Json)
}

#[put("/ingredients/<id>", data = "<request>")]
pub fn update_ingredient(
    db: &Db,
    id: &str,
    request: Json<IngredientRequest>,
) -> Result<Json<Ingredient>, ServiceError> {
    ingredients::update(store(db), parse_id(id)?, request.into_inner()).map(Json)
}

#[delete("/ingredients/<id>")]
pub fn delete_ingredient(db: &Db, id: &str) -> Result<Status, ServiceError> {
    ingredients::delete(store(db), parse_id(id)?)?;
    Ok(Status::NoContent)
}
