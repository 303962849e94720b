use super::{parse_id, store, Db};
use crate::infra::services::inventory;
use crate::infra::{InventoryItem, InventoryRequest, InventoryUpdate, ServiceError};
use chrono::NaiveDate;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put};

#[get("/inventory")]
pub fn get_inventory(db: &Db) -> Result<Json<Vec<InventoryItem>>, ServiceError> {
    inventory::list(store(db)).map(Json)
}

#[get("/inventory/low-stock")]
pub fn get_low_stock(db: &Db) -> Result<Json<Vec<InventoryItem>>, ServiceError> {
    inventory::list_low_stock(store(db)).map(Json)
}

#[get("/inventory/ingredient/<ingredient_id>")]
pub fn get_inventory_for_ingredient(
    db: &Db,
    ingredient_id: &str,
) -> Result<Json<Vec<InventoryItem>>, ServiceError> {
    inventory::list_for_ingredient(store(db), parse_id(ingredient_id)?).map(Json)
}

#[get("/inventory/expiring?<before>")]
pub fn get_expiring_inventory(
    db: &Db,
    before: &str,
) -> Result<Json<Vec<InventoryItem>>, ServiceError> {
    let date = NaiveDate::parse_from_str(before, "%Y-%m-%d")
        .map_err(|_| ServiceError::validation(format!("invalid date '{}', expected YYYY-MM-DD", before)))?;
    inventory::list_expiring_before(store(db), date).map(Json)
}

#[post("/inventory", data = "<request>")]
pub fn add_to_inventory(
    db: &Db,
    request: Json<InventoryRequest>,
) -> Result<Json<InventoryItem>, ServiceError> {
    inventory::add(store(db), request.into_inner()).map(Json)
}

#[put("/inventory/<id>", data = "<request>")]
pub fn update_inventory_item(
    db: &Db,
    id: &str,
    request: Json<InventoryUpdate>,
) -> Result<Json<InventoryItem>, ServiceError> {
    inventory::update(store(db), parse_id(id)?, request.into_inner()).map(Json)
}

#[delete("/inventory/<id>")]
pub fn remove_from_inventory(db: &Db, id: &str) -> Result<Status, ServiceError> {
    inventory::remove(store(db), parse_id(id)?)?;
    Ok(Status::NoContent)
}
