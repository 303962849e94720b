use crate::infra::policy::{prepare_item_for_insert, prepare_item_for_update};
use crate::infra::{
    Id, IngredientStore, InventoryItem, InventoryRequest, InventoryStatus, InventoryStore,
    InventoryUpdate, ServiceError,
};
use chrono::NaiveDate;
use log::info;

fn validate(quantity: f64, min_stock_level: f64) -> Result<(), ServiceError> {
    if !quantity.is_finite() {
        return Err(ServiceError::validation("Quantity must be a number"));
    }
    if !min_stock_level.is_finite() {
        return Err(ServiceError::validation("Minimum stock level must be a number"));
    }
    Ok(())
}

pub fn list<S: InventoryStore + ?Sized>(store: &S) -> Result<Vec<InventoryItem>, ServiceError> {
    Ok(store.all_inventory()?)
}

pub fn list_low_stock<S: InventoryStore + ?Sized>(
    store: &S,
) -> Result<Vec<InventoryItem>, ServiceError> {
    Ok(store.find_inventory_by_status(InventoryStatus::LowStock)?)
}

pub fn list_for_ingredient<S: InventoryStore + ?Sized>(
    store: &S,
    ingredient_id: Id,
) -> Result<Vec<InventoryItem>, ServiceError> {
    Ok(store.find_inventory_by_ingredient(&ingredient_id)?)
}

pub fn list_expiring_before<S: InventoryStore + ?Sized>(
    store: &S,
    date: NaiveDate,
) -> Result<Vec<InventoryItem>, ServiceError> {
    Ok(store.find_inventory_expiring_before(date)?)
}

pub fn add<S: IngredientStore + InventoryStore + ?Sized>(
    store: &S,
    request: InventoryRequest,
) -> Result<InventoryItem, ServiceError> {
    validate(request.quantity, request.min_stock_level)?;
    if store.find_ingredient(&request.ingredient_id)?.is_none() {
        return Err(ServiceError::not_found("Ingredient", request.ingredient_id));
    }
    let mut item = InventoryItem {
        id: Id::new(),
        ingredient_id: request.ingredient_id,
        quantity: request.quantity,
        expiration_date: request.expiration_date,
        location: request.location,
        min_stock_level: request.min_stock_level,
        // replaced by the status policy below
        status: InventoryStatus::OutOfStock,
    };
    prepare_item_for_insert(&mut item);
    store.insert_inventory_item(&item)?;
    info!("added inventory item {} ({})", item.id, item.status.as_str());
    Ok(item)
}

pub fn update<S: InventoryStore + ?Sized>(
    store: &S,
    id: Id,
    request: InventoryUpdate,
) -> Result<InventoryItem, ServiceError> {
    validate(request.quantity, request.min_stock_level)?;
    let mut item = store
        .find_inventory_item(&id)?
        .ok_or_else(|| ServiceError::not_found("Inventory item", id))?;
    item.quantity = request.quantity;
    item.expiration_date = request.expiration_date;
    item.location = request.location;
    item.min_stock_level = request.min_stock_level;
    prepare_item_for_update(&mut item);
    if !store.replace_inventory_item(&item)? {
        return Err(ServiceError::not_found("Inventory item", id));
    }
    info!("updated inventory item {} ({})", id, item.status.as_str());
    Ok(item)
}

pub fn remove<S: InventoryStore + ?Sized>(store: &S, id: Id) -> Result<(), ServiceError> {
    if store.delete_inventory_item(&id)? {
        info!("removed inventory item {}", id);
    }
    Ok(())
}
