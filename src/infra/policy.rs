use super::{InventoryItem, InventoryStatus, Recipe};
use chrono::{DateTime, Duration, SubsecRound, Utc};

/// Maps a stock quantity and its threshold to an inventory status.
pub fn derive_status(quantity: f64, min_stock_level: f64) -> InventoryStatus {
    if quantity <= 0.0 {
        InventoryStatus::OutOfStock
    } else if quantity <= min_stock_level {
        InventoryStatus::LowStock
    } else {
        InventoryStatus::InStock
    }
}

pub fn prepare_item_for_insert(item: &mut InventoryItem) {
    item.status = derive_status(item.quantity, item.min_stock_level);
}

pub fn prepare_item_for_update(item: &mut InventoryItem) {
    item.status = derive_status(item.quantity, item.min_stock_level);
}

// MongoDB keeps milliseconds, so timestamps are cut there before they are stored.
fn stored_instant(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(3)
}

pub fn prepare_recipe_for_insert(recipe: &mut Recipe, now: DateTime<Utc>) {
    let now = stored_instant(now);
    recipe.created_at = now;
    recipe.updated_at = now;
}

/// Refreshes `updated_at`, always moving it forward even if the clock did not.
pub fn prepare_recipe_for_update(recipe: &mut Recipe, now: DateTime<Utc>) {
    let floor = recipe.updated_at + Duration::milliseconds(1);
    recipe.updated_at = stored_instant(now).max(floor);
}
