mod ingredients;
mod inventory;
mod recipes;

pub use ingredients::*;
pub use inventory::*;
pub use recipes::*;

use super::{Id, ServiceError, Store};
use rocket::State;

pub type Db = State<Box<dyn Store>>;

fn store(db: &Db) -> &dyn Store {
    db.inner().as_ref()
}

fn parse_id(id: &str) -> Result<Id, ServiceError> {
    Ok(id.parse()?)
}
