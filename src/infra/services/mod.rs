pub mod ingredients;
pub mod inventory;
pub mod recipes;
