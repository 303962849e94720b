mod config;
mod error;
mod memory;
mod mongo;
pub mod policy;
mod routes;
pub mod services;
mod store;
mod types;

pub use config::*;
pub use error::*;
pub use memory::*;
pub use mongo::*;
pub use routes::*;
pub use store::*;
pub use types::*;
