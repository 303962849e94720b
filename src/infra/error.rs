use super::{Id, RepError};
use log::{error, warn};
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid id: {0}")]
    InvalidId(#[from] bson::oid::Error),
    #[error("{kind} not found with id: {id}")]
    NotFound { kind: &'static str, id: Id },
    #[error("ingredient {id} is used by {recipes} recipe(s) and {inventory} inventory item(s)")]
    InUse { id: Id, recipes: u64, inventory: u64 },
    #[error("storage failure")]
    Store(#[from] RepError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn not_found(kind: &'static str, id: Id) -> Self {
        ServiceError::NotFound { kind, id }
    }

    pub fn status(&self) -> Status {
        match self {
            ServiceError::Validation(_) | ServiceError::InvalidId(_) => Status::BadRequest,
            ServiceError::NotFound { .. } => Status::NotFound,
            ServiceError::InUse { .. } => Status::Conflict,
            ServiceError::Store(_) => Status::InternalServerError,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl<'r> Responder<'r, 'static> for ServiceError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        match &self {
            ServiceError::Store(source) => {
                error!("{} {}: {:?}", request.method(), request.uri(), source)
            }
            _ => warn!("{} {}: {}", request.method(), request.uri(), self),
        }
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).respond_to(request)
    }
}
