use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::store_state::StoreError;

/// JSON response envelope returned across the FFI boundary.
///
/// Every entry point in `lib.rs` answers with one of these, serialized, so
/// the front-end can distinguish a missing record from a bad collection name
/// or a storage fault without parsing message strings.
#[derive(Debug, Serialize, Deserialize)]
pub enum AppResponse {
    StorageError(String),
    SerializationError(String),
    NotFound(String),
    NoSuchCollection(String),
    BadRequest(String),
    Ok(String),
}

impl Display for AppResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppResponse::StorageError(msg) => write!(f, "Storage error: {}", msg),
            AppResponse::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppResponse::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppResponse::NoSuchCollection(msg) => write!(f, "No such collection: {}", msg),
            AppResponse::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppResponse::Ok(msg) => write!(f, "Ok: {}", msg),
        }
    }
}

impl From<StoreError> for AppResponse {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, uuid } => {
                AppResponse::NotFound(format!("No record with uuid '{uuid}' in '{collection}'"))
            }
            StoreError::NoSuchCollection(name) => {
                AppResponse::NoSuchCollection(format!("No collection named '{name}'"))
            }
            StoreError::Storage(io_err) => {
                AppResponse::StorageError(format!("IO error: {io_err}"))
            }
            StoreError::Serialization(serde_err) => {
                AppResponse::SerializationError(format!("JSON error: {serde_err}"))
            }
        }
    }
}

impl AppResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        AppResponse::Ok(msg.into())
    }
}
