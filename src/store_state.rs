//! The record store: an in-memory [`Document`] with exclusive ownership of
//! its backing JSON file.
//!
//! Every mutation follows the same cycle: locate, apply in memory, rewrite
//! the whole file. A mutation that cannot be persisted is rolled back before
//! the error is raised, so no uncommitted state ever survives a call
//! boundary. Lookups are a linear scan comparing stored identifiers; the
//! uniqueness invariant means at most one record can match.

use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::PathBuf;

use log::{info, warn};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::record_model::{
    Collection, Document, Keyed, ProductFields, ProductRecord, StoreFields, StoreRecord,
    WorkerFields, WorkerRecord,
};

/// Failure taxonomy for store operations.
///
/// Every operation either fully applies (record mutated and persisted) or
/// raises one of these without applying at all.
#[derive(Debug)]
pub enum StoreError {
    /// An edit or delete addressed an identifier absent from its collection.
    NotFound { collection: Collection, uuid: String },
    /// A collection name outside {stores, workers, products}. Programmer
    /// error, not user input error.
    NoSuchCollection(String),
    /// The backing file could not be read or written. A missing file at
    /// startup is not an error; anything else is unrecovered.
    Storage(io::Error),
    /// The backing file or an incoming payload is not valid JSON for the
    /// document schema.
    Serialization(serde_json::Error),
}

impl StoreError {
    fn not_found(collection: Collection, uuid: &str) -> Self {
        StoreError::NotFound {
            collection,
            uuid: uuid.to_string(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound { collection, uuid } => {
                write!(f, "no record with uuid '{uuid}' in '{collection}'")
            }
            StoreError::NoSuchCollection(name) => {
                write!(f, "no collection named '{name}'")
            }
            StoreError::Storage(err) => write!(f, "storage fault: {err}"),
            StoreError::Serialization(err) => write!(f, "serialization error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Storage(err) => Some(err),
            StoreError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Storage(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}

/// First-match linear scan over a collection.
fn position_of<T: Keyed>(records: &[T], uuid: &str) -> Option<usize> {
    records.iter().position(|record| record.uuid() == uuid)
}

fn record_json<T: Keyed + Serialize>(
    records: &[T],
    collection: Collection,
    uuid: &str,
) -> Result<JsonValue, StoreError> {
    let index =
        position_of(records, uuid).ok_or_else(|| StoreError::not_found(collection, uuid))?;
    Ok(serde_json::to_value(&records[index])?)
}

/// Owner of the document and its backing file.
///
/// Single-threaded by contract: the front-end invokes the store from its one
/// event-processing thread, and the store assumes it is the sole owner of the
/// backing file.
#[derive(Debug)]
pub struct AppStoreState {
    path: PathBuf,
    document: Document,
}

impl AppStoreState {
    /// Loads the document from `path`, or initializes an empty document and
    /// writes it immediately when no file exists yet, so the file is there
    /// for subsequent runs.
    ///
    /// A file that exists but cannot be read or parsed is a hard error;
    /// callers should fail fast rather than operate on partial state.
    pub fn init(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let document: Document = serde_json::from_str(&contents).map_err(|e| {
                    warn!("Backing file {} is malformed: {e}", path.display());
                    StoreError::Serialization(e)
                })?;
                info!(
                    "Loaded document from {} ({} stores, {} workers, {} products)",
                    path.display(),
                    document.stores.len(),
                    document.workers.len(),
                    document.products.len()
                );
                Ok(AppStoreState { path, document })
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("No backing file at {}; starting empty", path.display());
                let state = AppStoreState {
                    path,
                    document: Document::default(),
                };
                state.persist()?;
                Ok(state)
            }
            Err(err) => Err(StoreError::Storage(err)),
        }
    }

    /// The whole document. This is the read the view-model adapter forwards.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn stores(&self) -> &[StoreRecord] {
        &self.document.stores
    }

    pub fn workers(&self) -> &[WorkerRecord] {
        &self.document.workers
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.document.products
    }

    /// Rewrites the backing file wholesale from the in-memory document.
    /// Pretty-printed, same as the documents written by earlier versions of
    /// the front-end.
    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.document)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Appends a new store, minting its identifier and starting its worker
    /// and product sub-lists empty. Returns the minted identifier.
    pub fn add_store(&mut self, fields: StoreFields) -> Result<String, StoreError> {
        let record = StoreRecord::create(fields);
        let uuid = record.uuid.clone();
        self.document.stores.push(record);
        if let Err(err) = self.persist() {
            self.document.stores.pop();
            return Err(err);
        }
        Ok(uuid)
    }

    /// Appends a new worker. Returns the minted identifier.
    pub fn add_worker(&mut self, fields: WorkerFields) -> Result<String, StoreError> {
        let record = WorkerRecord::create(fields);
        let uuid = record.uuid.clone();
        self.document.workers.push(record);
        if let Err(err) = self.persist() {
            self.document.workers.pop();
            return Err(err);
        }
        Ok(uuid)
    }

    /// Appends a new product. Returns the minted identifier.
    pub fn add_product(&mut self, fields: ProductFields) -> Result<String, StoreError> {
        let record = ProductRecord::create(fields);
        let uuid = record.uuid.clone();
        self.document.products.push(record);
        if let Err(err) = self.persist() {
            self.document.products.pop();
            return Err(err);
        }
        Ok(uuid)
    }

    /// Overwrites the editable fields of the store addressed by `uuid`. The
    /// identifier and the nested sub-lists are left untouched.
    pub fn edit_store(&mut self, uuid: &str, fields: StoreFields) -> Result<(), StoreError> {
        let index = position_of(&self.document.stores, uuid)
            .ok_or_else(|| StoreError::not_found(Collection::Stores, uuid))?;
        let previous = self.document.stores[index].clone();
        self.document.stores[index].apply(fields);
        if let Err(err) = self.persist() {
            self.document.stores[index] = previous;
            return Err(err);
        }
        Ok(())
    }

    pub fn edit_worker(&mut self, uuid: &str, fields: WorkerFields) -> Result<(), StoreError> {
        let index = position_of(&self.document.workers, uuid)
            .ok_or_else(|| StoreError::not_found(Collection::Workers, uuid))?;
        let previous = self.document.workers[index].clone();
        self.document.workers[index].apply(fields);
        if let Err(err) = self.persist() {
            self.document.workers[index] = previous;
            return Err(err);
        }
        Ok(())
    }

    pub fn edit_product(&mut self, uuid: &str, fields: ProductFields) -> Result<(), StoreError> {
        let index = position_of(&self.document.products, uuid)
            .ok_or_else(|| StoreError::not_found(Collection::Products, uuid))?;
        let previous = self.document.products[index].clone();
        self.document.products[index].apply(fields);
        if let Err(err) = self.persist() {
            self.document.products[index] = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Removes the store addressed by `uuid`, preserving the order of the
    /// remaining records.
    pub fn delete_store(&mut self, uuid: &str) -> Result<(), StoreError> {
        let index = position_of(&self.document.stores, uuid)
            .ok_or_else(|| StoreError::not_found(Collection::Stores, uuid))?;
        let removed = self.document.stores.remove(index);
        if let Err(err) = self.persist() {
            self.document.stores.insert(index, removed);
            return Err(err);
        }
        Ok(())
    }

    pub fn delete_worker(&mut self, uuid: &str) -> Result<(), StoreError> {
        let index = position_of(&self.document.workers, uuid)
            .ok_or_else(|| StoreError::not_found(Collection::Workers, uuid))?;
        let removed = self.document.workers.remove(index);
        if let Err(err) = self.persist() {
            self.document.workers.insert(index, removed);
            return Err(err);
        }
        Ok(())
    }

    pub fn delete_product(&mut self, uuid: &str) -> Result<(), StoreError> {
        let index = position_of(&self.document.products, uuid)
            .ok_or_else(|| StoreError::not_found(Collection::Products, uuid))?;
        let removed = self.document.products.remove(index);
        if let Err(err) = self.persist() {
            self.document.products.insert(index, removed);
            return Err(err);
        }
        Ok(())
    }

    /// String-keyed add for the FFI boundary: deserializes the field set for
    /// `collection` from `json`, appends, and returns the stored record with
    /// its freshly minted identifier.
    pub fn add_json(
        &mut self,
        collection: Collection,
        json: &str,
    ) -> Result<JsonValue, StoreError> {
        match collection {
            Collection::Stores => {
                let fields: StoreFields = serde_json::from_str(json)?;
                let uuid = self.add_store(fields)?;
                record_json(&self.document.stores, collection, &uuid)
            }
            Collection::Workers => {
                let fields: WorkerFields = serde_json::from_str(json)?;
                let uuid = self.add_worker(fields)?;
                record_json(&self.document.workers, collection, &uuid)
            }
            Collection::Products => {
                let fields: ProductFields = serde_json::from_str(json)?;
                let uuid = self.add_product(fields)?;
                record_json(&self.document.products, collection, &uuid)
            }
        }
    }

    /// String-keyed list: the full collection as a JSON array, insertion
    /// order preserved.
    pub fn list_json(&self, collection: Collection) -> Result<JsonValue, StoreError> {
        let value = match collection {
            Collection::Stores => serde_json::to_value(&self.document.stores)?,
            Collection::Workers => serde_json::to_value(&self.document.workers)?,
            Collection::Products => serde_json::to_value(&self.document.products)?,
        };
        Ok(value)
    }

    /// String-keyed edit: deserializes the field set and overwrites the
    /// record addressed by `uuid`, returning it as stored. A `uuid` key
    /// inside `json` is ignored; the identifier never changes.
    pub fn edit_json(
        &mut self,
        collection: Collection,
        uuid: &str,
        json: &str,
    ) -> Result<JsonValue, StoreError> {
        match collection {
            Collection::Stores => {
                let fields: StoreFields = serde_json::from_str(json)?;
                self.edit_store(uuid, fields)?;
                record_json(&self.document.stores, collection, uuid)
            }
            Collection::Workers => {
                let fields: WorkerFields = serde_json::from_str(json)?;
                self.edit_worker(uuid, fields)?;
                record_json(&self.document.workers, collection, uuid)
            }
            Collection::Products => {
                let fields: ProductFields = serde_json::from_str(json)?;
                self.edit_product(uuid, fields)?;
                record_json(&self.document.products, collection, uuid)
            }
        }
    }

    /// String-keyed delete.
    pub fn delete_json(&mut self, collection: Collection, uuid: &str) -> Result<(), StoreError> {
        match collection {
            Collection::Stores => self.delete_store(uuid),
            Collection::Workers => self.delete_worker(uuid),
            Collection::Products => self.delete_product(uuid),
        }
    }
}
