//! Data model definitions for the record store.
//!
//! This module defines the three record kinds a retail document is made of
//! ([`StoreRecord`], [`WorkerRecord`], [`ProductRecord`]), the editable field
//! sets the front-end submits for add/edit operations, and the [`Document`]
//! holding all three collections. Every record carries a `uuid` field minted
//! once at creation; all later addressing goes through that identifier.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store_state::StoreError;

/// The three named collections a [`Document`] is composed of.
///
/// Wire names (`"stores"`, `"workers"`, `"products"`) are the same strings the
/// backing file uses as top-level keys. Any other name fails with
/// [`StoreError::NoSuchCollection`] before any record lookup happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Stores,
    Workers,
    Products,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Stores => "stores",
            Collection::Workers => "workers",
            Collection::Products => "products",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = StoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "stores" => Ok(Collection::Stores),
            "workers" => Ok(Collection::Workers),
            "products" => Ok(Collection::Products),
            other => Err(StoreError::NoSuchCollection(other.to_string())),
        }
    }
}

/// Generates a fresh record identifier: a v4 UUID rendered as a string.
///
/// Identifiers are assigned exactly once, when a record is appended to its
/// collection, and are never reassigned afterwards.
pub(crate) fn mint_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Access to a record's identifier, shared by all three record kinds so the
/// store can run the same linear-scan lookup over any collection.
pub trait Keyed {
    fn uuid(&self) -> &str;
}

/// A retail store branch.
///
/// Besides its own fields, a store carries two nested sub-lists of worker and
/// product identifiers. They are created empty and are not touched by edit
/// operations; the front-end manages their contents separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub uuid: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub mail: String,
    pub workers: Vec<String>,
    pub products: Vec<String>,
}

/// The editable fields of a [`StoreRecord`]; what an add or edit submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFields {
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
    pub mail: String,
}

impl StoreRecord {
    /// Builds a new record from its editable fields, minting the identifier
    /// and starting with empty sub-lists.
    pub fn create(fields: StoreFields) -> Self {
        StoreRecord {
            uuid: mint_uuid(),
            name: fields.name,
            address: fields.address,
            city: fields.city,
            phone: fields.phone,
            mail: fields.mail,
            workers: Vec::new(),
            products: Vec::new(),
        }
    }

    /// Overwrites the editable fields, leaving `uuid` and the sub-lists as
    /// they are.
    pub fn apply(&mut self, fields: StoreFields) {
        self.name = fields.name;
        self.address = fields.address;
        self.city = fields.city;
        self.phone = fields.phone;
        self.mail = fields.mail;
    }
}

impl Keyed for StoreRecord {
    fn uuid(&self) -> &str {
        &self.uuid
    }
}

/// A worker employed by the chain.
///
/// The backing file spells the last-name key `lastName`; the rename keeps
/// on-disk documents from existing installations readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub uuid: String,
    pub name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub phone: String,
    pub mail: String,
}

/// The editable fields of a [`WorkerRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerFields {
    pub name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub phone: String,
    pub mail: String,
}

impl WorkerRecord {
    pub fn create(fields: WorkerFields) -> Self {
        WorkerRecord {
            uuid: mint_uuid(),
            name: fields.name,
            last_name: fields.last_name,
            phone: fields.phone,
            mail: fields.mail,
        }
    }

    pub fn apply(&mut self, fields: WorkerFields) {
        self.name = fields.name;
        self.last_name = fields.last_name;
        self.phone = fields.phone;
        self.mail = fields.mail;
    }
}

impl Keyed for WorkerRecord {
    fn uuid(&self) -> &str {
        &self.uuid
    }
}

/// A computer part in the catalog. Prices are integer amounts in the store
/// currency's smallest practical unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub uuid: String,
    pub brand: String,
    pub model: String,
    pub category: String,
    pub description: String,
    pub price: i64,
}

/// The editable fields of a [`ProductRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    pub brand: String,
    pub model: String,
    pub category: String,
    pub description: String,
    pub price: i64,
}

impl ProductRecord {
    pub fn create(fields: ProductFields) -> Self {
        ProductRecord {
            uuid: mint_uuid(),
            brand: fields.brand,
            model: fields.model,
            category: fields.category,
            description: fields.description,
            price: fields.price,
        }
    }

    pub fn apply(&mut self, fields: ProductFields) {
        self.brand = fields.brand;
        self.model = fields.model;
        self.category = fields.category;
        self.description = fields.description;
        self.price = fields.price;
    }
}

impl Keyed for ProductRecord {
    fn uuid(&self) -> &str {
        &self.uuid
    }
}

/// The full persisted state: all three collections, in insertion order.
///
/// `deny_unknown_fields` enforces the document invariant that no other
/// top-level key exists; a backing file carrying one fails to load instead of
/// being silently rewritten without it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub stores: Vec<StoreRecord>,
    pub workers: Vec<WorkerRecord>,
    pub products: Vec<ProductRecord>,
}
