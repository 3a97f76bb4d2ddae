//! # Retail Record Core
//!
//! A JSON-document record store for a computer-parts retail point-of-sale,
//! designed for FFI (Foreign Function Interface) integration with desktop GUI
//! front-ends. The store owns one backing file holding three collections
//! (stores, workers, products) and rewrites it wholesale after every
//! successful mutation.
//!
//! ## Features
//!
//! - **Single-document storage**: one JSON file, loaded at startup, rewritten
//!   per mutation, created empty on first run
//! - **FFI-optimized**: C-compatible entry points with JSON-envelope
//!   responses for cross-language integration
//! - **Identifier addressing**: every record carries a v4 UUID minted at
//!   creation; edits and deletes address records by that identifier only
//! - **Typed failures**: not-found, no-such-collection, and storage faults
//!   are distinct, catchable conditions
//! - **Safe error handling**: no `unwrap()` calls in production code
//!
//! ## Quick Start
//!
//! ```no_run
//! use retail_record_core::record_model::ProductFields;
//! use retail_record_core::store_state::AppStoreState;
//!
//! let mut store = AppStoreState::init("data.json")?;
//! let uuid = store.add_product(ProductFields {
//!     brand: "Kingston".to_string(),
//!     model: "Fury 16GB".to_string(),
//!     category: "RAM".to_string(),
//!     description: "DDR4 3200MHz".to_string(),
//!     price: 45990,
//! })?;
//! assert!(store.products().iter().any(|p| p.uuid == uuid));
//! # Ok::<(), retail_record_core::store_state::StoreError>(())
//! ```
//!
//! ## FFI Functions
//!
//! This library exposes C-compatible functions for cross-language integration:
//!
//! - [`create_store`] - Open or initialize the backing document
//! - [`add_record`] - Append a record to a named collection
//! - [`get_records`] - Retrieve one collection
//! - [`get_data`] - Retrieve the whole document (the view-model read)
//! - [`update_record`] - Overwrite a record's editable fields by uuid
//! - [`delete_record`] - Remove a record by uuid
//! - [`close_store`] - Explicit state cleanup

pub mod app_response;
pub mod record_model;
pub mod store_state;
pub mod view_model;


use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::str::FromStr;

use log::{info, warn};

use crate::app_response::AppResponse;
use crate::record_model::Collection;
use crate::store_state::AppStoreState;
use crate::view_model::ViewModel;

/// Opens the record store backed by the file at `path`.
///
/// If the file exists it is parsed into the in-memory document; if it does
/// not, an empty document is written immediately so the file exists for
/// subsequent runs. A file that exists but cannot be read or parsed fails the
/// call; the front-end should treat that as fatal rather than run on partial
/// state.
///
/// # Parameters
///
/// * `path` - A null-terminated C string with the backing file path
///
/// # Returns
///
/// Returns a pointer to the [`AppStoreState`] instance on success, or a null
/// pointer on failure. The caller owns the pointer and must release it with
/// [`close_store`].
///
/// # Safety
///
/// This function is unsafe because it dereferences a raw pointer and returns
/// a raw pointer that must be properly managed. The input string must be
/// valid UTF-8.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use retail_record_core::create_store;
///
/// let path = CString::new("data.json").unwrap();
/// let state = create_store(path.as_ptr());
///
/// if !state.is_null() {
///     // Store opened successfully
/// }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_store(path: *const c_char) -> *mut AppStoreState {
    if path.is_null() {
        warn!("Null path pointer passed to create_store");
        return std::ptr::null_mut();
    }

    let path_str = match unsafe { CStr::from_ptr(path).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in path parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    info!("Attempting to open document at: {path_str}");

    match AppStoreState::init(path_str) {
        Ok(state) => {
            info!("✅ Document opened successfully");
            Box::into_raw(Box::new(state))
        }
        Err(e) => {
            warn!("❌ Failed to open document at {path_str}: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Appends a new record to a named collection.
///
/// The JSON payload carries the record's editable fields only; the store
/// mints the identifier. For the `stores` collection, empty nested worker and
/// product sub-lists are added as well.
///
/// # Parameters
///
/// * `state` - Pointer to the store state instance
/// * `collection` - Null-terminated C string, one of `stores`, `workers`,
///   `products`
/// * `json_ptr` - Null-terminated C string with the field-set JSON
///
/// # Returns
///
/// Returns a JSON-formatted C string containing the operation result. On
/// success the `Ok` payload is the stored record, including its freshly
/// minted `uuid`. The returned string must be freed by the caller.
///
/// # Safety
///
/// All parameters must be valid pointers to their respective types.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use retail_record_core::{create_store, add_record};
///
/// let path = CString::new("data.json").unwrap();
/// let state = create_store(path.as_ptr());
///
/// let collection = CString::new("workers").unwrap();
/// let json = CString::new(
///     r#"{"name":"Ana","lastName":"Rojas","phone":"555","mail":"a@b.c"}"#,
/// ).unwrap();
/// let result = add_record(state, collection.as_ptr(), json.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn add_record(
    state: *mut AppStoreState,
    collection: *const c_char,
    json_ptr: *const c_char,
) -> *const c_char {
    let state = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => {
            let error = AppResponse::BadRequest("Null state pointer".to_string());
            return response_to_c_string(&error);
        }
    };

    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(error_ptr) => return error_ptr,
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(error_ptr) => return error_ptr,
    };

    match state.add_json(collection, &json_str) {
        Ok(stored) => {
            let success = AppResponse::Ok(stored.to_string());
            response_to_c_string(&success)
        }
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Retrieves one collection as a JSON array, insertion order preserved.
///
/// # Parameters
///
/// * `state` - Pointer to the store state instance
/// * `collection` - Null-terminated C string naming the collection
///
/// # Returns
///
/// Returns a JSON-formatted C string; the `Ok` payload is the collection
/// array. The returned string must be freed by the caller.
///
/// # Safety
///
/// Both parameters must be valid pointers.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_records(
    state: *mut AppStoreState,
    collection: *const c_char,
) -> *const c_char {
    let state = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => {
            let error =
                AppResponse::BadRequest("Null state pointer passed to get_records".to_string());
            return response_to_c_string(&error);
        }
    };

    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(error_ptr) => return error_ptr,
    };

    match state.list_json(collection) {
        Ok(records) => {
            let success = AppResponse::Ok(records.to_string());
            response_to_c_string(&success)
        }
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Retrieves the whole document: all three collections.
///
/// This is the read the presentation layer binds against, forwarded through
/// the [`ViewModel`] façade without transformation.
///
/// # Parameters
///
/// * `state` - Pointer to the store state instance
///
/// # Returns
///
/// Returns a JSON-formatted C string; the `Ok` payload is the document
/// object `{"stores": [...], "workers": [...], "products": [...]}`.
///
/// # Safety
///
/// The state parameter must be a valid pointer to an [`AppStoreState`]
/// instance.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_data(state: *mut AppStoreState) -> *const c_char {
    let state = match unsafe { state.as_ref() } {
        Some(s) => s,
        None => {
            let error =
                AppResponse::BadRequest("Null state pointer passed to get_data".to_string());
            return response_to_c_string(&error);
        }
    };

    let view_model = ViewModel::new(state);
    match serde_json::to_string(view_model.get_data()) {
        Ok(json) => {
            let success = AppResponse::Ok(json);
            response_to_c_string(&success)
        }
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Error serializing document: {e}"));
            response_to_c_string(&error)
        }
    }
}

/// Overwrites the editable fields of the record addressed by `uuid`.
///
/// The identifier itself never changes; a `uuid` key inside the payload is
/// ignored. If no record in the collection matches, the call fails with a
/// `NotFound` response and neither memory nor the backing file is touched.
///
/// # Parameters
///
/// * `state` - Pointer to the store state instance
/// * `collection` - Null-terminated C string naming the collection
/// * `uuid` - Null-terminated C string with the record identifier
/// * `json_ptr` - Null-terminated C string with the new field-set JSON
///
/// # Returns
///
/// Returns a JSON-formatted C string; the `Ok` payload is the record as
/// stored after the edit.
///
/// # Safety
///
/// All parameters must be valid pointers.
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use retail_record_core::{create_store, update_record};
///
/// let path = CString::new("data.json").unwrap();
/// let state = create_store(path.as_ptr());
///
/// let collection = CString::new("products").unwrap();
/// let uuid = CString::new("4ad84282-dd74-4c49-a5d4-2b35e9b9a62f").unwrap();
/// let json = CString::new(
///     r#"{"brand":"AMD","model":"Ryzen 7","category":"Procesador","description":"8 cores","price":150}"#,
/// ).unwrap();
/// let result = update_record(state, collection.as_ptr(), uuid.as_ptr(), json.as_ptr());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn update_record(
    state: *mut AppStoreState,
    collection: *const c_char,
    uuid: *const c_char,
    json_ptr: *const c_char,
) -> *const c_char {
    let state = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => {
            let error =
                AppResponse::BadRequest("Null state pointer passed to update_record".to_string());
            return response_to_c_string(&error);
        }
    };

    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(error_ptr) => return error_ptr,
    };

    let uuid_str = match c_ptr_to_string(uuid, "uuid") {
        Ok(uuid) => uuid,
        Err(error_ptr) => return error_ptr,
    };

    let json_str = match c_ptr_to_string(json_ptr, "JSON") {
        Ok(json) => json,
        Err(error_ptr) => return error_ptr,
    };

    match state.edit_json(collection, &uuid_str, &json_str) {
        Ok(updated) => {
            let success = AppResponse::Ok(updated.to_string());
            response_to_c_string(&success)
        }
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Removes the record addressed by `uuid` from a named collection.
///
/// # Parameters
///
/// * `state` - Pointer to the store state instance
/// * `collection` - Null-terminated C string naming the collection
/// * `uuid` - Null-terminated C string with the record identifier
///
/// # Returns
///
/// Returns a JSON-formatted C string indicating success or failure. Deleting
/// an identifier that is not present fails with a `NotFound` response and
/// leaves the document untouched.
///
/// # Safety
///
/// All parameters must be valid pointers.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn delete_record(
    state: *mut AppStoreState,
    collection: *const c_char,
    uuid: *const c_char,
) -> *const c_char {
    let state = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => {
            let error =
                AppResponse::BadRequest("Null state pointer passed to delete_record".to_string());
            return response_to_c_string(&error);
        }
    };

    let collection = match parse_collection(collection) {
        Ok(c) => c,
        Err(error_ptr) => return error_ptr,
    };

    let uuid_str = match c_ptr_to_string(uuid, "uuid") {
        Ok(uuid) => uuid,
        Err(error_ptr) => return error_ptr,
    };

    match state.delete_json(collection, &uuid_str) {
        Ok(()) => {
            let success = AppResponse::success("Record deleted successfully");
            response_to_c_string(&success)
        }
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Releases the store state created by [`create_store`].
///
/// After this call the pointer must not be used again. The document needs no
/// final flush: every successful mutation already rewrote the backing file
/// before returning.
///
/// # Parameters
///
/// * `state` - Pointer to the store state instance
///
/// # Returns
///
/// Returns a JSON-formatted C string indicating success or failure.
///
/// # Safety
///
/// The state parameter must be a pointer previously returned by
/// [`create_store`] that has not been closed yet.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_store(state: *mut AppStoreState) -> *const c_char {
    if state.is_null() {
        let error = AppResponse::BadRequest("Null state pointer passed to close_store".to_string());
        return response_to_c_string(&error);
    }

    drop(unsafe { Box::from_raw(state) });
    info!("Store state released");

    let success = AppResponse::success("Store closed successfully");
    response_to_c_string(&success)
}

/// Converts an [`AppResponse`] to a C-compatible string.
///
/// Serializes the response to JSON and hands ownership of the resulting
/// null-terminated string to the caller. Returns a null pointer if
/// serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a Rust String with error handling.
///
/// # Returns
///
/// * `Ok(String)` - If conversion was successful
/// * `Err(*const c_char)` - Pointer to an error response if the pointer was
///   null or the bytes were not valid UTF-8
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}

/// Resolves a collection-name pointer to a [`Collection`], failing with a
/// `NoSuchCollection` response before any record lookup happens.
fn parse_collection(ptr: *const c_char) -> Result<Collection, *const c_char> {
    let name = c_ptr_to_string(ptr, "collection")?;
    Collection::from_str(&name).map_err(|e| response_to_c_string(&AppResponse::from(e)))
}
