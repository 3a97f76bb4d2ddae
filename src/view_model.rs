//! Pass-through view-model between the store and a presentation layer.

use crate::record_model::Document;
use crate::store_state::AppStoreState;

/// Read façade the presentation layer binds against.
///
/// Holds a borrow of the store and forwards its document without
/// transformation; the front-end owns all rendering and input validation.
pub struct ViewModel<'a> {
    state: &'a AppStoreState,
}

impl<'a> ViewModel<'a> {
    pub fn new(state: &'a AppStoreState) -> Self {
        ViewModel { state }
    }

    /// The store's current document, as the presentation layer should render
    /// it.
    pub fn get_data(&self) -> &Document {
        self.state.document()
    }
}
