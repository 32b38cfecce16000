//! Last-selection cache for the estimate form.
//!
//! Only the four form values are kept (plan, model, qty, duration), never the
//! computed breakdown. Storage problems are logged and otherwise ignored: a
//! failed save never fails an estimate, and an unreadable entry just means
//! there is nothing to prefill.

use log::{debug, warn};
use shared::{RawSelection, Selection};
use std::sync::Arc;

use crate::backend::domain::estimator_service::normalize_selection;
use crate::backend::storage::KeyValueStore;

/// Storage key for the last submitted selection
pub const LAST_SELECTION_KEY: &str = "mmr_estimator";

pub struct SelectionService<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> Clone for SelectionService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore + ?Sized> SelectionService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persist the selection, replacing the previous one. Returns whether it was saved.
    pub fn save_last_selection(&self, selection: &Selection) -> bool {
        let payload = match serde_json::to_string(selection) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Could not serialize selection: {}", e);
                return false;
            }
        };

        match self.store.set(LAST_SELECTION_KEY, &payload) {
            Ok(()) => {
                debug!("Saved last selection: {}", payload);
                true
            }
            Err(e) => {
                warn!("Could not save last selection: {:#}", e);
                false
            }
        }
    }

    /// The last saved selection, if one can be read.
    ///
    /// Entries from older formats are accepted as long as they are a JSON
    /// object: missing fields take the form defaults and counts stored as
    /// strings are normalized like fresh input.
    pub fn load_last_selection(&self) -> Option<Selection> {
        let payload = match self.store.get(LAST_SELECTION_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!("No saved selection");
                return None;
            }
            Err(e) => {
                warn!("Could not read saved selection: {:#}", e);
                return None;
            }
        };

        match serde_json::from_str::<RawSelection>(&payload) {
            Ok(raw) => Some(normalize_selection(&raw)),
            Err(e) => {
                warn!("Ignoring unreadable saved selection: {}", e);
                None
            }
        }
    }
}
