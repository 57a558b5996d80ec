//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::judge::dispatcher::Dispatcher;
use crate::store::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Persistence for users, problems, submissions and results
    store: Arc<dyn Store>,

    /// Entry point into the evaluation pipeline
    dispatcher: Dispatcher,
}

impl AppState {
    /// Create a new application state
    pub fn new(store: Arc<dyn Store>, dispatcher: Dispatcher) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, dispatcher }),
        }
    }

    /// Get a reference to the store
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.inner.store
    }

    /// Get a reference to the dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }
}
