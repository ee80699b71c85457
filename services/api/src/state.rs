//! Application state shared across handlers

use crate::models::Store;
use crate::repositories::{SelectionRepository, UserRepository};
use crate::uploads::UploadStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub user_repository: UserRepository,
    pub selection_repository: SelectionRepository,
    pub uploads: UploadStore,
}

impl AppState {
    /// Wire up repositories over one store handle
    pub fn new(store: Store, uploads: UploadStore) -> Self {
        Self {
            user_repository: UserRepository::new(store.clone()),
            selection_repository: SelectionRepository::new(store.clone()),
            store,
            uploads,
        }
    }
}
