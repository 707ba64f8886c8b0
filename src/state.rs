use std::sync::Arc;

use crate::auth::IdentityResolver;
use crate::guard::MutationGuard;
use crate::store::FileStore;

/// Capabilities injected into every handler. The store and resolver are
/// constructed once at startup (or swapped for fakes in tests) and shared
/// across requests; nothing else is shared in-process.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FileStore>,
    pub resolver: Arc<dyn IdentityResolver>,
    pub guard: MutationGuard,
}

impl AppState {
    pub fn new(store: Arc<dyn FileStore>, resolver: Arc<dyn IdentityResolver>) -> Self {
        let guard = MutationGuard::new(store.clone());
        Self {
            store,
            resolver,
            guard,
        }
    }
}
