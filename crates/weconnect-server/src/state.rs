//! Application state shared across all handlers.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::RwLock;

use weconnect_core::{StartingAdapter, VehicleAdapter};

/// Shared state: the adapter slot and the optional API key.
///
/// The adapter lives behind an `RwLock` so the bootstrap task can swap
/// the starting stub for the real adapter without touching call sites.
#[derive(Clone)]
pub struct AppState {
    adapter: Arc<RwLock<Arc<dyn VehicleAdapter>>>,
    api_key: Option<Arc<SecretString>>,
}

impl AppState {
    pub fn new(adapter: Arc<dyn VehicleAdapter>, api_key: Option<SecretString>) -> Self {
        Self {
            adapter: Arc::new(RwLock::new(adapter)),
            api_key: api_key.map(Arc::new),
        }
    }

    /// State that starts with the bootstrap stub.
    pub fn starting(api_key: Option<SecretString>) -> Self {
        Self::new(Arc::new(StartingAdapter), api_key)
    }

    /// Current adapter; handlers clone the `Arc` and drop the lock
    /// before awaiting anything slow.
    pub async fn adapter(&self) -> Arc<dyn VehicleAdapter> {
        Arc::clone(&*self.adapter.read().await)
    }

    /// Replace the adapter. Requests already holding the old one finish
    /// against it.
    pub async fn swap_adapter(&self, adapter: Arc<dyn VehicleAdapter>) {
        *self.adapter.write().await = adapter;
    }

    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_deref()
    }
}
