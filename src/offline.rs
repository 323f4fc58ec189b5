//! Cache-first offline worker.
//!
//! Install pre-caches a fixed asset list; every fetch is answered from the
//! cache when a match exists and from the network otherwise. Entries are never
//! invalidated, a new cache name is the only way to refresh them.

use crate::config::AppConfig;
use crate::error::CacheError;

/// Cache storage plus network access, as seen from the worker.
#[allow(async_fn_in_trait)]
pub trait CacheBackend {
    type Request;
    type Response;

    /// Open `cache_name` and store every asset; any single failure fails the
    /// whole call.
    async fn add_all(&self, cache_name: &str, assets: &[String]) -> Result<(), CacheError>;
    async fn lookup(&self, request: &Self::Request) -> Result<Option<Self::Response>, CacheError>;
    async fn fetch(&self, request: &Self::Request) -> Result<Self::Response, CacheError>;
}

pub struct OfflineCacheWorker<B> {
    backend: B,
    cache_name: String,
    assets: Vec<String>,
}

impl<B: CacheBackend> OfflineCacheWorker<B> {
    pub fn new(backend: B, config: &AppConfig) -> Self {
        Self {
            backend,
            cache_name: config.cache_name.clone(),
            assets: config.cached_assets.clone(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    pub async fn install(&self) -> Result<(), CacheError> {
        log::info!("caching {} assets in {}", self.assets.len(), self.cache_name);
        self.backend.add_all(&self.cache_name, &self.assets).await
    }

    /// Cached response if present, else the network's. A failed lookup is
    /// treated as a miss.
    pub async fn respond(&self, request: &B::Request) -> Result<B::Response, CacheError> {
        match self.backend.lookup(request).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(err) => log::warn!("cache lookup failed, using network: {err}"),
        }
        self.backend.fetch(request).await
    }
}
