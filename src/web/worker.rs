use std::rc::Rc;

use js_sys::{Array, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise};
use web_sys::{Cache, ExtendableEvent, FetchEvent, Request, Response, ServiceWorkerGlobalScope};

use super::listen;
use crate::config;
use crate::error::{CacheError, UiError};
use crate::offline::{CacheBackend, OfflineCacheWorker};

/// Cache Storage and `fetch` of the service worker global scope.
pub struct BrowserCache {
    scope: ServiceWorkerGlobalScope,
}

fn storage_error(err: JsValue) -> CacheError {
    CacheError::Storage(format!("{err:?}"))
}

async fn settle(promise: Promise) -> Result<JsValue, JsValue> {
    JsFuture::from(promise).await
}

impl CacheBackend for BrowserCache {
    type Request = Request;
    type Response = Response;

    async fn add_all(&self, cache_name: &str, assets: &[String]) -> Result<(), CacheError> {
        let caches = self.scope.caches().map_err(storage_error)?;
        let cache: Cache = settle(caches.open(cache_name))
            .await
            .map_err(storage_error)?
            .unchecked_into();
        let urls: Array = assets.iter().map(|a| JsValue::from_str(a)).collect();
        settle(cache.add_all_with_str_sequence(&urls))
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn lookup(&self, request: &Request) -> Result<Option<Response>, CacheError> {
        let caches = self.scope.caches().map_err(storage_error)?;
        let found = settle(caches.match_with_request(request))
            .await
            .map_err(storage_error)?;
        Ok(found.dyn_into::<Response>().ok())
    }

    async fn fetch(&self, request: &Request) -> Result<Response, CacheError> {
        settle(self.scope.fetch_with_request(request))
            .await
            .map_err(|e| CacheError::Network(format!("{e:?}")))?
            .dyn_into::<Response>()
            .map_err(|e| CacheError::Network(format!("not a response: {e:?}")))
    }
}

/// Register install and fetch handlers on the service worker scope.
#[wasm_bindgen]
pub fn start_service_worker() -> Result<(), JsValue> {
    let scope: ServiceWorkerGlobalScope = js_sys::global()
        .dyn_into()
        .map_err(|_| UiError::Js("not running in a service worker".into()))?;
    let worker = Rc::new(OfflineCacheWorker::new(
        BrowserCache { scope: scope.clone() },
        &config::current(),
    ));

    let w = worker.clone();
    listen(&scope, "install", move |event| {
        let Some(event) = event.dyn_ref::<ExtendableEvent>() else {
            return;
        };
        let w = w.clone();
        let install = future_to_promise(async move {
            w.install().await?;
            Ok(JsValue::UNDEFINED)
        });
        if let Err(err) = event.wait_until(&install) {
            log::error!("install wait_until failed: {err:?}");
        }
    })?;

    let w = worker;
    listen(&scope, "fetch", move |event| {
        let Some(event) = event.dyn_ref::<FetchEvent>() else {
            return;
        };
        let request = event.request();
        let w = w.clone();
        let response = future_to_promise(async move {
            let response = w.respond(&request).await?;
            Ok(response.into())
        });
        if let Err(err) = event.respond_with(&response) {
            log::error!("respond_with failed: {err:?}");
        }
    })?;
    Ok(())
}
