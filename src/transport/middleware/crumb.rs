//! CSRF crumb middleware.

use crate::{
    BodySnippetConfig, Error, ServiceName,
    transport::{Response, ServiceCall, ServiceRequest},
    util::diagnostics,
};
use http::{HeaderName, HeaderValue, Method};
use serde::Deserialize;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

const CRUMB_PATH: &str = "crumbIssuer/api/json";

/// JSON payload of `GET /crumbIssuer/api/json`.
#[derive(Deserialize)]
struct CrumbResp {
    #[serde(rename = "crumbRequestField")]
    field: String,
    crumb: String,
}

struct CachedCrumb {
    name: HeaderName,
    value: HeaderValue,
    ts: Instant,
}

/// Attaches a crumb header to every non-GET call, fetched once per service
/// and refreshed after `ttl`. The fetch shares the triggering call's timeout.
#[derive(Clone)]
pub struct Crumb<T> {
    inner: T,
    ttl: Duration,
    body_snippet: BodySnippetConfig,
    cache: Arc<Mutex<HashMap<ServiceName, CachedCrumb>>>,
}

impl<T: ServiceRequest> Crumb<T> {
    pub fn new(inner: T, ttl: Duration, body_snippet: BodySnippetConfig) -> Self {
        Self {
            inner,
            ttl,
            body_snippet,
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn fetch_crumb(&self, service: &ServiceName, timeout: Duration) -> Result<CachedCrumb, Error> {
        let resp = self
            .inner
            .request(ServiceCall::get(service.clone(), CRUMB_PATH, timeout))?;

        let json: CrumbResp = resp.json().map_err(|err| Error::Decode {
            status: resp.status,
            method: Method::GET,
            service: service.as_str().into(),
            path: CRUMB_PATH.into(),
            request_id: diagnostics::request_id(&resp.headers),
            body_snippet: diagnostics::body_snippet(&resp.body, self.body_snippet),
            source: Box::new(err),
        })?;

        let name = HeaderName::from_bytes(json.field.as_bytes()).map_err(|err| {
            Error::InvalidConfig {
                message: "invalid crumb header name".into(),
                source: Some(Box::new(err)),
            }
        })?;
        let value = HeaderValue::from_str(&json.crumb).map_err(|err| Error::InvalidConfig {
            message: "invalid crumb header value".into(),
            source: Some(Box::new(err)),
        })?;

        Ok(CachedCrumb {
            name,
            value,
            ts: Instant::now(),
        })
    }
}

impl<T: ServiceRequest> ServiceRequest for Crumb<T> {
    fn request(&self, mut call: ServiceCall) -> Result<Response, Error> {
        if call.method != Method::GET {
            let mut guard = match self.cache.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let expired = guard
                .get(&call.service)
                .map(|c| c.ts.elapsed() > self.ttl)
                .unwrap_or(true);

            if expired {
                let fresh = self.fetch_crumb(&call.service, call.timeout)?;
                guard.insert(call.service.clone(), fresh);
            }
            if let Some(c) = guard.get(&call.service) {
                call.headers.insert(c.name.clone(), c.value.clone());
            }
        }

        self.inner.request(call)
    }
}
