use crate::ServiceName;
use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::{borrow::Cow, time::Duration};

/// One request against a named service.
#[derive(Clone, Debug)]
pub struct ServiceCall {
    pub method: Method,
    pub service: ServiceName,
    /// Path (and optional query) relative to the service's base URL.
    pub path: String,
    pub headers: HeaderMap,
    pub timeout: Duration,
}

impl ServiceCall {
    #[must_use]
    pub fn new(
        method: Method,
        service: impl Into<ServiceName>,
        path: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            method,
            service: service.into(),
            path: path.into(),
            headers: HeaderMap::new(),
            timeout,
        }
    }

    #[must_use]
    pub fn get(service: impl Into<ServiceName>, path: impl Into<String>, timeout: Duration) -> Self {
        Self::new(Method::GET, service, path, timeout)
    }

    #[must_use]
    pub fn post(
        service: impl Into<ServiceName>,
        path: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self::new(Method::POST, service, path, timeout)
    }
}

#[derive(Clone, Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    #[must_use]
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
