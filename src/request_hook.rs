use crate::{Error, ServiceName};
use http::{HeaderMap, Method};
use std::sync::Arc;

/// Request hook context passed to `ServiceClientBuilder::request_hook`.
///
/// The hook can inspect the call and mutate headers before it is sent.
pub struct RequestHookContext<'a> {
    pub method: &'a Method,
    pub service: &'a ServiceName,
    /// Path relative to the service base URL, including any query string.
    pub path: &'a str,
    pub headers: &'a mut HeaderMap,
}

pub type RequestHook =
    Arc<dyn for<'a> Fn(RequestHookContext<'a>) -> Result<(), Error> + Send + Sync + 'static>;
