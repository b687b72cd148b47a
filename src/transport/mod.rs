//! Service-request transports.
//!
//! [`ServiceRequest`] is the seam between [`crate::JenkinsClient`] and the
//! network: one call in, one response (or error) out. [`UreqService`] is the
//! default implementation; the middleware layers wrap any `ServiceRequest`.

pub mod directory;
#[cfg(feature = "metrics")]
pub(crate) mod metrics;
pub mod middleware;
pub mod request;
pub mod ureq_service;

use crate::Error;
use std::sync::Arc;

pub use directory::ServiceDirectory;
pub use request::{Response, ServiceCall};
pub use ureq_service::UreqService;

/// Performs a single HTTP call against a named service.
///
/// Implementations must turn non-2xx statuses and network failures into
/// errors; callers never inspect the status of an `Ok` response to decide
/// success.
pub trait ServiceRequest: Send + Sync + 'static {
    fn request(&self, call: ServiceCall) -> Result<Response, Error>;
}

pub type DynServiceRequest = Arc<dyn ServiceRequest>;

impl<T: ServiceRequest + ?Sized> ServiceRequest for Arc<T> {
    fn request(&self, call: ServiceCall) -> Result<Response, Error> {
        (**self).request(call)
    }
}
