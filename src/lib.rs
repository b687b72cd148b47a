//! Blocking Jenkins client for integration tests.
//!
//! [`JenkinsClient`] maps job/build operations onto single HTTP calls made
//! through a [`ServiceRequest`] collaborator. [`ServiceClient`] is the default
//! collaborator: it resolves a service name to a base URL and sends the call
//! with `ureq`.
//!
//! ```no_run
//! use jenkins_service_client::{JenkinsClient, ServiceClient};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), jenkins_service_client::Error> {
//! let services = ServiceClient::builder("https://cluster.example.com")?
//!     .with_crumb(Duration::from_secs(300))
//!     .build()?;
//! let jenkins = JenkinsClient::new(services, "jenkins");
//!
//! jenkins.copy_job("template", "nightly")?;
//! if let Some(build) = jenkins.get_last_build("nightly")? {
//!     println!("last build: {}", build["number"]);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
pub mod client;
pub mod error;
pub mod request_hook;
pub mod transport;
pub mod types;
mod util;

pub use client::{
    DEFAULT_LONG_TIMEOUT, DEFAULT_TIMEOUT, JenkinsClient, JenkinsClientBuilder, ServiceClient,
    ServiceClientBuilder,
};
pub use error::{BodySnippetConfig, Error, ErrorKind, HttpError, Result, TransportErrorKind};
pub use request_hook::{RequestHook, RequestHookContext};
pub use transport::{DynServiceRequest, Response, ServiceCall, ServiceDirectory, ServiceRequest};
pub use types::*;
