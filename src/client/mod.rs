//! Jenkins client and the default service transport it runs on.

pub mod jenkins_client;
pub mod service_client;

pub use jenkins_client::{
    DEFAULT_LONG_TIMEOUT, DEFAULT_TIMEOUT, JenkinsClient, JenkinsClientBuilder,
};
pub use service_client::{ServiceClient, ServiceClientBuilder};
