//! Default HTTP implementation of the service-request collaborator.

use crate::{
    BodySnippetConfig, Error, RequestHookContext, ServiceName,
    transport::{
        DynServiceRequest, Response, ServiceCall, ServiceDirectory, ServiceRequest,
        middleware::{Crumb, Hook},
        ureq_service::{AgentConfig, UreqService},
    },
};
use http::HeaderMap;
use std::{sync::Arc, time::Duration};

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configures and constructs [`ServiceClient`].
pub struct ServiceClientBuilder {
    directory: ServiceDirectory,
    endpoints: Vec<(ServiceName, String)>,
    agent: AgentConfig,
    crumb_ttl: Option<Duration>,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    request_hook: Option<crate::RequestHook>,
}

impl ServiceClientBuilder {
    fn new(directory: ServiceDirectory) -> Self {
        Self {
            directory,
            endpoints: Vec::new(),
            agent: AgentConfig {
                insecure: false,
                user_agent: DEFAULT_USER_AGENT.to_owned(),
                timeout: Duration::from_secs(30),
                connect_timeout: Duration::from_secs(10),
                read_timeout: None,
                no_proxy: false,
            },
            crumb_ttl: None,
            default_headers: HeaderMap::new(),
            body_snippet: BodySnippetConfig::default(),
            request_hook: None,
        }
    }

    /// Pin `service` to `base` instead of the cluster's `service/<name>/` route.
    ///
    /// The URL is validated by [`build`](Self::build).
    pub fn endpoint(mut self, service: impl Into<ServiceName>, base: impl Into<String>) -> Self {
        self.endpoints.push((service.into(), base.into()));
        self
    }

    pub fn no_system_proxy(mut self) -> Self {
        self.agent.no_proxy = true;
        self
    }

    pub fn danger_accept_invalid_certs(mut self, yes: bool) -> Self {
        self.agent.insecure = yes;
        self
    }

    /// Override the default `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.agent.user_agent = ua.into();
        self
    }

    /// Agent-wide ceiling; each call still carries its own timeout.
    pub fn timeout(mut self, value: Duration) -> Self {
        self.agent.timeout = value;
        self
    }

    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.agent.connect_timeout = value;
        self
    }

    /// Cap body reads below the per-call timeout. Unset by default, so calls
    /// made with a long timeout can stream their whole body.
    pub fn read_timeout(mut self, value: Duration) -> Self {
        self.agent.read_timeout = Some(value);
        self
    }

    pub fn default_header(
        mut self,
        name: http::header::HeaderName,
        value: http::HeaderValue,
    ) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers.extend(headers);
        self
    }

    pub fn capture_body_snippet(mut self, enabled: bool) -> Self {
        self.body_snippet.enabled = enabled;
        self
    }

    pub fn max_body_snippet_bytes(mut self, max_bytes: usize) -> Self {
        self.body_snippet.max_bytes = max_bytes;
        self
    }

    /// Fetch a CSRF crumb per service and attach it to non-GET calls.
    pub fn with_crumb(mut self, ttl: Duration) -> Self {
        self.crumb_ttl = Some(ttl);
        self
    }

    /// Add a hook invoked for every call, including crumb fetches.
    pub fn request_hook<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(RequestHookContext<'a>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.request_hook = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<ServiceClient, Error> {
        let mut directory = self.directory;
        for (service, base) in self.endpoints {
            directory.insert(service, base)?;
        }

        let mut transport: DynServiceRequest = Arc::new(UreqService::try_new(
            &self.agent,
            directory,
            self.default_headers,
            self.body_snippet,
        )?);

        if let Some(hook) = self.request_hook {
            transport = Arc::new(Hook::new(transport, hook));
        }

        if let Some(ttl) = self.crumb_ttl {
            transport = Arc::new(Crumb::new(transport, ttl, self.body_snippet));
        }

        Ok(ServiceClient { inner: transport })
    }
}

/// HTTP service-request client: name resolution, optional hook and crumb
/// layers, and status-to-error mapping.
#[derive(Clone)]
pub struct ServiceClient {
    inner: DynServiceRequest,
}

impl ServiceClient {
    /// Builder routing services through `<cluster_url>/service/<name>/`.
    pub fn builder(cluster_url: impl AsRef<str>) -> Result<ServiceClientBuilder, Error> {
        Ok(ServiceClientBuilder::new(ServiceDirectory::cluster(
            cluster_url,
        )?))
    }

    /// Builder resolving services only through `directory`.
    #[must_use]
    pub fn with_directory(directory: ServiceDirectory) -> ServiceClientBuilder {
        ServiceClientBuilder::new(directory)
    }

    pub fn new(cluster_url: impl AsRef<str>) -> Result<Self, Error> {
        Self::builder(cluster_url)?.build()
    }
}

impl ServiceRequest for ServiceClient {
    fn request(&self, call: ServiceCall) -> Result<Response, Error> {
        self.inner.request(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_reads_are_bounded_by_the_call_timeout_by_default() {
        let builder = ServiceClient::builder("https://cluster.example.com").unwrap();
        assert_eq!(builder.agent.read_timeout, None);

        let builder = builder.read_timeout(Duration::from_secs(5));
        assert_eq!(builder.agent.read_timeout, Some(Duration::from_secs(5)));
        assert!(builder.build().is_ok());
    }
}
