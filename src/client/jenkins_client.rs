//! Jenkins job and build operations over a named service.

use crate::{
    BodySnippetConfig, BuildRef, BuildSelector, Error, Job, JobName, JobSummary, ServiceName,
    api::jobs::{self as paths, Buildable},
    transport::{DynServiceRequest, Response, ServiceCall, ServiceRequest},
    types::RootDocument,
    util::diagnostics,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{sync::Arc, time::Duration};

/// Timeout applied to every operation unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Long-poll timeout carried in the configuration for callers that wait on
/// builds; no operation of this client uses it.
pub const DEFAULT_LONG_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Configures and constructs [`JenkinsClient`].
pub struct JenkinsClientBuilder {
    services: DynServiceRequest,
    service: ServiceName,
    timeout: Duration,
    long_timeout: Duration,
    body_snippet: BodySnippetConfig,
}

impl JenkinsClientBuilder {
    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }

    pub fn long_timeout(mut self, value: Duration) -> Self {
        self.long_timeout = value;
        self
    }

    /// Body snippet settings used when a response cannot be decoded.
    pub fn body_snippet(mut self, config: BodySnippetConfig) -> Self {
        self.body_snippet = config;
        self
    }

    #[must_use]
    pub fn build(self) -> JenkinsClient {
        JenkinsClient {
            services: self.services,
            service: self.service,
            timeout: self.timeout,
            long_timeout: self.long_timeout,
            body_snippet: self.body_snippet,
        }
    }
}

/// Thin client for the Jenkins JSON API of one service.
///
/// Every operation issues its request(s) through the [`ServiceRequest`]
/// collaborator and hands back parsed JSON; failures from the collaborator
/// are returned untouched.
#[derive(Clone)]
pub struct JenkinsClient {
    services: DynServiceRequest,
    service: ServiceName,
    timeout: Duration,
    long_timeout: Duration,
    body_snippet: BodySnippetConfig,
}

impl JenkinsClient {
    pub fn builder<S: ServiceRequest>(
        services: S,
        service: impl Into<ServiceName>,
    ) -> JenkinsClientBuilder {
        JenkinsClientBuilder {
            services: Arc::new(services),
            service: service.into(),
            timeout: DEFAULT_TIMEOUT,
            long_timeout: DEFAULT_LONG_TIMEOUT,
            body_snippet: BodySnippetConfig::default(),
        }
    }

    pub fn new<S: ServiceRequest>(services: S, service: impl Into<ServiceName>) -> Self {
        Self::builder(services, service).build()
    }

    #[must_use]
    pub fn service(&self) -> &ServiceName {
        &self.service
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn long_timeout(&self) -> Duration {
        self.long_timeout
    }

    /// Same service and transport, different per-call timeout.
    ///
    /// With [`ServiceClient`](crate::ServiceClient) the timeout bounds the
    /// whole call, crumb fetch and body read included, unless the builder set
    /// a shorter `read_timeout`.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            ..self.clone()
        }
    }

    /// `POST /createItem?name=<dst>&mode=copy&from=<src>`, then disable and
    /// re-enable `dst`.
    ///
    /// Jenkins leaves a freshly copied job non-buildable until it has been
    /// toggled once.
    pub fn copy_job(&self, src: impl Into<JobName>, dst: impl Into<JobName>) -> Result<(), Error> {
        let src = src.into();
        let dst = dst.into();
        let path = paths::copy_item(&src, &dst)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(service = %self.service, %src, %dst, "copying job");

        self.post(path)?;
        self.disable_job(&dst)?;
        self.enable_job(&dst)?;
        Ok(())
    }

    /// `POST /job/<name>/enable`
    pub fn enable_job(&self, job: impl Into<JobName>) -> Result<Response, Error> {
        self.post(paths::set_buildable(&job.into(), Buildable::Enable)?)
    }

    /// `POST /job/<name>/disable`
    pub fn disable_job(&self, job: impl Into<JobName>) -> Result<Response, Error> {
        self.post(paths::set_buildable(&job.into(), Buildable::Disable)?)
    }

    /// `GET /api/json`, returning its `jobs` list.
    pub fn get_jobs(&self) -> Result<Vec<JobSummary>, Error> {
        let root: RootDocument = self.get_json(paths::root_json())?;
        Ok(root.jobs)
    }

    /// `GET /job/<name>/api/json`
    pub fn get_job(&self, job: impl Into<JobName>) -> Result<Job, Error> {
        self.get_json(paths::job_json(&job.into())?)
    }

    /// The job's `builds` list, newest first.
    pub fn get_builds(&self, job: impl Into<JobName>) -> Result<Vec<BuildRef>, Error> {
        Ok(self.get_job(job)?.builds)
    }

    /// `GET /job/<name>/<number>/api/json`
    pub fn get_build(&self, job: impl Into<JobName>, number: u64) -> Result<Value, Error> {
        self.get_json(paths::build_json(&job.into(), number)?)
    }

    /// The job's first build, or `None` if it has never run.
    pub fn get_first_build(&self, job: impl Into<JobName>) -> Result<Option<Value>, Error> {
        self.named_build(job.into(), BuildSelector::First)
    }

    /// The job's most recent build, or `None` if it has never run.
    pub fn get_last_build(&self, job: impl Into<JobName>) -> Result<Option<Value>, Error> {
        self.named_build(job.into(), BuildSelector::Last)
    }

    fn named_build(&self, job: JobName, selector: BuildSelector) -> Result<Option<Value>, Error> {
        let Some(number) = self.get_job(&job)?.build_ref(selector).map(|b| b.number) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(service = %self.service, %job, field = selector.field(), "no build");
            return Ok(None);
        };

        self.get_build(job, number).map(Some)
    }

    fn post(&self, path: String) -> Result<Response, Error> {
        self.services
            .request(ServiceCall::post(&self.service, path, self.timeout))
    }

    fn get_json<T: DeserializeOwned>(&self, path: String) -> Result<T, Error> {
        let call = ServiceCall::get(&self.service, path, self.timeout);
        let method = call.method.clone();
        let path: Box<str> = call.path.as_str().into();

        let resp = self.services.request(call)?;
        resp.json().map_err(|source| Error::Decode {
            status: resp.status,
            method,
            service: self.service.as_str().into(),
            path,
            request_id: diagnostics::request_id(&resp.headers),
            body_snippet: diagnostics::body_snippet(&resp.body, self.body_snippet),
            source: Box::new(source),
        })
    }
}
