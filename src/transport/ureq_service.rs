//! Default [`ServiceRequest`] built on `ureq`.

use super::{Response, ServiceCall, ServiceDirectory, ServiceRequest};
use crate::{
    BodySnippetConfig, Error, HttpError, TransportErrorKind,
    util::{diagnostics, url::sanitize_url_for_error},
};
use http::{HeaderMap, Method};
use std::time::Duration;
use ureq::Agent;
use url::Url;

#[cfg(feature = "tracing")]
use tracing::field;

/// Agent-level settings for [`UreqService`].
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub insecure: bool,
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Cap on reading a response body. `None` leaves the body bounded only by
    /// the call's own timeout.
    pub read_timeout: Option<Duration>,
    pub no_proxy: bool,
}

/// Sends calls with a shared `ureq` agent, resolving service names through a
/// [`ServiceDirectory`].
#[derive(Clone)]
pub struct UreqService {
    agent: Agent,
    directory: ServiceDirectory,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
}

impl UreqService {
    pub fn try_new(
        config: &AgentConfig,
        directory: ServiceDirectory,
        default_headers: HeaderMap,
        body_snippet: BodySnippetConfig,
    ) -> Result<Self, Error> {
        let mut builder = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .timeout_connect(Some(config.connect_timeout))
            .timeout_recv_body(config.read_timeout)
            .user_agent(config.user_agent.as_str());

        if config.no_proxy {
            builder = builder.proxy(None);
        }

        if config.insecure {
            builder = builder.tls_config(
                ureq::tls::TlsConfig::builder()
                    .disable_verification(true)
                    .build(),
            );
        }

        Ok(Self {
            agent: Agent::new_with_config(builder.build()),
            directory,
            default_headers,
            body_snippet,
        })
    }

    #[must_use]
    pub fn directory(&self) -> &ServiceDirectory {
        &self.directory
    }

    fn send(&self, call: &ServiceCall, url: &Url, headers: HeaderMap) -> Result<Response, Error> {
        let path = url.path().to_string().into_boxed_str();
        let service: Box<str> = call.service.as_str().into();

        let map_err = |err: ureq::Error| {
            let kind = match &err {
                ureq::Error::Timeout(_) => TransportErrorKind::Timeout,
                ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
                    TransportErrorKind::Connect
                }
                ureq::Error::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => {
                    TransportErrorKind::Timeout
                }
                ureq::Error::Io(io)
                    if matches!(
                        io.kind(),
                        std::io::ErrorKind::ConnectionRefused
                            | std::io::ErrorKind::ConnectionReset
                            | std::io::ErrorKind::ConnectionAborted
                            | std::io::ErrorKind::NotConnected
                    ) =>
                {
                    TransportErrorKind::Connect
                }
                _ => TransportErrorKind::Other,
            };

            Error::Transport {
                method: call.method.clone(),
                service: service.clone(),
                path: path.clone(),
                kind,
                source: Box::new(err),
            }
        };

        let mut response = match call.method {
            Method::GET => {
                let mut req = self.agent.get(url.as_str());
                for (name, value) in headers.iter() {
                    req = req.header(name, value);
                }
                req.config()
                    .timeout_global(Some(call.timeout))
                    .build()
                    .call()
                    .map_err(map_err)?
            }
            Method::POST => {
                let mut req = self.agent.post(url.as_str());
                for (name, value) in headers.iter() {
                    req = req.header(name, value);
                }
                req.config()
                    .timeout_global(Some(call.timeout))
                    .build()
                    .send_empty()
                    .map_err(map_err)?
            }
            ref other => {
                return Err(Error::InvalidConfig {
                    message: format!("unsupported HTTP method for service requests: {other}")
                        .into_boxed_str(),
                    source: None,
                });
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(map_err)?;

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

impl ServiceRequest for UreqService {
    fn request(&self, call: ServiceCall) -> Result<Response, Error> {
        #[cfg(feature = "metrics")]
        let _inflight = super::metrics::InFlightGuard::new();

        let url = self.directory.resolve(&call.service, &call.path)?;

        let mut headers = self.default_headers.clone();
        headers.extend(call.headers.clone());

        #[cfg(any(feature = "tracing", feature = "metrics"))]
        let start = std::time::Instant::now();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "jenkins.service_request",
            http.method = %call.method,
            service = %call.service,
            http.path = %url.path(),
            http.status = field::Empty,
            request_id = field::Empty,
            latency_ms = field::Empty,
            error_kind = field::Empty,
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let resp = match self.send(&call, &url, headers) {
            Ok(resp) => resp,
            Err(err) => {
                #[cfg(feature = "metrics")]
                super::metrics::record_outcome(
                    &call.method,
                    None,
                    start.elapsed(),
                    Some(err.kind()),
                );
                #[cfg(feature = "tracing")]
                {
                    span.record("error_kind", field::debug(err.kind()));
                    span.record("latency_ms", start.elapsed().as_millis() as i64);
                }
                return Err(err);
            }
        };

        let request_id = diagnostics::request_id(&resp.headers);

        #[cfg(feature = "tracing")]
        {
            span.record("http.status", resp.status.as_u16() as i64);
            span.record("latency_ms", start.elapsed().as_millis() as i64);
            if let Some(rid) = request_id.as_deref() {
                span.record("request_id", field::display(rid));
            }
        }

        if resp.status.is_client_error() || resp.status.is_server_error() {
            let err = Error::from_http(HttpError {
                status: resp.status,
                method: call.method.clone(),
                service: call.service.as_str().into(),
                url: Box::new(sanitize_url_for_error(&url)),
                message: diagnostics::extract_message(&resp.body),
                request_id,
                body_snippet: diagnostics::body_snippet(&resp.body, self.body_snippet),
            });

            #[cfg(feature = "metrics")]
            super::metrics::record_outcome(
                &call.method,
                Some(resp.status),
                start.elapsed(),
                Some(err.kind()),
            );
            #[cfg(feature = "tracing")]
            {
                span.record("error_kind", field::debug(err.kind()));
                tracing::debug!(status = resp.status.as_u16(), "service request failed");
            }

            return Err(err);
        }

        #[cfg(feature = "metrics")]
        super::metrics::record_outcome(&call.method, Some(resp.status), start.elapsed(), None);

        Ok(resp)
    }
}
