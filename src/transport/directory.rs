//! Service name to base URL resolution.

use crate::{
    Error, ServiceName,
    util::url::{endpoint_url, normalize_base_url},
};
use std::collections::HashMap;
use url::Url;

/// Resolves service names to base URLs.
///
/// Explicit endpoints win; otherwise the service is reached through the
/// cluster's `service/<name>/` proxy prefix.
#[derive(Clone, Debug, Default)]
pub struct ServiceDirectory {
    cluster_url: Option<Url>,
    endpoints: HashMap<ServiceName, Url>,
}

impl ServiceDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route every service without an explicit endpoint via `<cluster>/service/<name>/`.
    pub fn cluster(base: impl AsRef<str>) -> Result<Self, Error> {
        Ok(Self {
            cluster_url: Some(normalize_base_url(base.as_ref())?),
            endpoints: HashMap::new(),
        })
    }

    /// Pin `service` to a fixed base URL.
    pub fn insert(
        &mut self,
        service: impl Into<ServiceName>,
        base: impl AsRef<str>,
    ) -> Result<(), Error> {
        let url = normalize_base_url(base.as_ref())?;
        self.endpoints.insert(service.into(), url);
        Ok(())
    }

    pub fn base_url(&self, service: &ServiceName) -> Result<Url, Error> {
        if let Some(url) = self.endpoints.get(service) {
            return Ok(url.clone());
        }

        let Some(cluster) = &self.cluster_url else {
            return Err(Error::InvalidConfig {
                message: format!("no endpoint configured for service `{service}`")
                    .into_boxed_str(),
                source: None,
            });
        };

        if service.url_segments().next().is_none() {
            return Err(Error::InvalidConfig {
                message: "service name must not be empty".into(),
                source: None,
            });
        }

        let mut url = endpoint_url(
            cluster,
            std::iter::once("service").chain(service.url_segments()),
        )?;
        // Trailing slash so relative paths join below the service prefix.
        url.path_segments_mut()
            .map_err(|_| Error::InvalidConfig {
                message: "cluster URL must be a hierarchical URL".into(),
                source: None,
            })?
            .push("");
        Ok(url)
    }

    /// Full request URL for `path` (which may carry a query string).
    pub fn resolve(&self, service: &ServiceName, path: &str) -> Result<Url, Error> {
        let base = self.base_url(service)?;
        base.join(path.trim_start_matches('/'))
            .map_err(|err| Error::InvalidConfig {
                message: format!("invalid request path `{path}`").into_boxed_str(),
                source: Some(Box::new(err)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_routes_through_service_prefix() {
        let dir = ServiceDirectory::cluster("https://cluster.example.com").unwrap();
        let url = dir
            .resolve(&ServiceName::new("jenkins"), "job/demo/api/json")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cluster.example.com/service/jenkins/job/demo/api/json"
        );
    }

    #[test]
    fn nested_service_names_become_nested_segments() {
        let dir = ServiceDirectory::cluster("https://cluster.example.com/").unwrap();
        let url = dir
            .resolve(&ServiceName::new("/test/jenkins"), "api/json")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cluster.example.com/service/test/jenkins/api/json"
        );
    }

    #[test]
    fn query_is_kept_verbatim() {
        let dir = ServiceDirectory::cluster("https://cluster.example.com").unwrap();
        let url = dir
            .resolve(
                &ServiceName::new("jenkins"),
                "createItem?name=B&mode=copy&from=A",
            )
            .unwrap();
        assert_eq!(url.path(), "/service/jenkins/createItem");
        assert_eq!(url.query(), Some("name=B&mode=copy&from=A"));
    }

    #[test]
    fn spaces_are_percent_encoded_and_escapes_kept() {
        let dir = ServiceDirectory::cluster("https://cluster.example.com").unwrap();
        let jenkins = ServiceName::new("jenkins");

        let url = dir.resolve(&jenkins, "job/my job/api/json").unwrap();
        assert_eq!(url.path(), "/service/jenkins/job/my%20job/api/json");

        let url = dir.resolve(&jenkins, "job/my%20job/api/json").unwrap();
        assert_eq!(url.path(), "/service/jenkins/job/my%20job/api/json");

        let url = dir
            .resolve(&jenkins, "createItem?name=my job&mode=copy&from=src")
            .unwrap();
        assert_eq!(url.query(), Some("name=my%20job&mode=copy&from=src"));
    }

    #[test]
    fn explicit_endpoint_wins_over_cluster() {
        let mut dir = ServiceDirectory::cluster("https://cluster.example.com").unwrap();
        dir.insert("jenkins", "http://127.0.0.1:8080/jenkins").unwrap();
        let url = dir
            .resolve(&ServiceName::new("jenkins"), "job/a/enable")
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/jenkins/job/a/enable");
    }

    #[test]
    fn unknown_service_without_cluster_is_a_config_error() {
        let dir = ServiceDirectory::new();
        let err = dir
            .resolve(&ServiceName::new("jenkins"), "api/json")
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidConfig);
    }
}
