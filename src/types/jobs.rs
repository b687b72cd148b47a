use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reference to a build as listed inside a job document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct BuildRef {
    pub number: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Job document from `GET /job/<name>/api/json`.
///
/// Only the build references are typed; every other field the server sends
/// is kept as-is in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Job {
    /// Newest first.
    #[serde(default)]
    pub builds: Vec<BuildRef>,
    #[serde(default)]
    pub first_build: Option<BuildRef>,
    #[serde(default)]
    pub last_build: Option<BuildRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    #[must_use]
    pub fn build_ref(&self, selector: BuildSelector) -> Option<&BuildRef> {
        match selector {
            BuildSelector::First => self.first_build.as_ref(),
            BuildSelector::Last => self.last_build.as_ref(),
        }
    }
}

/// A job entry in the root `GET /api/json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct JobSummary {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RootDocument {
    pub(crate) jobs: Vec<JobSummary>,
}

/// Which build reference of a job to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildSelector {
    First,
    Last,
}

impl BuildSelector {
    /// Field name in the job document.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::First => "firstBuild",
            Self::Last => "lastBuild",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn job_keeps_unknown_fields_and_null_refs() {
        let job: Job = serde_json::from_value(json!({
            "_class": "hudson.model.FreeStyleProject",
            "name": "demo",
            "buildable": true,
            "builds": [],
            "firstBuild": null,
            "lastBuild": null
        }))
        .unwrap();

        assert!(job.builds.is_empty());
        assert!(job.build_ref(BuildSelector::First).is_none());
        assert!(job.build_ref(BuildSelector::Last).is_none());
        assert_eq!(job.extra["buildable"], json!(true));
        assert_eq!(job.extra["name"], json!("demo"));
    }

    #[test]
    fn job_reads_build_refs() {
        let job: Job = serde_json::from_value(json!({
            "builds": [
                { "_class": "hudson.model.FreeStyleBuild", "number": 3, "url": "http://x/job/demo/3/" },
                { "number": 2 },
                { "number": 1 }
            ],
            "firstBuild": { "number": 1 },
            "lastBuild": { "number": 3 }
        }))
        .unwrap();

        let numbers: Vec<u64> = job.builds.iter().map(|b| b.number).collect();
        assert_eq!(numbers, [3, 2, 1]);
        assert_eq!(job.builds[0].url.as_deref(), Some("http://x/job/demo/3/"));
        assert_eq!(
            job.builds[0].extra["_class"],
            json!("hudson.model.FreeStyleBuild")
        );
        assert_eq!(job.build_ref(BuildSelector::First).map(|b| b.number), Some(1));
        assert_eq!(job.build_ref(BuildSelector::Last).map(|b| b.number), Some(3));
    }

    #[test]
    fn build_ref_without_number_is_rejected() {
        let res = serde_json::from_value::<Job>(json!({ "lastBuild": { "url": "x" } }));
        assert!(res.is_err());
    }

    #[test]
    fn root_document_requires_jobs() {
        assert!(serde_json::from_value::<RootDocument>(json!({ "mode": "NORMAL" })).is_err());
        let root: RootDocument = serde_json::from_value(json!({
            "jobs": [{ "name": "a", "color": "blue" }]
        }))
        .unwrap();
        assert_eq!(root.jobs[0].name, "a");
        assert_eq!(root.jobs[0].color.as_deref(), Some("blue"));
    }
}
