//! Request paths for the Jenkins job and build endpoints.
//!
//! Names are interpolated as given. Spaces and non-ASCII characters are
//! percent-encoded when the path is joined onto the service URL, and
//! well-formed `%XX` escapes pass through untouched. Anything that would alter
//! the path or query structure is rejected up front.

use crate::{Error, JobName};

const RESERVED: &[char] = &['/', '?', '#', '&'];
/// Characters a servlet decodes specially inside a query value.
const QUERY_RESERVED: &[char] = &['=', '+'];

fn checked(name: &JobName) -> Result<&str, Error> {
    let raw = name.as_str();
    let reason = if raw.is_empty() {
        Some("name must not be empty")
    } else if raw.contains(RESERVED) {
        Some("name must not contain any of `/ ? # &`")
    } else if raw.chars().any(char::is_control) {
        Some("name must not contain control characters")
    } else if raw.trim() != raw {
        Some("name must not start or end with whitespace")
    } else if !escapes_allowed(raw) {
        Some("`%` must start a `%XX` escape of a non-separator byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidName {
            name: raw.into(),
            reason,
        }),
        None => Ok(raw),
    }
}

fn checked_query_value(name: &JobName) -> Result<&str, Error> {
    let raw = checked(name)?;
    if raw.contains(QUERY_RESERVED) {
        return Err(Error::InvalidName {
            name: raw.into(),
            reason: "name must not contain `=` or `+` in a query value",
        });
    }
    Ok(raw)
}

fn escapes_allowed(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let decoded = bytes
                .get(i + 1..i + 3)
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            match decoded {
                Some(byte) if !RESERVED.contains(&char::from(byte)) => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}

/// Job state toggles exposed as `POST /job/<name>/<verb>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Buildable {
    Enable,
    Disable,
}

impl Buildable {
    fn verb(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

/// `api/json`
pub(crate) fn root_json() -> String {
    "api/json".to_owned()
}

/// `createItem?name=<dst>&mode=copy&from=<src>`
pub(crate) fn copy_item(src: &JobName, dst: &JobName) -> Result<String, Error> {
    let src = checked_query_value(src)?;
    let dst = checked_query_value(dst)?;
    Ok(format!("createItem?name={dst}&mode=copy&from={src}"))
}

/// `job/<name>/enable` or `job/<name>/disable`
pub(crate) fn set_buildable(job: &JobName, state: Buildable) -> Result<String, Error> {
    Ok(format!("job/{}/{}", checked(job)?, state.verb()))
}

/// `job/<name>/api/json`
pub(crate) fn job_json(job: &JobName) -> Result<String, Error> {
    Ok(format!("job/{}/api/json", checked(job)?))
}

/// `job/<name>/<number>/api/json`
pub(crate) fn build_json(job: &JobName, number: u64) -> Result<String, Error> {
    Ok(format!("job/{}/{number}/api/json", checked(job)?))
}
