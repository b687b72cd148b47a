//! Jenkins endpoint paths, relative to a service's base URL.

pub(crate) mod jobs;
