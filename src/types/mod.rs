//! Names and JSON payloads exchanged with the Jenkins service.

pub mod common;
pub mod jobs;

pub use common::*;
pub use jobs::*;
