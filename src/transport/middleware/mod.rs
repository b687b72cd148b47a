//! Layers that wrap any [`ServiceRequest`](crate::ServiceRequest).

pub mod crumb;
pub mod hook;

pub use crumb::Crumb;
pub use hook::Hook;
