use crate::{
    Error, RequestHook, RequestHookContext,
    transport::{Response, ServiceCall, ServiceRequest},
};

/// Runs a request hook before handing the call to the inner layer.
#[derive(Clone)]
pub struct Hook<T> {
    inner: T,
    hook: RequestHook,
}

impl<T> Hook<T> {
    pub fn new(inner: T, hook: RequestHook) -> Self {
        Self { inner, hook }
    }
}

impl<T: ServiceRequest> ServiceRequest for Hook<T> {
    fn request(&self, mut call: ServiceCall) -> Result<Response, Error> {
        (self.hook)(RequestHookContext {
            method: &call.method,
            service: &call.service,
            path: &call.path,
            headers: &mut call.headers,
        })?;

        self.inner.request(call)
    }
}
