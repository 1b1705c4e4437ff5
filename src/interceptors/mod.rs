//! Interceptor hooks around every HTTP call.
//!
//! The default hooks are identity pass-throughs: a request or response comes
//! back exactly as it went in and errors are re-raised unchanged. They are the
//! extension point for cross-cutting concerns (auth injection, logging) that
//! should not touch call sites.

use async_trait::async_trait;
use std::future::Future;

use crate::transport::{RequestDescriptor, ResponseEnvelope};
use crate::{Error, Result};

/// Interceptor trait for cross-cutting concerns.
#[async_trait]
pub trait Interceptor: Send + Sync {
    async fn on_request(&self, req: RequestDescriptor) -> Result<RequestDescriptor> {
        Ok(req)
    }

    async fn on_response(&self, resp: ResponseEnvelope) -> Result<ResponseEnvelope> {
        Ok(resp)
    }

    /// Observes a failure. The error itself is always returned to the caller as-is.
    async fn on_error(&self, _err: &Error) {}
}

/// Logs every call through `tracing`. Header values are never logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingInterceptor;

#[async_trait]
impl Interceptor for TracingInterceptor {
    async fn on_request(&self, req: RequestDescriptor) -> Result<RequestDescriptor> {
        tracing::debug!(method = %req.method, url = %req.url, "outbound request");
        Ok(req)
    }

    async fn on_response(&self, resp: ResponseEnvelope) -> Result<ResponseEnvelope> {
        tracing::debug!(status = resp.status, "response received");
        Ok(resp)
    }

    async fn on_error(&self, err: &Error) {
        tracing::warn!(error = %err, "request failed");
    }
}

/// Runs hooks in registration order around the actual call.
pub struct InterceptorPipeline {
    pub(crate) interceptors: Vec<Box<dyn Interceptor>>,
}

impl InterceptorPipeline {
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    pub fn with<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    pub fn push<I: Interceptor + 'static>(&mut self, interceptor: I) {
        self.interceptors.push(Box::new(interceptor));
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub async fn execute<F, Fut>(&self, req: RequestDescriptor, f: F) -> Result<ResponseEnvelope>
    where
        F: FnOnce(RequestDescriptor) -> Fut,
        Fut: Future<Output = Result<ResponseEnvelope>>,
    {
        let mut req = req;
        for ic in &self.interceptors {
            req = match ic.on_request(req).await {
                Ok(req) => req,
                Err(err) => return Err(self.fail(err).await),
            };
        }

        let mut resp = match f(req).await {
            Ok(resp) => resp,
            Err(err) => return Err(self.fail(err).await),
        };

        for ic in &self.interceptors {
            resp = match ic.on_response(resp).await {
                Ok(resp) => resp,
                Err(err) => return Err(self.fail(err).await),
            };
        }
        Ok(resp)
    }

    async fn fail(&self, err: Error) -> Error {
        for ic in &self.interceptors {
            ic.on_error(&err).await;
        }
        err
    }
}

impl Default for InterceptorPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Method, Payload, TransportError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Tag(&'static str);

    #[async_trait]
    impl Interceptor for Tag {
        async fn on_request(&self, mut req: RequestDescriptor) -> Result<RequestDescriptor> {
            req.headers.push(("x-tag".into(), self.0.into()));
            Ok(req)
        }
    }

    struct CountErrors(Arc<AtomicUsize>);

    #[async_trait]
    impl Interceptor for CountErrors {
        async fn on_error(&self, _err: &Error) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn ok_response() -> ResponseEnvelope {
        ResponseEnvelope {
            status: 200,
            headers: Vec::new(),
            payload: Payload::Json(serde_json::Value::Null),
        }
    }

    #[tokio::test]
    async fn request_hooks_run_in_order() {
        let pipeline = InterceptorPipeline::new().with(Tag("a")).with(Tag("b"));
        let req = RequestDescriptor::new(Method::Get, "http://localhost/");
        let resp = pipeline
            .execute(req, |req| async move {
                let tags: Vec<_> = req.headers.iter().map(|(_, v)| v.clone()).collect();
                assert_eq!(tags, vec!["a", "b"]);
                Ok(ok_response())
            })
            .await
            .unwrap();
        assert_eq!(resp.status, 200);
    }

    #[tokio::test]
    async fn default_hooks_are_identity() {
        let pipeline = InterceptorPipeline::new().with(TracingInterceptor);
        let req = RequestDescriptor::new(Method::Delete, "http://localhost/item");
        let expected = req.clone();
        pipeline
            .execute(req, |req| async move {
                assert_eq!(req, expected);
                Ok(ok_response())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn errors_are_observed_and_returned_unchanged() {
        let seen = Arc::new(AtomicUsize::new(0));
        let pipeline = InterceptorPipeline::new()
            .with(CountErrors(seen.clone()))
            .with(CountErrors(seen.clone()));
        let req = RequestDescriptor::new(Method::Get, "http://localhost/");
        let err = pipeline
            .execute(req, |_| async {
                Err(Error::from(TransportError::Status {
                    status: 503,
                    body: "down".into(),
                }))
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
