//! Tower middleware resolving the caller of each request.
//!
//! `IdentityLayer` and `IdentityService` wrap any inner service and insert
//! a [`Caller`](crate::Caller) into request extensions before forwarding.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::IntoResponse;
use http::Request;
use tower::{Layer, Service};

use crate::IdentityConfig;

/// Tower `Layer` that resolves the caller of every request.
#[derive(Clone)]
pub struct IdentityLayer {
    config: Arc<IdentityConfig>,
}

impl IdentityLayer {
    /// Create a new identity layer with the given config.
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for IdentityLayer {
    type Service = IdentityService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        IdentityService {
            inner,
            config: self.config.clone(),
        }
    }
}

/// Tower `Service` that inserts the resolved `Caller` before forwarding requests.
///
/// Never rejects: requests naming no caller proceed as the anonymous identity.
#[derive(Clone)]
pub struct IdentityService<S> {
    inner: S,
    config: Arc<IdentityConfig>,
}

impl<S> Service<Request<Body>> for IdentityService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let caller = self.config.resolve(req.headers());
        log::trace!("Request {} {} as {}", req.method(), req.uri().path(), caller.username());
        req.extensions_mut().insert(caller);

        Box::pin(async move {
            let resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {});
            Ok(resp.into_response())
        })
    }
}
