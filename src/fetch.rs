//! Page fetcher contract
//!
//! The engine's only boundary with the service layer: given a request,
//! asynchronously produce a response. Transport, retries and backoff are the
//! fetcher's business; whatever error it returns reaches the consumer as-is.

use async_trait::async_trait;
use std::future::Future;

/// Issues one page request against a service
#[async_trait]
pub trait PageFetcher<Req: Sync>: Send + Sync {
    /// Response type returned by the service
    type Response: Send;
    /// Transport error type
    type Error: Send;

    /// Fetch the page described by the current request
    async fn fetch(&self, request: &Req) -> Result<Self::Response, Self::Error>;
}

/// Adapts an async closure into a [`PageFetcher`]
///
/// The closure receives its own copy of the request, so `Req` must be `Clone`.
/// This is the only place a request is cloned.
#[derive(Debug, Clone)]
pub struct FnFetcher<F> {
    f: F,
}

/// Wrap an async closure as a page fetcher
///
/// ```rust,ignore
/// let fetcher = fetch_fn(|req: ListUsersRequest| async move { client.list_users(req).await });
/// ```
pub fn fetch_fn<F>(f: F) -> FnFetcher<F> {
    FnFetcher { f }
}

#[async_trait]
impl<Req, Resp, E, F, Fut> PageFetcher<Req> for FnFetcher<F>
where
    Req: Clone + Send + Sync + 'static,
    F: Fn(Req) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Resp, E>> + Send + 'static,
    Resp: Send + 'static,
    E: Send + 'static,
{
    type Response = Resp;
    type Error = E;

    async fn fetch(&self, request: &Req) -> Result<Resp, E> {
        (self.f)(request.clone()).await
    }
}
