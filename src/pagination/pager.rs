//! Pagination session driver
//!
//! A [`Pager`] owns one request for the whole session and drives a
//! [`PaginationConfig`] against a [`PageFetcher`]: fetch, evaluate, advance
//! the request, repeat until the strategy reports done.

use super::strategies::{CursorPagination, OffsetPagination};
use super::types::{Evaluation, PaginationConfig, PaginationState};
use crate::error::{Error, PagerError};
use crate::fetch::PageFetcher;
use crate::page::Page;
use crate::sequence::PageSequence;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// A single pagination session
///
/// The pager is the sole owner of the request while the session runs and
/// writes the next offset or cursor onto it in place after every response.
/// Requests are issued strictly one at a time and only when the consumer
/// asks for the next page. Sharing one request value between concurrent
/// sessions is not supported; give every session its own request.
pub struct Pager<F, Req, Item>
where
    Req: Sync,
    F: PageFetcher<Req>,
{
    fetcher: F,
    request: Req,
    config: PaginationConfig<Req, F::Response, Item>,
    state: PaginationState,
    cancel: CancellationToken,
}

impl<F, Req, Item> Pager<F, Req, Item>
where
    Req: Sync,
    F: PageFetcher<Req>,
{
    /// Create a new session
    pub fn new(
        fetcher: F,
        request: Req,
        config: PaginationConfig<Req, F::Response, Item>,
    ) -> Self {
        Self {
            fetcher,
            request,
            config,
            state: PaginationState::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Create an offset pagination session
    pub fn offset(
        fetcher: F,
        request: Req,
        strategy: OffsetPagination<Req, F::Response, Item>,
    ) -> Self {
        Self::new(fetcher, request, PaginationConfig::Offset(strategy))
    }

    /// Create a cursor pagination session
    pub fn cursor(
        fetcher: F,
        request: Req,
        strategy: CursorPagination<Req, F::Response, Item>,
    ) -> Self {
        Self::new(fetcher, request, PaginationConfig::Cursor(strategy))
    }

    /// Stop the session when this token is cancelled
    ///
    /// The token is checked before every request and raced against every
    /// in-flight request.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that cancels this session
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The request as currently written
    pub fn request(&self) -> &Req {
        &self.request
    }

    /// End the session and take the request back
    pub fn into_request(self) -> Req {
        self.request
    }

    /// Progress so far
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Strategy in use
    pub fn config(&self) -> &PaginationConfig<Req, F::Response, Item> {
        &self.config
    }

    /// Check if the session has finished
    pub fn is_done(&self) -> bool {
        self.state.done
    }

    /// Issue exactly one request and evaluate it
    ///
    /// Returns `Ok(None)` when the response carried no items.
    async fn step(&mut self) -> Result<Option<Page<Item, F::Response>>, PagerError<F::Error>> {
        if self.state.is_fresh() {
            self.config.start(&self.request, &mut self.state);
        }

        if self.cancel.is_cancelled() {
            warn!(requests = self.state.requests, "Pagination cancelled before request");
            return Err(Error::Cancelled.into());
        }

        self.state.record_request();
        debug!(
            strategy = self.config.kind(),
            request = self.state.requests,
            offset = ?self.state.offset,
            cursor = ?self.state.cursor.as_deref(),
            "Requesting page"
        );

        let response = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                warn!(
                    requests = self.state.requests,
                    "Pagination cancelled while request in flight"
                );
                return Err(Error::Cancelled.into());
            }
            result = self.fetcher.fetch(&self.request) => result.map_err(PagerError::Transport)?,
        };

        let Evaluation { items, next } =
            self.config
                .process_response(&mut self.request, &response, &mut self.state)?;

        let page = if items.is_empty() {
            trace!(request = self.state.requests, "Skipping empty batch");
            None
        } else {
            self.state.record_page();
            trace!(page = self.state.pages, items = items.len(), "Emitting page");
            Some(Page::new(items, response))
        };

        if next.is_done() {
            debug!(
                requests = self.state.requests,
                pages = self.state.pages,
                items = self.state.total_fetched,
                "Pagination complete"
            );
        }

        Ok(page)
    }
}

#[async_trait]
impl<F, Req, Item> PageSequence for Pager<F, Req, Item>
where
    Req: Send + Sync + 'static,
    Item: Send + 'static,
    F: PageFetcher<Req> + 'static,
    F::Response: Sync,
{
    type Item = Item;
    type Response = F::Response;
    type Error = F::Error;

    /// Pull the next non-empty page
    ///
    /// Responses without items are skipped, so one call may issue several
    /// requests. Each of them is checked against the cancellation token.
    async fn next_page(
        &mut self,
    ) -> Result<Option<Page<Item, F::Response>>, PagerError<F::Error>> {
        while !self.state.done {
            match self.step().await {
                Ok(Some(page)) => return Ok(Some(page)),
                Ok(None) => {}
                Err(e) => {
                    self.state.mark_done();
                    return Err(e);
                }
            }
        }
        Ok(None)
    }
}
