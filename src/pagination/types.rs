//! Pagination types
//!
//! Defines the strategy configuration and the per-session state shared by
//! both pagination strategies.

use super::strategies::{CursorPagination, OffsetPagination};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reads a value out of a request or response
pub type Getter<T, V> = Box<dyn Fn(&T) -> V + Send + Sync>;

/// Writes a value onto a request
pub type Setter<T, V> = Box<dyn Fn(&mut T, V) + Send + Sync>;

/// Result of evaluating one response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// The request was advanced, another request follows
    Continue,
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Items extracted from a response plus the continuation decision
#[derive(Debug)]
pub(crate) struct Evaluation<Item> {
    /// Extracted batch; an absent batch is empty
    pub items: Vec<Item>,
    /// Whether another request follows
    pub next: NextPage,
}

impl<Item> Evaluation<Item> {
    pub(crate) fn next(items: Vec<Item>) -> Self {
        Self {
            items,
            next: NextPage::Continue,
        }
    }

    pub(crate) fn done(items: Vec<Item>) -> Self {
        Self {
            items,
            next: NextPage::Done,
        }
    }
}

/// Tracks pagination progress for one session
///
/// Serializable so callers can checkpoint a session and later seed a fresh
/// request from the last written offset or cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Requests issued so far
    pub requests: u64,
    /// Pages emitted so far
    pub pages: u64,
    /// Items received so far, including skipped empty batches
    pub total_fetched: u64,
    /// Offset currently written on the request (offset strategy)
    #[serde(default)]
    pub offset: Option<i64>,
    /// Step value read at session start (offset strategy)
    #[serde(default)]
    pub step: Option<i64>,
    /// Cursor last written on the request (cursor strategy)
    #[serde(default)]
    pub cursor: Option<String>,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no request has been issued yet
    pub fn is_fresh(&self) -> bool {
        self.requests == 0
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Count an issued request
    pub fn record_request(&mut self) {
        self.requests += 1;
    }

    /// Count an emitted page
    pub fn record_page(&mut self) {
        self.pages += 1;
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }

    /// Set offset
    pub fn set_offset(&mut self, offset: i64) {
        self.offset = Some(offset);
    }

    /// Set cursor
    pub fn set_cursor(&mut self, cursor: String) {
        self.cursor = Some(cursor);
    }
}

/// Pagination strategy for a session
///
/// A strategy is plain data: the accessor closures for one request/response
/// pair. [`Pager`](super::Pager) drives either variant with the same loop.
pub enum PaginationConfig<Req, Resp, Item> {
    /// Numeric offset or page number advanced per request
    Offset(OffsetPagination<Req, Resp, Item>),
    /// Opaque continuation token taken from each response
    Cursor(CursorPagination<Req, Resp, Item>),
}

impl<Req, Resp, Item> PaginationConfig<Req, Resp, Item> {
    /// Create offset pagination config
    pub fn offset(strategy: OffsetPagination<Req, Resp, Item>) -> Self {
        Self::Offset(strategy)
    }

    /// Create cursor pagination config
    pub fn cursor(strategy: CursorPagination<Req, Resp, Item>) -> Self {
        Self::Cursor(strategy)
    }

    /// Strategy name, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Offset(_) => "offset",
            Self::Cursor(_) => "cursor",
        }
    }

    /// Read whatever the strategy needs from the request before the first fetch
    pub(crate) fn start(&self, request: &Req, state: &mut PaginationState) {
        match self {
            Self::Offset(strategy) => strategy.start(request, state),
            Self::Cursor(_) => {}
        }
    }

    /// Evaluate a response and advance the request for the next fetch
    pub(crate) fn process_response(
        &self,
        request: &mut Req,
        response: &Resp,
        state: &mut PaginationState,
    ) -> Result<Evaluation<Item>> {
        match self {
            Self::Offset(strategy) => strategy.process_response(request, response, state),
            Self::Cursor(strategy) => Ok(strategy.process_response(request, response, state)),
        }
    }
}

impl<Req, Resp, Item> From<OffsetPagination<Req, Resp, Item>>
    for PaginationConfig<Req, Resp, Item>
{
    fn from(strategy: OffsetPagination<Req, Resp, Item>) -> Self {
        Self::Offset(strategy)
    }
}

impl<Req, Resp, Item> From<CursorPagination<Req, Resp, Item>>
    for PaginationConfig<Req, Resp, Item>
{
    fn from(strategy: CursorPagination<Req, Resp, Item>) -> Self {
        Self::Cursor(strategy)
    }
}

impl<Req, Resp, Item> fmt::Debug for PaginationConfig<Req, Resp, Item> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset(strategy) => f.debug_tuple("Offset").field(strategy).finish(),
            Self::Cursor(strategy) => f.debug_tuple("Cursor").field(strategy).finish(),
        }
    }
}
