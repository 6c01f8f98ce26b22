//! Pagination strategy implementations
//!
//! Each strategy knows how to read one response and how to advance the
//! request for the next fetch. Neither performs I/O.

use super::types::{Evaluation, Getter, PaginationState, Setter};
use crate::error::{Error, Result};
use std::fmt;
use tracing::warn;

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset or page-number pagination
///
/// Advances an integer field on the request after every response.
/// Common patterns:
/// - `?page=2` (no step: the offset grows by 1 per request)
/// - `?offset=100&limit=50` (step: the offset grows by the batch size)
///
/// Continuation comes from the response's has-next-page flag when it
/// exposes one, and otherwise from whether the batch had any items.
pub struct OffsetPagination<Req, Resp, Item> {
    get_offset: Getter<Req, i64>,
    set_offset: Setter<Req, i64>,
    get_step: Getter<Req, Option<i64>>,
    get_items: Getter<Resp, Option<Vec<Item>>>,
    has_next_page: Getter<Resp, Option<bool>>,
}

impl<Req, Resp, Item> OffsetPagination<Req, Resp, Item>
where
    Req: 'static,
    Resp: 'static,
    Item: 'static,
{
    /// Create a new offset strategy
    ///
    /// `set_offset` followed by `get_offset` must read back the written value.
    pub fn new(
        get_offset: impl Fn(&Req) -> i64 + Send + Sync + 'static,
        set_offset: impl Fn(&mut Req, i64) + Send + Sync + 'static,
        get_items: impl Fn(&Resp) -> Option<Vec<Item>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            get_offset: Box::new(get_offset),
            set_offset: Box::new(set_offset),
            get_step: Box::new(|_: &Req| None),
            get_items: Box::new(get_items),
            has_next_page: Box::new(|_: &Resp| None),
        }
    }

    /// Read a step value from the request
    ///
    /// When the request carries a step, the offset advances by the number of
    /// items received (1 for an empty batch) instead of by 1. Only the
    /// presence of the step matters: a step of zero also selects item-count
    /// advancement. A has-next-page flag that stays true over empty batches
    /// therefore walks the offset forward one at a time without end.
    #[must_use]
    pub fn with_step(
        mut self,
        get_step: impl Fn(&Req) -> Option<i64> + Send + Sync + 'static,
    ) -> Self {
        self.get_step = Box::new(get_step);
        self
    }

    /// Read an explicit has-next-page flag from each response
    #[must_use]
    pub fn with_has_next_page(
        mut self,
        has_next_page: impl Fn(&Resp) -> Option<bool> + Send + Sync + 'static,
    ) -> Self {
        self.has_next_page = Box::new(has_next_page);
        self
    }
}

impl<Req, Resp, Item> OffsetPagination<Req, Resp, Item> {
    pub(crate) fn start(&self, request: &Req, state: &mut PaginationState) {
        state.set_offset((self.get_offset)(request));
        state.step = (self.get_step)(request);
    }

    pub(crate) fn process_response(
        &self,
        request: &mut Req,
        response: &Resp,
        state: &mut PaginationState,
    ) -> Result<Evaluation<Item>> {
        let items = (self.get_items)(response).unwrap_or_default();
        state.add_fetched(items.len() as u64);

        let has_next = (self.has_next_page)(response).unwrap_or(!items.is_empty());
        if !has_next {
            state.mark_done();
            return Ok(Evaluation::done(items));
        }

        let current = state
            .offset
            .ok_or_else(|| Error::contract("offset pagination evaluated before start"))?;

        let advance = match state.step {
            Some(_) if !items.is_empty() => i64::try_from(items.len()).map_err(|_| {
                Error::contract(format!("batch of {} items overflows the offset", items.len()))
            })?,
            _ => 1,
        };

        let next = current.checked_add(advance).ok_or_else(|| {
            Error::contract(format!("offset {current} overflows when advanced by {advance}"))
        })?;

        (self.set_offset)(request, next);
        let written = (self.get_offset)(request);
        if written != next {
            warn!(expected = next, actual = written, "Offset write was not read back");
            return Err(Error::contract(format!(
                "set_offset wrote {next} but get_offset reads {written}"
            )));
        }

        state.set_offset(next);
        Ok(Evaluation::next(items))
    }
}

impl<Req, Resp, Item> fmt::Debug for OffsetPagination<Req, Resp, Item> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffsetPagination").finish_non_exhaustive()
    }
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor-based pagination (e.g., Stripe, Slack)
///
/// Copies the next cursor from each response onto the request. A missing or
/// empty cursor ends the session after the current batch.
pub struct CursorPagination<Req, Resp, Item> {
    set_cursor: Setter<Req, String>,
    get_next_cursor: Getter<Resp, Option<String>>,
    get_items: Getter<Resp, Option<Vec<Item>>>,
}

impl<Req, Resp, Item> CursorPagination<Req, Resp, Item> {
    /// Create a new cursor strategy
    pub fn new(
        set_cursor: impl Fn(&mut Req, String) + Send + Sync + 'static,
        get_next_cursor: impl Fn(&Resp) -> Option<String> + Send + Sync + 'static,
        get_items: impl Fn(&Resp) -> Option<Vec<Item>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            set_cursor: Box::new(set_cursor),
            get_next_cursor: Box::new(get_next_cursor),
            get_items: Box::new(get_items),
        }
    }

    pub(crate) fn process_response(
        &self,
        request: &mut Req,
        response: &Resp,
        state: &mut PaginationState,
    ) -> Evaluation<Item> {
        let items = (self.get_items)(response).unwrap_or_default();
        state.add_fetched(items.len() as u64);

        match (self.get_next_cursor)(response) {
            Some(cursor) if !cursor.is_empty() => {
                (self.set_cursor)(request, cursor.clone());
                state.set_cursor(cursor);
                Evaluation::next(items)
            }
            _ => {
                state.mark_done();
                Evaluation::done(items)
            }
        }
    }
}

impl<Req, Resp, Item> fmt::Debug for CursorPagination<Req, Resp, Item> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorPagination").finish_non_exhaustive()
    }
}
