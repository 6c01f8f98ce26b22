//! # Solidafy Pager
//!
//! Lazy pagination for clients of paged service APIs.
//!
//! ## Features
//!
//! - **Offset Pagination**: page numbers, or item offsets advanced by batch size
//! - **Cursor Pagination**: opaque continuation tokens copied from each response
//! - **Pages or Items**: every session streams whole pages or flattened items
//! - **Cancellation**: a `CancellationToken` stops a session, even mid-request
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use solidafy_pager::{fetch_fn, CursorPagination, PageSequence, Pager};
//!
//! let strategy = CursorPagination::new(
//!     |req: &mut ListEvents, cursor| req.starting_after = Some(cursor),
//!     |resp: &EventList| resp.next_cursor.clone(),
//!     |resp: &EventList| Some(resp.data.clone()),
//! );
//!
//! let fetcher = fetch_fn(|req: ListEvents| async move { client.list_events(req).await });
//! let events: Vec<Event> = Pager::cursor(fetcher, ListEvents::default(), strategy)
//!     .into_items()
//!     .try_collect()
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  PageSequence: next_page() → into_pages() / into_items()  │
//! └───────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────────────────────┴──────────────────────────────┐
//! │  Pager: owns the request, one request per step            │
//! ├──────────────────────────────┬────────────────────────────┤
//! │  OffsetPagination            │  CursorPagination          │
//! ├──────────────────────────────┴────────────────────────────┤
//! │  PageFetcher: request → response (service layer)          │
//! └───────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Page container
pub mod page;

/// Page fetcher contract
pub mod fetch;

/// Page sequence abstraction
pub mod sequence;

/// Pagination strategies and the session driver
pub mod pagination;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, PagerError, Result};
pub use fetch::{fetch_fn, FnFetcher, PageFetcher};
pub use page::Page;
pub use pagination::{
    CursorPagination, NextPage, OffsetPagination, Pager, PaginationConfig, PaginationState,
};
pub use sequence::{ItemStream, PageSequence, PageStream};

pub use tokio_util::sync::CancellationToken;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
