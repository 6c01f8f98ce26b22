//! Pagination module
//!
//! Supports: Offset (item offset or page number), Cursor
//!
//! # Overview
//!
//! A strategy is configuration: a handful of closures that read and write
//! the caller's request and response types. [`Pager`] owns the request for
//! the length of a session and drives either strategy with one loop,
//! exposing the result as a [`PageSequence`](crate::PageSequence).
//!
//! ```rust,ignore
//! let strategy = OffsetPagination::new(
//!     |req: &ListUsers| req.page,
//!     |req: &mut ListUsers, page| req.page = page,
//!     |resp: &UserList| Some(resp.users.clone()),
//! )
//! .with_has_next_page(|resp: &UserList| Some(resp.has_more));
//!
//! let mut users = Pager::offset(client, ListUsers::default(), strategy).into_items();
//! while let Some(user) = users.try_next().await? {
//!     // ...
//! }
//! ```

mod pager;
mod strategies;
mod types;

pub use pager::Pager;
pub use strategies::{CursorPagination, OffsetPagination};
pub use types::{Getter, NextPage, PaginationConfig, PaginationState, Setter};
