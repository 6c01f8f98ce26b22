//! Page sequence abstraction
//!
//! Every pagination session is a [`PageSequence`]: a single-pass, pull-based
//! source of pages. Item iteration is derived by flattening pages in order,
//! so the two views can never disagree.

use crate::error::PagerError;
use crate::page::Page;
use async_trait::async_trait;
use futures::ready;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use pin_project_lite::pin_project;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Boxed stream of pages produced by [`PageSequence::into_pages`]
pub type PageStream<Item, Response, E> =
    BoxStream<'static, Result<Page<Item, Response>, PagerError<E>>>;

/// A lazy, single-pass sequence of pages
///
/// Once `next_page` has returned `Ok(None)` or an error, the sequence is
/// finished and keeps returning `Ok(None)`.
#[async_trait]
pub trait PageSequence: Send {
    /// Item type carried by each page
    type Item: Send;
    /// Response type retained by each page
    type Response: Send + Sync;
    /// Error type of the underlying page fetcher
    type Error: Send;

    /// Pull the next page, issuing requests as needed
    async fn next_page(
        &mut self,
    ) -> Result<Option<Page<Self::Item, Self::Response>>, PagerError<Self::Error>>;

    /// Drain the remaining pages
    async fn collect_pages(
        &mut self,
    ) -> Result<Vec<Page<Self::Item, Self::Response>>, PagerError<Self::Error>> {
        let mut pages = Vec::new();
        while let Some(page) = self.next_page().await? {
            pages.push(page);
        }
        Ok(pages)
    }

    /// Drain the remaining items, page by page
    async fn collect_items(&mut self) -> Result<Vec<Self::Item>, PagerError<Self::Error>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page.into_items());
        }
        Ok(items)
    }

    /// Turn the sequence into a stream of pages
    ///
    /// The stream ends after the first error.
    fn into_pages(self) -> PageStream<Self::Item, Self::Response, Self::Error>
    where
        Self: Sized + 'static,
    {
        stream::unfold(Some(self), |sequence| async move {
            let Some(mut sequence) = sequence else {
                return None;
            };
            match sequence.next_page().await {
                Ok(Some(page)) => Some((Ok(page), Some(sequence))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
        .boxed()
    }

    /// Turn the sequence into a stream of items
    fn into_items(
        self,
    ) -> ItemStream<PageStream<Self::Item, Self::Response, Self::Error>, Self::Item>
    where
        Self: Sized + 'static,
    {
        ItemStream::new(self.into_pages())
    }
}

pin_project! {
    /// Flattens a stream of pages into a stream of items
    ///
    /// Items come out in page order, then in each page's own order. An error
    /// from the page stream is yielded once and ends the item stream.
    pub struct ItemStream<S, Item> {
        #[pin]
        pages: S,
        buffer: VecDeque<Item>,
        done: bool,
    }
}

impl<S, Item> ItemStream<S, Item> {
    /// Wrap a page stream
    pub fn new(pages: S) -> Self {
        Self {
            pages,
            buffer: VecDeque::new(),
            done: false,
        }
    }
}

impl<S, Item, Response, E> Stream for ItemStream<S, Item>
where
    S: Stream<Item = Result<Page<Item, Response>, PagerError<E>>>,
{
    type Item = Result<Item, PagerError<E>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(item) = this.buffer.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if *this.done {
                return Poll::Ready(None);
            }

            match ready!(this.pages.as_mut().poll_next(cx)) {
                Some(Ok(page)) => this.buffer.extend(page.into_items()),
                Some(Err(e)) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                None => *this.done = true,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.buffer.len();
        if self.done {
            (buffered, Some(buffered))
        } else {
            (buffered, None)
        }
    }
}
