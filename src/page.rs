//! Page container
//!
//! A [`Page`] is an immutable snapshot of one response: the items extracted
//! from it, in response order, plus the response itself for pass-through
//! access.

use crate::error::{Error, Result};
use std::any::{type_name, Any};
use std::sync::Arc;

/// One batch of items plus the response that produced them
#[derive(Debug)]
pub struct Page<Item, Response> {
    items: Vec<Item>,
    response: Arc<Response>,
}

impl<Item, Response> Page<Item, Response> {
    /// Create a page from an extracted item list and its response
    pub fn new(items: Vec<Item>, response: Response) -> Self {
        Self::from_shared(items, Arc::new(response))
    }

    /// Create a page around an already shared response
    pub fn from_shared(items: Vec<Item>, response: Arc<Response>) -> Self {
        Self { items, response }
    }

    /// Items in response order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The response this page was extracted from
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Shared handle to the response
    pub fn shared_response(&self) -> Arc<Response> {
        Arc::clone(&self.response)
    }

    /// Consume the page, keeping only its items
    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Split the page into items and response
    pub fn into_parts(self) -> (Vec<Item>, Arc<Response>) {
        (self.items, self.response)
    }
}

impl<Item, Response: Any> Page<Item, Response> {
    /// The response as an opaque handle
    pub fn response_any(&self) -> &dyn Any {
        &*self.response
    }

    /// The response cast to a concrete type
    ///
    /// Fails with [`Error::TypeMismatch`] when `T` is not the response type.
    pub fn response_as<T: Any>(&self) -> Result<&T> {
        self.response_any()
            .downcast_ref::<T>()
            .ok_or_else(|| Error::type_mismatch(type_name::<T>(), type_name::<Response>()))
    }
}

// Manual impl: cloning a page never requires cloning the response.
impl<Item: Clone, Response> Clone for Page<Item, Response> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            response: Arc::clone(&self.response),
        }
    }
}

impl<Item, Response> IntoIterator for Page<Item, Response> {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, Item, Response> IntoIterator for &'a Page<Item, Response> {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
