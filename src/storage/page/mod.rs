//! Page types.
//!
//! This module contains:
//! - [`Page`] - A fixed-capacity sorted key buffer
//! - [`SearchResult`] - Outcome of a binary search over a page

#[allow(clippy::module_inception)]
mod page;

pub use page::{Page, SearchResult};
