//! Storage layer - the key buffers nodes are built from.
//!
//! - [`page`] - Fixed-capacity sorted pages

pub mod page;
