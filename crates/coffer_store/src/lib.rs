//! Store nodes, permission metadata, and the recursive path protocol for Coffer.
//!
//! This crate provides:
//! - [`Store`] - The tree node implementing `read`/`write`/`write_entries`/`entries`
//! - [`StoreType`] - Declared permission metadata and seed properties for a node type
//! - [`StoreValue`] - What a property slot holds: data, a nested node, or a producer
//! - [`Resolved`] - A property resolved to a concrete value

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod path;
pub mod store;
pub mod store_type;

pub use store::{Producer, Resolved, Store, StoreValue};
pub use store_type::StoreType;
