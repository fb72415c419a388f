//! Coffer - hierarchical, permission-gated key-value store
//!
//! This crate re-exports both layers of the Coffer system for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: coffer_store      — Store nodes, permission metadata, path protocol
//! Layer 0: coffer_foundation — Core types (Value, Permission, Error, collections)
//! ```

pub use coffer_foundation as foundation;
pub use coffer_store as store;
