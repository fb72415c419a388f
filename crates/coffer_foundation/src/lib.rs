//! Core values, permissions, and persistent collections for Coffer.
//!
//! This crate provides:
//! - [`Value`] - Plain data: primitives and structured values
//! - [`Permission`] - Per-property access levels (`none`, `r`, `w`, `rw`)
//! - [`Error`] - The two access-denied error kinds
//! - Persistent collections ([`CfVec`], [`CfMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod permission;
pub mod value;

pub use collections::{CfMap, CfVec};
pub use error::{Error, Result};
pub use permission::{ParsePermissionError, Permission};
pub use value::Value;
