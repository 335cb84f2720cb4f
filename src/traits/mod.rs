//! Trait definitions for FreeScout operations.
//!
//! Each entity type implements the traits it supports, encapsulating
//! endpoint differences in the implementations.

mod create;
mod get;
mod list;

pub use create::Create;
pub use get::Get;
pub use list::{List, NoQuery, DEFAULT_PAGE_SIZE};
