//! Command implementations behind the `bl` CLI surface.
//!
//! # Module Structure
//!
//! - [`get`] - fetch one resource or list a kind
//! - [`apply`] - create or update resources from a manifest file
//! - [`delete`] - delete resources by file or by kind and name
//! - [`input`] - manifest reading and multi-document parsing

pub mod apply;
pub mod delete;
pub mod get;
pub mod input;

pub use input::collect_documents;
