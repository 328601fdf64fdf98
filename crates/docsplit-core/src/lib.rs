//! docsplit-core - Core types and traits
//!
//! This crate provides the foundational types, traits, and error handling
//! shared by the chunker, the document sources and the load service.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::{DocsplitError, Result};
pub use traits::*;
pub use types::*;
