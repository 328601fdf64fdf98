//! docsplit-source - Document sources and acquisition steps
//!
//! Collaborators the load service needs before chunking can start:
//!
//! - [`FsDocumentSource`]: documents stored as files, keyed by identifier
//! - [`MemoryDocumentSource`]: map-backed source for tests and embedding
//! - [`NoopAcquirer`]: for sources that are already populated
//! - [`CommandAcquirer`]: runs an external program that stores the document

mod acquire;
mod fs;
mod memory;

pub use acquire::{CommandAcquirer, NoopAcquirer};
pub use fs::FsDocumentSource;
pub use memory::MemoryDocumentSource;

pub use docsplit_core::{Acquirer, DocumentSource};
