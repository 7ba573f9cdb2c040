//! SQLite persistence for named blobs.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use models::{Blob, NewBlob};
pub use repository::{BlobRepository, MIGRATIONS};
