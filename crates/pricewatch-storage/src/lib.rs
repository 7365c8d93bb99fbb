//! Object-storage mirror for product images (Cloudflare R2, S3-compatible).

pub mod client;
pub mod error;

pub use client::{ObjectStore, R2Config, DEFAULT_BUCKET};
pub use error::StorageError;
