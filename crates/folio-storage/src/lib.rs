//! Object storage for the portfolio's media.
//!
//! This crate provides:
//! - The `ObjectStore` abstraction used by the storage proxy
//! - A Cloudflare R2 client (S3-compatible API)
//! - An in-memory store for local runs and tests
//! - Sequential bulk upload of local files

pub mod client;
pub mod error;
pub mod memory;
pub mod store;
pub mod upload;

pub use client::{R2Client, R2Config};
pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStore;
pub use store::{
    content_type_for, validate_key, ObjectInfo, ObjectMetadata, ObjectStore, StoredObject,
    MAX_KEY_LENGTH,
};
pub use upload::{
    discover_videos, upload_batch, BatchReport, UploadOutcome, DEFAULT_VIDEO_EXTENSION,
};
