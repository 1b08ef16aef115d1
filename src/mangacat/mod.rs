//! # MangaCat Integration Module
//!
//! HTTP access to the MangaCat API. Everything goes through an
//! [`ApiClient`], which owns the one HTTP session of an invocation.
//!
//! ## Architecture
//!
//! ```text
//! CLI handlers (login, chapters add)
//!          ↓
//! MangaCat Integration Layer
//!     ├── Authentication (POST auth/login)
//!     └── Chapters (POST series_chapters, POST series_chapters/{id})
//!          ↓
//! ApiClient (submit_json, submit_files)
//!          ↓
//! HTTP Layer (reqwest, JSON, multipart)
//! ```
//!
//! ## Failure Handling
//!
//! Failed requests are never turned into errors. They are logged at error
//! level and surface as `None` (JSON requests) or [`FAILURE`] (uploads), which
//! the handlers turn into exit code `1`. No request is retried.
//!
//! File uploads are split into batches of [`BATCH_SIZE`] files sent one after
//! another. A batch answered with an empty body aborts the remaining batches
//! whatever its status, and so does a page file that cannot be read. A batch
//! failing in transport, or with an error status and an error body, is only
//! logged.

pub mod auth;
pub mod chapters;
mod client;

pub use client::{ApiClient, BATCH_SIZE, FAILURE, FILES_FIELD, SUCCESS};
