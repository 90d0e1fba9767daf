//! Runtime module
//!
//! Spawned single-result tasks and channel-backed streams used by the
//! GitHub operations.

pub mod async_task;

pub use async_task::{AsyncStream, AsyncTask};
