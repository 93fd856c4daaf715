//! Filesystem utilities for webeval.
//!
//! Provides the atomic write used for the host-tool configuration file,
//! so `mcp.json` is never left half-written.

pub mod atomic;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
