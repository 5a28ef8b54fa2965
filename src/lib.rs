//! Bounded, persisted most-recently-used list of files.
//!
//! - [`recent`]: in-memory recency list (touch, promote, evict, remove).
//! - [`codec`]: flat key-value encoding of the list and its `Properties` text form.
//! - [`store`]: the list bound to a storage file, saved after every mutation.
//! - [`menu`]: presentation boundary (menu items, icons, selection handling).
//! - [`config`]: `settings.conf` and config directory layout.

pub mod codec;
pub mod config;
pub mod error;
pub mod menu;
pub mod recent;
pub mod store;

pub use error::{ConfigError, RecentError};
pub use recent::{Entry, RecencyList, Touch};
pub use store::{OpenOptions, RecentFiles};
