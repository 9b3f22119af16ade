//! # tabscout
//!
//! Host process for searching open browser tabs. Tabs and their page text
//! are registered over a newline-delimited JSON bridge; searches are answered
//! with ranked results, snippets, a web-search item and matching history.
//!
//! The matcher and aggregator live in [`tabscout_search`]. This crate adds:
//!
//! - [`config::AppConfig`]: TOML configuration file
//! - [`store::JsonFileStore`]: persistent history and recent-tab lists
//! - [`tabs::RecentTabs`]: most-recently-used ordering of search candidates
//! - [`host`]: the command contract, session and stdio bridge

pub mod app_dirs;
pub mod config;
pub mod error;
pub mod host;
pub mod store;
pub mod tabs;

pub use config::{AppConfig, StorageConfig};
pub use error::{AppError, Result};
pub use host::session::HostSession;
pub use store::JsonFileStore;
