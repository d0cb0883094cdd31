//! Configuration management for the plank application.
//!
//! This crate handles loading, validating, and persisting configuration
//! from multiple sources (files, environment variables, defaults).
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`storage`]: Persistence mode and data directory
//! - [`logging`]: Log level and log file location
//! - [`persistence`]: Config file discovery, reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Environment variables (`PLANK_DATA_DIR`, `PLANK_PERSIST`, `PLANK_LOG`)
//! 2. Local config (`./plank.json5` or `./plank.json`)
//! 3. User config (`~/.config/plank/config.json5` or `~/.config/plank/config.json`)
//! 4. Built-in defaults
//!
//! # File Format
//!
//! ```json5
//! {
//!   storage: {
//!     // false keeps changes for the current session only
//!     persist: true,
//!     data_dir: "/home/me/.plank",
//!   },
//!   logging: { level: "debug" },
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use plank_config::Config;
//!
//! # async fn example() -> plank_config::Result<()> {
//! let config = Config::load().await?;
//! let data_dir = config.storage.resolve_data_dir()?;
//! println!("tasks live in {}", data_dir.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod storage;

// Re-export primary types at crate root for convenience
pub use config::Config;
pub use error::{ConfigError, Result};
pub use logging::LoggingConfig;
pub use storage::StorageConfig;
