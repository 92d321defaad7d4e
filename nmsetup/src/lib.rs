//! First-time-setup access point provisioning through NetworkManager.
//!
//! A device that has never been configured needs a way for a phone or
//! laptop to reach it. This crate finds the machine's Wi-Fi adapter over
//! the system D-Bus and asks NetworkManager to run it as an access point:
//!
//! - Discovering Wi-Fi adapters (device types are read in parallel)
//! - Creating an open or WPA2-protected access point with a static address
//! - Tearing the access point down again
//!
//! # Example
//!
//! ```no_run
//! use nmsetup::{AccessPointConfig, ApSecurity, NetworkManager};
//!
//! # async fn example() -> nmsetup::Result<()> {
//! let nm = NetworkManager::new().await?;
//! let session = nm.start().await?;
//!
//! let config = AccessPointConfig::new("setup-1234", ApSecurity::WpaPsk {
//!     psk: "provision-me".into(),
//! });
//! session.create_access_point(&config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Discovery
//!
//! The adapter search is built on a generic [`EntrySource`]: list entries
//! once, classify each with its own remote call, keep the ones that match.
//! See [`discover`].
//!
//! # Error Handling
//!
//! All operations return `Result<T, SetupError>`. Nothing is retried.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To see
//! log output, add a logging implementation like `env_logger`.

// Internal implementation modules
mod core;
mod dbus;
mod types;
mod util;

// Public API modules
pub mod api;

pub use api::builders;
pub use api::models;

// Re-exported public API
pub use api::models::{
    AccessPointConfig, AccessPointHandle, ApSecurity, DeviceScope, DeviceType, Ipv4Method,
    SetupError, TimeoutConfig, WifiBand,
};
pub use api::network_manager::{NetworkManager, Session};
pub use crate::core::device::{NmDeviceSource, select_wifi_adapter};
pub use crate::core::discovery::{EntrySource, discover};

/// A specialized `Result` type for provisioning operations.
pub type Result<T> = std::result::Result<T, SetupError>;
