//! Connection settings builders.
//!
//! NetworkManager takes a connection as a nested `a{sa{sv}}` dictionary.
//! `ConnectionBuilder` handles the sections every connection shares;
//! `AccessPointBuilder` adds the Wi-Fi access point sections on top.
//!
//! ```rust
//! use nmsetup::builders::AccessPointBuilder;
//! use std::net::Ipv4Addr;
//!
//! let settings = AccessPointBuilder::new("setup-1234")
//!     .wpa_psk("provision-me")
//!     .ipv4_manual(Ipv4Addr::new(192, 168, 2, 1), 24)
//!     .build();
//!
//! assert!(settings.contains_key("802-11-wireless-security"));
//! ```

mod access_point;
mod connection_builder;

pub use access_point::{AccessPointBuilder, build_access_point_connection};
pub use connection_builder::{ConnectionBuilder, ConnectionSettings, IpConfig};
