//! Constants for NetworkManager D-Bus interface values.
//!
//! These constants correspond to the numeric codes and setting names used
//! by NetworkManager's D-Bus API, plus the defaults used for the
//! first-time-setup access point.

/// NetworkManager device type constants.
pub mod device_type {
    pub const ETHERNET: u32 = 1;
    pub const WIFI: u32 = 2;
    pub const BLUETOOTH: u32 = 5;
    pub const WIFI_P2P: u32 = 30;
    pub const LOOPBACK: u32 = 32;
}

/// Object path NetworkManager uses for "no object".
pub const NO_OBJECT_PATH: &str = "/";

/// Connection setting names.
pub mod settings {
    pub const WIRELESS: &str = "802-11-wireless";
    pub const WIRELESS_SECURITY: &str = "802-11-wireless-security";
}

/// Defaults for the provisioning access point.
pub mod access_point {
    use std::net::Ipv4Addr;

    /// Address the adapter takes on the access point network.
    pub const DEFAULT_ADDRESS: Ipv4Addr = Ipv4Addr::new(192, 168, 2, 1);

    /// Prefix length of the access point network.
    pub const DEFAULT_PREFIX: u32 = 24;

    /// IEEE 802.11 SSIDs are at most 32 octets.
    pub const MAX_SSID_BYTES: usize = 32;

    pub const MIN_PSK_LEN: usize = 8;
    pub const MAX_PSK_LEN: usize = 63;

    /// Length of a raw hex-encoded pre-shared key.
    pub const HEX_PSK_LEN: usize = 64;

    /// Channels NetworkManager accepts for `band = "bg"`.
    pub const BG_CHANNELS: std::ops::RangeInclusive<u32> = 1..=14;

    /// Channels NetworkManager accepts for `band = "a"`.
    pub const A_CHANNELS: std::ops::RangeInclusive<u32> = 7..=196;
}

/// Timeout constants for remote calls.
pub mod timeouts {
    use std::time::Duration;

    /// Upper bound on a single D-Bus call (10 seconds).
    ///
    /// NetworkManager answers property reads in milliseconds; this only
    /// trips when the daemon is wedged.
    const CALL_TIMEOUT_SECS: u64 = 10;

    /// Returns the default per-call timeout.
    pub fn call_timeout() -> Duration {
        Duration::from_secs(CALL_TIMEOUT_SECS)
    }
}
