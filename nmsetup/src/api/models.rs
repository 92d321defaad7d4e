use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;
use std::time::Duration;
use thiserror::Error;
use zvariant::OwnedObjectPath;

use crate::types::constants::{access_point, device_type, timeouts};

/// NetworkManager device types.
///
/// Represents the type of network hardware managed by NetworkManager.
/// Codes without a dedicated variant are kept as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    /// Wired Ethernet device.
    Ethernet,
    /// Wi-Fi (802.11) wireless device.
    Wifi,
    /// Wi-Fi P2P (peer-to-peer) device.
    WifiP2P,
    /// Loopback device (localhost).
    Loopback,
    /// Bluetooth
    Bluetooth,
    /// Unknown or unsupported device type with raw code.
    Other(u32),
}

impl DeviceType {
    /// Returns the raw NetworkManager type code for this device.
    pub fn to_code(&self) -> u32 {
        match self {
            Self::Ethernet => device_type::ETHERNET,
            Self::Wifi => device_type::WIFI,
            Self::WifiP2P => device_type::WIFI_P2P,
            Self::Loopback => device_type::LOOPBACK,
            Self::Bluetooth => device_type::BLUETOOTH,
            Self::Other(code) => *code,
        }
    }

    /// Returns `true` if this device can host an access point.
    pub fn is_wireless(&self) -> bool {
        matches!(self, Self::Wifi)
    }
}

impl From<u32> for DeviceType {
    fn from(value: u32) -> Self {
        match value {
            device_type::ETHERNET => DeviceType::Ethernet,
            device_type::WIFI => DeviceType::Wifi,
            device_type::BLUETOOTH => DeviceType::Bluetooth,
            device_type::WIFI_P2P => DeviceType::WifiP2P,
            device_type::LOOPBACK => DeviceType::Loopback,
            v => DeviceType::Other(v),
        }
    }
}

impl Display for DeviceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceType::Ethernet => write!(f, "Ethernet"),
            DeviceType::Wifi => write!(f, "Wi-Fi"),
            DeviceType::WifiP2P => write!(f, "Wi-Fi P2P"),
            DeviceType::Loopback => write!(f, "Loopback"),
            DeviceType::Bluetooth => write!(f, "Bluetooth"),
            DeviceType::Other(v) => write!(f, "Other({v})"),
        }
    }
}

/// Which NetworkManager device list to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeviceScope {
    /// Devices NetworkManager manages (`GetDevices`).
    #[default]
    Managed,
    /// Every device, including placeholders for software devices that do
    /// not exist yet (`GetAllDevices`).
    All,
}

/// Security applied to the provisioning access point.
///
/// There is no default: callers must decide whether the setup network is
/// open or protected.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApSecurity {
    /// No authentication. Anyone in range can join.
    Open,
    /// WPA2-Personal with a pre-shared key.
    WpaPsk { psk: String },
}

// The passphrase never appears in debug output.
impl std::fmt::Debug for ApSecurity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApSecurity::Open => f.write_str("Open"),
            ApSecurity::WpaPsk { .. } => f
                .debug_struct("WpaPsk")
                .field("psk", &"<redacted>")
                .finish(),
        }
    }
}

impl ApSecurity {
    /// Returns `true` if clients must authenticate.
    pub fn secured(&self) -> bool {
        !matches!(self, ApSecurity::Open)
    }
}

/// WiFi band selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WifiBand {
    /// 2.4 GHz band
    Bg,
    /// 5 GHz band
    A,
}

impl WifiBand {
    /// Returns the value NetworkManager expects in `802-11-wireless.band`.
    pub fn as_str(&self) -> &'static str {
        match self {
            WifiBand::Bg => "bg",
            WifiBand::A => "a",
        }
    }
}

/// How the access point interface gets its IPv4 configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ipv4Method {
    /// Static address only. Clients need their own addressing.
    #[default]
    Manual,
    /// Static address plus NetworkManager's DHCP server and NAT.
    Shared,
}

/// Configuration for the first-time-setup access point.
///
/// # Example
///
/// ```rust
/// use nmsetup::{AccessPointConfig, ApSecurity, WifiBand};
///
/// let config = AccessPointConfig::new("setup-1234", ApSecurity::WpaPsk {
///     psk: "provision-me".into(),
/// })
/// .with_band(WifiBand::Bg)
/// .with_hidden(false);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPointConfig {
    /// Network name. Sent to NetworkManager as raw bytes.
    pub ssid: String,
    pub security: ApSecurity,
    /// Address the adapter takes on the access point network.
    pub address: Ipv4Addr,
    pub prefix: u32,
    pub ipv4_method: Ipv4Method,
    pub band: Option<WifiBand>,
    pub channel: Option<u32>,
    pub hidden: Option<bool>,
    /// Restricts the profile to one interface (e.g. "wlan0").
    pub interface_name: Option<String>,
    pub autoconnect: bool,
}

impl AccessPointConfig {
    /// Creates a configuration with the default `192.168.2.1/24` addressing.
    pub fn new(ssid: impl Into<String>, security: ApSecurity) -> Self {
        Self {
            ssid: ssid.into(),
            security,
            address: access_point::DEFAULT_ADDRESS,
            prefix: access_point::DEFAULT_PREFIX,
            ipv4_method: Ipv4Method::default(),
            band: None,
            channel: None,
            hidden: None,
            interface_name: None,
            autoconnect: false,
        }
    }

    pub fn with_address(mut self, address: Ipv4Addr, prefix: u32) -> Self {
        self.address = address;
        self.prefix = prefix;
        self
    }

    pub fn with_ipv4_method(mut self, method: Ipv4Method) -> Self {
        self.ipv4_method = method;
        self
    }

    pub fn with_band(mut self, band: WifiBand) -> Self {
        self.band = Some(band);
        self
    }

    pub fn with_channel(mut self, channel: u32) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    pub fn with_interface_name(mut self, name: impl Into<String>) -> Self {
        self.interface_name = Some(name.into());
        self
    }

    pub fn with_autoconnect(mut self, enabled: bool) -> Self {
        self.autoconnect = enabled;
        self
    }

    /// Checks the configuration before anything is sent over D-Bus.
    ///
    /// # Errors
    ///
    /// - `SetupError::InvalidSsid` if the SSID is empty or longer than 32 bytes
    /// - `SetupError::InvalidPsk` if the passphrase is not 8-63 characters
    ///   or 64 hex digits
    /// - `SetupError::InvalidAddress` if the prefix is outside 1-32 or the
    ///   address is unspecified
    /// - `SetupError::InvalidChannel` if a channel is set without a band, or
    ///   lies outside the band
    pub fn validate(&self) -> Result<(), SetupError> {
        crate::util::validation::validate_ssid(&self.ssid)?;

        if let ApSecurity::WpaPsk { psk } = &self.security {
            crate::util::validation::validate_psk(psk)?;
        }

        crate::util::validation::validate_ipv4(self.address, self.prefix)?;
        crate::util::validation::validate_channel(self.band, self.channel)
    }
}

/// Per-call timeout configuration.
///
/// ```rust
/// use nmsetup::TimeoutConfig;
/// use std::time::Duration;
///
/// let config = TimeoutConfig::new().with_call_timeout(Duration::from_secs(3));
/// assert_eq!(config.call_timeout, Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Upper bound on any single D-Bus call.
    pub call_timeout: Duration,
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            call_timeout: timeouts::call_timeout(),
        }
    }
}

/// Object paths returned by NetworkManager for a created access point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPointHandle {
    /// Saved connection profile (`/org/freedesktop/NetworkManager/Settings/*`).
    pub connection: OwnedObjectPath,
    /// Active connection (`/org/freedesktop/NetworkManager/ActiveConnection/*`).
    pub active_connection: OwnedObjectPath,
}

/// Errors that can occur while provisioning.
///
/// # Examples
///
/// ```no_run
/// use nmsetup::{NetworkManager, SetupError};
///
/// # async fn example() -> nmsetup::Result<()> {
/// let nm = NetworkManager::new().await?;
///
/// match nm.start().await {
///     Ok(session) => println!("using {}", session.adapter().as_str()),
///     Err(SetupError::NoWifiDevice) => eprintln!("no Wi-Fi adapter present"),
///     Err(e) => return Err(e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Error)]
pub enum SetupError {
    /// The system bus could not be reached or a call on it failed.
    #[error("D-Bus error: {0}")]
    Connection(#[from] zbus::Error),

    /// A specific D-Bus call failed.
    #[error("{context}: {source}")]
    DbusOperation {
        context: String,
        #[source]
        source: zbus::Error,
    },

    /// Enumeration succeeded but no Wi-Fi adapter was found.
    #[error("no Wi-Fi device found")]
    NoWifiDevice,

    /// Reading the classification of one entry failed.
    #[error("failed to classify {entry}: {source}")]
    Classification {
        entry: String,
        #[source]
        source: Box<SetupError>,
    },

    /// Creating or activating the access point connection failed.
    #[error("failed to configure access point: {source}")]
    Configuration {
        #[source]
        source: Box<SetupError>,
    },

    /// A remote call did not answer in time.
    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    /// SSID is empty or too long.
    #[error("invalid SSID: {0}")]
    InvalidSsid(String),

    /// Pre-shared key has the wrong length or format.
    #[error("invalid pre-shared key: {0}")]
    InvalidPsk(String),

    /// Invalid IP address or prefix.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Channel without a band, or outside the band.
    #[error("invalid channel: {0}")]
    InvalidChannel(String),
}

impl SetupError {
    /// Wraps this error as the cause of a failed configuration call.
    pub(crate) fn into_configuration(self) -> Self {
        SetupError::Configuration {
            source: Box::new(self),
        }
    }
}
