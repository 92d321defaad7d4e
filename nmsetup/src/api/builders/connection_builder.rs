//! Core connection builder for NetworkManager settings.
//!
//! Handles the `connection`, `ipv4` and `ipv6` sections and lets
//! type-specific builders add their own sections.

use std::collections::HashMap;
use uuid::Uuid;
use zvariant::Value;

/// Settings dictionary accepted by `AddAndActivateConnection`.
pub type ConnectionSettings = HashMap<&'static str, HashMap<&'static str, Value<'static>>>;

/// IP address configuration with CIDR prefix.
#[derive(Debug, Clone)]
pub struct IpConfig {
    pub address: String,
    pub prefix: u32,
}

impl IpConfig {
    /// Creates a new IP configuration.
    pub fn new(address: impl Into<String>, prefix: u32) -> Self {
        Self {
            address: address.into(),
            prefix,
        }
    }
}

/// Core connection settings builder.
///
/// # Sections Managed
///
/// - `connection`: Metadata (type, id, uuid, autoconnect settings)
/// - `ipv4`: IPv4 configuration
/// - `ipv6`: IPv6 configuration
///
/// ```rust
/// use nmsetup::builders::{ConnectionBuilder, IpConfig};
///
/// let settings = ConnectionBuilder::new("802-11-wireless", "setup")
///     .autoconnect(false)
///     .ipv4_manual(vec![IpConfig::new("192.168.2.1", 24)])
///     .ipv6_ignore()
///     .build();
///
/// assert!(settings.contains_key("ipv4"));
/// ```
pub struct ConnectionBuilder {
    settings: ConnectionSettings,
}

impl ConnectionBuilder {
    /// Creates a new connection builder with the specified type and ID.
    ///
    /// A random UUID is generated for the profile.
    pub fn new(connection_type: &str, id: impl Into<String>) -> Self {
        let mut settings = HashMap::new();
        let mut connection = HashMap::new();

        connection.insert("type", Value::from(connection_type.to_string()));
        connection.insert("id", Value::from(id.into()));
        connection.insert("uuid", Value::from(Uuid::new_v4().to_string()));

        settings.insert("connection", connection);

        Self { settings }
    }

    /// Sets a specific UUID for the connection.
    pub fn uuid(mut self, uuid: Uuid) -> Self {
        if let Some(conn) = self.settings.get_mut("connection") {
            conn.insert("uuid", Value::from(uuid.to_string()));
        }
        self
    }

    /// Restricts the connection to a specific interface (e.g., "wlan0").
    pub fn interface_name(mut self, name: impl Into<String>) -> Self {
        if let Some(conn) = self.settings.get_mut("connection") {
            conn.insert("interface-name", Value::from(name.into()));
        }
        self
    }

    /// Enables or disables automatic connection on boot/availability.
    pub fn autoconnect(mut self, enabled: bool) -> Self {
        if let Some(conn) = self.settings.get_mut("connection") {
            conn.insert("autoconnect", Value::from(enabled));
        }
        self
    }

    /// Configures IPv4 with manual (static) addresses.
    pub fn ipv4_manual(self, addresses: Vec<IpConfig>) -> Self {
        self.ipv4_with_addresses("manual", addresses)
    }

    /// Configures IPv4 for connection sharing on the given addresses.
    ///
    /// NetworkManager runs a DHCP server and NAT for connected clients.
    pub fn ipv4_shared(self, addresses: Vec<IpConfig>) -> Self {
        self.ipv4_with_addresses("shared", addresses)
    }

    /// Disables IPv6 for this connection.
    pub fn ipv6_ignore(mut self) -> Self {
        let mut ipv6 = HashMap::new();
        ipv6.insert("method", Value::from("ignore"));
        self.settings.insert("ipv6", ipv6);
        self
    }

    /// Adds or replaces a complete settings section.
    pub fn with_section(
        mut self,
        name: &'static str,
        section: HashMap<&'static str, Value<'static>>,
    ) -> Self {
        self.settings.insert(name, section);
        self
    }

    /// Builds the final settings dictionary.
    pub fn build(self) -> ConnectionSettings {
        self.settings
    }

    fn ipv4_with_addresses(mut self, method: &'static str, addresses: Vec<IpConfig>) -> Self {
        let mut ipv4 = HashMap::new();
        ipv4.insert("method", Value::from(method));

        // address-data is an array of {address, prefix} dictionaries
        let address_data: Vec<HashMap<String, Value<'static>>> = addresses
            .into_iter()
            .map(|config| {
                let mut addr_dict = HashMap::new();
                addr_dict.insert("address".to_string(), Value::from(config.address));
                addr_dict.insert("prefix".to_string(), Value::from(config.prefix));
                addr_dict
            })
            .collect();

        ipv4.insert("address-data", Value::from(address_data));
        self.settings.insert("ipv4", ipv4);
        self
    }
}
