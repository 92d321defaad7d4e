//! Wi-Fi access point connection builder.
//!
//! Builds the settings NetworkManager needs to run a wireless adapter in
//! AP mode:
//!
//! - `connection`: type `802-11-wireless`, id, uuid, autoconnect
//! - `802-11-wireless`: ssid (raw bytes), `mode = "ap"`, band, channel
//! - `802-11-wireless-security`: only for WPA-PSK
//! - `ipv4`: static address, optionally shared
//! - `ipv6`: ignored

use std::collections::HashMap;
use std::net::Ipv4Addr;
use zvariant::Value;

use super::connection_builder::{ConnectionBuilder, ConnectionSettings, IpConfig};
use crate::api::models::{AccessPointConfig, ApSecurity, Ipv4Method, WifiBand};
use crate::types::constants::settings;

/// Builder for access point (hotspot) connections.
///
/// Starts out open. Call [`wpa_psk`](Self::wpa_psk) to require a passphrase.
///
/// ```rust
/// use nmsetup::builders::AccessPointBuilder;
/// use std::net::Ipv4Addr;
///
/// let settings = AccessPointBuilder::new("my-ap")
///     .open()
///     .ipv4_manual(Ipv4Addr::new(192, 168, 2, 1), 24)
///     .build();
///
/// assert!(!settings.contains_key("802-11-wireless-security"));
/// ```
pub struct AccessPointBuilder {
    inner: ConnectionBuilder,
    ssid: String,
    secured: bool,
    hidden: Option<bool>,
    band: Option<WifiBand>,
    channel: Option<u32>,
}

impl AccessPointBuilder {
    /// Creates a builder for an access point broadcasting `ssid`.
    ///
    /// The profile does not autoconnect and ignores IPv6 unless told
    /// otherwise.
    pub fn new(ssid: impl Into<String>) -> Self {
        let ssid = ssid.into();
        let inner = ConnectionBuilder::new(settings::WIRELESS, &ssid)
            .autoconnect(false)
            .ipv6_ignore();

        Self {
            inner,
            ssid,
            secured: false,
            hidden: None,
            band: None,
            channel: None,
        }
    }

    /// Leaves the access point without authentication.
    pub fn open(self) -> Self {
        Self {
            secured: false,
            ..self
        }
    }

    /// Requires WPA2 (RSN, CCMP) with the given passphrase.
    pub fn wpa_psk(mut self, psk: impl Into<String>) -> Self {
        let mut security = HashMap::new();
        security.insert("key-mgmt", Value::from("wpa-psk"));
        security.insert("psk", Value::from(psk.into()));

        // WPA2 only; TKIP clients are not supported
        security.insert("proto", Self::string_array(&["rsn"]));
        security.insert("pairwise", Self::string_array(&["ccmp"]));
        security.insert("group", Self::string_array(&["ccmp"]));

        self.inner = self
            .inner
            .with_section(settings::WIRELESS_SECURITY, security);
        self.secured = true;
        self
    }

    /// Stops the SSID from being broadcast.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    /// Restricts the access point to one band.
    pub fn band(mut self, band: WifiBand) -> Self {
        self.band = Some(band);
        self
    }

    /// Pins the radio channel. NetworkManager requires a band when a
    /// channel is set.
    pub fn channel(mut self, channel: u32) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Restricts the profile to one interface.
    pub fn interface_name(mut self, name: impl Into<String>) -> Self {
        self.inner = self.inner.interface_name(name);
        self
    }

    pub fn autoconnect(mut self, enabled: bool) -> Self {
        self.inner = self.inner.autoconnect(enabled);
        self
    }

    /// Gives the adapter a static address on the access point network.
    pub fn ipv4_manual(mut self, address: Ipv4Addr, prefix: u32) -> Self {
        self.inner = self
            .inner
            .ipv4_manual(vec![IpConfig::new(address.to_string(), prefix)]);
        self
    }

    /// Like [`ipv4_manual`](Self::ipv4_manual), but NetworkManager also
    /// hands out DHCP leases to clients.
    pub fn ipv4_shared(mut self, address: Ipv4Addr, prefix: u32) -> Self {
        self.inner = self
            .inner
            .ipv4_shared(vec![IpConfig::new(address.to_string(), prefix)]);
        self
    }

    /// Builds the final connection settings dictionary.
    pub fn build(mut self) -> ConnectionSettings {
        let mut wireless = HashMap::new();
        wireless.insert("ssid", Value::from(self.ssid.as_bytes().to_vec()));
        wireless.insert("mode", Value::from("ap"));

        if let Some(hidden) = self.hidden {
            wireless.insert("hidden", Value::from(hidden));
        }

        if let Some(band) = self.band {
            wireless.insert("band", Value::from(band.as_str()));
        }

        if let Some(channel) = self.channel {
            wireless.insert("channel", Value::from(channel));
        }

        if self.secured {
            wireless.insert("security", Value::from(settings::WIRELESS_SECURITY));
        }

        self.inner = self.inner.with_section(settings::WIRELESS, wireless);

        self.inner.build()
    }

    fn string_array(xs: &[&str]) -> Value<'static> {
        let vals: Vec<String> = xs.iter().map(|s| s.to_string()).collect();
        Value::from(vals)
    }
}

/// Builds the settings dictionary for an [`AccessPointConfig`].
///
/// The config is expected to be validated already.
pub fn build_access_point_connection(config: &AccessPointConfig) -> ConnectionSettings {
    let mut builder = AccessPointBuilder::new(config.ssid.as_str()).autoconnect(config.autoconnect);

    builder = match &config.security {
        ApSecurity::Open => builder.open(),
        ApSecurity::WpaPsk { psk } => builder.wpa_psk(psk.as_str()),
    };

    builder = match config.ipv4_method {
        Ipv4Method::Manual => builder.ipv4_manual(config.address, config.prefix),
        Ipv4Method::Shared => builder.ipv4_shared(config.address, config.prefix),
    };

    if let Some(band) = config.band {
        builder = builder.band(band);
    }
    if let Some(channel) = config.channel {
        builder = builder.channel(channel);
    }
    if let Some(hidden) = config.hidden {
        builder = builder.hidden(hidden);
    }
    if let Some(name) = &config.interface_name {
        builder = builder.interface_name(name.as_str());
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_address_data(address: &str, prefix: u32) -> Value<'static> {
        let mut dict = HashMap::new();
        dict.insert("address".to_string(), Value::from(address.to_string()));
        dict.insert("prefix".to_string(), Value::from(prefix));
        Value::from(vec![dict])
    }

    #[test]
    fn builds_open_access_point() {
        let settings = AccessPointBuilder::new("my-ap")
            .open()
            .ipv4_manual(Ipv4Addr::new(192, 168, 2, 1), 24)
            .build();

        assert!(settings.contains_key("connection"));
        assert!(settings.contains_key("802-11-wireless"));
        assert!(settings.contains_key("ipv4"));
        assert!(settings.contains_key("ipv6"));
        assert!(!settings.contains_key("802-11-wireless-security"));

        let wireless = settings.get("802-11-wireless").unwrap();
        assert_eq!(wireless.get("ssid"), Some(&Value::from(b"my-ap".to_vec())));
        assert_eq!(wireless.get("mode"), Some(&Value::from("ap")));
        assert!(!wireless.contains_key("security"));

        let conn = settings.get("connection").unwrap();
        assert_eq!(conn.get("id"), Some(&Value::from("my-ap")));
        assert_eq!(conn.get("type"), Some(&Value::from("802-11-wireless")));
        assert_eq!(conn.get("autoconnect"), Some(&Value::from(false)));
    }

    #[test]
    fn builds_wpa_psk_access_point() {
        let settings = AccessPointBuilder::new("secure-ap")
            .wpa_psk("password123")
            .ipv4_manual(Ipv4Addr::new(192, 168, 2, 1), 24)
            .build();

        let security = settings.get("802-11-wireless-security").unwrap();
        assert_eq!(security.get("key-mgmt"), Some(&Value::from("wpa-psk")));
        assert_eq!(
            security.get("psk"),
            Some(&Value::from("password123".to_string()))
        );

        let wireless = settings.get("802-11-wireless").unwrap();
        assert_eq!(
            wireless.get("security"),
            Some(&Value::from("802-11-wireless-security"))
        );
    }

    #[test]
    fn ssid_is_sent_as_raw_bytes() {
        let settings = AccessPointBuilder::new("café").build();
        let wireless = settings.get("802-11-wireless").unwrap();
        assert_eq!(
            wireless.get("ssid"),
            Some(&Value::from("café".as_bytes().to_vec()))
        );
    }

    #[test]
    fn manual_address_data() {
        let settings = AccessPointBuilder::new("my-ap")
            .ipv4_manual(Ipv4Addr::new(192, 168, 2, 1), 24)
            .build();

        let ipv4 = settings.get("ipv4").unwrap();
        assert_eq!(ipv4.get("method"), Some(&Value::from("manual")));

        assert_eq!(
            ipv4.get("address-data"),
            Some(&expected_address_data("192.168.2.1", 24))
        );
    }

    #[test]
    fn configures_radio_options() {
        let settings = AccessPointBuilder::new("my-ap")
            .band(WifiBand::Bg)
            .channel(6)
            .hidden(true)
            .interface_name("wlan0")
            .build();

        let wireless = settings.get("802-11-wireless").unwrap();
        assert_eq!(wireless.get("band"), Some(&Value::from("bg")));
        assert_eq!(wireless.get("channel"), Some(&Value::from(6u32)));
        assert_eq!(wireless.get("hidden"), Some(&Value::from(true)));

        let conn = settings.get("connection").unwrap();
        assert_eq!(conn.get("interface-name"), Some(&Value::from("wlan0")));
    }

    #[test]
    fn builds_from_config() {
        let config = AccessPointConfig::new(
            "setup",
            ApSecurity::WpaPsk {
                psk: "provision".into(),
            },
        )
        .with_address(Ipv4Addr::new(10, 42, 0, 1), 24)
        .with_ipv4_method(Ipv4Method::Shared)
        .with_band(WifiBand::A)
        .with_autoconnect(true);

        let settings = build_access_point_connection(&config);

        assert!(settings.contains_key("802-11-wireless-security"));

        let ipv4 = settings.get("ipv4").unwrap();
        assert_eq!(ipv4.get("method"), Some(&Value::from("shared")));

        let wireless = settings.get("802-11-wireless").unwrap();
        assert_eq!(wireless.get("band"), Some(&Value::from("a")));

        let conn = settings.get("connection").unwrap();
        assert_eq!(conn.get("autoconnect"), Some(&Value::from(true)));
    }

    #[test]
    fn default_config_matches_first_time_setup_network() {
        let config = AccessPointConfig::new("my-ap", ApSecurity::Open);
        let settings = build_access_point_connection(&config);

        assert!(!settings.contains_key("802-11-wireless-security"));
        let ipv4 = settings.get("ipv4").unwrap();
        assert_eq!(
            ipv4.get("address-data"),
            Some(&expected_address_data("192.168.2.1", 24))
        );
    }
}
