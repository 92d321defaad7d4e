//! Tests for input validation.
//!
//! These tests verify that invalid access point settings are rejected
//! before any D-Bus call, with clear error messages.

use nmsetup::{AccessPointConfig, ApSecurity, Ipv4Method, SetupError, WifiBand};
use std::net::Ipv4Addr;

fn psk(value: &str) -> ApSecurity {
    ApSecurity::WpaPsk {
        psk: value.to_string(),
    }
}

#[test]
fn test_invalid_ssid_empty() {
    let config = AccessPointConfig::new("", ApSecurity::Open);
    assert!(matches!(config.validate(), Err(SetupError::InvalidSsid(_))));
}

#[test]
fn test_invalid_ssid_too_long() {
    let config = AccessPointConfig::new("a".repeat(33), ApSecurity::Open);
    assert!(matches!(config.validate(), Err(SetupError::InvalidSsid(_))));
}

#[test]
fn test_valid_ssid() {
    let valid_ssids = vec![
        "my-ap",
        "Test-Network_123",
        "A",
        "12345678901234567890123456789012", // Exactly 32 bytes
    ];

    for ssid in valid_ssids {
        let config = AccessPointConfig::new(ssid, ApSecurity::Open);
        assert!(config.validate().is_ok(), "SSID '{}' should be valid", ssid);
    }
}

#[test]
fn test_invalid_wpa_psk_too_short() {
    let config = AccessPointConfig::new("my-ap", psk("short"));
    assert!(matches!(config.validate(), Err(SetupError::InvalidPsk(_))));
}

#[test]
fn test_invalid_wpa_psk_too_long() {
    let config = AccessPointConfig::new("my-ap", psk(&"a".repeat(65)));
    assert!(matches!(config.validate(), Err(SetupError::InvalidPsk(_))));
}

#[test]
fn test_valid_wpa_psk() {
    let binding = "a".repeat(63);
    let hex = "0123456789ABCDEF".repeat(4);
    let valid_passwords = vec![
        "password",    // 8 chars (minimum)
        "password123", // 11 chars
        &binding,      // 63 chars (maximum)
        &hex,          // raw 256-bit key
    ];

    for password in valid_passwords {
        let config = AccessPointConfig::new("my-ap", psk(password));
        assert!(config.validate().is_ok(), "'{}' should be valid", password);
    }
}

#[test]
fn test_non_hex_64_char_psk_rejected() {
    let config = AccessPointConfig::new("my-ap", psk(&"z".repeat(64)));
    assert!(matches!(config.validate(), Err(SetupError::InvalidPsk(_))));
}

#[test]
fn test_open_network_skips_psk_checks() {
    let config = AccessPointConfig::new("my-ap", ApSecurity::Open);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_prefix() {
    for prefix in [0, 33, 64] {
        let config = AccessPointConfig::new("my-ap", ApSecurity::Open)
            .with_address(Ipv4Addr::new(192, 168, 2, 1), prefix);
        assert!(
            matches!(config.validate(), Err(SetupError::InvalidAddress(_))),
            "prefix {} should be rejected",
            prefix
        );
    }
}

#[test]
fn test_unassignable_address() {
    for address in [Ipv4Addr::UNSPECIFIED, Ipv4Addr::BROADCAST] {
        let config = AccessPointConfig::new("my-ap", ApSecurity::Open).with_address(address, 24);
        assert!(matches!(
            config.validate(),
            Err(SetupError::InvalidAddress(_))
        ));
    }
}

#[test]
fn test_channel_without_band_rejected() {
    let config = AccessPointConfig::new("my-ap", ApSecurity::Open).with_channel(6);
    assert!(matches!(
        config.validate(),
        Err(SetupError::InvalidChannel(_))
    ));
}

#[test]
fn test_channel_outside_band_rejected() {
    let cases = [(WifiBand::Bg, 36), (WifiBand::Bg, 0), (WifiBand::A, 200)];

    for (band, channel) in cases {
        let config = AccessPointConfig::new("my-ap", ApSecurity::Open)
            .with_band(band)
            .with_channel(channel);
        assert!(
            matches!(config.validate(), Err(SetupError::InvalidChannel(_))),
            "channel {} should be rejected for {:?}",
            channel,
            band
        );
    }
}

#[test]
fn test_channel_within_band() {
    for (band, channel) in [(WifiBand::Bg, 1), (WifiBand::Bg, 11), (WifiBand::A, 36)] {
        let config = AccessPointConfig::new("my-ap", ApSecurity::Open)
            .with_band(band)
            .with_channel(channel);
        assert!(config.validate().is_ok());
    }
}

#[test]
fn test_band_without_channel_is_valid() {
    let config = AccessPointConfig::new("my-ap", ApSecurity::Open).with_band(WifiBand::A);
    assert!(config.validate().is_ok());
}

#[test]
fn test_fully_specified_config_is_valid() {
    let config = AccessPointConfig::new("setup-1234", psk("provision-me"))
        .with_address(Ipv4Addr::new(10, 42, 0, 1), 24)
        .with_ipv4_method(Ipv4Method::Shared)
        .with_band(WifiBand::Bg)
        .with_channel(6)
        .with_hidden(false)
        .with_interface_name("wlan0")
        .with_autoconnect(false);

    assert!(config.validate().is_ok());
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = AccessPointConfig::new("my-ap", psk("short"))
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("pre-shared key"));

    let err = AccessPointConfig::new("", ApSecurity::Open)
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("SSID"));
}
