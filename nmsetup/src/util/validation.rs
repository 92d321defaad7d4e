//! Input validation for access point settings.
//!
//! Invalid input is rejected here so NetworkManager never sees a settings
//! dictionary it would refuse.

use std::net::Ipv4Addr;

use crate::api::models::{SetupError, WifiBand};
use crate::types::constants::access_point::{
    A_CHANNELS, BG_CHANNELS, HEX_PSK_LEN, MAX_PSK_LEN, MAX_SSID_BYTES, MIN_PSK_LEN,
};

pub(crate) fn validate_ssid(ssid: &str) -> Result<(), SetupError> {
    if ssid.is_empty() {
        return Err(SetupError::InvalidSsid("SSID cannot be empty".into()));
    }

    if ssid.len() > MAX_SSID_BYTES {
        return Err(SetupError::InvalidSsid(format!(
            "SSID is {} bytes (max {})",
            ssid.len(),
            MAX_SSID_BYTES
        )));
    }

    Ok(())
}

/// Accepts an 8-63 character ASCII passphrase or a 64 digit hex key.
pub(crate) fn validate_psk(psk: &str) -> Result<(), SetupError> {
    if psk.len() == HEX_PSK_LEN {
        if psk.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(());
        }
        return Err(SetupError::InvalidPsk(
            "64 character keys must be hexadecimal".into(),
        ));
    }

    if !psk.is_ascii() {
        return Err(SetupError::InvalidPsk(
            "passphrase must be ASCII".into(),
        ));
    }

    if !(MIN_PSK_LEN..=MAX_PSK_LEN).contains(&psk.len()) {
        return Err(SetupError::InvalidPsk(format!(
            "passphrase has {} characters (expected {}-{})",
            psk.len(),
            MIN_PSK_LEN,
            MAX_PSK_LEN
        )));
    }

    Ok(())
}

pub(crate) fn validate_ipv4(address: Ipv4Addr, prefix: u32) -> Result<(), SetupError> {
    if address.is_unspecified() || address.is_broadcast() {
        return Err(SetupError::InvalidAddress(format!(
            "{address} cannot be assigned to an interface"
        )));
    }

    if !(1..=32).contains(&prefix) {
        return Err(SetupError::InvalidAddress(format!(
            "IPv4 CIDR prefix out of range: {prefix} (expected 1-32)"
        )));
    }

    Ok(())
}

/// A channel is only meaningful together with a band, and must lie in
/// that band's range.
pub(crate) fn validate_channel(
    band: Option<WifiBand>,
    channel: Option<u32>,
) -> Result<(), SetupError> {
    let Some(channel) = channel else {
        return Ok(());
    };

    let Some(band) = band else {
        return Err(SetupError::InvalidChannel(format!(
            "channel {channel} requires a band"
        )));
    };

    let range = match band {
        WifiBand::Bg => BG_CHANNELS,
        WifiBand::A => A_CHANNELS,
    };

    if !range.contains(&channel) {
        return Err(SetupError::InvalidChannel(format!(
            "channel {channel} is outside {}-{} for band '{}'",
            range.start(),
            range.end(),
            band.as_str()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssid_bounds() {
        assert!(validate_ssid("").is_err());
        assert!(validate_ssid("a").is_ok());
        assert!(validate_ssid(&"a".repeat(32)).is_ok());
        assert!(validate_ssid(&"a".repeat(33)).is_err());
    }

    #[test]
    fn ssid_length_counts_bytes() {
        // 22 characters, 33 bytes
        let ssid = "ü".repeat(11) + &"a".repeat(11);
        assert!(validate_ssid(&ssid).is_err());
    }

    #[test]
    fn psk_bounds() {
        assert!(validate_psk("short").is_err());
        assert!(validate_psk("password").is_ok());
        assert!(validate_psk(&"a".repeat(63)).is_ok());
        assert!(validate_psk(&"g".repeat(64)).is_err());
        assert!(validate_psk(&"0123456789abcdef".repeat(4)).is_ok());
        assert!(validate_psk(&"a".repeat(65)).is_err());
    }

    #[test]
    fn ipv4_prefix_bounds() {
        let addr = Ipv4Addr::new(192, 168, 2, 1);
        assert!(validate_ipv4(addr, 0).is_err());
        assert!(validate_ipv4(addr, 24).is_ok());
        assert!(validate_ipv4(addr, 32).is_ok());
        assert!(validate_ipv4(addr, 33).is_err());
        assert!(validate_ipv4(Ipv4Addr::UNSPECIFIED, 24).is_err());
    }

    #[test]
    fn channel_needs_band() {
        assert!(validate_channel(None, None).is_ok());
        assert!(validate_channel(Some(WifiBand::A), None).is_ok());
        assert!(validate_channel(None, Some(6)).is_err());
        assert!(validate_channel(Some(WifiBand::Bg), Some(6)).is_ok());
        assert!(validate_channel(Some(WifiBand::Bg), Some(36)).is_err());
        assert!(validate_channel(Some(WifiBand::A), Some(36)).is_ok());
        assert!(validate_channel(Some(WifiBand::A), Some(0)).is_err());
    }
}
