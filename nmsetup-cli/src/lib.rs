//! One-shot bootstrapper that brings up the first-time-setup access point.

use std::net::Ipv4Addr;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgGroup, Parser, ValueEnum};
use log::{info, warn};

use nmsetup::{
    AccessPointConfig, ApSecurity, DeviceScope, Ipv4Method, NetworkManager, TimeoutConfig,
    WifiBand,
};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// 2.4 GHz
    Bg,
    /// 5 GHz
    A,
}

impl From<Band> for WifiBand {
    fn from(band: Band) -> Self {
        match band {
            Band::Bg => WifiBand::Bg,
            Band::A => WifiBand::A,
        }
    }
}

#[derive(Parser)]
#[command(name = "nmsetup")]
#[command(version, about = "Create a Wi-Fi access point for first time setup")]
#[command(group(ArgGroup::new("security").required(true).args(["open", "psk"])))]
pub struct Args {
    /// Network name to broadcast
    #[arg(long, default_value = "my-ap")]
    pub ssid: String,

    /// Run the access point without authentication
    #[arg(long)]
    pub open: bool,

    /// WPA2 passphrase (8-63 characters)
    #[arg(long, env = "NMSETUP_PSK", hide_env_values = true)]
    pub psk: Option<String>,

    /// Address the adapter takes on the access point network
    #[arg(long, default_value_t = Ipv4Addr::new(192, 168, 2, 1))]
    pub address: Ipv4Addr,

    /// Prefix length of the access point network
    #[arg(long, default_value_t = 24)]
    pub prefix: u32,

    /// Also serve DHCP to clients (ipv4.method=shared)
    #[arg(long)]
    pub shared: bool,

    #[arg(long, value_enum)]
    pub band: Option<Band>,

    #[arg(long, requires = "band")]
    pub channel: Option<u32>,

    /// Do not broadcast the SSID
    #[arg(long)]
    pub hidden: bool,

    /// Restrict the profile to this interface name
    #[arg(long)]
    pub interface: Option<String>,

    /// Upper bound on each D-Bus call, in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Enumerate every device, not only managed ones
    #[arg(long)]
    pub all_devices: bool,

    /// Tear the access point down after this many seconds
    #[arg(long)]
    pub stop_after: Option<u64>,
}

impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("ssid", &self.ssid)
            .field("open", &self.open)
            .field("psk", &self.psk.as_ref().map(|_| "<redacted>"))
            .field("address", &self.address)
            .field("prefix", &self.prefix)
            .field("shared", &self.shared)
            .field("band", &self.band)
            .field("channel", &self.channel)
            .field("hidden", &self.hidden)
            .field("interface", &self.interface)
            .field("timeout_secs", &self.timeout_secs)
            .field("all_devices", &self.all_devices)
            .field("stop_after", &self.stop_after)
            .finish()
    }
}

impl Args {
    pub fn access_point_config(&self) -> AccessPointConfig {
        let security = match &self.psk {
            Some(psk) => ApSecurity::WpaPsk { psk: psk.clone() },
            None => ApSecurity::Open,
        };

        let method = if self.shared {
            Ipv4Method::Shared
        } else {
            Ipv4Method::Manual
        };

        let mut config = AccessPointConfig::new(self.ssid.as_str(), security)
            .with_address(self.address, self.prefix)
            .with_ipv4_method(method);

        if let Some(band) = self.band {
            config = config.with_band(band.into());
        }
        if let Some(channel) = self.channel {
            config = config.with_channel(channel);
        }
        if self.hidden {
            config = config.with_hidden(true);
        }
        if let Some(interface) = &self.interface {
            config = config.with_interface_name(interface.as_str());
        }

        config
    }

    pub fn timeout_config(&self) -> TimeoutConfig {
        TimeoutConfig::new().with_call_timeout(Duration::from_secs(self.timeout_secs))
    }

    pub fn device_scope(&self) -> DeviceScope {
        if self.all_devices {
            DeviceScope::All
        } else {
            DeviceScope::Managed
        }
    }
}

/// Finds the Wi-Fi adapter and creates the access point.
///
/// Any failure is returned so the caller can exit non-zero.
pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.access_point_config();
    config
        .validate()
        .context("invalid access point settings")?;

    if !config.security.secured() {
        warn!(
            "Access point '{}' is open; anyone in range can join",
            config.ssid
        );
    }

    info!("Starting network manager...");
    let nm = NetworkManager::with_config(args.timeout_config())
        .await
        .context("failed to access system bus")?
        .with_device_scope(args.device_scope());

    let session = nm
        .start()
        .await
        .context("unable to find a Wi-Fi adapter")?;

    let handle = session
        .create_access_point(&config)
        .await
        .context("failed to create Wi-Fi access point")?;

    info!(
        "Access point '{}' created on {} ({})",
        config.ssid,
        session.interface().unwrap_or_else(|| session.adapter().as_str()),
        handle.connection.as_str()
    );

    if let Some(secs) = args.stop_after {
        info!("Stopping access point in {secs}s");
        tokio::time::sleep(Duration::from_secs(secs)).await;
        session
            .stop_access_point(&handle)
            .await
            .context("failed to stop Wi-Fi access point")?;
    }

    session
        .close()
        .await
        .context("failed to close system bus connection")?;
    Ok(())
}
