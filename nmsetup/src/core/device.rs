//! Network device enumeration and Wi-Fi adapter selection.
//!
//! Exposes NetworkManager's device list as an [`EntrySource`] so the
//! device type of every adapter is read in parallel.

use async_trait::async_trait;
use log::{debug, info};
use std::time::Duration;
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::try_log;
use crate::api::models::{DeviceScope, DeviceType, SetupError, TimeoutConfig};
use crate::core::discovery::{EntrySource, discover};
use crate::dbus::{NMDeviceProxy, NMProxy};

/// NetworkManager devices, classified by their `DeviceType` property.
pub struct NmDeviceSource<'a> {
    conn: &'a Connection,
    scope: DeviceScope,
}

impl<'a> NmDeviceSource<'a> {
    /// Lists the devices NetworkManager manages (`GetDevices`).
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            scope: DeviceScope::Managed,
        }
    }

    /// Lists every device, including placeholders (`GetAllDevices`).
    pub fn all_devices(self) -> Self {
        Self {
            scope: DeviceScope::All,
            ..self
        }
    }

    pub fn with_scope(self, scope: DeviceScope) -> Self {
        Self { scope, ..self }
    }
}

#[async_trait]
impl EntrySource for NmDeviceSource<'_> {
    type Entry = OwnedObjectPath;
    type Class = DeviceType;

    const LIST_OPERATION: &'static str = "list devices";
    const CLASSIFY_OPERATION: &'static str = "DeviceType";

    async fn list_entries(&self) -> Result<Vec<OwnedObjectPath>> {
        let proxy = NMProxy::new(self.conn)
            .await
            .map_err(|e| SetupError::DbusOperation {
                context: "failed to create NetworkManager proxy".to_string(),
                source: e,
            })?;

        let paths = match self.scope {
            DeviceScope::Managed => proxy.get_devices().await,
            DeviceScope::All => proxy.get_all_devices().await,
        }
        .map_err(|e| SetupError::DbusOperation {
            context: "failed to get device paths from NetworkManager".to_string(),
            source: e,
        })?;
        Ok(paths)
    }

    async fn classify_entry(&self, entry: &OwnedObjectPath) -> Result<DeviceType> {
        let d_proxy = NMDeviceProxy::builder(self.conn)
            .path(entry.clone())?
            .build()
            .await
            .map_err(|e| SetupError::DbusOperation {
                context: format!("failed to create device proxy for {}", entry.as_str()),
                source: e,
            })?;

        let raw_type = d_proxy
            .device_type()
            .await
            .map_err(|e| SetupError::DbusOperation {
                context: format!("failed to get device type for {}", entry.as_str()),
                source: e,
            })?;
        debug!("Device {} has type {}", entry.as_str(), raw_type);
        Ok(raw_type.into())
    }
}

/// Lists the object paths of all Wi-Fi devices, in NetworkManager's order.
pub(crate) async fn list_wifi_devices(
    conn: &Connection,
    scope: DeviceScope,
    timeouts: &TimeoutConfig,
) -> Result<Vec<OwnedObjectPath>> {
    let source = NmDeviceSource::new(conn).with_scope(scope);
    discover(&source, &DeviceType::Wifi, timeouts.call_timeout).await
}

/// Picks the first Wi-Fi device, in enumeration order.
///
/// Returns `NoWifiDevice` if the source has none.
pub async fn select_wifi_adapter<S>(source: &S, call_timeout: Duration) -> Result<S::Entry>
where
    S: EntrySource<Class = DeviceType>,
{
    let devices = discover(source, &DeviceType::Wifi, call_timeout).await?;
    debug!("Found {} Wi-Fi device(s)", devices.len());

    let adapter = devices
        .into_iter()
        .next()
        .ok_or(SetupError::NoWifiDevice)?;

    info!("Selected Wi-Fi adapter {adapter}");
    Ok(adapter)
}

/// Reads the interface name of a device, for display.
///
/// Returns `None` on any failure; the name is informational only.
pub(crate) async fn device_interface(conn: &Connection, path: &OwnedObjectPath) -> Option<String> {
    let builder = try_log!(
        NMDeviceProxy::builder(conn).path(path.clone()),
        "Failed to create device proxy builder"
    );
    let d_proxy = try_log!(builder.build().await, "Failed to build device proxy");
    let interface = try_log!(d_proxy.interface().await, "Failed to get interface name");
    Some(interface)
}
