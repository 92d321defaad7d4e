use log::{debug, info};
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{AccessPointConfig, AccessPointHandle, DeviceScope, TimeoutConfig};
use crate::core::access_point::{configure_access_point, stop_access_point};
use crate::core::device::{
    NmDeviceSource, device_interface, list_wifi_devices, select_wifi_adapter,
};

/// Handle to NetworkManager on the system D-Bus.
///
/// Owns the bus connection and the settings every remote call uses. It is
/// created once per provisioning run and passed around explicitly.
///
/// # Example
///
/// ```no_run
/// use nmsetup::{AccessPointConfig, ApSecurity, NetworkManager};
///
/// # async fn example() -> nmsetup::Result<()> {
/// let nm = NetworkManager::new().await?;
///
/// let session = nm.start().await?;
/// let handle = session
///     .create_access_point(&AccessPointConfig::new("my-ap", ApSecurity::Open))
///     .await?;
/// println!("activating {}", handle.active_connection.as_str());
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
///
/// `NetworkManager` is `Clone`. Clones share the same underlying D-Bus
/// connection.
#[derive(Debug, Clone)]
pub struct NetworkManager {
    conn: Connection,
    timeouts: TimeoutConfig,
    scope: DeviceScope,
}

impl NetworkManager {
    /// Connects to the system D-Bus with default timeouts.
    pub async fn new() -> Result<Self> {
        Self::with_config(TimeoutConfig::default()).await
    }

    /// Connects to the system D-Bus with custom timeouts.
    pub async fn with_config(timeouts: TimeoutConfig) -> Result<Self> {
        let conn = Connection::system().await?;
        debug!("Connected to system bus");
        Ok(Self::from_connection(conn, timeouts))
    }

    /// Wraps an existing bus connection.
    pub fn from_connection(conn: Connection, timeouts: TimeoutConfig) -> Self {
        Self {
            conn,
            timeouts,
            scope: DeviceScope::default(),
        }
    }

    /// Chooses which device list adapter discovery enumerates.
    pub fn with_device_scope(mut self, scope: DeviceScope) -> Self {
        self.scope = scope;
        self
    }

    /// Returns the current timeout configuration.
    pub fn timeout_config(&self) -> &TimeoutConfig {
        &self.timeouts
    }

    pub fn device_scope(&self) -> DeviceScope {
        self.scope
    }

    /// Lists the object paths of all Wi-Fi adapters.
    ///
    /// Device types are read concurrently; the list keeps NetworkManager's
    /// device order and may be empty.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::Classification` if reading any device's type
    /// fails.
    pub async fn wifi_devices(&self) -> Result<Vec<OwnedObjectPath>> {
        list_wifi_devices(&self.conn, self.scope, &self.timeouts).await
    }

    /// Selects the first Wi-Fi adapter and opens a provisioning session on it.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::NoWifiDevice` if there is no Wi-Fi adapter.
    pub async fn start(&self) -> Result<Session> {
        info!("Starting network manager session");
        let source = NmDeviceSource::new(&self.conn).with_scope(self.scope);
        let adapter = select_wifi_adapter(&source, self.timeouts.call_timeout).await?;
        let interface = device_interface(&self.conn, &adapter).await;

        if let Some(name) = &interface {
            info!("Using Wi-Fi interface {name}");
        }

        Ok(Session {
            nm: self.clone(),
            adapter,
            interface,
        })
    }

    /// Closes the bus connection.
    ///
    /// The connection is shared, so every clone of this `NetworkManager`
    /// and every [`Session`] started from it stops working as well.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        debug!("Closed system bus connection");
        Ok(())
    }
}

/// One provisioning run: the bus connection plus the selected adapter.
#[derive(Debug, Clone)]
pub struct Session {
    nm: NetworkManager,
    adapter: OwnedObjectPath,
    interface: Option<String>,
}

impl Session {
    /// Object path of the selected Wi-Fi adapter.
    pub fn adapter(&self) -> &OwnedObjectPath {
        &self.adapter
    }

    /// Interface name of the adapter, if NetworkManager reported one.
    pub fn interface(&self) -> Option<&str> {
        self.interface.as_deref()
    }

    pub fn network_manager(&self) -> &NetworkManager {
        &self.nm
    }

    /// Creates the access point on the selected adapter.
    ///
    /// Issues exactly one `AddAndActivateConnection` call and does not wait
    /// for the connection to reach the activated state.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad config, or
    /// `SetupError::Configuration` if NetworkManager rejects the call.
    pub async fn create_access_point(&self, config: &AccessPointConfig) -> Result<AccessPointHandle> {
        configure_access_point(&self.nm.conn, &self.adapter, config, &self.nm.timeouts).await
    }

    /// Deactivates an access point created by this session.
    pub async fn stop_access_point(&self, handle: &AccessPointHandle) -> Result<()> {
        stop_access_point(&self.nm.conn, handle, &self.nm.timeouts).await
    }

    /// Ends the session and closes the bus connection.
    ///
    /// The connection is shared with the [`NetworkManager`] that started
    /// the session, which can no longer be used afterwards.
    pub async fn close(self) -> Result<()> {
        self.nm.close().await
    }
}
