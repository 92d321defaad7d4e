//! Access point creation and teardown.
//!
//! A single `AddAndActivateConnection` call creates the profile and
//! starts the access point on the chosen adapter. Nothing waits for the
//! activation to finish.

use log::{debug, info};
use zbus::Connection;
use zvariant::{ObjectPath, OwnedObjectPath};

use crate::Result;
use crate::api::builders::build_access_point_connection;
use crate::api::models::{AccessPointConfig, AccessPointHandle, SetupError, TimeoutConfig};
use crate::dbus::NMProxy;
use crate::types::constants::NO_OBJECT_PATH;
use crate::util::timeout::with_timeout;

/// Creates and activates an access point connection on `adapter`.
///
/// # Errors
///
/// Validation errors (`InvalidSsid`, `InvalidPsk`, `InvalidAddress`) are
/// returned before anything is sent. Failures of the remote call come back
/// as `SetupError::Configuration`.
pub(crate) async fn configure_access_point(
    conn: &Connection,
    adapter: &OwnedObjectPath,
    config: &AccessPointConfig,
    timeouts: &TimeoutConfig,
) -> Result<AccessPointHandle> {
    config.validate()?;

    let settings = build_access_point_connection(config);
    debug!(
        "Creating access point '{}' on {} (secured: {})",
        config.ssid,
        adapter.as_str(),
        config.security.secured()
    );

    let call = async {
        let nm = nm_proxy(conn).await?;
        let specific_object: OwnedObjectPath =
            ObjectPath::from_static_str_unchecked(NO_OBJECT_PATH).into();
        let paths = nm
            .add_and_activate_connection(settings, adapter.clone(), specific_object)
            .await
            .map_err(|e| SetupError::DbusOperation {
                context: format!("AddAndActivateConnection on {} failed", adapter.as_str()),
                source: e,
            })?;
        Ok::<_, SetupError>(paths)
    };

    let (connection, active_connection) =
        with_timeout("AddAndActivateConnection", timeouts.call_timeout, call)
            .await
            .map_err(SetupError::into_configuration)?;

    info!(
        "Access point '{}' activating ({})",
        config.ssid,
        active_connection.as_str()
    );

    Ok(AccessPointHandle {
        connection,
        active_connection,
    })
}

/// Deactivates a previously created access point.
///
/// The saved profile is left in place.
pub(crate) async fn stop_access_point(
    conn: &Connection,
    handle: &AccessPointHandle,
    timeouts: &TimeoutConfig,
) -> Result<()> {
    let call = async {
        let nm = nm_proxy(conn).await?;
        nm.deactivate_connection(handle.active_connection.clone())
            .await
            .map_err(|e| SetupError::DbusOperation {
                context: format!(
                    "DeactivateConnection on {} failed",
                    handle.active_connection.as_str()
                ),
                source: e,
            })?;
        Ok::<_, SetupError>(())
    };

    with_timeout("DeactivateConnection", timeouts.call_timeout, call).await?;
    info!("Access point {} deactivated", handle.active_connection.as_str());
    Ok(())
}

async fn nm_proxy(conn: &Connection) -> Result<NMProxy<'static>> {
    NMProxy::new(conn)
        .await
        .map_err(|e| SetupError::DbusOperation {
            context: "failed to create NetworkManager proxy".to_string(),
            source: e,
        })
}
