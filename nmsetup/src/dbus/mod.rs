//! D-Bus proxy interfaces for NetworkManager.
//!
//! Low-level proxy definitions for the parts of NetworkManager's
//! system bus API that provisioning touches:
//!
//! - `/org/freedesktop/NetworkManager` - Main NM object
//! - `/org/freedesktop/NetworkManager/Devices/*` - Device objects

mod device;
mod main_nm;

pub(crate) use device::NMDeviceProxy;
pub(crate) use main_nm::NMProxy;
