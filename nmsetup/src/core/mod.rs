//! Core internal logic for adapter discovery and access point setup.

pub(crate) mod access_point;
pub mod discovery;
pub(crate) mod device;
