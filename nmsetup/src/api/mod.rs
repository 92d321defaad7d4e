//! Public API module.
//!
//! This module contains the high-level user-facing API for the `nmsetup` crate.

pub mod builders;
pub mod models;
pub mod network_manager;
