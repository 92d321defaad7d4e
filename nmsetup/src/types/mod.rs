//! Type definitions and constants.
//!
//! This module contains NetworkManager constants.

pub(crate) mod constants;
