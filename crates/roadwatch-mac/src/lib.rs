//! macOS-specific implementation for roadwatch.
//!
//! This crate provides macOS-specific functionality for the roadwatch project:
//! handing `tel:` URIs to the system through `open(1)`.

#![cfg(target_os = "macos")]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod launcher;

pub use launcher::{open_uri, OpenError};

/// Initialize macOS-specific components.
///
/// # Errors
///
/// Returns an error if initialization fails.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!("Initializing macOS platform components");
    Ok(())
}

/// Get the platform name.
#[must_use]
pub fn platform_name() -> &'static str {
    "macOS"
}
