//! Linux-specific implementation for roadwatch
//!
//! Hands URIs (`tel:` for calls) to the desktop through `xdg-open`.

#![cfg(target_os = "linux")]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::Command;

use thiserror::Error;

/// Program used to open URIs.
const OPENER: &str = "xdg-open";

/// Errors raised while handing a URI to the desktop.
#[derive(Debug, Error)]
pub enum OpenError {
    /// The URI has no `scheme:` prefix.
    #[error("not a URI: {0:?}")]
    InvalidUri(String),

    /// The opener could not be started.
    #[error("failed to run xdg-open: {0}")]
    Spawn(#[from] std::io::Error),

    /// The opener ran but reported failure.
    #[error("xdg-open exited with status {0}")]
    Failed(std::process::ExitStatus),
}

/// Initialize Linux-specific components
///
/// # Errors
///
/// Returns an error if initialization fails
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!("Initializing Linux platform components");
    Ok(())
}

/// Get platform name
#[must_use]
pub fn platform_name() -> &'static str {
    "Linux"
}

/// Ask the desktop to open `uri` with its registered handler.
///
/// Returns once the handler accepted the request; what happens next (a call
/// screen, a softphone) is up to the desktop.
///
/// # Errors
///
/// Returns an error if `uri` is malformed, `xdg-open` is missing, or it
/// reports that no handler took the URI.
pub fn open_uri(uri: &str) -> Result<(), OpenError> {
    if !has_scheme(uri) {
        return Err(OpenError::InvalidUri(uri.to_string()));
    }

    tracing::debug!("{OPENER} {uri}");
    let status = Command::new(OPENER).arg(uri).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(OpenError::Failed(status))
    }
}

fn has_scheme(uri: &str) -> bool {
    match uri.split_once(':') {
        Some((scheme, rest)) => {
            !rest.is_empty()
                && scheme
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert!(init().is_ok());
    }

    #[test]
    fn test_platform_name() {
        assert_eq!(platform_name(), "Linux");
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("tel:+33123456789"));
        assert!(!has_scheme("+33123456789"));
        assert!(!has_scheme("tel:"));
        assert!(!has_scheme(":123"));
        assert!(!has_scheme("1tel:123"));
    }

    #[test]
    fn test_open_uri_rejects_bare_number() {
        let err = open_uri("0123456789").unwrap_err();
        assert!(matches!(err, OpenError::InvalidUri(_)));
    }
}
