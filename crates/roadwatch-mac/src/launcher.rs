//! URI hand-off through `/usr/bin/open`.
//!
//! `open tel:...` routes the number to FaceTime or whichever app is
//! registered for the scheme. The command returns as soon as the app has
//! been asked; the call itself is outside our control.

use std::process::{Command, ExitStatus};

use thiserror::Error;
use tracing::{debug, warn};

const OPEN_PROGRAM: &str = "/usr/bin/open";

/// Errors that can occur while opening a URI.
#[derive(Debug, Error)]
pub enum OpenError {
    /// The string is not a `scheme:rest` URI.
    #[error("not a URI: {0:?}")]
    InvalidUri(String),

    /// `open` could not be started.
    #[error("failed to run open: {0}")]
    Spawn(#[from] std::io::Error),

    /// `open` found no application for the URI.
    #[error("open exited with status {0}")]
    Failed(ExitStatus),
}

/// Result type for launcher operations.
pub type Result<T> = std::result::Result<T, OpenError>;

/// Ask macOS to open `uri` with its registered application.
///
/// # Errors
///
/// Returns an error if `uri` has no scheme, or `open` fails.
pub fn open_uri(uri: &str) -> Result<()> {
    let Some(scheme) = scheme_of(uri) else {
        return Err(OpenError::InvalidUri(uri.to_string()));
    };

    debug!("Opening {uri}");
    let status = Command::new(OPEN_PROGRAM).arg(uri).status()?;
    if !status.success() {
        warn!("No application accepted {scheme}: URI");
        return Err(OpenError::Failed(status));
    }
    Ok(())
}

/// The RFC 3986 scheme of `uri`, if it has one followed by a non-empty rest.
fn scheme_of(uri: &str) -> Option<&str> {
    let (scheme, rest) = uri.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    (valid && !rest.is_empty()).then_some(scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_missing_scheme() {
        assert!(matches!(
            open_uri("0123456789"),
            Err(OpenError::InvalidUri(_))
        ));
    }

    #[test]
    fn test_rejects_empty_target() {
        assert!(matches!(open_uri("tel:"), Err(OpenError::InvalidUri(_))));
    }

    #[test]
    fn test_scheme_must_start_with_letter() {
        assert_eq!(scheme_of("tel:+33123456789"), Some("tel"));
        assert_eq!(scheme_of("x-call.v2+a:1"), Some("x-call.v2+a"));
        assert_eq!(scheme_of("1tel:123"), None);
        assert_eq!(scheme_of(":123"), None);
        assert_eq!(scheme_of("t el:123"), None);
        assert!(matches!(open_uri("1tel:123"), Err(OpenError::InvalidUri(_))));
    }

    #[test]
    fn test_error_display() {
        let err = OpenError::InvalidUri("x".to_string());
        assert_eq!(err.to_string(), "not a URI: \"x\"");
    }
}
