//! Device location boundary.
//!
//! The core never talks to positioning hardware. It asks a
//! [`LocationProvider`] for a one-shot position and degrades to "no
//! coordinates" when the provider refuses.

use thiserror::Error;

use crate::obstacle::Position;

/// Why a position could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user did not grant location permission.
    #[error("location permission is required to get the current position")]
    PermissionDenied,

    /// No position source answered.
    #[error("the current position is unavailable")]
    Unavailable,
}

/// A source of the current device position.
#[async_trait::async_trait]
pub trait LocationProvider: Send + Sync {
    /// The name of this provider (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Request permission if needed, then fetch the current position once.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::PermissionDenied`] if permission is refused
    /// and [`LocationError::Unavailable`] if no position can be produced.
    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// Always reports the same configured position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    position: Position,
}

impl FixedLocationProvider {
    /// Create a provider for a known position.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

#[async_trait::async_trait]
impl LocationProvider for FixedLocationProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn current_position(&self) -> Result<Position, LocationError> {
        Ok(self.position)
    }
}

/// Behaves as if the user refused location permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocationProvider;

#[async_trait::async_trait]
impl LocationProvider for DeniedLocationProvider {
    fn name(&self) -> &'static str {
        "denied"
    }

    async fn current_position(&self) -> Result<Position, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

/// Has no positioning source.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocationProvider;

#[async_trait::async_trait]
impl LocationProvider for UnavailableLocationProvider {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn current_position(&self) -> Result<Position, LocationError> {
        Err(LocationError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_provider_returns_position() {
        let position = Position::new(48.8566, 2.3522).unwrap();
        let provider = FixedLocationProvider::new(position);
        assert_eq!(provider.current_position().await, Ok(position));
        assert_eq!(provider.name(), "fixed");
    }

    #[tokio::test]
    async fn test_denied_provider() {
        assert_eq!(
            DeniedLocationProvider.current_position().await,
            Err(LocationError::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn test_unavailable_provider() {
        assert_eq!(
            UnavailableLocationProvider.current_position().await,
            Err(LocationError::Unavailable)
        );
    }

    #[tokio::test]
    async fn test_provider_behind_box() {
        let provider: Box<dyn LocationProvider> = Box::new(UnavailableLocationProvider);
        assert!(provider.current_position().await.is_err());
        assert_eq!(provider.name(), "unavailable");
    }

    #[test]
    fn test_location_error_display() {
        assert!(LocationError::PermissionDenied
            .to_string()
            .contains("permission"));
        assert!(LocationError::Unavailable
            .to_string()
            .contains("unavailable"));
    }
}
