//! Add-form input and validation.
//!
//! An [`ObstacleDraft`] holds the raw text a user typed. Nothing reaches the
//! store until [`ObstacleDraft::validate`] accepts it.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::location::{LocationError, LocationProvider};
use crate::obstacle::{Location, Obstacle, Position};

/// Reasons the add form is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The description is empty once trimmed.
    #[error("please enter a description of the obstacle")]
    MissingDescription,

    /// A coordinate is unparsable, missing its pair, or out of range.
    #[error("invalid coordinates (latitude: -90 to 90, longitude: -180 to 180)")]
    InvalidCoordinates,
}

/// Raw, unvalidated add-form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObstacleDraft {
    /// Free-text description.
    pub description: String,
    /// Latitude as typed, possibly empty.
    pub latitude: String,
    /// Longitude as typed, possibly empty.
    pub longitude: String,
}

impl ObstacleDraft {
    /// Create a draft with a description and empty coordinate fields.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set both coordinate fields.
    #[must_use]
    pub fn with_coordinates(
        mut self,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Self {
        self.latitude = latitude.into();
        self.longitude = longitude.into();
        self
    }

    /// Fill the coordinate fields from the device position.
    ///
    /// On failure the fields keep whatever they held before, and the draft
    /// can still be saved.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`LocationError`] when permission is denied or
    /// no position is available.
    pub async fn use_current_position<P>(
        &mut self,
        provider: &P,
    ) -> Result<Position, LocationError>
    where
        P: LocationProvider + ?Sized,
    {
        match provider.current_position().await {
            Ok(position) => {
                self.latitude = position.latitude().to_string();
                self.longitude = position.longitude().to_string();
                debug!(
                    "Filled draft coordinates from {}: {}, {}",
                    provider.name(),
                    self.latitude,
                    self.longitude
                );
                Ok(position)
            }
            Err(err) => {
                warn!(
                    "Could not get current position from {}: {err}",
                    provider.name()
                );
                Err(err)
            }
        }
    }

    /// Validate the draft.
    ///
    /// Rules apply in order: the trimmed description must be non-empty; if
    /// either coordinate field is filled, both must parse as finite numbers;
    /// parsed values must lie within range. Two empty coordinate fields mean
    /// no location.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<ValidatedObstacle, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        let latitude = self.latitude.trim();
        let longitude = self.longitude.trim();

        let location = if latitude.is_empty() && longitude.is_empty() {
            Location::None
        } else {
            let latitude = parse_coordinate(latitude)?;
            let longitude = parse_coordinate(longitude)?;
            Location::Point(Position::new(latitude, longitude)?)
        };

        Ok(ValidatedObstacle {
            description: description.to_string(),
            location,
        })
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, ValidationError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(ValidationError::InvalidCoordinates)
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedObstacle {
    description: String,
    location: Location,
}

impl ValidatedObstacle {
    /// The trimmed description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The validated location.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// Turn this into a new obstacle with a fresh id and the current time.
    #[must_use]
    pub fn into_obstacle(self) -> Obstacle {
        Obstacle::from_checked(self.description, self.location, Utc::now())
    }
}
