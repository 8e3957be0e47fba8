//! Core obstacle types for roadwatch.
//!
//! This module defines the obstacle record persisted by the store, its
//! identifier, and the optional GPS point attached to it.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::draft::ValidationError;

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Opaque obstacle identifier.
///
/// New obstacles get a random UUID. Identifiers found in an existing
/// document are kept verbatim, whatever their format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObstacleId(String);

impl ObstacleId {
    /// Generate a fresh, collision-resistant identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObstacleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ObstacleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A GPS point whose coordinates are finite and within range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    latitude: f64,
    longitude: f64,
}

impl Position {
    /// Create a position, checking both coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCoordinates`] if either value is not
    /// finite or falls outside its range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if latitude.is_finite()
            && longitude.is_finite()
            && LATITUDE_RANGE.contains(&latitude)
            && LONGITUDE_RANGE.contains(&longitude)
        {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(ValidationError::InvalidCoordinates)
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Where an obstacle was reported.
///
/// Either both coordinates are known or neither is; a half-set location
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Location {
    /// No coordinates were attached.
    #[default]
    None,
    /// A checked GPS point.
    Point(Position),
}

impl Location {
    /// Get the position, if any.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::None => None,
            Self::Point(position) => Some(*position),
        }
    }
}

impl From<Position> for Location {
    fn from(position: Position) -> Self {
        Self::Point(position)
    }
}

/// A reported road-transport obstacle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObstacleRecord", into = "ObstacleRecord")]
pub struct Obstacle {
    id: ObstacleId,
    description: String,
    location: Location,
    timestamp: DateTime<Utc>,
}

impl Obstacle {
    /// Create a new obstacle with a fresh id, recorded now.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingDescription`] if the description is
    /// blank once trimmed.
    pub fn new(description: &str, location: Location) -> Result<Self, ValidationError> {
        Self::recorded_at(description, location, Utc::now())
    }

    /// Create a new obstacle with a fresh id and an explicit creation time.
    ///
    /// The timestamp is truncated to millisecond precision, the precision of
    /// the persisted form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingDescription`] if the description is
    /// blank once trimmed.
    pub fn recorded_at(
        description: &str,
        location: Location,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        Ok(Self::from_checked(description.to_string(), location, timestamp))
    }

    /// Build an obstacle from a description that is already trimmed and
    /// non-empty.
    pub(crate) fn from_checked(
        description: String,
        location: Location,
        timestamp: DateTime<Utc>,
    ) -> Self {
        debug_assert!(!description.trim().is_empty());
        Self {
            id: ObstacleId::generate(),
            description,
            location,
            timestamp: timestamp.trunc_subsecs(3),
        }
    }

    /// The obstacle identifier.
    #[must_use]
    pub fn id(&self) -> &ObstacleId {
        &self.id
    }

    /// The trimmed, non-empty description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Where the obstacle was reported.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// When the obstacle was recorded.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Check if GPS coordinates are attached.
    #[must_use]
    pub fn has_location(&self) -> bool {
        matches!(self.location, Location::Point(_))
    }
}

/// Reasons a persisted record cannot become an [`Obstacle`].
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// The description is blank.
    #[error("obstacle {0} has an empty description")]
    EmptyDescription(ObstacleId),

    /// Only one of latitude/longitude is present.
    #[error("obstacle {0} has only one of latitude/longitude")]
    PartialLocation(ObstacleId),

    /// A coordinate is not finite or out of range.
    #[error("obstacle {id} has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        /// The offending record.
        id: ObstacleId,
        /// Stored latitude.
        latitude: f64,
        /// Stored longitude.
        longitude: f64,
    },
}

/// Persisted shape of an obstacle.
#[derive(Debug, Serialize, Deserialize)]
struct ObstacleRecord {
    id: ObstacleId,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
    #[serde(with = "iso_timestamp")]
    timestamp: DateTime<Utc>,
}

impl TryFrom<ObstacleRecord> for Obstacle {
    type Error = RecordError;

    fn try_from(record: ObstacleRecord) -> Result<Self, Self::Error> {
        if record.description.trim().is_empty() {
            return Err(RecordError::EmptyDescription(record.id));
        }

        let location = match (record.latitude, record.longitude) {
            (None, None) => Location::None,
            (Some(latitude), Some(longitude)) => Position::new(latitude, longitude)
                .map(Location::Point)
                .map_err(|_| RecordError::InvalidCoordinates {
                    id: record.id.clone(),
                    latitude,
                    longitude,
                })?,
            _ => return Err(RecordError::PartialLocation(record.id)),
        };

        Ok(Self {
            id: record.id,
            description: record.description,
            location,
            timestamp: record.timestamp,
        })
    }
}

impl From<Obstacle> for ObstacleRecord {
    fn from(obstacle: Obstacle) -> Self {
        let position = obstacle.location.position();
        Self {
            id: obstacle.id,
            description: obstacle.description,
            latitude: position.map(|p| p.latitude),
            longitude: position.map(|p| p.longitude),
            timestamp: obstacle.timestamp,
        }
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
mod iso_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(latitude: f64, longitude: f64) -> Location {
        Location::Point(Position::new(latitude, longitude).unwrap())
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = ObstacleId::generate();
        let b = ObstacleId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_obstacle_id_display() {
        let id = ObstacleId::from("1718000000000");
        assert_eq!(id.to_string(), "1718000000000");
    }

    #[test]
    fn test_position_accepts_bounds() {
        assert!(Position::new(90.0, 180.0).is_ok());
        assert!(Position::new(-90.0, -180.0).is_ok());
        assert!(Position::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_position_rejects_out_of_range() {
        assert_eq!(
            Position::new(90.5, 0.0),
            Err(ValidationError::InvalidCoordinates)
        );
        assert_eq!(
            Position::new(0.0, -180.01),
            Err(ValidationError::InvalidCoordinates)
        );
    }

    #[test]
    fn test_position_rejects_non_finite() {
        assert!(Position::new(f64::NAN, 0.0).is_err());
        assert!(Position::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_obstacle_new_trims_description() {
        let obstacle = Obstacle::new("  Fallen tree \n", Location::None).unwrap();
        assert_eq!(obstacle.description(), "Fallen tree");
        assert!(!obstacle.has_location());
    }

    #[test]
    fn test_obstacle_new_rejects_blank_description() {
        assert_eq!(
            Obstacle::new("   ", Location::None),
            Err(ValidationError::MissingDescription)
        );
    }

    #[test]
    fn test_recorded_at_truncates_to_millis() {
        let ts = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let obstacle = Obstacle::recorded_at("x", Location::None, ts).unwrap();
        assert_eq!(obstacle.timestamp().timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_serialize_without_location_omits_coordinates() {
        let obstacle = Obstacle::new("Fallen tree", Location::None).unwrap();
        let json = serde_json::to_value(&obstacle).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("latitude"));
        assert!(!object.contains_key("longitude"));
        assert_eq!(object["description"], "Fallen tree");
    }

    #[test]
    fn test_serialize_timestamp_is_iso_millis() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let obstacle = Obstacle::recorded_at("Flooded road", point(45.0, 5.0), ts).unwrap();
        let json = serde_json::to_value(&obstacle).unwrap();
        assert_eq!(json["timestamp"], "2024-03-01T08:30:00.000Z");
        assert_eq!(json["latitude"], 45.0);
        assert_eq!(json["longitude"], 5.0);
    }

    #[test]
    fn test_deserialize_legacy_record() {
        let json = r#"{
            "id": "1718000000000",
            "description": "Feu tricolore",
            "latitude": 46.2044,
            "longitude": 6.1432,
            "timestamp": "2024-06-10T06:13:20.000Z"
        }"#;
        let obstacle: Obstacle = serde_json::from_str(json).unwrap();
        assert_eq!(obstacle.id().as_str(), "1718000000000");
        assert_eq!(obstacle.location(), point(46.2044, 6.1432));
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{"id":"a","description":"d","timestamp":"2024-06-10T06:13:20Z","severity":3}"#;
        let obstacle: Obstacle = serde_json::from_str(json).unwrap();
        assert_eq!(obstacle.location(), Location::None);
    }

    #[test]
    fn test_deserialize_rejects_partial_location() {
        let json = r#"{"id":"a","description":"d","latitude":1.0,"timestamp":"2024-06-10T06:13:20Z"}"#;
        let err = serde_json::from_str::<Obstacle>(json).unwrap_err();
        assert!(err.to_string().contains("only one of latitude/longitude"));
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let json = r#"{"id":"a","description":"d","latitude":91.0,"longitude":0.0,"timestamp":"2024-06-10T06:13:20Z"}"#;
        assert!(serde_json::from_str::<Obstacle>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_bad_timestamp() {
        let json = r#"{"id":"a","description":"d","timestamp":"yesterday"}"#;
        assert!(serde_json::from_str::<Obstacle>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_empty_description() {
        let json = r#"{"id":"a","description":"  ","timestamp":"2024-06-10T06:13:20Z"}"#;
        assert!(serde_json::from_str::<Obstacle>(json).is_err());
    }
}
