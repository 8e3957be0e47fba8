//! `roadwatch` - A road obstacle log with an emergency contact directory
//!
//! This library keeps a persistent, newest-first collection of obstacles
//! reported on the road (description, optional GPS point, creation time) and
//! a fixed directory of contacts that can be handed to the platform dialer.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod contacts;
pub mod display;
pub mod draft;
pub mod error;
pub mod location;
pub mod logging;
pub mod obstacle;
pub mod store;

pub use config::Config;
pub use contacts::{Contact, Dialer};
pub use draft::{ObstacleDraft, ValidationError};
pub use error::{Error, Result};
pub use location::{LocationError, LocationProvider};
pub use logging::init_logging;
pub use obstacle::{Location, Obstacle, ObstacleId, Position};
pub use store::{KeyValueStore, ObstacleStats, ObstacleStore};
