//! Plain-text rendering of obstacles and contacts.

use std::fmt::{Display, Write};

use chrono::{DateTime, TimeZone, Utc};

use crate::contacts::Contact;
use crate::obstacle::{Location, Obstacle};
use crate::store::ObstacleStats;

/// Day-first date with hours and minutes.
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Format a timestamp as `dd/mm/yyyy hh:mm` in the given time zone.
#[must_use]
pub fn format_timestamp<Tz>(timestamp: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Format coordinates with six decimals, `None` when there are none.
#[must_use]
pub fn format_coordinates(location: Location) -> Option<String> {
    location
        .position()
        .map(|p| format!("{:.6}, {:.6}", p.latitude(), p.longitude()))
}

/// Render one obstacle as a card.
#[must_use]
pub fn render_obstacle<Tz>(obstacle: &Obstacle, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] {}",
        format_timestamp(obstacle.timestamp(), tz),
        obstacle.id()
    );
    let _ = writeln!(out, "  {}", obstacle.description());
    if let Some(coordinates) = format_coordinates(obstacle.location()) {
        let _ = writeln!(out, "  GPS: {coordinates}");
    }
    out
}

/// Render the obstacle list screen: counters, then cards or an empty state.
#[must_use]
pub fn render_obstacles<Tz>(obstacles: &[Obstacle], stats: ObstacleStats, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Obstacles: {}    With GPS: {}",
        stats.total, stats.with_location
    );
    let _ = writeln!(out);

    if obstacles.is_empty() {
        let _ = writeln!(out, "No obstacles yet.");
        let _ = writeln!(
            out,
            "Add your first one with: roadwatch add \"<description>\""
        );
        return out;
    }

    for (i, obstacle) in obstacles.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(out);
        }
        out.push_str(&render_obstacle(obstacle, tz));
    }
    out
}

/// Render the contact directory.
#[must_use]
pub fn render_contacts(contacts: &[Contact]) -> String {
    let mut out = String::new();
    for contact in contacts {
        let _ = writeln!(out, "{}. {}", contact.id, contact.name);
        let _ = writeln!(out, "   {}", contact.role);
        let _ = writeln!(out, "   {}", contact.phone);
    }
    out
}
