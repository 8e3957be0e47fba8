//! Static emergency contact directory.
//!
//! Contacts are fixed at build time. The only side effect they expose is
//! handing a `tel:` URI to a [`Dialer`].

use serde::Serialize;

use crate::error::Result;

/// A read-only directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Phone number as displayed.
    pub phone: &'static str,
    /// What this contact handles.
    pub role: &'static str,
}

impl Contact {
    /// Build the `tel:` URI for this contact's number.
    ///
    /// Whitespace is dropped; `+` and digits are kept as-is.
    #[must_use]
    pub fn tel_uri(&self) -> String {
        let number: String = self.phone.chars().filter(|c| !c.is_whitespace()).collect();
        format!("tel:{number}")
    }
}

/// The directory, in display order.
pub const CONTACTS: &[Contact] = &[
    Contact {
        id: "1",
        name: "Central Dispatch",
        phone: "+33 1 23 45 67 89",
        role: "Transport coordination",
    },
    Contact {
        id: "2",
        name: "Technical Emergencies",
        phone: "+33 1 23 45 67 90",
        role: "Mechanical assistance",
    },
    Contact {
        id: "3",
        name: "Road Police",
        phone: "+33 1 23 45 67 91",
        role: "Obstacle reports",
    },
    Contact {
        id: "4",
        name: "SNCF Traffic",
        phone: "+33 1 23 45 67 92",
        role: "Level crossings",
    },
    Contact {
        id: "5",
        name: "Safety Officer",
        phone: "+33 1 23 45 67 93",
        role: "Safety protocols",
    },
];

/// All contacts, in display order.
#[must_use]
pub fn all() -> &'static [Contact] {
    CONTACTS
}

/// Look up a contact by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static Contact> {
    CONTACTS.iter().find(|contact| contact.id == id)
}

/// Opens the platform's call UI for a phone number.
///
/// Fire-and-forget: success means the request was handed off, not that a
/// call took place.
pub trait Dialer {
    /// Hand a `tel:` URI to the platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform could not accept the request.
    fn dial(&self, uri: &str) -> Result<()>;
}

/// Start a call to `contact` through `dialer`.
///
/// # Errors
///
/// Returns the dialer's error.
pub fn call(contact: &Contact, dialer: &dyn Dialer) -> Result<()> {
    let uri = contact.tel_uri();
    tracing::info!("Calling {} at {}", contact.name, uri);
    dialer.dial(&uri)
}
