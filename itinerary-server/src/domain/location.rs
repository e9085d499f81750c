//! Location types.

use std::fmt;

/// Opaque identifier of a location (station) in the catalog.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::LocationId;
///
/// let id = LocationId(12);
/// assert_eq!(id.to_string(), "L12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(pub u64);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// A location that trips depart from and arrive at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Unique identifier
    pub id: LocationId,
    /// Display name
    pub name: String,
    /// Short station code, if the catalog has one
    pub code: Option<String>,
}

impl Location {
    /// Creates a location without a code.
    pub fn new(id: LocationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: None,
        }
    }

    /// Attaches a station code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}
