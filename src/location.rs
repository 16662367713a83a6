use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three coordinates of a [`Location`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Latitude in degrees, positive north of the equator
    Latitude,
    /// Longitude in degrees, positive east of Greenwich
    Longitude,
    /// Elevation in meters
    Elevation,
}

impl Axis {
    /// Returns the value of this axis in `location`, if present.
    pub fn value(self, location: &Location) -> Option<f64> {
        match self {
            Axis::Latitude => location.latitude,
            Axis::Longitude => location.longitude,
            Axis::Elevation => location.elevation,
        }
    }

    /// The value of this axis if it can be formatted. NaN and infinite values
    /// count as absent.
    pub(crate) fn finite_value(self, location: &Location) -> Option<f64> {
        self.value(location).filter(|v| v.is_finite())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
            Axis::Elevation => "elevation",
        })
    }
}

/// Aggregation of the three location components: latitude, longitude and
/// elevation.
///
/// Every component is optional. A location without any component is valid
/// and formats to the literal parts of a pattern only. Values are not range
/// checked.
///
/// ```rust
/// use geofmt::Location;
///
/// let location = Location::new(Some(47.2), Some(-11.4), None);
/// assert_eq!(location.latitude(), Some(47.2));
/// assert_eq!(location.elevation(), None);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Location {
    latitude: Option<f64>,
    longitude: Option<f64>,
    elevation: Option<f64>,
}

impl Location {
    /// Creates a location from latitude and longitude in degrees and
    /// elevation in meters.
    pub const fn new(latitude: Option<f64>, longitude: Option<f64>, elevation: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }

    /// A location with a latitude only.
    pub const fn of_latitude(degrees: f64) -> Self {
        Self::new(Some(degrees), None, None)
    }

    /// A location with a longitude only.
    pub const fn of_longitude(degrees: f64) -> Self {
        Self::new(None, Some(degrees), None)
    }

    /// A location with an elevation only.
    pub const fn of_elevation(meters: f64) -> Self {
        Self::new(None, None, Some(meters))
    }

    /// Latitude in degrees
    pub const fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    /// Longitude in degrees
    pub const fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    /// Elevation in meters
    pub const fn elevation(&self) -> Option<f64> {
        self.elevation
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn part(value: Option<f64>) -> String {
            value.map_or_else(|| "none".to_string(), |v| v.to_string())
        }

        write!(
            f,
            "[lat={}, lon={}, ele={}]",
            part(self.latitude),
            part(self.longitude),
            part(self.elevation)
        )
    }
}
