use crate::{Axis, Location};

/// Mutable accumulator that collects the field values seen while parsing.
///
/// Degree, minute and second contributions are all accumulated in degrees.
/// Signs are kept apart from the magnitudes and applied by [`build`](Self::build),
/// so a hemisphere letter may appear before or after the numbers it qualifies.
///
/// The builder is `Copy`: an optional group takes a snapshot before it tries
/// to parse and writes the snapshot back when the attempt fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LocationBuilder {
    latitude: Option<f64>,
    latitude_sign: f64,
    longitude: Option<f64>,
    longitude_sign: f64,
    elevation: Option<f64>,
    elevation_sign: f64,
}

impl Default for LocationBuilder {
    fn default() -> Self {
        Self {
            latitude: None,
            latitude_sign: 1.0,
            longitude: None,
            longitude_sign: 1.0,
            elevation: None,
            elevation_sign: 1.0,
        }
    }
}

impl LocationBuilder {
    /// Sets the sign of `axis`, `-1` for negative, anything else for positive.
    pub(crate) fn set_sign(&mut self, axis: Axis, sign: i8) {
        let sign = if sign < 0 { -1.0 } else { 1.0 };
        match axis {
            Axis::Latitude => self.latitude_sign = sign,
            Axis::Longitude => self.longitude_sign = sign,
            Axis::Elevation => self.elevation_sign = sign,
        }
    }

    /// Adds `degrees` to the latitude. A negative value also flips the
    /// latitude sign.
    pub(crate) fn add_latitude(&mut self, degrees: f64) {
        if degrees < 0.0 {
            self.latitude_sign = -1.0;
        }
        *self.latitude.get_or_insert(0.0) += degrees.abs();
    }

    pub(crate) fn add_latitude_minute(&mut self, minutes: f64) {
        self.add_latitude(minutes / 60.0);
    }

    pub(crate) fn add_latitude_second(&mut self, seconds: f64) {
        self.add_latitude(seconds / 3600.0);
    }

    /// Adds `degrees` to the longitude. A negative value also flips the
    /// longitude sign.
    pub(crate) fn add_longitude(&mut self, degrees: f64) {
        if degrees < 0.0 {
            self.longitude_sign = -1.0;
        }
        *self.longitude.get_or_insert(0.0) += degrees.abs();
    }

    pub(crate) fn add_longitude_minute(&mut self, minutes: f64) {
        self.add_longitude(minutes / 60.0);
    }

    pub(crate) fn add_longitude_second(&mut self, seconds: f64) {
        self.add_longitude(seconds / 3600.0);
    }

    /// Sets the elevation in meters. The value keeps its own sign; an
    /// elevation sign set by a `+` field is applied on top of it.
    pub(crate) fn set_elevation(&mut self, meters: f64) {
        self.elevation = Some(meters);
    }

    pub(crate) fn build(&self) -> Location {
        Location::new(
            self.latitude.map(|v| v * self.latitude_sign),
            self.longitude.map(|v| v * self.longitude_sign),
            self.elevation.map(|v| v * self.elevation_sign),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_and_seconds_accumulate_in_degrees() {
        let mut builder = LocationBuilder::default();
        builder.add_latitude(10.0);
        builder.add_latitude_minute(30.0);
        builder.add_latitude_second(36.0);

        let lat = builder.build().latitude().unwrap();
        assert!((lat - 10.51).abs() < 1e-12, "{lat}");
    }

    #[test]
    fn test_sign_applied_on_build() {
        let mut builder = LocationBuilder::default();
        builder.set_sign(Axis::Longitude, -1);
        builder.add_longitude(12.0);
        builder.set_sign(Axis::Elevation, -1);
        builder.set_elevation(5.0);

        let location = builder.build();
        assert_eq!(location.longitude(), Some(-12.0));
        assert_eq!(location.elevation(), Some(-5.0));
        assert_eq!(location.latitude(), None);
    }

    #[test]
    fn test_negative_degrees_flip_sign() {
        let mut builder = LocationBuilder::default();
        builder.add_latitude(-3.5);
        assert_eq!(builder.build().latitude(), Some(-3.5));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut builder = LocationBuilder::default();
        builder.add_latitude(1.0);
        let snapshot = builder;

        builder.add_latitude_minute(30.0);
        builder.set_sign(Axis::Latitude, -1);
        builder = snapshot;

        assert_eq!(builder.build(), Location::of_latitude(1.0));
    }
}
