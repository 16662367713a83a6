use std::fmt;

use crate::{Axis, Error, Location, builder::LocationBuilder, cursor::Cursor, numeric::NumericField};

/// Tolerance added before taking the whole part of a degree or minute value,
/// so a value that lands just below a whole number does not lose a unit.
const WHOLE_EPSILON: f64 = 1e-9;

/// The kind of a numeric pattern field, one per pattern letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum FieldKind {
    /// `L`: signed latitude degrees
    SignedLatitude,
    /// `D`: absolute latitude degrees
    LatitudeDegree,
    /// `M`: absolute latitude minutes
    LatitudeMinute,
    /// `S`: absolute latitude seconds
    LatitudeSecond,
    /// `l`: signed longitude degrees
    SignedLongitude,
    /// `d`: absolute longitude degrees
    LongitudeDegree,
    /// `m`: absolute longitude minutes
    LongitudeMinute,
    /// `s`: absolute longitude seconds
    LongitudeSecond,
    /// `H`: absolute elevation in meters
    ElevationMeter,
    /// `E`: signed elevation in meters
    Elevation,
}

/// The unit a field contributes to its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Unit {
    Degree,
    Minute,
    Second,
    Meter,
}

impl FieldKind {
    pub(crate) fn from_letter(c: char) -> Option<Self> {
        Some(match c {
            'L' => FieldKind::SignedLatitude,
            'D' => FieldKind::LatitudeDegree,
            'M' => FieldKind::LatitudeMinute,
            'S' => FieldKind::LatitudeSecond,
            'l' => FieldKind::SignedLongitude,
            'd' => FieldKind::LongitudeDegree,
            'm' => FieldKind::LongitudeMinute,
            's' => FieldKind::LongitudeSecond,
            'H' => FieldKind::ElevationMeter,
            'E' => FieldKind::Elevation,
            _ => return None,
        })
    }

    pub(crate) fn letter(self) -> char {
        match self {
            FieldKind::SignedLatitude => 'L',
            FieldKind::LatitudeDegree => 'D',
            FieldKind::LatitudeMinute => 'M',
            FieldKind::LatitudeSecond => 'S',
            FieldKind::SignedLongitude => 'l',
            FieldKind::LongitudeDegree => 'd',
            FieldKind::LongitudeMinute => 'm',
            FieldKind::LongitudeSecond => 's',
            FieldKind::ElevationMeter => 'H',
            FieldKind::Elevation => 'E',
        }
    }

    pub(crate) fn axis(self) -> Axis {
        match self {
            FieldKind::SignedLatitude
            | FieldKind::LatitudeDegree
            | FieldKind::LatitudeMinute
            | FieldKind::LatitudeSecond => Axis::Latitude,
            FieldKind::SignedLongitude
            | FieldKind::LongitudeDegree
            | FieldKind::LongitudeMinute
            | FieldKind::LongitudeSecond => Axis::Longitude,
            FieldKind::ElevationMeter | FieldKind::Elevation => Axis::Elevation,
        }
    }

    pub(crate) fn unit(self) -> Unit {
        match self {
            FieldKind::SignedLatitude
            | FieldKind::LatitudeDegree
            | FieldKind::SignedLongitude
            | FieldKind::LongitudeDegree => Unit::Degree,
            FieldKind::LatitudeMinute | FieldKind::LongitudeMinute => Unit::Minute,
            FieldKind::LatitudeSecond | FieldKind::LongitudeSecond => Unit::Second,
            FieldKind::ElevationMeter | FieldKind::Elevation => Unit::Meter,
        }
    }

    /// Signed fields format and parse the signed value and carry the sign of
    /// their axis themselves.
    pub(crate) fn is_signed(self) -> bool {
        matches!(
            self,
            FieldKind::SignedLatitude | FieldKind::SignedLongitude | FieldKind::Elevation
        )
    }
}

/// A numeric pattern field: a [`FieldKind`] plus its decimal rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Field {
    kind: FieldKind,
    rule: NumericField,
}

impl Field {
    /// Compiles a field specifier like `DD` or `ss.sss`.
    pub(crate) fn from_spec(spec: &str) -> Option<Self> {
        let rule = NumericField::from_spec(spec)?;
        let kind = FieldKind::from_letter(rule.letter())?;
        Some(Self { kind, rule })
    }

    pub(crate) fn kind(&self) -> FieldKind {
        self.kind
    }

    pub(crate) fn has_fraction(&self) -> bool {
        self.rule.has_fraction()
    }

    pub(crate) fn has_fixed_width(&self) -> bool {
        self.rule.has_fixed_width()
    }

    /// See [`NumericField::bound`].
    pub(crate) fn bound(&mut self) {
        self.rule.bound();
    }

    pub(crate) fn format(&self, location: &Location) -> Option<String> {
        let raw = self.kind.axis().finite_value(location)?;

        let value = match self.kind {
            FieldKind::SignedLatitude | FieldKind::SignedLongitude | FieldKind::Elevation => raw,
            FieldKind::LatitudeDegree | FieldKind::LongitudeDegree => {
                let dd = raw.abs();
                if self.has_fraction() { dd } else { whole(dd) }
            }
            FieldKind::LatitudeMinute | FieldKind::LongitudeMinute => {
                let minutes = to_minutes(raw);
                if self.has_fraction() { minutes } else { whole(minutes) }
            }
            FieldKind::LatitudeSecond | FieldKind::LongitudeSecond => to_seconds(raw),
            FieldKind::ElevationMeter => raw.abs(),
        };

        Some(self.rule.format(value))
    }

    pub(crate) fn parse<'a>(
        &self,
        cursor: &mut Cursor<'a>,
        builder: &mut LocationBuilder,
    ) -> Result<(), Error<&'a str, nom::error::Error<&'a str>>> {
        let signed = self.kind.is_signed();
        let value = cursor.run(|i: &'a str| self.rule.parse(i, signed))?;

        match self.kind {
            FieldKind::SignedLatitude | FieldKind::LatitudeDegree => builder.add_latitude(value),
            FieldKind::LatitudeMinute => builder.add_latitude_minute(value),
            FieldKind::LatitudeSecond => builder.add_latitude_second(value),
            FieldKind::SignedLongitude | FieldKind::LongitudeDegree => builder.add_longitude(value),
            FieldKind::LongitudeMinute => builder.add_longitude_minute(value),
            FieldKind::LongitudeSecond => builder.add_longitude_second(value),
            FieldKind::ElevationMeter | FieldKind::Elevation => builder.set_elevation(value),
        }

        Ok(())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.rule, f)
    }
}

/// The whole part of a non-negative `value`.
pub(crate) fn whole(value: f64) -> f64 {
    (value + WHOLE_EPSILON).floor()
}

/// The minute part of `degrees`, always positive.
pub(crate) fn to_minutes(degrees: f64) -> f64 {
    let dd = degrees.abs();
    ((dd - whole(dd)) * 60.0).max(0.0)
}

/// The second part of `degrees`, always positive.
pub(crate) fn to_seconds(degrees: f64) -> f64 {
    let dd = degrees.abs();
    let m = whole(to_minutes(dd));
    ((dd - whole(dd) - m / 60.0) * 3600.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(spec: &str) -> Field {
        Field::from_spec(spec).unwrap()
    }

    #[test]
    fn test_letter_table() {
        for c in ['L', 'D', 'M', 'S', 'l', 'd', 'm', 's', 'H', 'E'] {
            let kind = FieldKind::from_letter(c).unwrap();
            assert_eq!(kind.letter(), c);
        }
        assert_eq!(FieldKind::from_letter('X'), None);
        assert_eq!(FieldKind::from_letter('+'), None);
    }

    #[test]
    fn test_decomposition() {
        let dd = 23.987635;
        assert!((to_minutes(dd) - 59.2581).abs() < 1e-9);
        assert!((to_seconds(dd) - 15.486).abs() < 1e-6);
        assert!((to_minutes(-dd) - to_minutes(dd)).abs() < 1e-12);
    }

    #[test]
    fn test_whole_absorbs_representation_error() {
        assert_eq!(whole((45.7 - 45.0) * 60.0), 42.0);
        assert_eq!(to_minutes(45.7).round(), 42.0);
        assert!(to_seconds(45.7) < 1e-6);
    }

    #[test]
    fn test_just_below_whole_degree() {
        let dd = 45.0 - 1e-11;
        assert_eq!(whole(dd), 45.0);
        assert_eq!(to_minutes(dd), 0.0);
        assert_eq!(to_seconds(dd), 0.0);
    }

    #[test]
    fn test_degree_truncates_without_fraction() {
        let location = Location::of_latitude(23.987635);
        assert_eq!(field("DD").format(&location).unwrap(), "23");
        assert_eq!(field("DD.DD").format(&location).unwrap(), "23.99");
        assert_eq!(field("LL").format(&location).unwrap(), "24");
    }

    #[test]
    fn test_absolute_and_signed() {
        let location = Location::new(Some(-12.5), Some(-65.234275), Some(-10.0));
        assert_eq!(field("DD.D").format(&location).unwrap(), "12.5");
        assert_eq!(field("LL.L").format(&location).unwrap(), "-12.5");
        assert_eq!(field("ddd.dd").format(&location).unwrap(), "065.23");
        assert_eq!(field("mm").format(&location).unwrap(), "14");
        assert_eq!(field("H").format(&location).unwrap(), "10");
        assert_eq!(field("E").format(&location).unwrap(), "-10");
    }

    #[test]
    fn test_absent_axis() {
        let location = Location::of_elevation(5.0);
        assert_eq!(field("DD").format(&location), None);
        assert_eq!(field("ss").format(&location), None);
    }

    #[test]
    fn test_non_finite_is_absent() {
        assert_eq!(field("LL.L").format(&Location::of_latitude(f64::NAN)), None);
        assert_eq!(field("E").format(&Location::of_elevation(f64::INFINITY)), None);
        assert_eq!(field("mm").format(&Location::of_longitude(f64::NEG_INFINITY)), None);
    }

    #[test]
    fn test_parse_into_builder() {
        let mut builder = LocationBuilder::default();
        let mut cursor = Cursor::new("23 59 15.486", 0);

        field("DD").parse(&mut cursor, &mut builder).unwrap();
        cursor.run(nom::character::complete::char(' ')).unwrap();
        field("MM").parse(&mut cursor, &mut builder).unwrap();
        cursor.run(nom::character::complete::char(' ')).unwrap();
        field("SS.SSS").parse(&mut cursor, &mut builder).unwrap();

        let lat = builder.build().latitude().unwrap();
        assert!((lat - 23.987635).abs() < 1e-9, "{lat}");
        assert_eq!(cursor.rest(), "");
    }

    #[test]
    fn test_parse_failure_leaves_cursor() {
        let mut builder = LocationBuilder::default();
        let mut cursor = Cursor::new("N", 0);

        let result = field("DD").parse(&mut cursor, &mut builder);
        assert_eq!(result, Err(Error::MissingNumber("N")));
        assert_eq!(cursor.index(), 0);
    }
}
