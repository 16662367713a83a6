//! # Location Formatter
//!
//! [`LocationFormatter`] compiles a pattern once and then formats and parses
//! any number of locations with it. The canonical ISO 6709 patterns are
//! available as lazily compiled statics.

use std::{fmt, str::FromStr};

use log::{debug, trace};
use nom::combinator::success;
use once_cell::sync::Lazy;

use crate::{
    FormatError, Location, ParseError, PatternError, builder::LocationBuilder, cursor::Cursor,
    format::Format, parsing::consumed, pattern,
};

/// Formats and parses locations according to a compiled pattern.
///
/// # Pattern letters
///
/// | Symbol | Meaning |
/// |---|---|
/// | `L` / `l` | signed latitude / longitude degrees |
/// | `D` / `d` | absolute latitude / longitude degrees |
/// | `M` / `m` | latitude / longitude minutes |
/// | `S` / `s` | latitude / longitude seconds |
/// | `H` | absolute elevation in meters |
/// | `E` | signed elevation in meters |
/// | `X` | latitude hemisphere, `N` or `S` |
/// | `x` | longitude hemisphere, `E` or `W` |
/// | `+` | sign of the numeric field that follows, `+` or `-` |
/// | `.` / `,` | decimal separator inside a numeric field |
/// | `[...]` | optional group |
/// | `'...'` / `''` | quoted literal text / a single quote |
///
/// The number of letters of a numeric field sets its zero padded integer
/// width and its fractional digits. Degree and minute fields without
/// fractional digits are truncated, the next smaller field carries the rest.
///
/// # Examples
///
/// ```rust
/// use geofmt::{Location, LocationFormatter};
///
/// let formatter = LocationFormatter::of_pattern("DD°MM''SS.SSS\"X").unwrap();
///
/// let text = formatter.format_lat(23.987635).unwrap();
/// assert_eq!(text, "23°59'15.486\"N");
///
/// let location = formatter.parse("23°59'15.486\"S").unwrap();
/// assert!((location.latitude().unwrap() + 23.987635).abs() < 1e-9);
/// assert_eq!(location.longitude(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFormatter {
    format: Format,
}

impl LocationFormatter {
    /// Compiles `pattern` into a formatter.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the pattern is malformed, for example an
    /// unclosed `[`, a `+` not followed by a numeric field, or an
    /// axis whose fields do not fit together.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geofmt::{LocationFormatter, PatternError};
    ///
    /// assert!(LocationFormatter::of_pattern("+DD.DD+ddd.dd").is_ok());
    ///
    /// let result = LocationFormatter::of_pattern("DD[MM");
    /// assert_eq!(result, Err(PatternError::UnmatchedOpenBracket { position: 2 }));
    /// ```
    pub fn of_pattern(pattern: &str) -> Result<Self, PatternError> {
        let format = pattern::compile(pattern)?;
        debug!("compiled pattern '{}' into {} nodes", pattern, format.node_count());

        Ok(Self { format })
    }

    /// The pattern this formatter was compiled from, in canonical form.
    ///
    /// Compiling the returned pattern again yields an equivalent formatter.
    ///
    /// ```rust
    /// use geofmt::LocationFormatter;
    ///
    /// let formatter = LocationFormatter::of_pattern("D'°'M").unwrap();
    /// assert_eq!(formatter.to_pattern(), "D°M");
    /// ```
    pub fn to_pattern(&self) -> String {
        self.format.to_string()
    }

    /// Formats `location`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if a value needed outside of an optional
    /// group is absent.
    pub fn format(&self, location: &Location) -> Result<String, FormatError> {
        self.format
            .format(location)
            .ok_or_else(|| FormatError::new(self.to_pattern(), *location))
    }

    /// Formats a location with only a latitude.
    pub fn format_lat(&self, latitude: f64) -> Result<String, FormatError> {
        self.format(&Location::of_latitude(latitude))
    }

    /// Formats a location with latitude and longitude.
    pub fn format_lat_lon(&self, latitude: f64, longitude: f64) -> Result<String, FormatError> {
        self.format(&Location::new(Some(latitude), Some(longitude), None))
    }

    /// Formats a location with all three values.
    pub fn format_lat_lon_ele(
        &self,
        latitude: f64,
        longitude: f64,
        elevation: f64,
    ) -> Result<String, FormatError> {
        self.format(&Location::new(Some(latitude), Some(longitude), Some(elevation)))
    }

    /// Formats a location with only a longitude.
    pub fn format_longitude(&self, longitude: f64) -> Result<String, FormatError> {
        self.format(&Location::of_longitude(longitude))
    }

    /// Formats a location with only an elevation.
    pub fn format_elevation(&self, elevation: f64) -> Result<String, FormatError> {
        self.format(&Location::of_elevation(elevation))
    }

    /// Parses `text` into a location. The whole text must match the pattern.
    ///
    /// Values the pattern has no field for, or whose optional group did not
    /// match, are absent in the result.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] holding the byte index of the failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geofmt::{Location, LocationFormatter};
    ///
    /// let formatter = LocationFormatter::of_pattern("+DD.DD+ddd.dd[+H'CRS']").unwrap();
    ///
    /// let location = formatter.parse("+12.50-065.23").unwrap();
    /// assert_eq!(location, Location::new(Some(12.5), Some(-65.23), None));
    ///
    /// let error = formatter.parse("+12.50x065.23").unwrap_err();
    /// assert_eq!(error.index(), 6);
    /// ```
    pub fn parse(&self, text: &str) -> Result<Location, ParseError> {
        let mut cursor = Cursor::new(text, 0);
        let mut builder = LocationBuilder::default();

        self.scan(&mut cursor, &mut builder)?;
        cursor
            .run(consumed(success(())))
            .map_err(|e| self.parse_error(text, ParseError::from_scan(text, &e)))?;

        Ok(builder.build())
    }

    /// Parses a location starting at byte `index` of `text`. Input after the
    /// matched part is left alone.
    ///
    /// Returns the location and the index of the first byte not consumed.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if `index` is not a char boundary of `text` or
    /// the input at `index` does not match the pattern.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geofmt::{Location, LocationFormatter};
    ///
    /// let formatter = LocationFormatter::of_pattern("DDX").unwrap();
    ///
    /// let (location, end) = formatter.parse_at("at 12N, then", 3).unwrap();
    /// assert_eq!(location, Location::of_latitude(12.0));
    /// assert_eq!(end, 6);
    /// ```
    pub fn parse_at(&self, text: &str, index: usize) -> Result<(Location, usize), ParseError> {
        if !text.is_char_boundary(index) {
            return Err(ParseError::new(text, index, "start index is not a character boundary"));
        }

        let mut cursor = Cursor::new(text, index);
        let mut builder = LocationBuilder::default();
        self.scan(&mut cursor, &mut builder)?;

        Ok((builder.build(), cursor.index()))
    }

    fn scan(&self, cursor: &mut Cursor<'_>, builder: &mut LocationBuilder) -> Result<(), ParseError> {
        let text = cursor.text();
        self.format
            .parse(cursor, builder)
            .map_err(|e| self.parse_error(text, ParseError::from_scan(text, &e)))
    }

    fn parse_error(&self, text: &str, error: ParseError) -> ParseError {
        trace!("parsing '{}' with '{}' failed: {}", text, self.format, error);
        error
    }
}

impl fmt::Display for LocationFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocationFormatter[{}]", self.format)
    }
}

impl FromStr for LocationFormatter {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::of_pattern(s)
    }
}

macro_rules! canonical {
    ($($(#[$doc:meta])* $name:ident = $pattern:literal;)+) => {
        $(
            $(#[$doc])*
            pub static $name: Lazy<LocationFormatter> = Lazy::new(|| {
                LocationFormatter::of_pattern($pattern).expect(concat!("invalid pattern ", $pattern))
            });
        )+
    };
}

canonical! {
    /// Human readable latitude: `DD°MM''SS.SSS"X`, e.g. `16°27'59.180"N`.
    ISO_HUMAN_LAT_LONG = "DD°MM''SS.SSS\"X";
    /// Human readable longitude: `dd°mm''ss.sss"x`, e.g. `135°28'59.280"W`.
    ISO_HUMAN_LON_LONG = "dd°mm''ss.sss\"x";
    /// Human readable elevation: `E.EE'm'`, e.g. `2.67m`.
    ISO_HUMAN_ELE_LONG = "E.EE'm'";
    /// Human readable location: `DD°MM''SS.SSS"X dd°mm''ss.sss"x[ E.EE'm']`.
    ISO_HUMAN_LONG = "DD°MM''SS.SSS\"X dd°mm''ss.sss\"x[ E.EE'm']";
    /// ISO 6709 latitude in degrees: `+DD.DD`.
    ISO_LAT_SHORT = "+DD.DD";
    /// ISO 6709 latitude in degrees and minutes: `+DDMM.MMM`.
    ISO_LAT_MEDIUM = "+DDMM.MMM";
    /// ISO 6709 latitude in degrees, minutes and seconds: `+DDMMSS.SS`.
    ISO_LAT_LONG = "+DDMMSS.SS";
    /// ISO 6709 longitude in degrees: `+ddd.dd`.
    ISO_LON_SHORT = "+ddd.dd";
    /// ISO 6709 longitude in degrees and minutes: `+dddmm.mmm`.
    ISO_LON_MEDIUM = "+dddmm.mmm";
    /// ISO 6709 longitude in degrees, minutes and seconds: `+dddmmss.ss`.
    ISO_LON_LONG = "+dddmmss.ss";
    /// ISO 6709 elevation in whole meters: `+H'CRS'`.
    ISO_ELE_SHORT = "+H'CRS'";
    /// ISO 6709 elevation with one decimal: `+H.H'CRS'`.
    ISO_ELE_MEDIUM = "+H.H'CRS'";
    /// ISO 6709 elevation with two decimals: `+H.HH'CRS'`.
    ISO_ELE_LONG = "+H.HH'CRS'";
    /// ISO 6709 location in degrees: `+DD.DD+ddd.dd[+H'CRS']`.
    ISO_SHORT = "+DD.DD+ddd.dd[+H'CRS']";
    /// ISO 6709 location in degrees and minutes: `+DDMM.MMM+dddmm.mmm[+H.H'CRS']`.
    ISO_MEDIUM = "+DDMM.MMM+dddmm.mmm[+H.H'CRS']";
    /// ISO 6709 location in degrees, minutes and seconds:
    /// `+DDMMSS.SS+dddmmss.ss[+H.HH'CRS']`.
    ISO_LONG = "+DDMMSS.SS+dddmmss.ss[+H.HH'CRS']";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_absent_value() {
        let formatter = LocationFormatter::of_pattern("DD dd").unwrap();
        let error = formatter.format_lat(12.0).unwrap_err();

        assert_eq!(error.pattern(), "DD dd");
        assert_eq!(error.location(), &Location::of_latitude(12.0));
    }

    #[test]
    fn test_format_overloads() {
        let formatter = LocationFormatter::of_pattern("[DD][ ddd][ H]").unwrap();

        assert_eq!(formatter.format_lat(1.0).unwrap(), "01");
        assert_eq!(formatter.format_longitude(2.0).unwrap(), " 002");
        assert_eq!(formatter.format_elevation(3.0).unwrap(), " 3");
        assert_eq!(formatter.format_lat_lon(1.0, 2.0).unwrap(), "01 002");
        assert_eq!(formatter.format_lat_lon_ele(1.0, 2.0, 3.0).unwrap(), "01 002 3");
        assert_eq!(formatter.format(&Location::default()).unwrap(), "");
    }

    #[test]
    fn test_parse_trailing_input() {
        let formatter = LocationFormatter::of_pattern("DD").unwrap();
        let error = formatter.parse("12N").unwrap_err();

        assert_eq!(error.index(), 2);
        assert_eq!(error.input(), "12N");
        assert_eq!(error.cause(), "not all input was used");
    }

    #[test]
    fn test_parse_error_index() {
        let formatter = LocationFormatter::of_pattern("DD°MMX").unwrap();
        let error = formatter.parse("12°3oN").unwrap_err();

        // The minute field reads the single digit, then the hemisphere fails.
        assert_eq!(error.index(), "12°3".len());
        assert_eq!(error.cause(), "expected 'N' or 'S', found 'o'");
    }

    #[test]
    fn test_parse_at() {
        let formatter = LocationFormatter::of_pattern("+DD.DD").unwrap();

        let (location, end) = formatter.parse_at("lat=-12.34;", 4).unwrap();
        assert_eq!(location, Location::of_latitude(-12.34));
        assert_eq!(end, 10);

        assert!(formatter.parse_at("°+12.34", 1).is_err());
        assert!(formatter.parse_at("+12.34", 7).is_err());
        assert!(formatter.parse_at("+12.34", 6).is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        let formatter: LocationFormatter = "DD°MM''SS.SSS\"X".parse().unwrap();
        assert_eq!(formatter.to_string(), "LocationFormatter[DD°MM''SS.SSS\"X]");
        assert_eq!(formatter, *ISO_HUMAN_LAT_LONG);

        assert!("DD]".parse::<LocationFormatter>().is_err());
    }

    #[test]
    fn test_canonical_patterns_compile() {
        let canonical = [
            (&ISO_HUMAN_LAT_LONG, "DD°MM''SS.SSS\"X"),
            (&ISO_HUMAN_LON_LONG, "dd°mm''ss.sss\"x"),
            (&ISO_HUMAN_ELE_LONG, "E.EE'm'"),
            (&ISO_HUMAN_LONG, "DD°MM''SS.SSS\"X dd°mm''ss.sss\"x[ E.EE'm']"),
            (&ISO_LAT_SHORT, "+DD.DD"),
            (&ISO_LAT_MEDIUM, "+DDMM.MMM"),
            (&ISO_LAT_LONG, "+DDMMSS.SS"),
            (&ISO_LON_SHORT, "+ddd.dd"),
            (&ISO_LON_MEDIUM, "+dddmm.mmm"),
            (&ISO_LON_LONG, "+dddmmss.ss"),
            (&ISO_ELE_SHORT, "+H'CRS'"),
            (&ISO_ELE_MEDIUM, "+H.H'CRS'"),
            (&ISO_ELE_LONG, "+H.HH'CRS'"),
            (&ISO_SHORT, "+DD.DD+ddd.dd[+H'CRS']"),
            (&ISO_MEDIUM, "+DDMM.MMM+dddmm.mmm[+H.H'CRS']"),
            (&ISO_LONG, "+DDMMSS.SS+dddmmss.ss[+H.HH'CRS']"),
        ];

        for (formatter, pattern) in canonical {
            assert_eq!(formatter.to_pattern(), pattern);
        }
    }
}
