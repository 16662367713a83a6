use std::fmt;

use nom::{Parser, character::complete::satisfy};

use crate::{Axis, Error, Location, builder::LocationBuilder, cursor::Cursor};

/// Pattern elements that carry the sign of an axis without a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignField {
    /// `+` in front of a numeric field: `+` or `-`
    Prefix(Axis),
    /// `X`: `N` or `S`
    NorthSouth,
    /// `x`: `E` or `W`
    EastWest,
}

impl SignField {
    pub(crate) fn axis(self) -> Axis {
        match self {
            SignField::Prefix(axis) => axis,
            SignField::NorthSouth => Axis::Latitude,
            SignField::EastWest => Axis::Longitude,
        }
    }

    /// The characters for a positive and a negative value.
    fn symbols(self) -> (char, char) {
        match self {
            SignField::Prefix(_) => ('+', '-'),
            SignField::NorthSouth => ('N', 'S'),
            SignField::EastWest => ('E', 'W'),
        }
    }

    pub(crate) fn format(self, location: &Location) -> Option<String> {
        let (positive, negative) = self.symbols();
        self.axis()
            .finite_value(location)
            .map(|v| if v < 0.0 { negative } else { positive }.to_string())
    }

    pub(crate) fn parse<'a>(
        self,
        cursor: &mut Cursor<'a>,
        builder: &mut LocationBuilder,
    ) -> Result<(), Error<&'a str, nom::error::Error<&'a str>>> {
        let (positive, negative) = self.symbols();

        let c = cursor.run(|i: &'a str| {
            satisfy::<_, _, Error<&str, nom::error::Error<&str>>>(|c| c == positive || c == negative)
                .parse(i)
                .map_err(|_| {
                    nom::Err::Error(Error::Mismatch {
                        expected: format!("'{positive}' or '{negative}'"),
                        found: i,
                    })
                })
        })?;

        builder.set_sign(self.axis(), if c == negative { -1 } else { 1 });
        Ok(())
    }
}

impl fmt::Display for SignField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignField::Prefix(_) => "+",
            SignField::NorthSouth => "X",
            SignField::EastWest => "x",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let location = Location::new(Some(-12.5), Some(3.0), None);
        assert_eq!(SignField::NorthSouth.format(&location).unwrap(), "S");
        assert_eq!(SignField::EastWest.format(&location).unwrap(), "E");
        assert_eq!(SignField::Prefix(Axis::Latitude).format(&location).unwrap(), "-");
        assert_eq!(SignField::Prefix(Axis::Longitude).format(&location).unwrap(), "+");
        assert_eq!(SignField::Prefix(Axis::Elevation).format(&location), None);
    }

    #[test]
    fn test_parse_sets_sign_only() {
        let mut builder = LocationBuilder::default();
        builder.add_longitude(7.0);

        let mut cursor = Cursor::new("W", 0);
        SignField::EastWest.parse(&mut cursor, &mut builder).unwrap();

        assert_eq!(builder.build().longitude(), Some(-7.0));
        assert_eq!(cursor.rest(), "");
    }

    #[test]
    fn test_parse_mismatch() {
        let mut builder = LocationBuilder::default();
        let mut cursor = Cursor::new("E", 0);

        let result = SignField::NorthSouth.parse(&mut cursor, &mut builder);
        assert_eq!(
            result,
            Err(Error::Mismatch {
                expected: "'N' or 'S'".to_string(),
                found: "E",
            })
        );
        assert_eq!(builder, LocationBuilder::default());
    }
}
