use std::fmt;

use log::trace;
use nom::{Parser, bytes::complete::tag};

use crate::{
    Error, Location, builder::LocationBuilder, cursor::Cursor, field::Field,
    pattern::RESERVED_CHARS, sign::SignField,
};

/// A node of a compiled location pattern.
///
/// The tree is immutable once compiled; all per-call state lives in the
/// [`Cursor`] and [`LocationBuilder`] handed to [`parse`](Self::parse).
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Format {
    /// Constant text
    Literal(String),
    /// A numeric field
    Field(Field),
    /// A sign or hemisphere marker
    Sign(SignField),
    /// A sequence of nodes, all of which must succeed
    Composite(Vec<Format>),
    /// A composite that may be absent
    Optional(Box<Format>),
}

impl Format {
    /// Formats `location`. Returns `None` if a value the node needs is absent.
    pub(crate) fn format(&self, location: &Location) -> Option<String> {
        match self {
            Format::Literal(text) => Some(text.clone()),
            Format::Field(field) => field.format(location),
            Format::Sign(sign) => sign.format(location),
            Format::Composite(formats) => formats.iter().map(|f| f.format(location)).collect(),
            Format::Optional(format) => Some(format.format(location).unwrap_or_default()),
        }
    }

    pub(crate) fn parse<'a>(
        &self,
        cursor: &mut Cursor<'a>,
        builder: &mut LocationBuilder,
    ) -> Result<(), Error<&'a str, nom::error::Error<&'a str>>> {
        match self {
            Format::Literal(text) => {
                cursor.run(|i: &'a str| {
                    tag::<_, _, Error<&str, nom::error::Error<&str>>>(text.as_str())
                        .parse(i)
                        .map_err(|_| {
                            nom::Err::Error(Error::Mismatch {
                                expected: format!("'{text}'"),
                                found: i,
                            })
                        })
                })?;
                Ok(())
            }
            Format::Field(field) => field.parse(cursor, builder),
            Format::Sign(sign) => sign.parse(cursor, builder),
            Format::Composite(formats) => formats.iter().try_for_each(|f| f.parse(cursor, builder)),
            Format::Optional(format) => {
                let saved_cursor = *cursor;
                let saved_builder = *builder;

                if let Err(e) = format.parse(cursor, builder) {
                    trace!(
                        "optional '{}' skipped at {}: {}",
                        format,
                        saved_cursor.index(),
                        e.cause()
                    );
                    *cursor = saved_cursor;
                    *builder = saved_builder;
                }

                Ok(())
            }
        }
    }

    /// Visits every leaf node in pattern order.
    pub(crate) fn for_each_leaf<'s>(&'s self, f: &mut impl FnMut(&'s Format)) {
        match self {
            Format::Composite(formats) => formats.iter().for_each(|format| format.for_each_leaf(f)),
            Format::Optional(format) => format.for_each_leaf(f),
            leaf => f(leaf),
        }
    }

    /// Number of nodes in the tree, this one included.
    pub(crate) fn node_count(&self) -> usize {
        match self {
            Format::Composite(formats) => 1 + formats.iter().map(Format::node_count).sum::<usize>(),
            Format::Optional(format) => 1 + format.node_count(),
            _ => 1,
        }
    }
}

impl fmt::Display for Format {
    /// Writes the pattern this node compiles from.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Literal(text) => f.write_str(&escape(text, false)),
            Format::Field(field) => fmt::Display::fmt(field, f),
            Format::Sign(sign) => fmt::Display::fmt(sign, f),
            Format::Composite(formats) => {
                let mut after_field = false;
                for format in formats {
                    match format {
                        Format::Literal(text) => f.write_str(&escape(text, after_field))?,
                        other => fmt::Display::fmt(other, f)?,
                    }
                    after_field = matches!(format, Format::Field(_));
                }
                Ok(())
            }
            Format::Optional(format) => write!(f, "[{format}]"),
        }
    }
}

/// Escapes literal text so it compiles back to the same literal. Text with a
/// reserved character is quoted, and a leading separator directly after a
/// numeric field is quoted so it is not read as a decimal separator.
fn escape(value: &str, after_field: bool) -> String {
    let quote = value.chars().any(|c| RESERVED_CHARS.contains(&c))
        || (after_field && value.starts_with(['.', ',']));

    let mut out = String::with_capacity(value.len() + 2);
    if quote {
        out.push('\'');
    }
    for c in value.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    if quote {
        out.push('\'');
    }

    out
}
