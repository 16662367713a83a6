//! # Error Types
//!
//! This module defines the error types used throughout the location format library.
//!
//! Two layers exist. The scan-level [`Error`] is what the nom parsers and the
//! compiled pattern nodes return while they walk a pattern or an input string.
//! It is converted into one of the typed public errors at the API boundary:
//! [`PatternError`] when a pattern does not compile, [`ParseError`] when an
//! input string does not match a compiled pattern, and [`FormatError`] when a
//! location lacks a value the pattern requires.

use nom::error::{ErrorKind, FromExternalError, ParseError as NomParseError};
use std::fmt::Debug;

use crate::{Axis, Location};

/// Holds the result of parsing functions.
///
/// It depends on the input type `I`, the output type `O`, and the error type `E`
/// (by default `nom::error::Error<I>`).
///
/// The `Ok` side is a pair containing the remainder of the input (the part of the data that
/// was not parsed) and the produced value. The `Err` side contains an instance of `nom::Err`.
pub type IResult<I, O, E = nom::error::Error<I>> = nom::IResult<I, O, Error<I, E>>;

/// Represents all possible errors that can occur while scanning a pattern or
/// a location string.
///
/// Variants that carry an `I` hold the input remaining at the point of
/// failure, which is how the byte position of the failure is recovered.
#[derive(Debug, PartialEq)]
pub enum Error<I, E> {
    /// A nom combinator failed.
    ParsingError(E),

    /// A numeric field was expected but no digit was found.
    MissingNumber(I),

    /// The input did not contain the expected literal, sign or hemisphere
    /// character.
    Mismatch {
        /// Human readable description of what was expected
        expected: String,
        /// The input at the point of the mismatch
        found: I,
    },

    /// A bracket was opened but never closed.
    Unclosed {
        /// The closing delimiter that is missing
        delimiter: char,
        /// The input starting at the opening delimiter
        open: I,
    },

    /// A numeric field specifier such as `DD.MM` that mixes field letters.
    InvalidField(I),

    /// The parser finished before the whole input was consumed.
    TrailingInput(I),

    /// An unknown error occurred.
    Unknown,
}

impl<I, E> NomParseError<I> for Error<I, E>
where
    E: NomParseError<I>,
{
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Error::ParsingError(E::from_error_kind(input, kind))
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I, E, EX> FromExternalError<I, EX> for Error<I, E>
where
    E: FromExternalError<I, EX>,
{
    fn from_external_error(input: I, kind: ErrorKind, e: EX) -> Self {
        Error::ParsingError(E::from_external_error(input, kind, e))
    }
}

impl<I, E> From<nom::Err<Error<I, E>>> for Error<I, E> {
    fn from(err: nom::Err<Error<I, E>>) -> Self {
        match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
            nom::Err::Incomplete(_) => Error::Unknown,
        }
    }
}

impl<'a> Error<&'a str, nom::error::Error<&'a str>> {
    /// The input remaining where the error occurred, if known.
    pub fn remaining(&self) -> Option<&'a str> {
        match self {
            Error::ParsingError(e) => Some(e.input),
            Error::MissingNumber(i)
            | Error::InvalidField(i)
            | Error::TrailingInput(i)
            | Error::Mismatch { found: i, .. }
            | Error::Unclosed { open: i, .. } => Some(i),
            Error::Unknown => None,
        }
    }

    /// Byte offset of the error within `input`, the string the scan started on.
    pub fn offset_in(&self, input: &str) -> usize {
        self.remaining()
            .map_or(0, |rest| input.len().saturating_sub(rest.len()))
    }

    /// A short human readable description of the failure.
    pub fn cause(&self) -> String {
        match self {
            Error::ParsingError(e) => format!("unexpected input ({:?})", e.code),
            Error::MissingNumber(_) => "expected a number".to_string(),
            Error::Mismatch { expected, found } => match found.chars().next() {
                Some(c) => format!("expected {expected}, found '{c}'"),
                None => format!("expected {expected}, found end of input"),
            },
            Error::Unclosed { delimiter, .. } => format!("missing closing '{delimiter}'"),
            Error::InvalidField(spec) => format!("invalid field '{spec}'"),
            Error::TrailingInput(_) => "not all input was used".to_string(),
            Error::Unknown => "unknown error".to_string(),
        }
    }
}

/// A location pattern could not be compiled.
///
/// Returned by [`LocationFormatter::of_pattern`](crate::LocationFormatter::of_pattern).
/// Positions are byte offsets into the pattern string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// An optional group `[` is never closed.
    #[error("missing closing ']' for the '[' at position {position}")]
    UnmatchedOpenBracket { position: usize },

    /// A `]` without an opening `[`.
    #[error("missing opening '[' for the ']' at position {position}")]
    UnmatchedCloseBracket { position: usize },

    /// A numeric field specifier contains an unrecognized character.
    #[error("invalid field '{token}' at position {position}")]
    InvalidField { token: String, position: usize },

    /// A `+` that is not directly followed by a numeric field.
    #[error("sign '+' at position {position} is not followed by a numeric field")]
    DanglingSign { position: usize },

    /// The sign of one axis is given by more than one kind of pattern element,
    /// e.g. a hemisphere letter together with a signed degree field.
    #[error("the {axis} sign is given by more than one kind of field")]
    ConflictingSign { axis: Axis },

    /// The same part of an axis appears twice.
    #[error("the {axis} field '{letter}' appears more than once")]
    DuplicateField { axis: Axis, letter: char },

    /// Minutes without degrees, or seconds without minutes.
    #[error("the {axis} field '{letter}' requires the field '{required}'")]
    MissingLargerField {
        axis: Axis,
        letter: char,
        required: char,
    },

    /// A field with fractional digits is followed by a smaller unit of the
    /// same axis.
    #[error("the {axis} field '{letter}' has fractional digits but is not the smallest unit")]
    FractionalNotLast { axis: Axis, letter: char },

    /// A signed degree field combined with minutes or seconds.
    #[error("the signed {axis} field '{letter}' cannot be combined with minutes or seconds")]
    SignedWithSubField { axis: Axis, letter: char },

    /// A single digit field without fraction, as in `DMM`, is directly
    /// followed by something starting with a digit.
    #[error("the {axis} field '{letter}' has no fixed width but is directly followed by a number")]
    UnboundedField { axis: Axis, letter: char },
}

/// An input string did not match the compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{cause} at position {index} in '{input}'")]
pub struct ParseError {
    input: String,
    index: usize,
    cause: String,
}

impl ParseError {
    pub(crate) fn new(input: &str, index: usize, cause: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            index,
            cause: cause.into(),
        }
    }

    pub(crate) fn from_scan(input: &str, error: &Error<&str, nom::error::Error<&str>>) -> Self {
        Self::new(input, error.offset_in(input), error.cause())
    }

    /// The input string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Byte offset of the failure within [`input`](Self::input).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Human readable reason of the failure.
    pub fn cause(&self) -> &str {
        &self.cause
    }
}

/// A location lacks a value that a non-optional part of the pattern needs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid format '{pattern}' for location {location}")]
pub struct FormatError {
    pattern: String,
    location: Location,
}

impl FormatError {
    pub(crate) fn new(pattern: String, location: Location) -> Self {
        Self { pattern, location }
    }

    /// The pattern of the formatter that failed.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The location that could not be formatted.
    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Format(#[from] FormatError),
}
