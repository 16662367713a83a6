//! # Parsing Utilities
//!
//! This module provides utility parsers for reading bounded digit runs and
//! ensuring complete consumption of input data.

use nom::{
    AsChar, Err, Input, Mode, OutputMode, PResult, Parser, bytes::complete::take_while_m_n,
    error::ParseError,
};

use crate::Error;

/// Recognizes between `min` and `max` ASCII decimal digits.
///
/// Numeric fields with a fixed width use this to stop reading once the width
/// is reached, so that adjacent fields like `DDMM` can be told apart.
///
/// # Arguments
///
/// * `min` - Minimum number of digits
/// * `max` - Maximum number of digits, `usize::MAX` for an unbounded run
///
/// # Examples
///
/// ```rust
/// use geofmt::{IResult, parsing::digits};
/// use nom::Parser;
///
/// let result: IResult<_, _> = digits(1, 2).parse("2359");
/// assert_eq!(result, Ok(("59", "23")));
///
/// let result: IResult<_, _> = digits(1, 2).parse("N");
/// assert!(result.is_err());
/// ```
pub fn digits<I, E>(min: usize, max: usize) -> impl Parser<I, Output = I, Error = E>
where
    I: Input,
    <I as Input>::Item: AsChar,
    E: ParseError<I>,
{
    take_while_m_n(min, max, |c: <I as Input>::Item| c.is_dec_digit())
}

/// Ensures that the parser consumes all input.
///
/// If input is left over after `f` succeeds, an [`Error::TrailingInput`]
/// holding the remainder is returned.
///
/// # Arguments
///
/// * `f` - The parser to run
///
/// # Examples
///
/// ```rust
/// use geofmt::{Error, IResult, parsing::{consumed, digits}};
/// use nom::Parser;
///
/// // Parse all 3 digits
/// let mut parser = consumed(digits(1, 3));
/// let result: IResult<_, _> = parser.parse("123");
/// assert!(result.is_ok());
///
/// // This would fail because not all input is consumed
/// let result: IResult<_, _> = parser.parse("1234");
/// assert_eq!(result, Err(nom::Err::Error(Error::TrailingInput("4"))));
/// ```
pub fn consumed<I, E, F>(f: F) -> impl Parser<I, Output = <F as Parser<I>>::Output, Error = Error<I, E>>
where
    I: Input,
    E: ParseError<I>,
    F: Parser<I, Error = Error<I, E>>,
{
    Consumed { f }
}

struct Consumed<F> {
    f: F,
}

impl<I, E, F> Parser<I> for Consumed<F>
where
    I: Input,
    E: ParseError<I>,
    F: Parser<I, Error = Error<I, E>>,
{
    type Output = <F as Parser<I>>::Output;
    type Error = Error<I, E>;

    fn process<OM: OutputMode>(&mut self, i: I) -> PResult<OM, I, Self::Output, Self::Error> {
        let (i, o) = self.f.process::<OM>(i)?;

        if i.input_len() != 0 {
            return Err(Err::Error(OM::Error::bind(|| Error::TrailingInput(i))));
        }

        Ok((i, o))
    }
}
