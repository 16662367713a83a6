use std::fmt;

use nom::{
    Parser,
    bytes::complete::take_while1,
    character::complete::{char, one_of},
    combinator::opt,
    error::{ErrorKind, FromExternalError},
    sequence::preceded,
};

use crate::{Error, IResult, parsing::digits};

/// Fixed width decimal rule of a single field specifier such as `DD`,
/// `SS.SSS` or `HHHH,H`.
///
/// The integer part is zero padded to the number of field letters before the
/// separator, the fractional part has exactly as many digits as letters after
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NumericField {
    letter: char,
    integer_digits: usize,
    /// Decimal separator and number of fractional digits
    fraction: Option<(char, usize)>,
    /// Parse at most the configured number of digits
    bounded: bool,
}

impl NumericField {
    /// Compiles a field specifier. Every occurrence of the field letter is
    /// replaced by `0` and the result must be a decimal pattern of the form
    /// `0+` or `0+[.,]0+`.
    pub(crate) fn from_spec(spec: &str) -> Option<Self> {
        let letter = spec.chars().next()?;
        let decimal = spec.replace(letter, "0");

        match decimal_pattern(&decimal) {
            Ok(("", (integer_digits, fraction))) => Some(Self {
                letter,
                integer_digits,
                fraction,
                bounded: false,
            }),
            _ => None,
        }
    }

    pub(crate) fn letter(&self) -> char {
        self.letter
    }

    pub(crate) fn has_fraction(&self) -> bool {
        self.fraction.is_some()
    }

    /// Whether the end of a number of this rule is known without looking at
    /// what follows: the integer part has more than one digit, or a fraction
    /// follows it.
    pub(crate) fn has_fixed_width(&self) -> bool {
        self.integer_digits > 1 || self.fraction.is_some()
    }

    /// Limits parsing to the configured widths: at most as many fractional
    /// digits as configured, and at most as many integer digits if there is
    /// more than one. Needed when the next field follows without a separator,
    /// as in `DDMM`.
    pub(crate) fn bound(&mut self) {
        self.bounded = true;
    }

    /// Formats `value` rounded half-even to the fractional digits of this
    /// rule. Negative values keep their `-`, unless they round to zero.
    pub(crate) fn format(&self, value: f64) -> String {
        let precision = self.fraction.map_or(0, |(_, digits)| digits);
        let magnitude = format!("{:.*}", precision, value.abs());
        let (integer, fraction) = magnitude.split_once('.').unwrap_or((magnitude.as_str(), ""));
        let negative = value < 0.0 && magnitude.bytes().any(|b| matches!(b, b'1'..=b'9'));

        let mut out = String::with_capacity(magnitude.len() + self.integer_digits + 1);
        if negative {
            out.push('-');
        }
        for _ in integer.len()..self.integer_digits {
            out.push('0');
        }
        out.push_str(integer);
        if let Some((separator, _)) = self.fraction {
            out.push(separator);
            out.push_str(fraction);
        }

        out
    }

    /// Parses a number of this rule. Only `signed` rules accept a leading
    /// `+` or `-`.
    pub(crate) fn parse<'a>(&self, i: &'a str, signed: bool) -> IResult<&'a str, f64> {
        let start = i;

        let (i, negative) = if signed {
            opt(one_of("+-")).map(|sign| sign == Some('-')).parse(i)?
        } else {
            (i, false)
        };

        let width = if self.bounded && self.integer_digits > 1 {
            self.integer_digits
        } else {
            usize::MAX
        };
        let Ok((i, integer)) = digits::<_, Error<&str, nom::error::Error<&str>>>(1, width).parse(i) else {
            return Err(nom::Err::Error(Error::MissingNumber(start)));
        };

        let (i, fraction) = match self.fraction {
            Some((separator, count)) => {
                let width = if self.bounded { count } else { usize::MAX };
                opt(preceded(char(separator), digits(1, width))).parse(i)?
            }
            None => (i, None),
        };

        let number = format!("{integer}.{}", fraction.unwrap_or("0"));
        let value: f64 = number
            .parse()
            .map_err(|e| nom::Err::Error(Error::from_external_error(start, ErrorKind::Float, e)))?;

        Ok((i, if negative { -value } else { value }))
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.integer_digits {
            write!(f, "{}", self.letter)?;
        }
        if let Some((separator, digits)) = self.fraction {
            write!(f, "{separator}")?;
            for _ in 0..digits {
                write!(f, "{}", self.letter)?;
            }
        }
        Ok(())
    }
}

fn decimal_pattern(i: &str) -> IResult<&str, (usize, Option<(char, usize)>)> {
    let zeros = || take_while1(|c: char| c == '0').map(|z: &str| z.len());
    (zeros(), opt((one_of(".,"), zeros()))).parse(i)
}
