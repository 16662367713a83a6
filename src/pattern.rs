//! # Pattern Compiler
//!
//! Compiles a pattern string such as `DD°MM''SS.SSS"X` into a [`Format`] tree.
//!
//! Compilation runs in three steps:
//! - a nom tokenizer splits the pattern into fields, signs, hemisphere
//!   markers, literal text and bracketed groups,
//! - the tokens are folded into a tree, binding every `+` to the numeric
//!   field right after it and merging adjacent literal text,
//! - the tree is validated per axis.
//!
//! Numeric fields directly followed by something that may start with a digit
//! are bounded to their configured width, so `DDMMSS` splits `235915` into
//! three fields while `dd°` still reads `135°`. A field without a fixed width,
//! like the `D` in `DMM`, cannot be followed by a digit.

use std::borrow::Cow;

use nom::{
    Offset, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, none_of, one_of, satisfy},
    combinator::{opt, recognize, value},
    multi::many0,
};

use crate::{
    Axis, Error, IResult, PatternError,
    field::{Field, FieldKind, Unit},
    format::Format,
    sign::SignField,
};

/// Characters with a meaning in a pattern. Literal text containing one of
/// them must be quoted.
pub(crate) const RESERVED_CHARS: [char; 15] = [
    'L', 'D', 'M', 'S', 'l', 'd', 'm', 's', 'E', 'H', 'X', 'x', '+', '[', ']',
];

#[derive(Debug, Clone, PartialEq)]
enum Token<'p> {
    Field(Field),
    /// A `+`, holding the pattern from its position on
    Sign(&'p str),
    Hemisphere(SignField),
    Literal(Cow<'p, str>),
    Group(Vec<Token<'p>>),
}

/// Compiles `pattern` into a validated format tree.
pub(crate) fn compile(pattern: &str) -> Result<Format, PatternError> {
    let tokens = tokenize(pattern)?;
    let mut format = build(tokens, pattern)?;
    validate(&format)?;
    bound_adjacent_fields(&mut format)?;
    Ok(format)
}

fn tokenize(pattern: &str) -> Result<Vec<Token<'_>>, PatternError> {
    match tokens(pattern) {
        Ok(("", tokens)) => Ok(tokens),
        // Every character but an unbalanced ']' starts some token.
        Ok((rest, _)) => Err(PatternError::UnmatchedCloseBracket {
            position: pattern.offset(rest),
        }),
        Err(e) => Err(match Error::from(e) {
            Error::Unclosed { open, .. } => PatternError::UnmatchedOpenBracket {
                position: pattern.offset(open),
            },
            other => {
                let at = other.remaining().unwrap_or(pattern);
                let token = match other {
                    Error::InvalidField(spec) => spec,
                    _ => at,
                };
                PatternError::InvalidField {
                    token: token.to_string(),
                    position: pattern.offset(at),
                }
            }
        }),
    }
}

fn tokens(i: &str) -> IResult<&str, Vec<Token<'_>>> {
    many0(token).parse(i)
}

fn token(i: &str) -> IResult<&str, Token<'_>> {
    alt((
        group,
        value(Token::Literal(Cow::Borrowed("'")), tag("''")),
        quoted,
        field,
        sign,
        alt((
            value(SignField::NorthSouth, char('X')),
            value(SignField::EastWest, char('x')),
        ))
        .map(Token::Hemisphere),
        recognize(none_of("[]'+XxLDMSldmsEH")).map(|c: &str| Token::Literal(Cow::Borrowed(c))),
    ))
    .parse(i)
}

fn group(i: &str) -> IResult<&str, Token<'_>> {
    let (rest, _) = char('[').parse(i)?;
    let (rest, tokens) = tokens(rest)?;

    match char::<_, Error<&str, nom::error::Error<&str>>>(']').parse(rest) {
        Ok((rest, _)) => Ok((rest, Token::Group(tokens))),
        Err(_) => Err(nom::Err::Failure(Error::Unclosed {
            delimiter: ']',
            open: i,
        })),
    }
}

/// Quoted literal text; `''` inside the quotes is a single quote. A `'`
/// without a closing partner is a literal apostrophe, as in `[MM']DD`.
fn quoted(i: &str) -> IResult<&str, Token<'_>> {
    let (rest, _) = char('\'').parse(i)?;
    let (after, text) = many0(alt((value('\'', tag("''")), none_of("'")))).parse(rest)?;

    match char::<_, Error<&str, nom::error::Error<&str>>>('\'').parse(after) {
        Ok((after, _)) => Ok((after, Token::Literal(Cow::Owned(text.into_iter().collect())))),
        Err(_) => Ok((rest, Token::Literal(Cow::Borrowed("'")))),
    }
}

/// A run of one field letter, optionally followed by a separator and a
/// fractional run of the same letter. A separator followed by a different
/// field letter, as in `DD.MM`, is an invalid field.
fn field(i: &str) -> IResult<&str, Token<'_>> {
    let is_field_letter = |c: char| FieldKind::from_letter(c).is_some();

    let (_, letter) = satisfy(is_field_letter).parse(i)?;
    let (rest, _) = take_while1(|c: char| c == letter).parse(i)?;
    let (rest, _) = opt((
        one_of(".,"),
        alt((take_while1(|c: char| c == letter), take_while1(is_field_letter))),
    ))
    .parse(rest)?;

    let spec = &i[..i.len() - rest.len()];
    match Field::from_spec(spec) {
        Some(field) => Ok((rest, Token::Field(field))),
        None => Err(nom::Err::Failure(Error::InvalidField(spec))),
    }
}

fn sign(i: &str) -> IResult<&str, Token<'_>> {
    let (rest, _) = char('+').parse(i)?;
    Ok((rest, Token::Sign(i)))
}

fn build(tokens: Vec<Token<'_>>, pattern: &str) -> Result<Format, PatternError> {
    let mut formats = Vec::with_capacity(tokens.len());
    let mut literal = String::new();
    let mut pending_sign = None;

    for token in tokens {
        if let Some(position) = pending_sign.take() {
            match &token {
                Token::Field(field) => {
                    formats.push(Format::Sign(SignField::Prefix(field.kind().axis())));
                }
                _ => return Err(PatternError::DanglingSign { position }),
            }
        }

        if !matches!(token, Token::Literal(_)) && !literal.is_empty() {
            formats.push(Format::Literal(std::mem::take(&mut literal)));
        }

        match token {
            Token::Literal(text) => literal.push_str(&text),
            Token::Field(field) => formats.push(Format::Field(field)),
            Token::Sign(at) => pending_sign = Some(pattern.offset(at)),
            Token::Hemisphere(sign) => formats.push(Format::Sign(sign)),
            Token::Group(tokens) => formats.push(Format::Optional(Box::new(build(tokens, pattern)?))),
        }
    }

    if let Some(position) = pending_sign {
        return Err(PatternError::DanglingSign { position });
    }
    if !literal.is_empty() {
        formats.push(Format::Literal(literal));
    }

    Ok(Format::Composite(formats))
}

fn collect_leaves<'f>(format: &'f mut Format, leaves: &mut Vec<&'f mut Format>) {
    match format {
        Format::Composite(formats) => {
            for format in formats.iter_mut() {
                collect_leaves(format, leaves);
            }
        }
        Format::Optional(inner) => collect_leaves(inner, leaves),
        _ => leaves.push(format),
    }
}

/// Bounds every field whose next leaf in pattern order is another field or
/// literal text starting with a digit. Fails if such a field has no fixed
/// width.
fn bound_adjacent_fields(format: &mut Format) -> Result<(), PatternError> {
    let mut leaves = Vec::new();
    collect_leaves(format, &mut leaves);

    for n in 1..leaves.len() {
        let digit_next = match &*leaves[n] {
            Format::Field(_) => true,
            Format::Literal(text) => text.starts_with(|c: char| c.is_ascii_digit()),
            _ => false,
        };
        if let (true, Format::Field(field)) = (digit_next, &mut *leaves[n - 1]) {
            if !field.has_fixed_width() {
                return Err(PatternError::UnboundedField {
                    axis: field.kind().axis(),
                    letter: field.kind().letter(),
                });
            }
            field.bound();
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignSource {
    Prefix,
    Hemisphere,
    SignedField,
}

/// Checks the fields of each axis across the whole tree, optional groups
/// included.
fn validate(format: &Format) -> Result<(), PatternError> {
    let mut fields: Vec<&Field> = Vec::new();
    let mut signs: Vec<(Axis, SignSource)> = Vec::new();

    format.for_each_leaf(&mut |leaf| match leaf {
        Format::Field(field) => {
            if field.kind().is_signed() {
                signs.push((field.kind().axis(), SignSource::SignedField));
            }
            fields.push(field);
        }
        Format::Sign(SignField::Prefix(axis)) => signs.push((*axis, SignSource::Prefix)),
        Format::Sign(sign) => signs.push((sign.axis(), SignSource::Hemisphere)),
        _ => {}
    });

    for axis in [Axis::Latitude, Axis::Longitude, Axis::Elevation] {
        let mut sources = signs.iter().filter(|(a, _)| *a == axis).map(|(_, source)| *source);
        if let Some(first) = sources.next() {
            if sources.any(|source| source != first) {
                return Err(PatternError::ConflictingSign { axis });
            }
        }

        let axis_fields: Vec<&Field> = fields
            .iter()
            .copied()
            .filter(|f| f.kind().axis() == axis)
            .collect();

        for (n, field) in axis_fields.iter().enumerate() {
            if axis_fields[..n].iter().any(|f| f.kind().unit() == field.kind().unit()) {
                return Err(PatternError::DuplicateField {
                    axis,
                    letter: field.kind().letter(),
                });
            }
        }

        let find = |unit: Unit| axis_fields.iter().copied().find(|f| f.kind().unit() == unit);
        let degree = find(Unit::Degree);
        let minute = find(Unit::Minute);
        let second = find(Unit::Second);
        let (degree_letter, minute_letter) = if axis == Axis::Latitude {
            ('D', 'M')
        } else {
            ('d', 'm')
        };

        if let (Some(minute), None) = (minute, degree) {
            return Err(PatternError::MissingLargerField {
                axis,
                letter: minute.kind().letter(),
                required: degree_letter,
            });
        }
        if let (Some(second), None) = (second, minute) {
            return Err(PatternError::MissingLargerField {
                axis,
                letter: second.kind().letter(),
                required: minute_letter,
            });
        }

        if let Some(degree) = degree {
            if degree.kind().is_signed() && (minute.is_some() || second.is_some()) {
                return Err(PatternError::SignedWithSubField {
                    axis,
                    letter: degree.kind().letter(),
                });
            }
            if degree.has_fraction() && minute.is_some() {
                return Err(PatternError::FractionalNotLast {
                    axis,
                    letter: degree.kind().letter(),
                });
            }
        }
        if let Some(minute) = minute {
            if minute.has_fraction() && second.is_some() {
                return Err(PatternError::FractionalNotLast {
                    axis,
                    letter: minute.kind().letter(),
                });
            }
        }
    }

    Ok(())
}
