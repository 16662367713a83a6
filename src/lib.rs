//! # Location Format
//!
//! This library formats geographic locations as text and parses them back,
//! driven by a compact pattern such as `DD°MM''SS.SSS"X`.
//!
//! A pattern is compiled once into a [`LocationFormatter`], which can then be
//! used for any number of `format` and `parse` calls. The pattern controls:
//! - Which values appear: latitude, longitude and elevation
//! - How degrees are split into minutes and seconds
//! - Digit widths, fractional precision and the decimal separator
//! - How the sign is shown: a `+`/`-` prefix, a hemisphere letter or a signed number
//! - Optional parts that may be missing from a location or from the text
//!
//! ## Usage
//!
//! ```rust
//! use geofmt::{ISO_HUMAN_LONG, Location, LocationFormatter};
//!
//! let location = Location::new(Some(16.46644), Some(-135.48313), None);
//! let text = ISO_HUMAN_LONG.format(&location).unwrap();
//! assert_eq!(text, "16°27'59.184\"N 135°28'59.268\"W");
//!
//! let formatter = LocationFormatter::of_pattern("LL.LLLL lll.llll[ E'm']").unwrap();
//! let parsed = formatter.parse("16.4664 -135.4831 12m").unwrap();
//! assert_eq!(parsed, Location::new(Some(16.4664), Some(-135.4831), Some(12.0)));
//! ```

mod builder;
mod cursor;
pub mod error;
mod field;
mod format;
mod formatter;
mod location;
mod numeric;
pub mod parsing;
mod pattern;
mod sign;

pub use error::{Error, FormatError, IResult, LocationError, ParseError, PatternError};
pub use formatter::*;
pub use location::{Axis, Location};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
