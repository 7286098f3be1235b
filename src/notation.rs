//! The compact geometry notation used in test scenarios.
//!
//! ```text
//! <P>                 point
//! <P>,<P>,...,<P>     line string
//! (<P>,<P>,...,<P>)   polygon with a single ring
//! ```
//!
//! `<P>` is either literal coordinates `"<x> <y>"` or the integer id of a grid point. Both forms
//! may be mixed within one list.

use crate::error::{GeoFixtureError, GeoFixtureResult, PointReferenceError};

/// A notation string classified by geometry type.
///
/// Each variant carries the point list still to be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation<'a> {
    /// A single point token.
    Point(&'a str),

    /// A comma-separated list of point tokens.
    LineString(&'a str),

    /// The comma-separated point tokens of the exterior ring, without the parentheses.
    Polygon(&'a str),
}

impl<'a> Notation<'a> {
    /// Classify `notation` by its shape.
    ///
    /// Anything without a comma is a point, a comma list without an opening parenthesis is a line
    /// string, and everything else is a polygon.
    pub fn classify(notation: &'a str) -> Self {
        if !notation.contains(',') {
            Notation::Point(notation)
        } else if !notation.contains('(') {
            Notation::LineString(notation)
        } else {
            Notation::Polygon(strip_parens(notation))
        }
    }

    /// The WKT keyword of this geometry type.
    pub fn name(&self) -> &'static str {
        match self {
            Notation::Point(_) => "POINT",
            Notation::LineString(_) => "LINESTRING",
            Notation::Polygon(_) => "POLYGON",
        }
    }

    /// The unresolved point tokens, comma-separated.
    pub fn points(&self) -> &'a str {
        match self {
            Notation::Point(points) | Notation::LineString(points) | Notation::Polygon(points) => {
                points
            }
        }
    }
}

/// Remove surrounding whitespace and one layer of parentheses.
fn strip_parens(notation: &str) -> &str {
    let inner = notation.trim();
    let inner = inner.strip_prefix('(').unwrap_or(inner);
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    inner.trim()
}

/// A single point token, before any grid lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointToken<'a> {
    /// Literal `"<x> <y>"` coordinates, passed through unchanged.
    Coordinates(&'a str),

    /// Reference to a grid point.
    GridId(i64),
}

impl<'a> PointToken<'a> {
    /// Read one point token.
    ///
    /// Surrounding whitespace is ignored. A token containing a space is taken as coordinates
    /// without checking the numbers; anything else must be an integer.
    pub fn parse(token: &'a str) -> GeoFixtureResult<Self> {
        let token = token.trim();
        if token.contains(' ') {
            return Ok(PointToken::Coordinates(token));
        }
        token
            .parse()
            .map(PointToken::GridId)
            .map_err(|_| GeoFixtureError::invalid_point(token, PointReferenceError::NotANumber))
    }
}
