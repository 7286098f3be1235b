//! WKT text and the PostGIS expression wrapped around it.

use std::fmt;

use geo::Coord;
use itertools::Itertools;

/// The spatial reference id attached to every emitted geometry.
pub const SRID: u32 = 4326;

/// One resolved coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WktCoord<'a> {
    /// Coordinates written by the caller, emitted verbatim.
    Literal(&'a str),

    /// Coordinates taken from the grid.
    Grid(Coord),
}

impl fmt::Display for WktCoord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WktCoord::Literal(text) => f.write_str(text),
            WktCoord::Grid(coord) => write!(f, "{} {}", coord.x, coord.y),
        }
    }
}

/// A geometry with all of its coordinates resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum WktGeometry<'a> {
    /// `POINT(x y)`
    Point(WktCoord<'a>),

    /// `LINESTRING(x y,...)`
    LineString(Vec<WktCoord<'a>>),

    /// `POLYGON((x y,...))` with the exterior ring only.
    Polygon(Vec<WktCoord<'a>>),
}

impl fmt::Display for WktGeometry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WktGeometry::Point(coord) => write!(f, "POINT({coord})"),
            WktGeometry::LineString(coords) => {
                write!(f, "LINESTRING({})", coords.iter().format(","))
            }
            WktGeometry::Polygon(ring) => write!(f, "POLYGON(({}))", ring.iter().format(",")),
        }
    }
}

/// SQL expression casting WKT to a geometry with [`SRID`].
#[derive(Debug, Clone, PartialEq)]
pub struct SqlGeometry<'a>(pub WktGeometry<'a>);

impl fmt::Display for SqlGeometry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ST_SetSRID('{}'::geometry, {})", self.0, SRID)
    }
}
