use geo::Coord;
use itertools::Itertools;

use crate::error::{GeoFixtureError, GeoFixtureResult, PointReferenceError};
use crate::expr::{SqlGeometry, WktCoord, WktGeometry};
use crate::grid::{GridSpec, GridStore, Layout};
use crate::notation::{Notation, PointToken};

/// Creates PostGIS geometry expressions from the compact scenario notation.
///
/// Owns the [`GridStore`] that point ids are resolved against. Independent scenarios should each
/// use their own factory.
///
/// ```
/// use geo_fixture::{GeometryFactory, Layout};
///
/// let mut factory = GeometryFactory::new();
/// factory.set_grid(&Layout::from("1.2\n...\n3.4"), 10.0);
///
/// let sql = factory.parse_geometry("(1,2,4,3,1)", None).unwrap();
/// assert_eq!(
///     sql,
///     "ST_SetSRID('POLYGON((0 0,20 0,20 20,0 20,0 0))'::geometry, 4326)"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeometryFactory {
    grid: GridStore,
}

impl GeometryFactory {
    /// Create a factory with an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory resolving ids against an existing grid.
    pub fn with_grid(grid: GridStore) -> Self {
        Self { grid }
    }

    /// Access the current grid.
    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    /// Replace the grid with one built from `layout`.
    pub fn set_grid(&mut self, layout: &Layout, spacing: f64) {
        self.grid.rebuild(layout, spacing);
    }

    /// Replace the grid with the one described by `spec`.
    pub fn load_grid(&mut self, spec: &GridSpec) -> GeoFixtureResult<()> {
        spec.validate()?;
        self.grid.rebuild(&spec.layout(), spec.spacing);
        Ok(())
    }

    /// The coordinates of grid point `id`.
    pub fn grid_node(&self, id: i64) -> Option<Coord> {
        self.grid.lookup(id)
    }

    /// Create the SQL geometry term for `notation`.
    ///
    /// `scene` names the calling scenario for diagnostics only; it has no effect on the output.
    pub fn parse_geometry(&self, notation: &str, scene: Option<&str>) -> GeoFixtureResult<String> {
        let geometry = match Notation::classify(notation) {
            Notation::Point(point) => WktGeometry::Point(self.resolve_point(point)?),
            Notation::LineString(points) => WktGeometry::LineString(self.resolve_points(points)?),
            Notation::Polygon(ring) => WktGeometry::Polygon(self.resolve_points(ring)?),
        };
        let sql = SqlGeometry(geometry).to_string();
        tracing::trace!(scene = ?scene, notation, sql = sql.as_str(), "parsed geometry");
        Ok(sql)
    }

    /// Format a single point token as WKT coordinates.
    pub fn wkt_point(&self, token: &str) -> GeoFixtureResult<String> {
        Ok(self.resolve_point(token)?.to_string())
    }

    /// Format a comma-separated list of point tokens as WKT coordinates.
    ///
    /// Coordinate and grid tokens may be mixed. The list is not checked for length or closure.
    pub fn wkt_points(&self, tokens: &str) -> GeoFixtureResult<String> {
        Ok(self.resolve_points(tokens)?.iter().join(","))
    }

    fn resolve_point<'a>(&self, token: &'a str) -> GeoFixtureResult<WktCoord<'a>> {
        match PointToken::parse(token)? {
            PointToken::Coordinates(text) => Ok(WktCoord::Literal(text)),
            PointToken::GridId(id) => self.grid.lookup(id).map(WktCoord::Grid).ok_or_else(|| {
                GeoFixtureError::invalid_point(token.trim(), PointReferenceError::NotInGrid)
            }),
        }
    }

    fn resolve_points<'a>(&self, tokens: &'a str) -> GeoFixtureResult<Vec<WktCoord<'a>>> {
        tokens
            .split(',')
            .map(|token| self.resolve_point(token))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use geo::coord;
    use wkt::Wkt;

    use super::*;
    use crate::test::grid;

    fn factory() -> GeometryFactory {
        GeometryFactory::with_grid(grid::square())
    }

    fn wkt_of(sql: &str) -> Wkt<f64> {
        let wkt = sql
            .strip_prefix("ST_SetSRID('")
            .and_then(|s| s.strip_suffix("'::geometry, 4326)"))
            .unwrap();
        Wkt::from_str(wkt).unwrap()
    }

    fn assert_invalid(result: GeoFixtureResult<String>, expected: PointReferenceError) {
        match result {
            Err(GeoFixtureError::InvalidPointReference { reason, .. }) => {
                assert_eq!(reason, expected)
            }
            other => panic!("expected invalid point reference, got {other:?}"),
        }
    }

    #[test]
    fn point() {
        let sql = GeometryFactory::new().parse_geometry("0 0", None).unwrap();
        assert_eq!(sql, "ST_SetSRID('POINT(0 0)'::geometry, 4326)");
        assert!(matches!(wkt_of(&sql), Wkt::Point(_)));
    }

    #[test]
    fn line_string() {
        let sql = GeometryFactory::new()
            .parse_geometry("0 0,1 1", Some("lines"))
            .unwrap();
        assert_eq!(sql, "ST_SetSRID('LINESTRING(0 0,1 1)'::geometry, 4326)");
        assert!(matches!(wkt_of(&sql), Wkt::LineString(_)));
    }

    #[test]
    fn polygon() {
        let sql = GeometryFactory::new()
            .parse_geometry("(0 0,1 0,1 1,0 0)", None)
            .unwrap();
        assert_eq!(
            sql,
            "ST_SetSRID('POLYGON((0 0,1 0,1 1,0 0))'::geometry, 4326)"
        );
        assert!(matches!(wkt_of(&sql), Wkt::Polygon(_)));
    }

    #[test]
    fn grid_references() {
        let factory = factory();
        assert_eq!(
            factory.parse_geometry("4", None).unwrap(),
            "ST_SetSRID('POINT(20 20)'::geometry, 4326)"
        );
        assert_eq!(
            factory.parse_geometry("1, 2", None).unwrap(),
            "ST_SetSRID('LINESTRING(0 0,20 0)'::geometry, 4326)"
        );
        assert_eq!(
            factory.parse_geometry("(1,2,4,1)", None).unwrap(),
            "ST_SetSRID('POLYGON((0 0,20 0,20 20,0 0))'::geometry, 4326)"
        );
    }

    #[test]
    fn mixed_tokens() {
        assert_eq!(
            factory().wkt_points("1,5.5 6.5, 3").unwrap(),
            "0 0,5.5 6.5,0 20"
        );
    }

    #[test]
    fn scene_does_not_change_output() {
        let factory = factory();
        assert_eq!(
            factory.parse_geometry("1,4", None).unwrap(),
            factory.parse_geometry("1,4", Some("some scenario")).unwrap()
        );
    }

    #[test]
    fn wkt_point_round_trip() {
        let factory = GeometryFactory::new();
        assert_eq!(factory.wkt_point("12 34").unwrap(), "12 34");
        assert_eq!(factory.wkt_point(" 12 34 ").unwrap(), "12 34");
    }

    #[test]
    fn wkt_point_from_grid() {
        let mut factory = GeometryFactory::new();
        factory.set_grid(&Layout::from("0"), 1.0);
        assert_eq!(factory.grid_node(0), Some(coord! { x: 0., y: 0. }));
        assert_eq!(factory.wkt_point("0").unwrap(), "0 0");
    }

    #[test]
    fn wkt_points_single_entry() {
        assert_eq!(factory().wkt_points("2").unwrap(), "20 0");
    }

    #[test]
    fn unknown_grid_id() {
        let mut factory = GeometryFactory::new();
        factory.set_grid(&Layout::new(vec![vec!["1".to_string()]]), 10.0);

        let result = factory.parse_geometry("5", None);
        assert_invalid(result, PointReferenceError::NotInGrid);

        let result = factory.parse_geometry("1,5", None);
        assert_invalid(result, PointReferenceError::NotInGrid);
    }

    #[test]
    fn not_a_number() {
        let factory = factory();
        assert_invalid(
            factory.parse_geometry("abc", None),
            PointReferenceError::NotANumber,
        );
        assert_invalid(
            factory.parse_geometry("(1,2,x,1)", None),
            PointReferenceError::NotANumber,
        );
        assert_invalid(
            factory.parse_geometry("1,2,", None),
            PointReferenceError::NotANumber,
        );
    }

    #[test]
    fn error_names_token() {
        let err = factory().parse_geometry("1, 9 ,2", None).unwrap_err();
        assert_eq!(err.to_string(), "Scenario error: Point '9' not found in grid");
    }

    #[test]
    fn new_grid_replaces_old() {
        let mut factory = factory();
        factory.set_grid(&Layout::from("..7"), 1.0);
        assert_invalid(factory.parse_geometry("1", None), PointReferenceError::NotInGrid);
        assert_eq!(
            factory.parse_geometry("7", None).unwrap(),
            "ST_SetSRID('POINT(2 0)'::geometry, 4326)"
        );
    }

    #[test]
    fn load_grid_from_spec() {
        let mut factory = GeometryFactory::new();
        let spec = GridSpec::new(vec!["1.".to_string(), ".2".to_string()], 0.5);
        factory.load_grid(&spec).unwrap();
        assert_eq!(
            factory.parse_geometry("1,2", None).unwrap(),
            "ST_SetSRID('LINESTRING(0 0,0.5 0.5)'::geometry, 4326)"
        );

        let bad = GridSpec::new(vec!["3".to_string()], 0.0);
        assert!(factory.load_grid(&bad).is_err());
        assert_eq!(factory.grid().len(), 2);
    }
}
