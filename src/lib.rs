//! Build PostGIS geometry terms for test fixtures from a compact point notation.
//!
//! Points are written either as literal `"<x> <y>"` coordinates or as ids referring to a grid
//! drawn as ASCII art. See [`GeometryFactory`] for the entry point.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use error::{GeoFixtureError, GeoFixtureResult, PointReferenceError};
pub use expr::{SqlGeometry, WktCoord, WktGeometry, SRID};
pub use factory::GeometryFactory;
pub use grid::{GridSpec, GridStore, Layout};
pub use notation::{Notation, PointToken};

pub mod error;
mod expr;
mod factory;
mod grid;
mod notation;
