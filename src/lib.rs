// lib.rs
//
// Copyright (c) 2019-2024  Minnesota Department of Transportation
//
//! A library for decoding [mapbox vector tile] (MVT) geometry.
//!
//! Feature geometry in an MVT layer is a stream of command and parameter
//! integers.  A [GeomCursor] steps through the stream, decoding absolute
//! positions in output coördinates, and [decode_geom] assembles the steps
//! into a [Geom] for the feature's declared [GeomType].
//!
//! # Example
//! ```rust
//! use mvt_decode::{Geom, GeomCursor, GeomType, decode_geom};
//!
//! # fn main() -> Result<(), mvt_decode::Error> {
//! let geom = [9, 4, 4, 18, 0, 16, 16, 0];
//! let cursor = GeomCursor::from_slice(&geom, 0.0, 0.0, 1.0, 1.0);
//! match decode_geom(cursor, GeomType::Linestring)? {
//!     Geom::Linestring(line) => assert_eq!(line.len(), 3),
//!     _ => unreachable!(),
//! }
//! # Ok(()) }
//! ```
//!
//! [mapbox vector tile]: https://github.com/mapbox/vector-tile-spec
#![forbid(unsafe_code)]

mod cursor;
mod decoder;
mod error;
mod geom;

pub use crate::cursor::{GeomCursor, GeomStep, SliceCursor};
pub use crate::decoder::decode_geom;
pub use crate::error::{Error, Result};
pub use crate::geom::{
    Geom, GeomType, Linestring, Polygon, Ring, is_clockwise,
};
