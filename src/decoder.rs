// decoder.rs
//
// Copyright (c) 2019-2024  Minnesota Department of Transportation
//
//! Decoder for Mapbox Vector Tile (MVT) geometry.
//!
use crate::cursor::{GeomCursor, GeomStep};
use crate::error::{Error, Result};
use crate::geom::{Geom, GeomType, Linestring, Polygon, Ring, is_clockwise};
use pointy::{Float, Pt};
use std::mem;

/// Decode the geometry of one feature.
///
/// The cursor is consumed; construct a new one to decode again.
///
/// * `cursor` Cursor over the feature's geometry data.
/// * `geom_tp` Declared geometry type of the feature.
///
/// # Errors
/// [Error::UnsupportedGeomType] if `geom_tp` is [GeomType::Unknown].
/// Malformed geometry data does not error; whatever was decoded before the
/// problem is returned.
///
/// # Example
/// ```
/// use mvt_decode::{Geom, GeomCursor, GeomType, decode_geom};
///
/// # fn main() -> Result<(), mvt_decode::Error> {
/// let geom = [9, 50, 34];
/// let cursor = GeomCursor::from_slice(&geom, 0.0, 0.0, 1.0, 1.0);
/// match decode_geom(cursor, GeomType::Point)? {
///     Geom::Point(pt) => assert_eq!((pt.x, pt.y), (25.0, 17.0)),
///     _ => unreachable!(),
/// }
/// # Ok(()) }
/// ```
pub fn decode_geom<F, I>(
    mut cursor: GeomCursor<F, I>,
    geom_tp: GeomType,
) -> Result<Geom<F>>
where
    F: Float,
    I: Iterator<Item = u32>,
{
    log::trace!("decode_geom: {geom_tp:?}");
    match geom_tp {
        GeomType::Point => Ok(decode_point(&mut cursor)),
        GeomType::Linestring => Ok(decode_linestring(&mut cursor)),
        GeomType::Polygon => Ok(decode_polygons(read_rings(&mut cursor))),
        GeomType::Unknown => Err(Error::UnsupportedGeomType()),
    }
}

/// Check a vertex count against its command header (debug builds only).
fn check_count(count: usize, expected: usize, what: &str) {
    if cfg!(debug_assertions) && count != expected {
        log::warn!("{what} with {count} points, {expected} expected");
    }
}

/// Decode a point or multipoint feature.
fn decode_point<F, I>(cursor: &mut GeomCursor<F, I>) -> Geom<F>
where
    F: Float,
    I: Iterator<Item = u32>,
{
    let mut pts: Vec<Pt<F>> = Vec::new();
    let mut first = true;
    while let Some(step) = cursor.next() {
        if first {
            first = false;
            pts.reserve(cursor.run_len() as usize);
        }
        // any step counts as a point, whatever its command
        pts.push(step.pt());
    }
    // some encoders write a count which does not match the vertex total
    check_count(pts.len(), cursor.run_len() as usize, "multipoint");
    match pts.len() {
        0 => Geom::Empty,
        1 => Geom::Point(pts[0]),
        _ => Geom::MultiPoint(pts),
    }
}

/// Decode a linestring or multilinestring feature.
fn decode_linestring<F, I>(cursor: &mut GeomCursor<F, I>) -> Geom<F>
where
    F: Float,
    I: Iterator<Item = u32>,
{
    let mut lines: Vec<Linestring<F>> = Vec::new();
    let mut line: Linestring<F> = Vec::new();
    let mut first = true;
    let mut first_line_to = true;
    let mut pre_len = 0;
    while let Some(step) = cursor.next() {
        match step {
            GeomStep::MoveTo(_) => {
                if first {
                    first = false;
                } else {
                    check_count(line.len(), pre_len, "line");
                    first_line_to = true;
                    lines.push(mem::take(&mut line));
                }
            }
            GeomStep::LineTo(_) if first_line_to => {
                first_line_to = false;
                pre_len = cursor.run_len() as usize + 1;
                line.reserve(cursor.run_len() as usize);
            }
            _ => (),
        }
        line.push(step.pt());
    }
    lines.push(line);
    if lines.len() == 1 {
        let line = lines.remove(0);
        if line.len() > 1 {
            Geom::Linestring(line)
        } else {
            Geom::Empty
        }
    } else {
        Geom::MultiLinestring(lines)
    }
}

/// Read the rings of a polygon feature into a flat list.
///
/// Rings are collected in stream order, with the closing vertex appended
/// when a ring with more than 2 vertices does not already end at its start.
fn read_rings<F, I>(cursor: &mut GeomCursor<F, I>) -> Vec<Ring<F>>
where
    F: Float,
    I: Iterator<Item = u32>,
{
    let mut rings: Vec<Ring<F>> = Vec::new();
    let mut ring: Ring<F> = Vec::new();
    let mut start = Pt::from((F::zero(), F::zero()));
    let mut first = true;
    let mut first_line_to = true;
    let mut pre_len = 0;
    while let Some(step) = cursor.next() {
        match step {
            GeomStep::MoveTo(pt) => {
                start = pt;
                if first {
                    first = false;
                } else {
                    check_count(ring.len(), pre_len, "ring");
                    first_line_to = true;
                    rings.push(mem::take(&mut ring));
                }
                ring.push(pt);
            }
            GeomStep::LineTo(pt) => {
                if first_line_to {
                    first_line_to = false;
                    pre_len = cursor.run_len() as usize + 2;
                    ring.reserve(cursor.run_len() as usize + 1);
                }
                ring.push(pt);
            }
            GeomStep::Close(_) => {
                if ring.len() > 2 && ring.last() != Some(&start) {
                    ring.push(start);
                }
            }
        }
    }
    rings.push(ring);
    rings
}

/// Classify a flat list of rings into polygons.
///
/// The winding of the first ring establishes which winding marks an
/// exterior; each later ring wound the same way starts a new polygon, and
/// each ring wound the other way becomes a hole in the most recent one.
/// Output exteriors are counter-clockwise and holes clockwise, reversing
/// rings as needed.
fn decode_polygons<F>(mut rings: Vec<Ring<F>>) -> Geom<F>
where
    F: Float,
{
    if rings.len() == 1 {
        let mut ring = rings.remove(0);
        if ring.len() < 4 {
            return Geom::Empty;
        }
        if is_clockwise(&ring) {
            ring.reverse();
        }
        return Geom::Polygon(Polygon::new(ring));
    }
    let mut polys: Vec<Polygon<F>> = Vec::new();
    let mut clockwise = true;
    for mut ring in rings {
        // skip degenerate rings
        if ring.len() < 4 {
            continue;
        }
        if polys.is_empty() {
            // first ring is always exterior, and sets the winding
            // convention for all the rest
            clockwise = is_clockwise(&ring);
            if clockwise {
                ring.reverse();
            }
            polys.push(Polygon::new(ring));
        } else if is_clockwise(&ring) == clockwise {
            // same winding as the first ring: a new exterior
            if clockwise {
                ring.reverse();
            }
            polys.push(Polygon::new(ring));
        } else if let Some(poly) = polys.last_mut() {
            // opposite winding: a hole in the most recent polygon
            if clockwise {
                ring.reverse();
            }
            poly.add_hole(ring);
        }
    }
    match polys.len() {
        0 => Geom::Empty,
        1 => Geom::Polygon(polys.remove(0)),
        _ => Geom::MultiPolygon(polys),
    }
}
