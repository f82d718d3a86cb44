// geom.rs
//
// Copyright (c) 2019-2024  Minnesota Department of Transportation
//
//! Geometry decoded from MVT features.
//!
use pointy::{Float, Pt};

/// Geometry types for features
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GeomType {
    /// Unknown geometry
    #[default]
    Unknown,

    /// Point or Multipoint
    Point,

    /// Linestring or Multilinestring
    Linestring,

    /// Polygon or Multipolygon
    Polygon,
}

/// Linestring of points
pub type Linestring<F> = Vec<Pt<F>>;

/// Linear ring of a polygon
///
/// The first and last points of a closed ring are equal.
pub type Ring<F> = Vec<Pt<F>>;

/// Polygon bounded by linear rings
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon<F>
where
    F: Float,
{
    /// Exterior ring, wound counter-clockwise
    pub exterior: Ring<F>,

    /// Interior rings (holes), wound clockwise
    pub interiors: Vec<Ring<F>>,
}

/// Geometry of one feature
///
/// Produced by [decode_geom](fn.decode_geom.html); the singular / multi
/// distinction comes from the number of shapes decoded, not from the
/// feature's [GeomType].
#[derive(Clone, Debug, PartialEq)]
pub enum Geom<F>
where
    F: Float,
{
    /// No geometry
    Empty,

    /// Single point
    Point(Pt<F>),

    /// Multiple points
    MultiPoint(Vec<Pt<F>>),

    /// Single linestring
    Linestring(Linestring<F>),

    /// Multiple linestrings
    MultiLinestring(Vec<Linestring<F>>),

    /// Single polygon
    Polygon(Polygon<F>),

    /// Multiple polygons
    MultiPolygon(Vec<Polygon<F>>),
}

impl From<i32> for GeomType {
    fn from(tp: i32) -> Self {
        match tp {
            1 => GeomType::Point,
            2 => GeomType::Linestring,
            3 => GeomType::Polygon,
            _ => GeomType::Unknown,
        }
    }
}

impl<F> Polygon<F>
where
    F: Float,
{
    /// Create a new polygon from its exterior ring.
    pub fn new(exterior: Ring<F>) -> Self {
        Polygon {
            exterior,
            interiors: Vec::new(),
        }
    }

    /// Add an interior ring (hole).
    pub fn add_hole(&mut self, ring: Ring<F>) {
        self.interiors.push(ring);
    }
}

impl<F> Geom<F>
where
    F: Float,
{
    /// Check if the geometry is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Geom::Empty)
    }
}

/// Check the winding order of a ring.
///
/// A ring with negative signed area (shoelace formula, in output
/// coördinates) is clockwise.  The last vertex wraps around to the first,
/// so open and closed rings give the same answer.
pub fn is_clockwise<F>(ring: &[Pt<F>]) -> bool
where
    F: Float,
{
    let mut area = F::zero();
    for (i, p0) in ring.iter().enumerate() {
        let p1 = &ring[(i + 1) % ring.len()];
        area = area + p0.x * p1.y - p1.x * p0.y;
    }
    area < F::zero()
}
