//! Planar geometry as sent to the server.
//!
//! The server speaks WKT over the campus plane. Points are written as
//! `x z` pairs in the order given; Rust's shortest round-trip float
//! formatting keeps the values exact.

use campusloop_common::PlanarPoint;

/// An ordered polyline over building positions.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    points: Vec<PlanarPoint>,
}

impl RouteGeometry {
    /// Straight route from `start` to `end`.
    pub fn between(start: PlanarPoint, end: PlanarPoint) -> Self {
        Self {
            points: vec![start, end],
        }
    }

    pub fn points(&self) -> &[PlanarPoint] {
        &self.points
    }

    pub fn start(&self) -> PlanarPoint {
        self.points[0]
    }

    pub fn end(&self) -> PlanarPoint {
        self.points[self.points.len() - 1]
    }

    /// `LINESTRING(x1 z1, x2 z2)`.
    pub fn to_wkt(&self) -> String {
        let coords: Vec<String> = self.points.iter().map(coord_pair).collect();
        format!("LINESTRING({})", coords.join(", "))
    }
}

/// `POINT(x z)`.
pub fn point_wkt(point: PlanarPoint) -> String {
    format!("POINT({})", coord_pair(&point))
}

fn coord_pair(p: &PlanarPoint) -> String {
    format!("{} {}", p.x, p.z)
}
