//! Observer-frame geometry helpers
//!
//! Plane/line primitives and a local observer frame for turning inertial
//! positions into elevation/azimuth as seen from a surface point. These are
//! standalone reporting aids; the integration loop never calls in here.

use crate::error::{SimError, SimResult};
use crate::simulation::states::NVec3;

/// Vector norms below this cannot define a direction.
const MIN_NORM: f64 = 1e-12;

fn unit(v: NVec3, what: &str) -> SimResult<NVec3> {
    let norm = v.norm();
    if norm < MIN_NORM {
        return Err(SimError::Configuration(format!(
            "{what} must be a non-zero vector"
        )));
    }
    Ok(v / norm)
}

/// Signed angle from `a` to `b`, with the sign taken against `orient`.
pub fn signed_angle(a: NVec3, b: NVec3, orient: NVec3) -> f64 {
    let cross = a.cross(&b);
    let angle = cross.norm().atan2(a.dot(&b));
    if orient.dot(&cross) < 0.0 {
        -angle
    } else {
        angle
    }
}

/// A line through `point` along unit `direction`.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub point: NVec3,
    pub direction: NVec3,
}

impl Line {
    /// Line through two distinct points.
    pub fn from_points(a: NVec3, b: NVec3) -> SimResult<Self> {
        Ok(Self {
            point: a,
            direction: unit(b - a, "line through coincident points")?,
        })
    }
}

/// A plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub point: NVec3,
    pub normal: NVec3,
}

impl Plane {
    /// Plane through a point, normal to a direction.
    pub fn new(point: NVec3, normal: NVec3) -> SimResult<Self> {
        Ok(Self {
            point,
            normal: unit(normal, "plane normal")?,
        })
    }

    /// Plane through three non-collinear points.
    pub fn from_points(a: NVec3, b: NVec3, c: NVec3) -> SimResult<Self> {
        Ok(Self {
            point: a,
            normal: unit((b - a).cross(&(c - a)), "normal of collinear points")?,
        })
    }

    /// Orthogonal projection of `p` onto the plane.
    pub fn project(&self, p: NVec3) -> NVec3 {
        p - self.normal * self.normal.dot(&(p - self.point))
    }

    /// Intersection of `line` with the plane; `None` when parallel.
    pub fn intersect(&self, line: &Line) -> Option<NVec3> {
        let along = self.normal.dot(&line.direction);
        if along.abs() < MIN_NORM {
            return None;
        }
        let s = self.normal.dot(&(self.point - line.point)) / along;
        Some(line.point + line.direction * s)
    }

    /// Signed angle to another plane, measured between normals.
    pub fn angle(&self, other: &Plane, orient: NVec3) -> f64 {
        signed_angle(self.normal, other.normal, orient)
    }
}

/// Observer frame anchored at a surface point: vertical away from `center`,
/// east along `pole x up`, north completing the right-handed triad.
#[derive(Debug, Clone, Copy)]
pub struct LocalFrame {
    pub origin: NVec3,
    up: NVec3,
    east: NVec3,
    north: NVec3,
}

impl LocalFrame {
    /// Build a frame at `origin` around `center`. `pole` fixes the notion
    /// of north and must not be parallel to the local vertical.
    pub fn new(origin: NVec3, center: NVec3, pole: NVec3) -> SimResult<Self> {
        let up = unit(origin - center, "observer placed at the center")?;
        let east = unit(pole.cross(&up), "pole parallel to the local vertical")?;
        let north = up.cross(&east);
        Ok(Self {
            origin,
            up,
            east,
            north,
        })
    }

    pub fn up(&self) -> NVec3 {
        self.up
    }

    /// Elevation of `target` above the local horizon, radians. A target
    /// coincident with the origin has no defined direction.
    pub fn elevation(&self, target: NVec3) -> SimResult<f64> {
        let rel = unit(target - self.origin, "target coincident with observer")?;
        Ok(self.up.dot(&rel).clamp(-1.0, 1.0).asin())
    }

    /// Azimuth of `target`, radians from north toward east.
    pub fn azimuth(&self, target: NVec3) -> SimResult<f64> {
        let rel = unit(target - self.origin, "target coincident with observer")?;
        Ok(self.east.dot(&rel).atan2(self.north.dot(&rel)))
    }
}
