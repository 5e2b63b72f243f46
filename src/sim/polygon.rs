//! Dart-shaped polygon geometry shared by the craft and the missiles
//!
//! A polygon is four points around a center:
//! - vertex 0: the nose, which defines the heading
//! - vertices 1..=3: bottom-left, indented tail, bottom-right
//!
//! Center and vertices are only ever mutated together, so the shape never
//! drifts away from its center.

use glam::{Mat2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::DART_TAIL_INSET;
use crate::error::{SimResult, ensure_finite, ensure_positive};
use crate::heading_of;

/// Number of points in a dart
pub const DART_VERTEX_COUNT: usize = 4;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Aabb {
    /// Smallest box containing every point (`None` for an empty slice)
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let first = points.first()?;
        let mut aabb = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in &points[1..] {
            aabb.min_x = aabb.min_x.min(p.x);
            aabb.max_x = aabb.max_x.max(p.x);
            aabb.min_y = aabb.min_y.min(p.y);
            aabb.max_y = aabb.max_y.max(p.y);
        }
        Some(aabb)
    }

    /// Separating-axis test on both axes. Touching edges count as overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max_x < other.min_x
            || other.max_x < self.min_x
            || self.max_y < other.min_y
            || other.max_y < self.min_y)
    }

    /// Check if a point lies inside or on the box
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Box overlap as a free function (mirrors `Aabb::overlaps`)
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// A dart polygon with a scalar speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    size: f32,
    center: Vec2,
    vertices: [Vec2; DART_VERTEX_COUNT],
    speed: f32,
}

impl Polygon {
    /// Build a dart pointing up (toward -y) around `center`
    pub fn new(size: f32, center: Vec2, speed: f32) -> SimResult<Self> {
        let size = ensure_positive("size", size)?;
        ensure_finite("center.x", center.x)?;
        ensure_finite("center.y", center.y)?;
        let speed = ensure_finite("speed", speed)?;

        let vertices = [
            Vec2::new(center.x, center.y - size),
            Vec2::new(center.x - size, center.y + size),
            Vec2::new(center.x, center.y + size * DART_TAIL_INSET),
            Vec2::new(center.x + size, center.y + size),
        ];

        Ok(Self {
            size,
            center,
            vertices,
            speed,
        })
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2; DART_VERTEX_COUNT] {
        &self.vertices
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub(crate) fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Rotate every vertex about the center by `degrees`.
    ///
    /// Positive angles follow the standard rotation matrix, which turns the
    /// nose clockwise on screen since y grows downward. No clamping here.
    pub fn rotate(&mut self, degrees: f32) -> SimResult<()> {
        let degrees = ensure_finite("angle", degrees)?;
        let rotation = Mat2::from_angle(degrees.to_radians());
        let center = self.center;
        for v in &mut self.vertices {
            *v = center + rotation * (*v - center);
        }
        Ok(())
    }

    /// Shift center and vertices by the same offset
    pub fn translate(&mut self, offset: Vec2) {
        self.center += offset;
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Bounding box over all vertices
    pub fn bounding_box(&self) -> Aabb {
        let v = &self.vertices;
        Aabb {
            min_x: v.iter().map(|p| p.x).fold(f32::INFINITY, f32::min),
            max_x: v.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max),
            min_y: v.iter().map(|p| p.y).fold(f32::INFINITY, f32::min),
            max_y: v.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max),
        }
    }

    /// AABB collision between two polygons (may report false positives near corners)
    #[inline]
    pub fn is_colliding(&self, other: &Polygon) -> bool {
        self.bounding_box().overlaps(&other.bounding_box())
    }

    /// Vector from the center to the nose
    #[inline]
    pub fn forward_vector(&self) -> Vec2 {
        self.vertices[0] - self.center
    }

    /// Current heading in radians, in (-π, π]
    #[inline]
    pub fn heading(&self) -> f32 {
        heading_of(self.forward_vector())
    }
}
