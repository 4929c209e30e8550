//! World-space collision geometry: axis-aligned boxes for buildings and
//! flat surface records for ground/road classification. All queries are
//! pure; the index is built once at generation time and never mutated.

use bevy_ecs::prelude::Resource;
use glam::Vec3;

/// Downward ground probes start this far above the query position.
pub const GROUND_PROBE_RISE: f32 = 10.0;
/// Maximum probe travel; surfaces further below are not ground.
pub const GROUND_PROBE_RANGE: f32 = 30.0;
/// A road surface counts as "under the vehicle" within this distance.
pub const ROAD_SURFACE_TOLERANCE: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Grown by `margin` on every face.
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    fn contains_xz(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.z >= self.min.z && p.z <= self.max.z
    }
}

/// Classification of a walkable/drivable surface. Only [`SurfaceKind::Road`]
/// counts for on-road detection and red-light enforcement; sidewalks and
/// the ground plane merely carry the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Road,
    Sidewalk,
    Ground,
}

/// One flat surface; its top face (`aabb.max.y`) is what ground probes hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub aabb: Aabb,
    pub kind: SurfaceKind,
}

/// Result of a downward ground probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    /// World height of the surface top.
    pub height: f32,
    pub kind: SurfaceKind,
}

/// The authoritative collision geometry derived from city generation.
#[derive(Debug, Default, Clone, Resource)]
pub struct CollisionIndex {
    pub buildings: Vec<Aabb>,
    pub surfaces: Vec<Surface>,
}

impl CollisionIndex {
    /// True if `point` lies within any building box expanded by `margin`.
    pub fn is_inside_any_building(&self, point: Vec3, margin: f32) -> bool {
        self.buildings
            .iter()
            .any(|b| b.expanded(margin).contains_point(point))
    }

    /// True if `aabb` overlaps any building box.
    pub fn box_intersects_building(&self, aabb: &Aabb) -> bool {
        self.buildings.iter().any(|b| aabb.intersects(b))
    }

    /// Highest surface top under `position` within the probe window, or
    /// `None` when the vehicle is over nothing (e.g. pushed off-map).
    pub fn project_to_ground(&self, position: Vec3) -> Option<GroundHit> {
        self.probe(position, |_| true)
    }

    /// True if the nearest surface directly below is a road within
    /// [`ROAD_SURFACE_TOLERANCE`] of the vehicle position.
    pub fn is_on_road(&self, position: Vec3) -> bool {
        match self.probe(position, |s| s.kind == SurfaceKind::Road) {
            Some(hit) => position.y - hit.height < ROAD_SURFACE_TOLERANCE,
            None => false,
        }
    }

    fn probe<F>(&self, position: Vec3, filter: F) -> Option<GroundHit>
    where
        F: Fn(&Surface) -> bool,
    {
        let origin = position.y + GROUND_PROBE_RISE;
        self.surfaces
            .iter()
            .filter(|s| filter(s))
            .filter(|s| s.aabb.contains_xz(position))
            .map(|s| GroundHit {
                height: s.aabb.max.y,
                kind: s.kind,
            })
            .filter(|hit| hit.height <= origin && origin - hit.height <= GROUND_PROBE_RANGE)
            .max_by(|a, b| a.height.total_cmp(&b.height))
    }
}
